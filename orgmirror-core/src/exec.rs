//! Running git and shell commands inside repositories
//!
//! Every subprocess goes through a [`CommandRunner`]. The system runner
//! switches the process working directory with a [`WorkingDir`] guard for
//! the duration of the command; the [`Executor`] turns exit statuses into
//! errors or warnings according to a [`FailurePolicy`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::{Error, Result};

/// A single program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to run
    pub program: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// A `git` invocation
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git", args)
    }

    /// A command line interpreted by the platform shell
    pub fn shell(command_line: impl Into<String>) -> Self {
        #[cfg(windows)]
        let (program, flag) = ("cmd", "/C");
        #[cfg(not(windows))]
        let (program, flag) = ("sh", "-c");

        Self::new(program, [flag.to_string(), command_line.into()])
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a finished command exited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl CommandOutcome {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs commands in a given directory
pub trait CommandRunner: Send + Sync {
    /// Run `spec` with `workdir` as the working directory and wait for it
    ///
    /// Spawn failures are errors; a non-zero exit is reported through the
    /// returned outcome.
    fn run(&self, spec: &CommandSpec, workdir: &Path) -> Result<CommandOutcome>;
}

/// Runs real processes, inheriting stdio so output streams to the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec, workdir: &Path) -> Result<CommandOutcome> {
        let cwd = WorkingDir::enter(workdir)?;

        debug!(
            command = %spec,
            dir = %workdir.display(),
            from = %cwd.previous().display(),
            "Running command"
        );
        let status = Command::new(&spec.program)
            .args(&spec.args)
            .status()
            .map_err(|e| Error::Other(format!("Failed to run `{}`: {}", spec, e)))?;

        Ok(CommandOutcome {
            code: status.code(),
        })
    }
}

/// Changes the process working directory until dropped
///
/// The previous directory is restored on every exit path, including early
/// returns through `?` and unwinding panics.
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct WorkingDir {
    previous: PathBuf,
}

impl WorkingDir {
    pub fn enter(path: &Path) -> Result<Self> {
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(path).map_err(|source| Error::Path {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { previous })
    }

    /// Directory that will be restored
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            warn!(
                dir = %self.previous.display(),
                error = %e,
                "Failed to restore working directory"
            );
        }
    }
}

/// What to do when a command exits unsuccessfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the operation with an error
    Strict,
    /// Log a warning and carry on
    WarnOnly,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" | "abort" => Ok(Self::Strict),
            "warn" | "warn-only" | "continue" => Ok(Self::WarnOnly),
            other => Err(format!(
                "unknown failure policy '{}', expected 'strict' or 'warn'",
                other
            )),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::WarnOnly => write!(f, "warn"),
        }
    }
}

/// Runs commands and applies a failure policy to their exit status
pub struct Executor {
    runner: Box<dyn CommandRunner>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(SystemRunner)
    }
}

impl Executor {
    pub fn new(runner: impl CommandRunner + 'static) -> Self {
        Self {
            runner: Box::new(runner),
        }
    }

    /// Run `spec` in `workdir`
    ///
    /// Under [`FailurePolicy::Strict`] a non-zero exit becomes
    /// [`Error::CommandFailed`]; under [`FailurePolicy::WarnOnly`] it is
    /// logged and the outcome returned.
    pub fn run(
        &self,
        spec: &CommandSpec,
        workdir: &Path,
        policy: FailurePolicy,
    ) -> Result<CommandOutcome> {
        let outcome = self.runner.run(spec, workdir)?;

        if outcome.success() {
            return Ok(outcome);
        }

        match policy {
            FailurePolicy::Strict => Err(Error::CommandFailed {
                command: spec.to_string(),
                dir: workdir.to_path_buf(),
                code: outcome.code,
            }),
            FailurePolicy::WarnOnly => {
                warn!(
                    command = %spec,
                    dir = %workdir.display(),
                    code = ?outcome.code,
                    "Command failed, continuing"
                );
                Ok(outcome)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::testing::RecordingRunner;
    use super::*;

    // Tests that change the process working directory must not overlap
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_command_spec_display() {
        let spec = CommandSpec::git(["remote", "add", "bob", "git@host:bob/a.git"]);
        assert_eq!(spec.to_string(), "git remote add bob git@host:bob/a.git");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_shell_spec_keeps_command_line_whole() {
        let spec = CommandSpec::shell("git status && git log -1");
        assert_eq!(spec.program, "sh");
        assert_eq!(spec.args, vec!["-c", "git status && git log -1"]);
    }

    #[test]
    fn test_failure_policy_parse() {
        assert_eq!("strict".parse::<FailurePolicy>(), Ok(FailurePolicy::Strict));
        assert_eq!("WARN".parse::<FailurePolicy>(), Ok(FailurePolicy::WarnOnly));
        assert!("sometimes".parse::<FailurePolicy>().is_err());
    }

    #[test]
    fn test_strict_failure_is_error() {
        let runner = RecordingRunner::default().fail_on("fetch");
        let executor = Executor::new(runner.clone());

        let err = executor
            .run(
                &CommandSpec::git(["fetch", "bob"]),
                Path::new("/repos/a"),
                FailurePolicy::Strict,
            )
            .unwrap_err();

        match err {
            Error::CommandFailed { command, dir, code } => {
                assert_eq!(command, "git fetch bob");
                assert_eq!(dir, PathBuf::from("/repos/a"));
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_warn_only_failure_returns_outcome() {
        let runner = RecordingRunner::default().fail_on("make");
        let executor = Executor::new(runner.clone());

        let outcome = executor
            .run(&CommandSpec::shell("make"), Path::new("/repos/a"), FailurePolicy::WarnOnly)
            .unwrap();
        assert!(!outcome.success());
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_working_dir_restored_on_drop() {
        let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = std::env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();

        {
            let guard = WorkingDir::enter(dir.path()).unwrap();
            assert_eq!(guard.previous(), before);
            assert_eq!(
                std::env::current_dir().unwrap().canonicalize().unwrap(),
                dir.path().canonicalize().unwrap()
            );
        }

        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_working_dir_restored_on_error_path() {
        let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = std::env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();

        fn fails_inside(path: &Path) -> Result<()> {
            let _cwd = WorkingDir::enter(path)?;
            Err(Error::Other("boom".to_string()))
        }

        assert!(fails_inside(dir.path()).is_err());
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_working_dir_missing_target() {
        let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = std::env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let result = WorkingDir::enter(&dir.path().join("missing"));
        assert!(matches!(result, Err(Error::Path { .. })));
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_exit_codes() {
        let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = std::env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), "").unwrap();

        let ok = SystemRunner
            .run(&CommandSpec::shell("test -f marker"), dir.path())
            .unwrap();
        assert!(ok.success());

        let failed = SystemRunner
            .run(&CommandSpec::shell("exit 3"), dir.path())
            .unwrap();
        assert_eq!(failed.code, Some(3));

        assert_eq!(std::env::current_dir().unwrap(), before);
    }
}
