//! Running a shell command in every selected repository

use std::io::Write;

use tracing::info;

use crate::exec::{CommandSpec, FailurePolicy};
use crate::mirror::Mirror;
use crate::{Error, Result};

/// Result of running a command across the selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Repositories where the command succeeded
    pub succeeded: Vec<String>,
    /// Repositories where it failed, with the exit code
    pub failed: Vec<(String, Option<i32>)>,
}

impl Mirror {
    /// Run `command` through the shell in each selected repository, in
    /// selection order, printing the repository name before its output
    pub fn broadcast(
        &self,
        command: &str,
        policy: FailurePolicy,
        out: &mut dyn Write,
    ) -> Result<BroadcastReport> {
        if command.trim().is_empty() {
            return Err(Error::Precondition("No command given to run".to_string()));
        }

        let spec = CommandSpec::shell(command);
        let mut report = BroadcastReport::default();

        for name in self.selection.iter() {
            let entry = self.catalog.require(name)?;

            writeln!(out, "\n{}", name)?;
            out.flush()?;

            let outcome = self.executor.run(&spec, &entry.path, policy)?;
            if outcome.success() {
                report.succeeded.push(name.to_string());
            } else {
                report.failed.push((name.to_string(), outcome.code));
            }
        }

        info!(
            command,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "Broadcast finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::testing::mirror;

    #[test]
    fn test_runs_in_each_selected_repo() {
        let (mut mirror, runner) = mirror(None, &["c", "a", "b"]);
        mirror.exclude(&["b"]);
        let mut out = Vec::new();

        let report = mirror
            .broadcast("git pull", FailurePolicy::WarnOnly, &mut out)
            .unwrap();

        let root = mirror.config().repo_root.clone();
        let dirs: Vec<_> = runner.calls().into_iter().map(|(_, dir)| dir).collect();
        assert_eq!(dirs, vec![root.join("a"), root.join("c")]);
        assert_eq!(report.succeeded, vec!["a", "c"]);
        assert_eq!(String::from_utf8(out).unwrap(), "\na\n\nc\n");
    }

    #[test]
    fn test_warn_only_visits_every_repo() {
        let (mirror, runner) = mirror(None, &["a", "b", "c"]);
        let runner = runner.fail_on("make");

        let report = mirror
            .broadcast("make test", FailurePolicy::WarnOnly, &mut Vec::new())
            .unwrap();

        assert_eq!(runner.calls().len(), 3);
        assert_eq!(report.failed.len(), 3);
        assert_eq!(report.failed[0], ("a".to_string(), Some(1)));
    }

    #[test]
    fn test_strict_stops_at_first_failure() {
        let (mirror, runner) = mirror(None, &["a", "b", "c"]);
        let runner = runner.fail_on("make");

        let err = mirror
            .broadcast("make test", FailurePolicy::Strict, &mut Vec::new())
            .unwrap_err();

        assert!(matches!(err, Error::CommandFailed { .. }));
        assert!(err.to_string().contains("make test"));
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_empty_command_rejected() {
        let (mirror, runner) = mirror(None, &["a"]);

        assert!(mirror
            .broadcast("  ", FailurePolicy::WarnOnly, &mut Vec::new())
            .is_err());
        assert!(runner.calls().is_empty());
    }
}
