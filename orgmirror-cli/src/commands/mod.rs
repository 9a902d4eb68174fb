//! CLI task implementations

pub mod list;
pub mod pr;
pub mod setup;
pub mod sh;
pub mod task;

use std::path::PathBuf;

use orgmirror_core::{FailurePolicy, Mirror};

pub use task::Task;

/// Settings shared by every task of one invocation
#[derive(Debug, Clone)]
pub struct Context {
    /// Config file, written when the organization is first set
    pub config_path: PathBuf,
    /// Failure policy forced by `--on-error`, overriding each task's default
    pub on_error: Option<FailurePolicy>,
}

impl Context {
    /// The policy to use for a task whose default is `default`
    pub fn policy(&self, default: FailurePolicy) -> FailurePolicy {
        self.on_error.unwrap_or(default)
    }
}

impl Task {
    /// Execute the task against the mirror
    pub async fn execute(&self, mirror: &mut Mirror, ctx: &Context) -> anyhow::Result<()> {
        tracing::debug!(task = %self, "Running task");

        match self {
            Task::Use(names) => {
                mirror.include(names.as_slice());
            }
            Task::Without(names) => {
                mirror.exclude(names.as_slice());
            }
            Task::Setup => setup::execute(mirror, ctx).await?,
            Task::Pr(number) => pr::execute(mirror, ctx, *number).await?,
            Task::Sh(command) => sh::execute(mirror, ctx, command)?,
            Task::List => list::execute(mirror),
            Task::Config => list::show_config(mirror, ctx),
        }

        Ok(())
    }
}
