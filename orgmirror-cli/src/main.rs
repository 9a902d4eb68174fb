//! orgmirror CLI - keep a local mirror of an organization's repositories
//!
//! Tasks run left to right against one selection, for example
//! `orgmirror use:nginx,redis sh:"git pull"` or `orgmirror use:nginx pr:12`.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use orgmirror_core::{Config, FailurePolicy, Mirror, DEFAULT_CONFIG_FILE};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{Context, Task};

/// Manage a local mirror of an organization's repositories
#[derive(Parser, Debug)]
#[command(name = "orgmirror")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Tasks: use:<names> (with), without:<names>, setup (clone), \
    pr[:<number>], sh:<command>, ls, config")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file
    #[arg(long, env = "ORGMIRROR_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Organization to mirror (overrides config and env)
    #[arg(long, env = "ORGMIRROR_ORG")]
    org: Option<String>,

    /// Root directory of the mirror (overrides config and env)
    #[arg(long, env = "ORGMIRROR_REPO_ROOT")]
    repo_root: Option<PathBuf>,

    /// What to do when a git or shell command fails: strict or warn
    /// (default: strict for setup and pr, warn for sh)
    #[arg(long, value_name = "POLICY")]
    on_error: Option<FailurePolicy>,

    /// Tasks to run in order
    #[arg(value_name = "TASK", required = true)]
    tasks: Vec<Task>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; selection warnings are visible by default
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::load_with_overrides(&cli.config, cli.org.clone(), cli.repo_root.clone())?;

    if cli.verbose {
        tracing::info!(
            organization = ?config.organization,
            repo_root = %config.repo_root.display(),
            "Configuration loaded"
        );
    }

    let mut mirror = Mirror::open(config)?;
    let ctx = Context {
        config_path: cli.config.clone(),
        on_error: cli.on_error,
    };

    for task in &cli.tasks {
        task.execute(&mut mirror, &ctx).await?;
    }

    Ok(())
}
