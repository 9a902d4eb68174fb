//! orgmirror core - a local mirror of an organization's repositories
//!
//! This crate holds everything except the HTTP client and the command line:
//! configuration, the catalog of mirrored repositories, the active
//! selection, and the tasks that run over it (sync, pull requests and
//! shell broadcast).

pub mod broadcast;
pub mod catalog;
pub mod config;
pub mod error;
pub mod exec;
pub mod git;
pub mod host;
pub mod mirror;
pub mod pulls;
pub mod selection;
pub mod sync;

pub use broadcast::BroadcastReport;
pub use catalog::{Catalog, RepositoryEntry};
pub use config::{Config, ConfigFile, DEFAULT_CONFIG_FILE};
pub use error::{Error, Result};
pub use exec::{
    CommandOutcome, CommandRunner, CommandSpec, Executor, FailurePolicy, SystemRunner, WorkingDir,
};
pub use host::{PullRequestSummary, RemoteRepository, RepoHost};
pub use mirror::Mirror;
pub use pulls::{checkout_hint, CheckoutReport, PullRequestListing};
pub use selection::Selection;
pub use sync::SyncReport;
