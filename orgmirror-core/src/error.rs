//! Error types for orgmirror

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for orgmirror operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for orgmirror operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO error tied to a specific path
    #[error("IO error at {}: {source}", path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML serialization error while writing the config file
    #[error("Failed to serialize config: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// A task that works on a single repository ran with a different selection
    #[error("can only be run with one repository, {0} selected")]
    SelectionCount(usize),

    /// No unique open pull request carries the requested number
    #[error("PR #{number} not found in {repo}")]
    PrNotFound { repo: String, number: u64 },

    /// A precondition for an operation was not met
    #[error("{0}")]
    Precondition(String),

    /// A subprocess exited unsuccessfully
    #[error("`{command}` failed in {} ({})", dir.display(), exit_description(*code))]
    CommandFailed {
        command: String,
        dir: PathBuf,
        code: Option<i32>,
    },

    /// Remote repository host error (transport or malformed response)
    #[error("Remote error: {0}")]
    Remote(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
