//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub API error on a specific route
    #[error("GET {route} failed: {source}")]
    Api {
        route: String,
        #[source]
        source: octocrab::Error,
    },

    /// Client construction error
    #[error("Failed to create GitHub client: {0}")]
    Client(String),

    /// The response did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<Error> for orgmirror_core::Error {
    fn from(err: Error) -> Self {
        orgmirror_core::Error::Remote(err.to_string())
    }
}
