//! orgmirror GitHub - GitHub integration for orgmirror
//!
//! Implements [`orgmirror_core::RepoHost`] over the GitHub REST API: listing
//! an organization's repositories and a repository's open pull requests.

mod client;
mod error;
mod pr;
mod repos;

pub use client::{GitHubClient, DEFAULT_API_BASE};
pub use error::{Error, Result};
