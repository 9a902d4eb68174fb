//! Abstraction over the hosted git service
//!
//! The REST client lives in `orgmirror-github`; everything in this crate
//! talks to it through [`RepoHost`] so it can be replaced in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::Result;

/// A repository as listed for an organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    /// Repository name as reported by the service
    pub name: String,
    /// SSH clone URL
    pub ssh_url: String,
    /// Number of open issues (pull requests included)
    pub open_issues_count: u32,
}

/// An open pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// PR number
    pub number: u64,
    /// Login of the PR author
    pub author_login: String,
    /// PR description, empty when none was given
    pub body: String,
    /// Head label in `owner:branch` form
    pub head_label: String,
    /// Git URL of the head repository, `None` if the fork was deleted
    pub head_git_url: Option<String>,
    /// When the PR was opened
    pub created_at: Option<DateTime<Utc>>,
}

impl PullRequestSummary {
    /// Branch to check out for this PR: the head label with the owner
    /// separator turned into a path separator (`bob:fix` -> `bob/fix`)
    pub fn checkout_ref(&self) -> String {
        self.head_label.replace(':', "/")
    }
}

/// Read access to repository and pull request metadata
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// List the repositories belonging to `org`
    async fn list_org_repos(&self, org: &str) -> Result<Vec<RemoteRepository>>;

    /// List open pull requests of `owner/repo`, oldest first
    async fn list_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<PullRequestSummary>>;
}
