//! Listing and checking out pull requests of the selected repository

use tracing::info;

use crate::exec::{CommandSpec, FailurePolicy};
use crate::host::{PullRequestSummary, RepoHost};
use crate::mirror::Mirror;
use crate::{Error, Result};

/// Open pull requests of one repository
#[derive(Debug, Clone)]
pub struct PullRequestListing {
    /// Repository the pull requests belong to
    pub repo: String,
    /// Open pull requests, oldest first
    pub pulls: Vec<PullRequestSummary>,
}

/// Outcome of a pull request checkout
#[derive(Debug, Clone)]
pub struct CheckoutReport {
    /// The pull request that was checked out
    pub pr: PullRequestSummary,
    /// Steps that ran successfully, in order
    pub completed: Vec<String>,
    /// The step that failed and stopped the rest, only under
    /// [`FailurePolicy::WarnOnly`]
    pub failed_step: Option<String>,
}

impl CheckoutReport {
    /// Whether every step ran successfully
    pub fn is_complete(&self) -> bool {
        self.failed_step.is_none()
    }
}

/// Command line that checks out `number` in `repo`
pub fn checkout_hint(repo: &str, number: u64) -> String {
    format!("orgmirror use:{} pr:{}", repo, number)
}

impl Mirror {
    /// List the open pull requests of the single selected repository
    pub async fn list_pull_requests(&self, host: &dyn RepoHost) -> Result<PullRequestListing> {
        let repo = self.selection.single()?.to_string();
        let org = self.config.require_organization()?;

        let pulls = host.list_open_pull_requests(org, &repo).await?;
        info!(repo = %repo, count = pulls.len(), "Fetched open pull requests");

        Ok(PullRequestListing { repo, pulls })
    }

    /// Check out pull request `number` of the single selected repository
    ///
    /// Adds a remote named after the PR author, fetches it and checks out the
    /// head branch. The steps run in order and the first failure stops the
    /// rest, so a failed fetch leaves the remote in place.
    pub async fn checkout_pull_request(
        &self,
        host: &dyn RepoHost,
        number: u64,
        policy: FailurePolicy,
    ) -> Result<CheckoutReport> {
        let repo = self.selection.single()?.to_string();
        let org = self.config.require_organization()?;
        let entry = self.catalog.require(&repo)?;

        let pulls = host.list_open_pull_requests(org, &repo).await?;
        let mut matches = pulls.into_iter().filter(|pr| pr.number == number);

        let pr = match (matches.next(), matches.next()) {
            (Some(pr), None) => pr,
            _ => return Err(Error::PrNotFound { repo, number }),
        };

        let git_url = pr.head_git_url.as_deref().ok_or_else(|| {
            Error::Precondition(format!(
                "PR #{} in {} has no head repository (was the fork deleted?)",
                number, repo
            ))
        })?;

        info!(repo = %repo, number, author = %pr.author_login, "Checking out pull request");

        let remote = pr.author_login.as_str();
        let steps = [
            CommandSpec::git(["remote", "add", remote, git_url]),
            CommandSpec::git(["fetch", remote]),
            CommandSpec::git(["checkout".to_string(), pr.checkout_ref()]),
        ];

        let mut completed = Vec::new();
        let mut failed_step = None;
        for step in &steps {
            let outcome = self.executor.run(step, &entry.path, policy)?;
            if !outcome.success() {
                failed_step = Some(step.to_string());
                break;
            }
            completed.push(step.to_string());
        }

        Ok(CheckoutReport {
            pr,
            completed,
            failed_step,
        })
    }
}
