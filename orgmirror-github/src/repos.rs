//! Organization repository listing

use orgmirror_core::RemoteRepository;
use serde::Deserialize;
use tracing::info;

use crate::{Error, GitHubClient, Result};

/// Fields of `GET /orgs/{org}/repos` entries that orgmirror uses
#[derive(Debug, Deserialize)]
struct OrgRepository {
    name: String,
    ssh_url: Option<String>,
    #[serde(default)]
    open_issues_count: u32,
}

impl TryFrom<OrgRepository> for RemoteRepository {
    type Error = Error;

    fn try_from(repo: OrgRepository) -> Result<Self> {
        let ssh_url = repo
            .ssh_url
            .ok_or_else(|| Error::Parse(format!("repository {} has no ssh_url", repo.name)))?;

        Ok(RemoteRepository {
            name: repo.name,
            ssh_url,
            open_issues_count: repo.open_issues_count,
        })
    }
}

fn into_remote(repos: Vec<OrgRepository>) -> Result<Vec<RemoteRepository>> {
    repos.into_iter().map(RemoteRepository::try_from).collect()
}

impl GitHubClient {
    /// List the repositories of an organization (first page only)
    pub async fn org_repositories(&self, org: &str) -> Result<Vec<RemoteRepository>> {
        let route = format!("/orgs/{}/repos", org);
        let repos: Vec<OrgRepository> = self.get_json(&route, None::<&()>).await?;
        let repos = into_remote(repos)?;

        info!(org, count = repos.len(), "Fetched organization repositories");
        Ok(repos)
    }
}
