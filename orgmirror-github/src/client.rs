//! GitHub API client using octocrab

use std::time::Duration;

use async_trait::async_trait;
use octocrab::Octocrab;
use orgmirror_core::{Config, PullRequestSummary, RemoteRepository, RepoHost};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::{Error, Result};

/// Public GitHub API
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Unauthenticated GitHub REST client
pub struct GitHubClient {
    client: Octocrab,
    base: String,
}

impl GitHubClient {
    /// Create a client for `api_base` (public GitHub when `None`)
    pub fn new(api_base: Option<&url::Url>, timeout: Option<Duration>) -> Result<Self> {
        let base = api_base
            .map(|url| url.as_str().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let client = Octocrab::builder()
            .base_uri(base.as_str())
            .map_err(|e| Error::Client(format!("invalid API base {}: {}", base, e)))?
            .set_connect_timeout(timeout)
            .set_read_timeout(timeout)
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;

        info!(base = %base, "Created GitHub client");

        Ok(Self { client, base })
    }

    /// Create a client from the `api_base` and `http_timeout` settings
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base.as_ref(), config.http_timeout)
    }

    /// Base URL requests are sent to
    pub fn base(&self) -> &str {
        &self.base
    }

    /// GET `route` and decode the JSON body
    pub(crate) async fn get_json<R, P>(&self, route: &str, parameters: Option<&P>) -> Result<R>
    where
        R: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        debug!(route, "GitHub request");

        self.client
            .get(route, parameters)
            .await
            .map_err(|source| Error::Api {
                route: route.to_string(),
                source,
            })
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RepoHost for GitHubClient {
    async fn list_org_repos(&self, org: &str) -> orgmirror_core::Result<Vec<RemoteRepository>> {
        Ok(self.org_repositories(org).await?)
    }

    async fn list_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> orgmirror_core::Result<Vec<PullRequestSummary>> {
        Ok(self.open_pull_requests(owner, repo).await?)
    }
}
