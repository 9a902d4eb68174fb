//! Open pull request listing

use chrono::{DateTime, Utc};
use orgmirror_core::PullRequestSummary;
use serde::Deserialize;
use tracing::info;

use crate::{Error, GitHubClient, Result};

#[derive(Debug, Deserialize)]
struct PullRequest {
    number: u64,
    body: Option<String>,
    user: Option<Account>,
    head: Head,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct Account {
    login: String,
}

#[derive(Debug, Deserialize)]
struct Head {
    label: Option<String>,
    repo: Option<HeadRepository>,
}

#[derive(Debug, Deserialize)]
struct HeadRepository {
    git_url: Option<String>,
}

impl TryFrom<PullRequest> for PullRequestSummary {
    type Error = Error;

    fn try_from(pr: PullRequest) -> Result<Self> {
        let author_login = pr
            .user
            .map(|user| user.login)
            .ok_or_else(|| Error::Parse(format!("PR #{} has no author", pr.number)))?;

        let head_label = pr
            .head
            .label
            .ok_or_else(|| Error::Parse(format!("PR #{} has no head label", pr.number)))?;

        Ok(PullRequestSummary {
            number: pr.number,
            author_login,
            body: pr.body.unwrap_or_default(),
            head_label,
            head_git_url: pr.head.repo.and_then(|repo| repo.git_url),
            created_at: pr.created_at,
        })
    }
}

fn into_summaries(pulls: Vec<PullRequest>) -> Result<Vec<PullRequestSummary>> {
    pulls.into_iter().map(PullRequestSummary::try_from).collect()
}

impl GitHubClient {
    /// List open PRs of `owner/repo`, oldest first (first page only)
    pub async fn open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<PullRequestSummary>> {
        let route = format!("/repos/{}/{}/pulls", owner, repo);
        let params = [("state", "open"), ("sort", "created"), ("direction", "asc")];

        let pulls: Vec<PullRequest> = self.get_json(&route, Some(&params)).await?;
        let pulls = into_summaries(pulls)?;

        info!(owner, repo, count = pulls.len(), "Fetched open pull requests");
        Ok(pulls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pull_requests() {
        let json = r#"[{
            "number": 5,
            "title": "Add feature x",
            "body": "Implements x",
            "state": "open",
            "created_at": "2024-03-01T12:00:00Z",
            "user": {"login": "bob", "id": 7},
            "head": {
                "label": "bob:feature-x",
                "ref": "feature-x",
                "repo": {"git_url": "git://github.com/bob/a.git"}
            }
        }]"#;

        let pulls: Vec<PullRequest> = serde_json::from_str(json).unwrap();
        let pulls = into_summaries(pulls).unwrap();

        assert_eq!(pulls.len(), 1);
        let pr = &pulls[0];
        assert_eq!(pr.number, 5);
        assert_eq!(pr.author_login, "bob");
        assert_eq!(pr.body, "Implements x");
        assert_eq!(pr.head_git_url.as_deref(), Some("git://github.com/bob/a.git"));
        assert_eq!(pr.checkout_ref(), "bob/feature-x");
        assert!(pr.created_at.is_some());
    }

    #[test]
    fn test_deleted_fork_and_empty_body() {
        let json = r#"[{
            "number": 9,
            "body": null,
            "user": {"login": "carol"},
            "head": {"label": "carol:fix", "repo": null}
        }]"#;

        let pulls = into_summaries(serde_json::from_str(json).unwrap()).unwrap();
        assert_eq!(pulls[0].body, "");
        assert_eq!(pulls[0].head_git_url, None);
    }

    #[test]
    fn test_missing_author_is_parse_error() {
        let json = r#"[{"number": 3, "user": null, "head": {"label": "x:y"}}]"#;

        let err = into_summaries(serde_json::from_str(json).unwrap()).unwrap_err();
        assert!(err.to_string().contains("#3"));
    }
}
