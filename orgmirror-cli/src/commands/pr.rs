//! PR command - list open pull requests or check one out

use std::io::Write;

use orgmirror_core::{checkout_hint, CheckoutReport, FailurePolicy, Mirror, PullRequestListing};
use orgmirror_github::GitHubClient;

use super::Context;

pub async fn execute(mirror: &Mirror, ctx: &Context, number: Option<u64>) -> anyhow::Result<()> {
    // Fails before any request when the selection is not a single repository
    mirror.selection().single()?;

    let host = GitHubClient::from_config(mirror.config())?;

    match number {
        None => {
            let listing = mirror.list_pull_requests(&host).await?;
            print_listing(&listing, &mut std::io::stdout())?;
        }
        Some(number) => {
            let policy = ctx.policy(FailurePolicy::Strict);
            let report = mirror.checkout_pull_request(&host, number, policy).await?;
            print_checkout(&report, &mut std::io::stdout())?;
        }
    }

    Ok(())
}

/// Print each pull request with a command line to check it out
pub fn print_listing(listing: &PullRequestListing, out: &mut impl Write) -> std::io::Result<()> {
    if listing.pulls.is_empty() {
        writeln!(out, "No open pull requests for {}", listing.repo)?;
        return Ok(());
    }

    for pr in &listing.pulls {
        writeln!(out, "\nPull request #{} by {}", pr.number, pr.author_login)?;
        if let Some(created_at) = pr.created_at {
            writeln!(out, "Opened {}", created_at.format("%Y-%m-%d %H:%M UTC"))?;
        }
        if !pr.body.is_empty() {
            writeln!(out, "{}", pr.body)?;
        }
        writeln!(out, "\n\t{}", checkout_hint(&listing.repo, pr.number))?;
    }

    Ok(())
}

/// Print the checkout result, naming the step that stopped an incomplete one
pub fn print_checkout(report: &CheckoutReport, out: &mut impl Write) -> std::io::Result<()> {
    let pr = &report.pr;

    match &report.failed_step {
        None => writeln!(out, "\nChecked out #{} ({})", pr.number, pr.checkout_ref()),
        Some(step) => {
            writeln!(out, "\nCheckout of #{} stopped: `{}` failed", pr.number, step)?;
            if !report.completed.is_empty() {
                writeln!(out, "Already done, clean up manually if needed:")?;
                for done in &report.completed {
                    writeln!(out, "\t{}", done)?;
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgmirror_core::PullRequestSummary;

    #[test]
    fn test_print_listing() {
        let listing = PullRequestListing {
            repo: "nginx".to_string(),
            pulls: vec![PullRequestSummary {
                number: 5,
                author_login: "bob".to_string(),
                body: "Adds feature x".to_string(),
                head_label: "bob:feature-x".to_string(),
                head_git_url: None,
                created_at: None,
            }],
        };

        let mut out = Vec::new();
        print_listing(&listing, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Pull request #5 by bob"));
        assert!(out.contains("Adds feature x"));
        assert!(out.contains("orgmirror use:nginx pr:5"));
    }

    #[test]
    fn test_print_empty_listing() {
        let listing = PullRequestListing {
            repo: "nginx".to_string(),
            pulls: Vec::new(),
        };

        let mut out = Vec::new();
        print_listing(&listing, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No open pull requests for nginx\n");
    }

    fn summary() -> PullRequestSummary {
        PullRequestSummary {
            number: 5,
            author_login: "bob".to_string(),
            body: String::new(),
            head_label: "bob:feature-x".to_string(),
            head_git_url: Some("git@host:bob/a.git".to_string()),
            created_at: None,
        }
    }

    #[test]
    fn test_print_complete_checkout() {
        let report = CheckoutReport {
            pr: summary(),
            completed: vec!["git checkout bob/feature-x".to_string()],
            failed_step: None,
        };

        let mut out = Vec::new();
        print_checkout(&report, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nChecked out #5 (bob/feature-x)\n");
    }

    #[test]
    fn test_print_incomplete_checkout() {
        let report = CheckoutReport {
            pr: summary(),
            completed: vec!["git remote add bob git@host:bob/a.git".to_string()],
            failed_step: Some("git fetch bob".to_string()),
        };

        let mut out = Vec::new();
        print_checkout(&report, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(!out.contains("Checked out"));
        assert!(out.contains("`git fetch bob` failed"));
        assert!(out.contains("git remote add bob git@host:bob/a.git"));
    }
}
