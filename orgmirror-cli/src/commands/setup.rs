//! Setup command - clone the organization's missing repositories

use std::io::{BufRead, Write};

use anyhow::Context as _;
use orgmirror_core::{FailurePolicy, Mirror};
use orgmirror_github::GitHubClient;

use super::Context;

/// Run the sync, asking for the organization first if none is configured
pub async fn execute(mirror: &mut Mirror, ctx: &Context) -> anyhow::Result<()> {
    if mirror.config().organization.is_none() {
        let stdin = std::io::stdin();
        let org = prompt_organization(&mut stdin.lock(), &mut std::io::stdout())?;
        mirror
            .config_mut()
            .persist_organization(&ctx.config_path, &org)?;
        println!("Saved organization to {}", ctx.config_path.display());
    }

    let host = GitHubClient::from_config(mirror.config())?;
    let policy = ctx.policy(FailurePolicy::Strict);

    let mut stdout = std::io::stdout();
    let report = mirror.sync(&host, policy, &mut stdout).await?;

    if !report.failed.is_empty() {
        println!("\nFailed to clone: {}", report.failed.join(", "));
    }
    println!("\nCloned {} repositories", report.cloned.len());

    Ok(())
}

/// Ask for the organization name until a non-empty one is given
pub fn prompt_organization(input: &mut impl BufRead, out: &mut impl Write) -> anyhow::Result<String> {
    loop {
        write!(out, "GitHub organization: ")?;
        out.flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read organization name")?;
        if read == 0 {
            anyhow::bail!("No organization given; set `organization` in the config file or pass --org");
        }

        let org = line.trim();
        if !org.is_empty() {
            return Ok(org.to_string());
        }
    }
}
