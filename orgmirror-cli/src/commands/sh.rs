//! Sh command - run a shell command in every selected repository

use orgmirror_core::{FailurePolicy, Mirror};

use super::Context;

pub fn execute(mirror: &Mirror, ctx: &Context, command: &str) -> anyhow::Result<()> {
    if mirror.selection().is_empty() {
        println!("No repositories selected");
        return Ok(());
    }

    let policy = ctx.policy(FailurePolicy::WarnOnly);
    let report = mirror.broadcast(command, policy, &mut std::io::stdout())?;

    if !report.failed.is_empty() {
        println!();
        for (repo, code) in &report.failed {
            match code {
                Some(code) => println!("{}: exited with {}", repo, code),
                None => println!("{}: terminated by signal", repo),
            }
        }
    }

    Ok(())
}
