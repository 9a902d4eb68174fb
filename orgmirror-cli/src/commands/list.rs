//! Ls and config commands - show the mirror, the selection and the configuration

use orgmirror_core::Mirror;

use super::Context;

/// Print every mirrored repository with its branch and path, marking the
/// selected ones with `*`
pub fn execute(mirror: &Mirror) {
    if mirror.catalog().is_empty() {
        println!("No repositories in {}", mirror.config().repo_root.display());
        return;
    }

    for name in mirror.catalog().names() {
        let Some(entry) = mirror.catalog().get(name) else {
            continue;
        };

        let marker = if mirror.selection().contains(name) { '*' } else { ' ' };
        let branch = entry
            .current_branch()
            .unwrap_or_else(|| "-".to_string());
        println!("{} {:<30} {:<20} {}", marker, name, branch, entry.path.display());
    }

    println!();
    println!(
        "{} of {} repositories selected",
        mirror.selection().len(),
        mirror.catalog().len()
    );
}

pub fn show_config(mirror: &Mirror, ctx: &Context) {
    let config = mirror.config();

    println!("orgmirror Configuration");
    println!("=======================");
    println!();
    println!(
        "  organization: {}",
        config.organization.as_deref().unwrap_or("(not set)")
    );
    println!("  repo_root: {}", config.repo_root.display());
    println!(
        "  repo_exclude: {}",
        if config.repo_exclude.is_empty() {
            "(none)".to_string()
        } else {
            config
                .repo_exclude
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        }
    );
    println!(
        "  api_base: {}",
        config
            .api_base
            .as_ref()
            .map(|url| url.to_string())
            .unwrap_or_else(|| orgmirror_github::DEFAULT_API_BASE.to_string())
    );
    if let Some(timeout) = config.http_timeout {
        println!("  http_timeout: {:?}", timeout);
    }
    for key in config.extra.keys() {
        println!("  {} (unrecognized, kept)", key);
    }
    println!();

    println!("Config file: {}", ctx.config_path.display());
    if ctx.config_path.exists() {
        println!("  (exists)");
    } else {
        println!("  (not found - using defaults)");
    }
}
