//! Repository URL handling

use crate::{Error, Result};

/// Derive a repository's short name from its clone URL
///
/// Strips the protocol, host and owner, then the `.git` suffix:
/// - `git@github.com:owner/repo.git` -> `repo`
/// - `ssh://git@github.com/owner/repo.git` -> `repo`
/// - `https://github.com/owner/repo` -> `repo`
pub fn repo_name_from_url(input: &str) -> Result<String> {
    let input = input.trim();

    let path = if input.contains("://") {
        let url = url::Url::parse(input)
            .map_err(|e| Error::Remote(format!("Invalid clone URL {}: {}", input, e)))?;
        url.path().to_string()
    } else if let Some((_, path)) = input.split_once(':') {
        // scp-like syntax: user@host:owner/repo.git
        path.to_string()
    } else {
        input.to_string()
    };

    let last = path.rsplit('/').next().unwrap_or_default();
    let name = last.strip_suffix(".git").unwrap_or(last);

    if name.is_empty() {
        return Err(Error::Remote(format!(
            "Cannot derive a repository name from clone URL: {}",
            input
        )));
    }

    Ok(name.to_string())
}
