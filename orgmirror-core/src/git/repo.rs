//! Git repository inspection

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::{Error, Result};

/// A git repository wrapper for read-only queries
pub struct GitRepo {
    /// The underlying git2 repository
    repo: Repository,
    /// Path to the repository root
    root: PathBuf,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl GitRepo {
    /// Open the git repository rooted exactly at `path`
    ///
    /// Unlike discovery this never walks up to a parent directory, so a
    /// plain directory inside some other checkout is reported as not a repo.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                Error::Precondition(format!("Not a git repository: {}", path.display()))
            } else {
                Error::Other(format!("Git error in {}: {}", path.display(), e))
            }
        })?;

        let root = repo
            .workdir()
            .ok_or_else(|| {
                Error::Precondition(format!(
                    "Bare repositories are not supported: {}",
                    path.display()
                ))
            })?
            .to_path_buf();

        Ok(Self { repo, root })
    }

    /// Get the current branch name
    ///
    /// `None` for a detached or unborn HEAD.
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(Error::Other(format!("Failed to get HEAD: {}", e))),
        };

        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            Ok(None)
        }
    }
}
