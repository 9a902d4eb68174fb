//! Locally mirrored repositories
//!
//! The catalog is the set of repositories present under the mirror root,
//! one per immediate subdirectory, keyed by directory name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::git::GitRepo;
use crate::{Error, Result};

/// A repository present in the local mirror
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEntry {
    /// Repository name (the directory name)
    pub name: String,
    /// Path of the repository's working directory
    pub path: PathBuf,
}

impl RepositoryEntry {
    /// Current branch of the repository, if it is a git checkout on a branch
    pub fn current_branch(&self) -> Option<String> {
        GitRepo::open(&self.path)
            .and_then(|repo| repo.current_branch())
            .unwrap_or_else(|e| {
                debug!(repo = %self.name, error = %e, "No branch information");
                None
            })
    }
}

/// Repositories found under the mirror root, keyed by name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, RepositoryEntry>,
}

impl Catalog {
    /// Scan the immediate subdirectories of `root`
    ///
    /// Nested directories are never visited. Plain files and names that are
    /// not valid UTF-8 are skipped.
    pub fn scan(root: &Path) -> Result<Self> {
        let read_dir = std::fs::read_dir(root).map_err(|source| Error::Path {
            path: root.to_path_buf(),
            source,
        })?;

        let mut catalog = Self::default();
        for entry in read_dir {
            let entry = entry.map_err(|source| Error::Path {
                path: root.to_path_buf(),
                source,
            })?;

            // Follows symlinks, so a linked checkout counts as a repository
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let Ok(name) = entry.file_name().into_string() else {
                debug!(path = %path.display(), "Skipping non UTF-8 directory name");
                continue;
            };

            catalog.insert(RepositoryEntry { name, path });
        }

        debug!(root = %root.display(), count = catalog.len(), "Scanned repository root");
        Ok(catalog)
    }

    /// Add or replace an entry
    pub fn insert(&mut self, entry: RepositoryEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    /// Look up a repository by name
    pub fn get(&self, name: &str) -> Option<&RepositoryEntry> {
        self.entries.get(name)
    }

    /// Look up a repository that must exist
    pub fn require(&self, name: &str) -> Result<&RepositoryEntry> {
        self.get(name)
            .ok_or_else(|| Error::Precondition(format!("{} is not in the local mirror", name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Repository names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<RepositoryEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = RepositoryEntry>>(iter: I) -> Self {
        let mut catalog = Self::default();
        for entry in iter {
            catalog.insert(entry);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::scan(dir.path()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_scan_one_level_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("nginx/src/nested")).unwrap();
        std::fs::create_dir(dir.path().join("redis")).unwrap();
        std::fs::write(dir.path().join("README"), "not a repo").unwrap();

        let catalog = Catalog::scan(dir.path()).unwrap();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["nginx", "redis"]);
        assert_eq!(catalog.get("nginx").unwrap().path, dir.path().join("nginx"));
        assert!(!catalog.contains("src"));
        assert!(!catalog.contains("nested"));
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = Catalog::scan(&missing).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_insert_and_require() {
        let mut catalog = Catalog::default();
        assert!(catalog.require("nginx").is_err());

        catalog.insert(RepositoryEntry {
            name: "nginx".to_string(),
            path: PathBuf::from("/repos/nginx"),
        });
        assert_eq!(catalog.require("nginx").unwrap().path, PathBuf::from("/repos/nginx"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_current_branch_of_plain_dir() {
        let dir = tempfile::tempdir().unwrap();
        let entry = RepositoryEntry {
            name: "plain".to_string(),
            path: dir.path().to_path_buf(),
        };
        assert_eq!(entry.current_branch(), None);
    }
}
