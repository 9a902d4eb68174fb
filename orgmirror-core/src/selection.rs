//! The active subset of the catalog that tasks operate on

use std::collections::BTreeSet;

use tracing::warn;

use crate::catalog::Catalog;
use crate::{Error, Result};

/// Repositories currently selected, always a subset of the catalog
///
/// Iteration is in name order, so output across repositories is stable
/// from one run to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: BTreeSet<String>,
}

impl Selection {
    /// Select every repository in the catalog
    pub fn all(catalog: &Catalog) -> Self {
        Self {
            names: catalog.names().map(str::to_string).collect(),
        }
    }

    /// Replace the selection with the given names that exist in the catalog
    ///
    /// Unknown names are reported and left out. Returns the rejected names.
    pub fn include<S: AsRef<str>>(&mut self, catalog: &Catalog, names: &[S]) -> Vec<String> {
        let mut selected = BTreeSet::new();
        let mut rejected = Vec::new();

        for name in names.iter().map(AsRef::as_ref) {
            if catalog.contains(name) {
                selected.insert(name.to_string());
            } else if !rejected.iter().any(|r| r == name) {
                warn!(repo = %name, "{} does not exist, omitting", name);
                rejected.push(name.to_string());
            }
        }

        self.names = selected;
        rejected
    }

    /// Remove the given names from the selection
    ///
    /// Names that are not selected are reported and skipped. Returns them.
    /// Repeating a name has the same effect as giving it once.
    pub fn exclude<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        let requested: BTreeSet<&str> = names.iter().map(AsRef::as_ref).collect();
        let mut missing = Vec::new();

        for name in requested {
            if !self.names.remove(name) {
                warn!(repo = %name, "{} is not selected, skipping", name);
                missing.push(name.to_string());
            }
        }

        missing
    }

    /// The single selected repository
    ///
    /// Tasks that act on exactly one repository call this before doing
    /// anything else.
    pub fn single(&self) -> Result<&str> {
        if self.names.len() == 1 {
            if let Some(name) = self.names.iter().next() {
                return Ok(name);
            }
        }
        Err(Error::SelectionCount(self.names.len()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Selected names in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RepositoryEntry;
    use std::path::PathBuf;

    fn catalog(names: &[&str]) -> Catalog {
        names
            .iter()
            .map(|name| RepositoryEntry {
                name: name.to_string(),
                path: PathBuf::from("/repos").join(name),
            })
            .collect()
    }

    fn selected(selection: &Selection) -> Vec<&str> {
        selection.iter().collect()
    }

    #[test]
    fn test_all_selects_catalog() {
        let catalog = catalog(&["redis", "nginx"]);
        let selection = Selection::all(&catalog);
        assert_eq!(selected(&selection), vec!["nginx", "redis"]);
    }

    #[test]
    fn test_include_known_name() {
        let catalog = catalog(&["nginx"]);
        let mut selection = Selection::all(&catalog);

        let rejected = selection.include(&catalog, &["nginx"]);
        assert!(rejected.is_empty());
        assert_eq!(selected(&selection), vec!["nginx"]);
    }

    #[test]
    fn test_include_unknown_name_empties_selection() {
        let catalog = catalog(&["nginx"]);
        let mut selection = Selection::all(&catalog);

        let rejected = selection.include(&catalog, &["missing"]);
        assert_eq!(rejected, vec!["missing"]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_include_is_intersection_with_catalog() {
        let catalog = catalog(&["nginx", "redis", "postgres"]);
        let mut selection = Selection::all(&catalog);

        let rejected = selection.include(&catalog, &["redis", "mysql", "nginx", "redis"]);
        assert_eq!(rejected, vec!["mysql"]);
        assert_eq!(selected(&selection), vec!["nginx", "redis"]);

        // Same input, same result
        let again = selection.include(&catalog, &["redis", "mysql", "nginx", "redis"]);
        assert_eq!(again, rejected);
        assert_eq!(selected(&selection), vec!["nginx", "redis"]);
    }

    #[test]
    fn test_include_replaces_previous_selection() {
        let catalog = catalog(&["nginx", "redis"]);
        let mut selection = Selection::default();

        selection.include(&catalog, &["nginx"]);
        selection.include(&catalog, &["redis"]);
        assert_eq!(selected(&selection), vec!["redis"]);
    }

    #[test]
    fn test_exclude_is_set_difference() {
        let catalog = catalog(&["a", "b", "c", "d"]);
        let mut forward = Selection::all(&catalog);
        let mut backward = Selection::all(&catalog);

        let missing = forward.exclude(&["c", "a", "c", "zzz"]);
        backward.exclude(&["zzz", "c", "a"]);

        assert_eq!(missing, vec!["zzz"]);
        assert_eq!(selected(&forward), vec!["b", "d"]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_exclude_reports_unselected_name() {
        let catalog = catalog(&["nginx", "redis"]);
        let mut selection = Selection::all(&catalog);
        selection.include(&catalog, &["nginx"]);

        let missing = selection.exclude(&["redis"]);
        assert_eq!(missing, vec!["redis"]);
        assert_eq!(selected(&selection), vec!["nginx"]);
    }

    #[test]
    fn test_single() {
        let catalog = catalog(&["nginx", "redis"]);
        let mut selection = Selection::all(&catalog);
        assert!(matches!(selection.single(), Err(Error::SelectionCount(2))));

        selection.include(&catalog, &["redis"]);
        assert_eq!(selection.single().unwrap(), "redis");

        selection.exclude(&["redis"]);
        assert!(matches!(selection.single(), Err(Error::SelectionCount(0))));
    }
}
