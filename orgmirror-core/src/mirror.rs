//! The local mirror: configuration, catalog and the active selection

use tracing::info;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::exec::Executor;
use crate::selection::Selection;
use crate::Result;

/// State shared by every task in one invocation
///
/// Built once at startup and passed to each task in turn; tasks run one
/// after another on the same value.
#[derive(Debug)]
pub struct Mirror {
    pub(crate) config: Config,
    pub(crate) catalog: Catalog,
    pub(crate) selection: Selection,
    pub(crate) executor: Executor,
}

impl Mirror {
    /// Create the repository root if needed, scan it and select everything
    pub fn open(config: Config) -> Result<Self> {
        config.ensure_repo_root()?;
        let catalog = Catalog::scan(&config.repo_root)?;

        info!(
            root = %config.repo_root.display(),
            repos = catalog.len(),
            "Opened mirror"
        );

        Ok(Self::new(config, catalog, Executor::default()))
    }

    /// Assemble a mirror from parts, selecting the whole catalog
    pub fn new(config: Config, catalog: Catalog, executor: Executor) -> Self {
        let selection = Selection::all(&catalog);
        Self {
            config,
            catalog,
            selection,
            executor,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access, used when the organization is established on first setup
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Narrow the selection to `names`; returns the names not in the catalog
    pub fn include<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        self.selection.include(&self.catalog, names)
    }

    /// Drop `names` from the selection; returns the names that were not selected
    pub fn exclude<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        self.selection.exclude(names)
    }
}
