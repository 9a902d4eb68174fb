//! Configuration management for orgmirror
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (ORGMIRROR_*)
//! 3. Config file (`./orgmirror.toml` unless another path is given)
//! 4. Default values

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{Error, Result};

/// Config file looked up relative to the current directory
pub const DEFAULT_CONFIG_FILE: &str = "orgmirror.toml";

/// Directory under the base dir that holds the mirrored repositories
const DEFAULT_REPO_DIR: &str = "repos";

/// On-disk shape of the config file
///
/// Kept separate from [`Config`] so that writing the file back only touches
/// what the user wrote, not resolved defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Organization whose repositories are mirrored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Root directory holding one subdirectory per repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_root: Option<PathBuf>,

    /// Repositories never cloned by sync
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub repo_exclude: BTreeSet<String>,

    /// Base URL of a GitHub-compatible API (e.g. GitHub Enterprise)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<Url>,

    /// Timeout applied to API requests
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub http_timeout: Option<Duration>,

    /// Keys orgmirror does not know about, preserved as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl ConfigFile {
    /// Read the config file, returning `None` when it does not exist
    pub fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|source| Error::Path {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map(Some).map_err(|e| {
            Error::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Write the config file, replacing any previous contents
    pub fn write(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| Error::Path {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Effective configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Organization whose repositories are mirrored
    pub organization: Option<String>,
    /// Absolute root directory of the local mirror
    pub repo_root: PathBuf,
    /// Repositories never cloned by sync
    pub repo_exclude: BTreeSet<String>,
    /// Base URL of a GitHub-compatible API
    pub api_base: Option<Url>,
    /// Timeout applied to API requests
    pub http_timeout: Option<Duration>,
    /// Unrecognized keys from the config file
    pub extra: BTreeMap<String, toml::Value>,
}

impl Config {
    /// Build the configuration from a parsed file and the directory it lives in
    pub fn from_file(file: ConfigFile, base_dir: &Path) -> Self {
        for key in file.extra.keys() {
            debug!(key = %key, "Keeping unrecognized config key");
        }

        let repo_root = match file.repo_root {
            Some(root) => resolve_path(&root, base_dir),
            None => base_dir.join(DEFAULT_REPO_DIR),
        };

        Self {
            organization: file.organization.filter(|org| !org.trim().is_empty()),
            repo_root,
            repo_exclude: file.repo_exclude,
            api_base: file.api_base,
            http_timeout: file.http_timeout,
            extra: file.extra,
        }
    }

    /// Load configuration from `path`
    ///
    /// Returns defaults if the file doesn't exist; a file that exists but
    /// does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let base_dir = base_dir_of(path)?;

        let file = match ConfigFile::read(path)? {
            Some(file) => {
                debug!(path = %path.display(), "Loaded config file");
                file
            }
            None => {
                debug!(path = %path.display(), "No config file, using defaults");
                ConfigFile::default()
            }
        };

        Ok(Self::from_file(file, &base_dir))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - ORGMIRROR_ORG: organization name
    /// - ORGMIRROR_REPO_ROOT: root directory of the mirror
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(org) = std::env::var("ORGMIRROR_ORG") {
            if !org.trim().is_empty() {
                self.organization = Some(org);
            }
        }

        if let Ok(root) = std::env::var("ORGMIRROR_REPO_ROOT") {
            if !root.is_empty() {
                self.repo_root = expand_home(Path::new(&root));
            }
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        organization: Option<String>,
        repo_root: Option<PathBuf>,
    ) -> Self {
        if let Some(org) = organization {
            self.organization = Some(org);
        }

        if let Some(root) = repo_root {
            self.repo_root = expand_home(&root);
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        path: &Path,
        organization: Option<String>,
        repo_root: Option<PathBuf>,
    ) -> Result<Self> {
        Ok(Self::load(path)?
            .with_env_overrides()
            .with_cli_overrides(organization, repo_root))
    }

    /// Create the repository root if it does not exist yet
    pub fn ensure_repo_root(&self) -> Result<()> {
        if !self.repo_root.is_dir() {
            debug!(path = %self.repo_root.display(), "Creating repository root");
        }
        std::fs::create_dir_all(&self.repo_root).map_err(|source| Error::Path {
            path: self.repo_root.clone(),
            source,
        })
    }

    /// The configured organization, or an error telling the user how to set it
    pub fn require_organization(&self) -> Result<&str> {
        self.organization.as_deref().ok_or_else(|| {
            Error::Config(
                "No organization configured. Run `orgmirror setup` or pass --org".to_string(),
            )
        })
    }

    /// Record the organization and write it to the config file at `path`
    ///
    /// Everything else in an existing file is written back unchanged.
    pub fn persist_organization(&mut self, path: &Path, organization: &str) -> Result<()> {
        let organization = organization.trim();
        if organization.is_empty() {
            return Err(Error::Config("Organization name cannot be empty".to_string()));
        }

        let mut file = ConfigFile::read(path)?.unwrap_or_default();
        file.organization = Some(organization.to_string());
        file.write(path)?;

        debug!(path = %path.display(), organization, "Saved organization");
        self.organization = Some(organization.to_string());
        Ok(())
    }
}

/// Directory the config file lives in, as an absolute path
fn base_dir_of(path: &Path) -> Result<PathBuf> {
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    if parent.is_absolute() {
        Ok(parent.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(parent))
    }
}

fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    let path = expand_home(path);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

/// Expand a leading `~` to the user's home directory
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
