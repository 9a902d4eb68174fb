//! Cloning an organization's repositories into the mirror

use std::io::Write;

use tracing::{debug, info};

use crate::catalog::RepositoryEntry;
use crate::exec::{CommandSpec, FailurePolicy};
use crate::git::repo_name_from_url;
use crate::host::RepoHost;
use crate::mirror::Mirror;
use crate::Result;

/// What a sync did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Repositories cloned by this run
    pub cloned: Vec<String>,
    /// Repositories skipped because they are in `repo_exclude`
    pub excluded: Vec<String>,
    /// Repositories whose clone failed (only with [`FailurePolicy::WarnOnly`])
    pub failed: Vec<String>,
    /// Open issue count of every listed repository
    pub open_issues: Vec<(String, u32)>,
}

impl Mirror {
    /// Clone every repository of the configured organization that is not
    /// already mirrored or excluded
    ///
    /// Freshly cloned repositories are added to the catalog, but not to
    /// the current selection.
    pub async fn sync(
        &mut self,
        host: &dyn RepoHost,
        policy: FailurePolicy,
        out: &mut dyn Write,
    ) -> Result<SyncReport> {
        let org = self.config.require_organization()?.to_string();
        let remote = host.list_org_repos(&org).await?;

        info!(org = %org, count = remote.len(), "Listed organization repositories");

        let mut report = SyncReport::default();
        for repo in remote {
            let name = repo_name_from_url(&repo.ssh_url)?;

            if self.config.repo_exclude.contains(&name) {
                debug!(repo = %name, "Excluded, not cloning");
                report.excluded.push(name.clone());
            } else if !self.catalog.contains(&name) {
                writeln!(out, "\nCloning {}", name)?;
                out.flush()?;

                let root = self.config.repo_root.clone();
                let clone = CommandSpec::git(["clone", repo.ssh_url.as_str()]);
                let outcome = self.executor.run(&clone, &root, policy)?;

                if outcome.success() {
                    self.catalog.insert(RepositoryEntry {
                        path: root.join(&name),
                        name: name.clone(),
                    });
                    report.cloned.push(name.clone());
                } else {
                    report.failed.push(name.clone());
                }
            }

            writeln!(
                out,
                "{} has {} open issues",
                repo.name, repo.open_issues_count
            )?;
            report
                .open_issues
                .push((repo.name.clone(), repo.open_issues_count));
        }

        Ok(report)
    }
}
