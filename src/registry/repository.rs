use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::git::{RemoteInfo, VersionControl, is_relative_url, parse_remote_url};
use crate::models::{RepoId, Repository, SubmoduleLink};

#[derive(Debug, Default)]
pub struct RepositoryRegistry {
    repositories: Vec<Repository>,
    by_path: HashMap<PathBuf, RepoId>,
}

impl RepositoryRegistry {
    /// Look up the repository at `path`, creating it (and, recursively, its
    /// declared submodules) on first sight. `remote_url` is only consulted on
    /// creation; without it the checkout's `origin` is read.
    pub fn get_or_create(
        &mut self,
        vcs: &dyn VersionControl,
        path: &Path,
        remote_url: Option<&str>,
    ) -> Result<RepoId> {
        self.find_or_create(vcs, path, remote_url, None)
    }

    fn find_or_create(
        &mut self,
        vcs: &dyn VersionControl,
        path: &Path,
        remote_url: Option<&str>,
        parent: Option<RepoId>,
    ) -> Result<RepoId> {
        let key = canonical_path(path);
        if let Some(id) = self.by_path.get(&key) {
            return Ok(*id);
        }

        let remote = self.remote_for(vcs, &key, remote_url, parent)?;

        let id = RepoId(self.repositories.len());
        tracing::debug!("Registered {}/{} at {}", remote.owner, remote.name, key.display());
        self.repositories.push(Repository {
            id,
            path: key.clone(),
            url: remote.web_url(),
            owner: remote.owner,
            name: remote.name,
            submodules: Vec::new(),
            parent,
            from: None,
            to: None,
        });
        self.by_path.insert(key.clone(), id);

        for declaration in vcs.declared_submodules(&key)? {
            let child = self.find_or_create(
                vcs,
                &key.join(&declaration.path),
                Some(&declaration.url),
                Some(id),
            )?;
            self.repositories[id.0].submodules.push(SubmoduleLink {
                path: declaration.path,
                repo: child,
            });
        }

        Ok(id)
    }

    /// The declared URL when it is absolute and parses. Otherwise the
    /// checkout's own `origin`, which git always stores absolute, and for an
    /// uninitialized submodule a relative URL joined onto the parent's remote.
    fn remote_for(
        &self,
        vcs: &dyn VersionControl,
        path: &Path,
        declared: Option<&str>,
        parent: Option<RepoId>,
    ) -> Result<RemoteInfo> {
        let Some(declared) = declared else {
            return parse_remote_url(&vcs.open(path)?.remote_url()?);
        };
        if !is_relative_url(declared)
            && let Ok(remote) = parse_remote_url(declared)
        {
            return Ok(remote);
        }

        let from_checkout = vcs
            .open(path)
            .and_then(|tree| tree.remote_url())
            .and_then(|url| parse_remote_url(&url));
        match (from_checkout, parent) {
            (Ok(remote), _) => Ok(remote),
            (Err(e), Some(parent)) if is_relative_url(declared) => {
                tracing::debug!("No usable origin in {}: {}", path.display(), e);
                let parent = &self.repositories[parent.0];
                RemoteInfo {
                    owner: parent.owner.clone(),
                    name: parent.name.clone(),
                }
                .join_relative(declared)
            }
            (Err(e), _) => {
                tracing::debug!("No usable origin in {}: {}", path.display(), e);
                Err(AppError::UnrecognizedRemoteFormat(declared.to_string()))
            }
        }
    }

    pub fn find(&self, path: &Path) -> Option<RepoId> {
        self.by_path.get(&canonical_path(path)).copied()
    }

    pub fn get(&self, id: RepoId) -> &Repository {
        &self.repositories[id.0]
    }

    pub fn get_mut(&mut self, id: RepoId) -> &mut Repository {
        &mut self.repositories[id.0]
    }

    pub fn all(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

fn canonical_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
