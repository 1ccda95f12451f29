//! Revision resolution.
//!
//! Turns a target/source label into a concrete commit in the top-level
//! repository and records, for every submodule, the commit its parent's tree
//! pins at that point. Submodules are never checked out here: nested pointers
//! are read from each submodule's own object database at the pinned commit.

use crate::error::Result;
use crate::git::{VersionControl, WorkTree};
use crate::models::{CommitId, Phase, RepoId, Revision, short_hash};
use crate::registry::Registry;

pub struct RevisionResolver<'a> {
    vcs: &'a dyn VersionControl,
}

impl<'a> RevisionResolver<'a> {
    pub fn new(vcs: &'a dyn VersionControl) -> Self {
        Self { vcs }
    }

    /// Resolve `target` as the range start and `source` as its end, then put
    /// the working tree back on whatever it was on before, whether or not
    /// resolution succeeded.
    pub fn resolve_range(
        &self,
        registry: &mut Registry,
        repo: RepoId,
        target: &str,
        source: &str,
    ) -> Result<()> {
        let path = registry.repositories.get(repo).path.clone();
        let tree = self.vcs.open(&path)?;
        let original = tree.current_ref()?;

        let outcome = self
            .resolve_in(tree.as_ref(), registry, repo, target, Phase::From)
            .and_then(|_| self.resolve_in(tree.as_ref(), registry, repo, source, Phase::To));

        tracing::debug!("Restoring {} to {}", path.display(), original);
        let restored = tree.checkout(&original);

        outcome?;
        restored
    }

    /// Resolve a single label for `phase`. Resolving the same label twice
    /// returns the recorded commit without touching the working tree.
    pub fn resolve(
        &self,
        registry: &mut Registry,
        repo: RepoId,
        label: &str,
        phase: Phase,
    ) -> Result<CommitId> {
        let path = registry.repositories.get(repo).path.clone();
        let tree = self.vcs.open(&path)?;
        self.resolve_in(tree.as_ref(), registry, repo, label, phase)
    }

    fn resolve_in(
        &self,
        tree: &dyn WorkTree,
        registry: &mut Registry,
        repo: RepoId,
        label: &str,
        phase: Phase,
    ) -> Result<CommitId> {
        if let Some(revision) = registry.repositories.get(repo).revision(phase)
            && revision.label == label
        {
            return Ok(revision.commit);
        }

        // Checked for every label: `20240101` may be a tag as well as a hash prefix.
        let revision = if tree.has_tag(label)? {
            let hash = tree.resolve_tag_to_commit(label)?;
            tracing::debug!("Tag {} points at {}", label, short_hash(&hash));
            short_hash(&hash).to_string()
        } else {
            label.to_string()
        };

        tree.checkout(&revision)?;
        if let Err(e) = tree.pull() {
            tracing::warn!("Pull after checking out {} failed: {}", revision, e);
        }

        let head = tree.head_commit()?;
        let commit = registry.commits.get_or_create(&head, repo);
        registry.repositories.get_mut(repo).set_revision(
            phase,
            Revision {
                label: label.to_string(),
                commit,
            },
        );
        tracing::info!(
            "{:?} of {} resolved to {}",
            phase,
            registry.repositories.get(repo).name,
            short_hash(&head)
        );

        self.record_pointers(tree, registry, repo, None, phase)?;
        Ok(commit)
    }

    /// Record the pinned commit of each submodule of `repo`, as seen in
    /// `tree` at `at` (HEAD when `None`), and descend into nested submodules.
    fn record_pointers(
        &self,
        tree: &dyn WorkTree,
        registry: &mut Registry,
        repo: RepoId,
        at: Option<&str>,
        phase: Phase,
    ) -> Result<()> {
        let links = registry.repositories.get(repo).submodules.clone();
        if links.is_empty() {
            return Ok(());
        }

        let paths: Vec<String> = links.iter().map(|link| link.path.clone()).collect();
        let entries = tree.tree_entries(at, &paths)?;

        for link in links {
            let Some(entry) = entries.iter().find(|entry| entry.path == link.path) else {
                tracing::debug!("Submodule {} is absent at this revision", link.path);
                continue;
            };

            let commit = registry.commits.get_or_create(&entry.hash, link.repo);
            let submodule = registry.repositories.get_mut(link.repo);
            submodule.set_revision(
                phase,
                Revision {
                    label: entry.hash.clone(),
                    commit,
                },
            );
            tracing::debug!(
                "{:?} of submodule {} pinned at {}",
                phase,
                link.path,
                short_hash(&entry.hash)
            );

            if submodule.submodules.is_empty() {
                continue;
            }
            let submodule_path = submodule.path.clone();
            match self.vcs.open(&submodule_path) {
                Ok(nested) => self.record_pointers(
                    nested.as_ref(),
                    registry,
                    link.repo,
                    Some(&entry.hash),
                    phase,
                )?,
                Err(e) => tracing::warn!(
                    "Skipping nested submodules of {}: {}",
                    submodule_path.display(),
                    e
                ),
            }
        }

        Ok(())
    }
}
