use std::path::PathBuf;

use super::{CommitId, RepoId};

/// A working tree taking part in one diff run, keyed by its canonical path.
#[derive(Debug, Clone)]
pub struct Repository {
    pub id: RepoId,
    pub path: PathBuf,
    pub owner: String,
    pub name: String,
    /// Web root, always on github.com regardless of the remote's host.
    pub url: String,
    pub submodules: Vec<SubmoduleLink>,
    /// Non-owning back-reference, only used to locate the parent checkout.
    pub parent: Option<RepoId>,
    pub from: Option<Revision>,
    pub to: Option<Revision>,
}

/// A submodule mounted at `path` (relative to the parent root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleLink {
    pub path: String,
    pub repo: RepoId,
}

/// A resolved end of the range together with the label it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub label: String,
    pub commit: CommitId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    From,
    To,
}

impl Repository {
    pub fn revision(&self, phase: Phase) -> Option<&Revision> {
        match phase {
            Phase::From => self.from.as_ref(),
            Phase::To => self.to.as_ref(),
        }
    }

    pub fn set_revision(&mut self, phase: Phase, revision: Revision) {
        match phase {
            Phase::From => self.from = Some(revision),
            Phase::To => self.to = Some(revision),
        }
    }

    pub fn commit_url(&self, long_hash: &str) -> String {
        format!("{}/commit/{}", self.url, long_hash)
    }

    pub fn tree_url(&self, hash: &str) -> String {
        format!("{}/tree/{}", self.url, hash)
    }

    pub fn compare_url(&self, from: &str, to: &str) -> String {
        format!("{}/compare/{}...{}", self.url, from, to)
    }
}
