use std::collections::HashMap;

use crate::models::{Commit, CommitDetails, CommitId, RepoId, short_hash};

#[derive(Debug, Default)]
pub struct CommitRegistry {
    commits: Vec<Commit>,
    index: HashMap<(String, RepoId), CommitId>,
}

impl CommitRegistry {
    /// One instance per (abbreviated hash, repository). A longer spelling of
    /// a known hash upgrades the stored full hash.
    pub fn get_or_create(&mut self, hash: &str, repo: RepoId) -> CommitId {
        let key = (short_hash(hash).to_string(), repo);
        if let Some(id) = self.index.get(&key).copied() {
            let commit = &mut self.commits[id.0];
            if hash.len() > commit.long_hash.len() && hash.starts_with(&commit.long_hash) {
                commit.long_hash = hash.to_string();
            }
            return id;
        }

        let id = CommitId(self.commits.len());
        self.commits.push(Commit::new(hash, repo));
        self.index.insert(key, id);
        id
    }

    /// Attach subject/author. The first description wins.
    pub fn describe(&mut self, id: CommitId, details: CommitDetails) {
        let commit = &mut self.commits[id.0];
        if commit.details.is_none() {
            commit.details = Some(details);
        }
    }

    pub fn find(&self, hash: &str, repo: RepoId) -> Option<CommitId> {
        self.index.get(&(short_hash(hash).to_string(), repo)).copied()
    }

    pub fn get(&self, id: CommitId) -> &Commit {
        &self.commits[id.0]
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}
