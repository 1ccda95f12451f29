use super::{CommitId, RepoId};

/// Someone with at least one commit in a resolved range.
#[derive(Debug, Clone)]
pub struct Author {
    pub name: String,
    /// Per-repository commits, oldest first, repositories in first-recorded order.
    pub commits: Vec<RepoCommits>,
}

#[derive(Debug, Clone)]
pub struct RepoCommits {
    pub repo: RepoId,
    pub commits: Vec<CommitId>,
}

impl Author {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            commits: Vec::new(),
        }
    }

    pub fn commits_in(&self, repo: RepoId) -> Option<&[CommitId]> {
        self.commits
            .iter()
            .find(|entry| entry.repo == repo)
            .map(|entry| entry.commits.as_slice())
    }

    pub fn commit_count(&self) -> usize {
        self.commits.iter().map(|entry| entry.commits.len()).sum()
    }
}
