use std::collections::BTreeMap;

use crate::models::{Author, CommitId, RepoCommits, RepoId};

#[derive(Debug, Default)]
pub struct AuthorRegistry {
    authors: BTreeMap<String, Author>,
}

impl AuthorRegistry {
    /// Append `commits` to `name`'s list for `repo`. Empty lists leave no trace.
    pub fn record(&mut self, name: &str, repo: RepoId, commits: Vec<CommitId>) {
        if commits.is_empty() {
            return;
        }

        let author = self
            .authors
            .entry(name.to_string())
            .or_insert_with(|| Author::new(name));

        match author.commits.iter_mut().find(|entry| entry.repo == repo) {
            Some(entry) => {
                for commit in commits {
                    if !entry.commits.contains(&commit) {
                        entry.commits.push(commit);
                    }
                }
            }
            None => author.commits.push(RepoCommits { repo, commits }),
        }
    }

    pub fn find(&self, name: &str) -> Option<&Author> {
        self.authors.get(name)
    }

    /// All authors, ordered by name.
    pub fn all(&self) -> Vec<&Author> {
        self.authors.values().collect()
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}
