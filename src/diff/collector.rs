//! Commit collection over resolved ranges.
//!
//! For one repository: find every author in `from..to`, list each author's
//! non-merge commits oldest first, and file them in the `AuthorRegistry`.
//! Then descend into the submodules whose pinned commit moved; submodules
//! pinned at the same commit on both ends are skipped without a single query.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, Result};
use crate::git::{LogQuery, VersionControl};
use crate::models::{CommitDetails, CommitId, RepoId};
use crate::registry::Registry;

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("escape pattern is valid"));

pub struct CommitRangeCollector<'a> {
    vcs: &'a dyn VersionControl,
}

impl<'a> CommitRangeCollector<'a> {
    pub fn new(vcs: &'a dyn VersionControl) -> Self {
        Self { vcs }
    }

    pub fn collect(&self, registry: &mut Registry, repo: RepoId) -> Result<()> {
        let (from, to) = range_of(registry, repo)?;
        let (name, path) = {
            let repository = registry.repositories.get(repo);
            (repository.name.clone(), repository.path.clone())
        };

        {
            let tree = self.vcs.open(&path)?;
            let authors: BTreeSet<String> = tree
                .log_range(&LogQuery::range(&from, &to))?
                .into_iter()
                .map(|entry| entry.author)
                .collect();
            tracing::debug!("{}: {} author(s) in {}..{}", name, authors.len(), from, to);

            for author in authors {
                let query = LogQuery::range(&from, &to)
                    .by_author(&author)
                    .no_merges()
                    .oldest_first();
                let commits: Vec<CommitId> = tree
                    .log_range(&query)?
                    .into_iter()
                    .map(|entry| {
                        let id = registry.commits.get_or_create(&entry.hash, repo);
                        registry.commits.describe(
                            id,
                            CommitDetails {
                                subject: sanitize_subject(&entry.subject),
                                author: entry.author,
                            },
                        );
                        id
                    })
                    .collect();
                registry.authors.record(&author, repo, commits);
            }
        }

        let links = registry.repositories.get(repo).submodules.clone();
        for link in links {
            let submodule = registry.repositories.get(link.repo);
            let moved = match (&submodule.from, &submodule.to) {
                (Some(from), Some(to)) => from.commit != to.commit,
                _ => false,
            };
            if !moved {
                tracing::debug!("Submodule {} unchanged, skipping", link.path);
                continue;
            }
            self.collect(registry, link.repo)?;
        }

        Ok(())
    }

    /// The newest non-merge commit of the range, regardless of author.
    pub fn last_commit(&self, registry: &mut Registry, repo: RepoId) -> Result<Option<CommitId>> {
        let (from, to) = range_of(registry, repo)?;
        let path = registry.repositories.get(repo).path.clone();
        let tree = self.vcs.open(&path)?;

        let query = LogQuery::range(&from, &to).no_merges().limit(1);
        let last = tree.log_range(&query)?.into_iter().next().map(|entry| {
            let id = registry.commits.get_or_create(&entry.hash, repo);
            registry.commits.describe(
                id,
                CommitDetails {
                    subject: sanitize_subject(&entry.subject),
                    author: entry.author,
                },
            );
            id
        });

        Ok(last)
    }
}

fn range_of(registry: &Registry, repo: RepoId) -> Result<(String, String)> {
    let repository = registry.repositories.get(repo);
    match (&repository.from, &repository.to) {
        (Some(from), Some(to)) => Ok((
            registry.commits.get(from.commit).long_hash.clone(),
            registry.commits.get(to.commit).long_hash.clone(),
        )),
        _ => Err(AppError::RangeNotResolved(repository.name.clone())),
    }
}

/// Plain-text subject: terminal escape sequences and control characters removed.
pub fn sanitize_subject(subject: &str) -> String {
    ANSI_ESCAPE
        .replace_all(subject, "")
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}
