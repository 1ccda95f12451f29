//! In-memory `VersionControl` for unit tests.
//!
//! Each checkout has a linear history and a table of submodule pointers per
//! commit. Every call is recorded so tests can assert what was (not) asked of
//! a given checkout.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::git::gateway::{LogEntry, LogOrder, LogQuery, TreeEntry, VersionControl, WorkTree};
use crate::git::submodule::SubmoduleDeclaration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Checkout(String),
    Pull,
    HasTag(String),
    ResolveTag(String),
    LogRange(LogQuery),
    TreeEntries(Option<String>),
}

#[derive(Debug, Clone, Default)]
pub struct FakeCommit {
    pub hash: String,
    pub author: String,
    pub subject: String,
    pub merge: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeTree {
    pub remote_url: String,
    pub branch: String,
    /// HEAD, full hash.
    pub head: String,
    pub history: Vec<FakeCommit>,
    /// Branch or tag name -> full hash.
    pub refs: HashMap<String, String>,
    pub tags: HashMap<String, String>,
    /// Commit hash -> (submodule path -> pinned hash).
    pub pointers: HashMap<String, HashMap<String, String>>,
    pub submodules: Vec<SubmoduleDeclaration>,
    pub dirty: Vec<String>,
    pub user_name: Option<String>,
    /// Declared, but opening the checkout fails.
    pub uninitialized: bool,
}

impl FakeTree {
    pub fn new(remote_url: &str) -> Self {
        Self {
            remote_url: remote_url.to_string(),
            branch: "main".to_string(),
            ..Default::default()
        }
    }

    pub fn commit(mut self, hash: &str, author: &str, subject: &str) -> Self {
        self.history.push(FakeCommit {
            hash: hash.to_string(),
            author: author.to_string(),
            subject: subject.to_string(),
            merge: false,
        });
        self.head = hash.to_string();
        self.refs.insert(self.branch.clone(), hash.to_string());
        self
    }

    pub fn merge(mut self, hash: &str, author: &str) -> Self {
        self = self.commit(hash, author, "Merge branch 'feature'");
        if let Some(last) = self.history.last_mut() {
            last.merge = true;
        }
        self
    }

    pub fn tag(mut self, name: &str, hash: &str) -> Self {
        self.tags.insert(name.to_string(), hash.to_string());
        self
    }

    pub fn submodule(mut self, path: &str, url: &str) -> Self {
        self.submodules.push(SubmoduleDeclaration {
            path: path.to_string(),
            url: url.to_string(),
        });
        self.submodules.sort_by(|a, b| a.path.cmp(&b.path));
        self
    }

    pub fn pointer(mut self, commit: &str, path: &str, hash: &str) -> Self {
        self.pointers
            .entry(commit.to_string())
            .or_default()
            .insert(path.to_string(), hash.to_string());
        self
    }

    fn find(&self, revision: &str) -> Option<&FakeCommit> {
        let full = self
            .refs
            .get(revision)
            .or_else(|| self.tags.get(revision))
            .map(String::as_str)
            .unwrap_or(revision);
        self.history
            .iter()
            .find(|c| !full.is_empty() && c.hash.starts_with(full))
    }

    fn position(&self, revision: &str) -> Result<usize> {
        let commit = self
            .find(revision)
            .ok_or_else(|| AppError::RevisionNotFound(revision.to_string()))?;
        Ok(self
            .history
            .iter()
            .position(|c| c.hash == commit.hash)
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct FakeVcs {
    trees: RefCell<HashMap<PathBuf, FakeTree>>,
    calls: RefCell<Vec<(PathBuf, Call)>>,
}

impl FakeVcs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tree(self, path: &str, tree: FakeTree) -> Self {
        self.trees.borrow_mut().insert(PathBuf::from(path), tree);
        self
    }

    pub fn calls_for(&self, path: &str) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|(p, _)| p == Path::new(path))
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub fn range_queries_for(&self, path: &str) -> usize {
        self.calls_for(path)
            .iter()
            .filter(|call| matches!(call, Call::LogRange(_)))
            .count()
    }

    pub fn head_of(&self, path: &str) -> String {
        self.trees
            .borrow()
            .get(Path::new(path))
            .map(|t| t.head.clone())
            .unwrap_or_default()
    }
}

impl VersionControl for FakeVcs {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn WorkTree + 'a>> {
        if !self.trees.borrow().get(path).is_some_and(|t| !t.uninitialized) {
            return Err(AppError::NotARepository(path.to_string_lossy().to_string()));
        }
        Ok(Box::new(FakeWorkTree {
            vcs: self,
            path: path.to_path_buf(),
        }))
    }

    fn declared_submodules(&self, path: &Path) -> Result<Vec<SubmoduleDeclaration>> {
        Ok(self
            .trees
            .borrow()
            .get(path)
            .map(|t| t.submodules.clone())
            .unwrap_or_default())
    }
}

struct FakeWorkTree<'a> {
    vcs: &'a FakeVcs,
    path: PathBuf,
}

impl FakeWorkTree<'_> {
    fn record(&self, call: Call) {
        self.vcs.calls.borrow_mut().push((self.path.clone(), call));
    }

    fn with_tree<T>(&self, f: impl FnOnce(&mut FakeTree) -> Result<T>) -> Result<T> {
        let mut trees = self.vcs.trees.borrow_mut();
        let tree = trees
            .get_mut(&self.path)
            .ok_or_else(|| AppError::NotARepository(self.path.to_string_lossy().to_string()))?;
        f(tree)
    }
}

impl WorkTree for FakeWorkTree<'_> {
    fn path(&self) -> &Path {
        &self.path
    }

    fn current_ref(&self) -> Result<String> {
        self.with_tree(|t| {
            let on_branch = t.refs.get(&t.branch) == Some(&t.head);
            Ok(if on_branch { t.branch.clone() } else { t.head.clone() })
        })
    }

    fn checkout(&self, revision: &str) -> Result<()> {
        self.record(Call::Checkout(revision.to_string()));
        self.with_tree(|t| {
            let hash = t
                .find(revision)
                .map(|c| c.hash.clone())
                .ok_or_else(|| AppError::RevisionNotFound(revision.to_string()))?;
            t.head = hash;
            Ok(())
        })
    }

    fn pull(&self) -> Result<()> {
        self.record(Call::Pull);
        Ok(())
    }

    fn has_tag(&self, name: &str) -> Result<bool> {
        self.record(Call::HasTag(name.to_string()));
        self.with_tree(|t| Ok(t.tags.contains_key(name)))
    }

    fn resolve_tag_to_commit(&self, tag: &str) -> Result<String> {
        self.record(Call::ResolveTag(tag.to_string()));
        self.with_tree(|t| {
            t.tags
                .get(tag)
                .cloned()
                .ok_or_else(|| AppError::RevisionNotFound(tag.to_string()))
        })
    }

    fn head_commit(&self) -> Result<String> {
        self.with_tree(|t| Ok(t.head.clone()))
    }

    fn log_range(&self, query: &LogQuery) -> Result<Vec<LogEntry>> {
        self.record(Call::LogRange(query.clone()));
        self.with_tree(|t| {
            let from = t.position(&query.from)?;
            let to = t.position(&query.to)?;
            let mut entries: Vec<LogEntry> = t
                .history
                .iter()
                .skip(from + 1)
                .take(to.saturating_sub(from))
                .filter(|c| !(query.no_merges && c.merge))
                .filter(|c| query.author.as_ref().is_none_or(|a| *a == c.author))
                .map(|c| LogEntry {
                    hash: c.hash.clone(),
                    author: c.author.clone(),
                    subject: c.subject.clone(),
                })
                .collect();
            if query.order == LogOrder::NewestFirst {
                entries.reverse();
            }
            if let Some(limit) = query.limit {
                entries.truncate(limit);
            }
            Ok(entries)
        })
    }

    fn tree_entries(&self, commit: Option<&str>, paths: &[String]) -> Result<Vec<TreeEntry>> {
        self.record(Call::TreeEntries(commit.map(str::to_string)));
        self.with_tree(|t| {
            let at = match commit {
                Some(revision) => t
                    .find(revision)
                    .map(|c| c.hash.clone())
                    .ok_or_else(|| AppError::RevisionNotFound(revision.to_string()))?,
                None => t.head.clone(),
            };
            let pinned = t.pointers.get(&at).cloned().unwrap_or_default();
            Ok(paths
                .iter()
                .filter_map(|path| {
                    pinned.get(path).map(|hash| TreeEntry {
                        mode: 0o160000,
                        kind: "commit".to_string(),
                        hash: hash.clone(),
                        path: path.clone(),
                    })
                })
                .collect())
        })
    }

    fn remote_url(&self) -> Result<String> {
        self.with_tree(|t| Ok(t.remote_url.clone()))
    }

    fn uncommitted_changes(&self) -> Result<Vec<String>> {
        self.with_tree(|t| Ok(t.dirty.clone()))
    }

    fn user_name(&self) -> Result<Option<String>> {
        self.with_tree(|t| Ok(t.user_name.clone()))
    }
}
