//! Version-control seam.
//!
//! `VersionControl` hands out `WorkTree` handles, one per checkout. Holding a
//! handle is "being inside" that repository; dropping it leaves. The process
//! working directory is never changed.

use std::path::Path;

use crate::error::Result;
use crate::git::submodule::SubmoduleDeclaration;

pub trait VersionControl {
    /// Enter the checkout rooted at `path`.
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn WorkTree + 'a>>;

    /// Read submodule declarations without opening the checkout, which may not
    /// be initialized yet.
    fn declared_submodules(&self, path: &Path) -> Result<Vec<SubmoduleDeclaration>>;
}

/// Operations against a single working tree and its index.
///
/// `checkout`, `pull` and `resolve_tag_to_commit` mutate shared on-disk state; callers
/// must not run two of them against the same tree concurrently.
pub trait WorkTree {
    fn path(&self) -> &Path;

    /// Branch name when on a branch, otherwise the full HEAD hash.
    fn current_ref(&self) -> Result<String>;

    fn checkout(&self, revision: &str) -> Result<()>;

    fn pull(&self) -> Result<()>;

    fn has_tag(&self, name: &str) -> Result<bool>;

    /// Fetch `tag` from origin and return the full hash of the commit it points at.
    fn resolve_tag_to_commit(&self, tag: &str) -> Result<String>;

    /// Full hash of the checked-out commit.
    fn head_commit(&self) -> Result<String>;

    fn log_range(&self, query: &LogQuery) -> Result<Vec<LogEntry>>;

    /// Tree entries for `paths` at `commit` (HEAD when `None`). Paths missing
    /// from the tree are left out.
    fn tree_entries(&self, commit: Option<&str>, paths: &[String]) -> Result<Vec<TreeEntry>>;

    fn remote_url(&self) -> Result<String>;

    /// Paths with uncommitted changes to tracked files.
    fn uncommitted_changes(&self) -> Result<Vec<String>>;

    fn has_uncommitted_changes(&self) -> Result<bool> {
        Ok(!self.uncommitted_changes()?.is_empty())
    }

    /// `user.name` from the repository's effective git config.
    fn user_name(&self) -> Result<Option<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Commits reachable from `to` but not from `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub from: String,
    pub to: String,
    pub author: Option<String>,
    pub no_merges: bool,
    pub order: LogOrder,
    pub limit: Option<usize>,
}

impl LogQuery {
    pub fn range(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            author: None,
            no_merges: false,
            order: LogOrder::NewestFirst,
            limit: None,
        }
    }

    pub fn by_author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn no_merges(mut self) -> Self {
        self.no_merges = true;
        self
    }

    pub fn oldest_first(mut self) -> Self {
        self.order = LogOrder::OldestFirst;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub hash: String,
    pub author: String,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: i32,
    pub kind: String,
    pub hash: String,
    pub path: String,
}
