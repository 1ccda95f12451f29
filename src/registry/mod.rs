//! Identity maps for one diff run.
//!
//! `Registry` is owned by the run controller and passed by reference to the
//! resolver, the collector and the renderers. Each map hands out copyable ids
//! and guarantees a single instance per key:
//! - `RepositoryRegistry`: canonical filesystem path
//! - `CommitRegistry`: abbreviated hash + owning repository
//! - `AuthorRegistry`: author display name

pub mod author;
pub mod commit;
pub mod repository;

pub use author::AuthorRegistry;
pub use commit::CommitRegistry;
pub use repository::RepositoryRegistry;

#[derive(Debug, Default)]
pub struct Registry {
    pub repositories: RepositoryRegistry,
    pub commits: CommitRegistry,
    pub authors: AuthorRegistry,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
}
