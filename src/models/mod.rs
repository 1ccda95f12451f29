//! Entities populated during a diff run, plus the chat payload DTO.
//!
//! - `repository`: Repository with its submodule links and resolved range
//! - `commit`: Commit identified by abbreviated hash and owning repository
//! - `author`: Author with per-repository commit lists
//! - `payload`: ChatPayload serialized for webhook delivery
//!
//! Entities refer to each other through the copyable ids below; the
//! registries in `crate::registry` own the actual values.

pub mod author;
pub mod commit;
pub mod payload;
pub mod repository;

pub use author::*;
pub use commit::*;
pub use payload::*;
pub use repository::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(pub(crate) usize);
