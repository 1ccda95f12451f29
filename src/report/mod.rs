//! Report rendering.
//!
//! The collector is sink-agnostic; everything presentation-specific lives
//! here. A run picks one `Sink`:
//! - `console`: plain (optionally coloured) text for a terminal
//! - `chat`: a `ChatPayload` for a webhook, delivered via `delivery`

pub mod chat;
pub mod console;
pub mod delivery;
mod paint;

use crate::models::{Author, ChatPayload, CommitId, RepoId, Repository, Revision};
use crate::registry::Registry;

/// Everything a sink needs, borrowed from a finished run.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub registry: &'a Registry,
    pub top: RepoId,
    pub target: &'a str,
    pub source: &'a str,
    pub last_commit: Option<CommitId>,
    pub requester: &'a str,
}

impl<'a> Report<'a> {
    pub fn repository(&self) -> &'a Repository {
        self.registry.repositories.get(self.top)
    }

    /// Abbreviated from/to hashes of the top-level repository.
    pub fn range(&self) -> (&'a str, &'a str) {
        let registry = self.registry;
        let repository = self.repository();
        let hash = |revision: Option<&Revision>| -> &'a str {
            revision
                .map(|r| registry.commits.get(r.commit).hash.as_str())
                .unwrap_or("")
        };
        (hash(repository.from.as_ref()), hash(repository.to.as_ref()))
    }

    pub fn authors(&self) -> Vec<&'a Author> {
        self.registry.authors.all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    Console { color: bool },
    Chat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Console(String),
    Chat(ChatPayload),
}

pub fn render(report: &Report<'_>, sink: Sink) -> Rendered {
    match sink {
        Sink::Console { color } => Rendered::Console(console::render_console(report, color)),
        Sink::Chat => Rendered::Chat(chat::build_payload(report)),
    }
}

/// `"1 new commit"`, `"3 new commits"`.
pub fn new_commits(count: usize) -> String {
    format!("{} new {}", count, if count == 1 { "commit" } else { "commits" })
}
