//! A single diff run, end to end.
//!
//! Validation happens before anything touches the working tree:
//! 1. the root is a git checkout
//! 2. target and source differ
//! 3. chat output has somewhere to go
//! 4. nothing is left uncommitted
//!
//! Then the range is resolved (restoring the original ref afterwards), commits
//! are collected across the repository and its moved submodules, and the
//! outcome is handed back for rendering.

pub mod collector;
pub mod resolver;

use std::path::Path;

pub use collector::CommitRangeCollector;
pub use resolver::RevisionResolver;

use crate::config::OutputMode;
use crate::error::{AppError, Result};
use crate::git::VersionControl;
use crate::models::{CommitId, RepoId};
use crate::registry::Registry;
use crate::report::Report;

#[derive(Debug, Clone)]
pub struct DiffRequest {
    pub target: String,
    /// Defaults to the branch (or commit) currently checked out.
    pub source: Option<String>,
    pub mode: OutputMode,
    pub webhook: Option<String>,
}

#[derive(Debug)]
pub struct DiffOutcome {
    pub registry: Registry,
    pub top: RepoId,
    pub target: String,
    pub source: String,
    pub last_commit: Option<CommitId>,
    pub requester: Option<String>,
}

impl DiffOutcome {
    pub fn report(&self) -> Report<'_> {
        Report {
            registry: &self.registry,
            top: self.top,
            target: &self.target,
            source: &self.source,
            last_commit: self.last_commit,
            requester: self.requester.as_deref().unwrap_or("unknown"),
        }
    }
}

pub fn run_diff(vcs: &dyn VersionControl, root: &Path, request: &DiffRequest) -> Result<DiffOutcome> {
    let (source, requester) = {
        let tree = vcs.open(root)?;
        let source = match &request.source {
            Some(source) => source.clone(),
            None => tree.current_ref()?,
        };

        if request.target == source {
            return Err(AppError::SameRevisions(source));
        }
        if request.mode == OutputMode::Slack && request.webhook.is_none() {
            return Err(AppError::MissingDeliveryTarget);
        }
        let uncommitted = tree.uncommitted_changes()?;
        if !uncommitted.is_empty() {
            return Err(AppError::DirtyWorkingTree(uncommitted));
        }

        if let Err(e) = tree.pull() {
            tracing::warn!("Could not pull {}: {}", root.display(), e);
        }
        (source, tree.user_name()?)
    };

    tracing::info!("Diffing {} <- {} in {}", request.target, source, root.display());

    let mut registry = Registry::new();
    let top = registry.repositories.get_or_create(vcs, root, None)?;

    RevisionResolver::new(vcs).resolve_range(&mut registry, top, &request.target, &source)?;

    let collector = CommitRangeCollector::new(vcs);
    collector.collect(&mut registry, top)?;
    if registry.authors.is_empty() {
        return Err(AppError::NoCommitsInRange {
            target: request.target.clone(),
            source_label: source,
        });
    }
    let last_commit = collector.last_commit(&mut registry, top)?;

    Ok(DiffOutcome {
        registry,
        top,
        target: request.target.clone(),
        source,
        last_commit,
        requester,
    })
}
