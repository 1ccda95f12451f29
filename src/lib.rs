//! ballantine: review the commits a deployment would ship.
//!
//! Given a target and a source revision of a git working tree, resolves both
//! ends in the repository and (transitively) in its submodules, collects the
//! non-merge commits in between, groups them by author, and renders the result
//! for a terminal or a Slack webhook.

pub mod config;
pub mod diff;
pub mod error;
pub mod git;
pub mod models;
pub mod registry;
pub mod report;

pub use error::{AppError, Result};
