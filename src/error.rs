//! Application error types.
//!
//! Defines `AppError` for every failure a diff run can hit. All of them are
//! fatal: the CLI prints the message and exits non-zero. Variants map to:
//! - `RevisionNotFound`: a target/source label resolves to nothing
//! - `UnrecognizedRemoteFormat`: no web link can be built for a repository
//! - `NoCommitsInRange`: the resolved range produced zero authors
//! - `DirtyWorkingTree`: uncommitted changes before the first checkout
//! - `MissingDeliveryTarget`: chat output selected without a webhook
//! - `DeliveryRejected`: the webhook answered with a non-2xx status
//! - `Git`, `Io`, `Json`, `Http`, `Command`: underlying tool failures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("There is no \".git\" in {0}")]
    NotARepository(String),

    #[error("Revision not found: {0}")]
    RevisionNotFound(String),

    #[error("Unrecognized remote URL format: {0}")]
    UnrecognizedRemoteFormat(String),

    #[error("There is no commits between \"{target}\" and \"{source_label}\"")]
    NoCommitsInRange { target: String, source_label: String },

    #[error("Uncommitted file exists. stash or commit uncommitted files.\n{}", .0.join("\n"))]
    DirtyWorkingTree(Vec<String>),

    #[error(
        "Can't find any slack webhook. Set slack webhook using `ballantine config --local slack_webhook [YOUR_WEBHOOK]'"
    )]
    MissingDeliveryTarget,

    #[error("target({0}) and source({0}) can't be equal")]
    SameRevisions(String),

    #[error("Slack answered {status}: {body}")]
    DeliveryRejected { status: u16, body: String },

    #[error("Revision range is not resolved for {0}")]
    RangeNotResolved(String),

    #[error("`{command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
