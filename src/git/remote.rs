//! Remote URL parsing.
//!
//! Turns an `origin` URL into the `(owner, name)` pair used for report
//! headings and links. Patterns are tried in order and the first match wins:
//! - `https://host/owner/name[.git][/]`
//! - `user@host:owner/name[.git][/]` (scp-like ssh)
//! - `git://host/owner/name[.git][/]` (also `git:host/...`)
//! - `ssh://[user@]host/owner/name[.git][/]`

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, Result};

const WEB_HOST: &str = "https://github.com";

static REMOTE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^https?://[^/]+/(?P<owner>[^/]+)/(?P<name>[^/]+?)(?:\.git)?/?$",
        r"^[\w.-]+@[^:/]+:(?P<owner>[^/]+)/(?P<name>[^/]+?)(?:\.git)?/?$",
        r"^git:(?://)?[^/]+/(?P<owner>[^/]+)/(?P<name>[^/]+?)(?:\.git)?/?$",
        r"^ssh://(?:[^@/]+@)?[^/]+/(?P<owner>[^/]+)/(?P<name>[^/]+?)(?:\.git)?/?$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("remote pattern is valid"))
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub owner: String,
    pub name: String,
}

impl RemoteInfo {
    /// Links always point at the canonical web host, whatever the remote scheme.
    pub fn web_url(&self) -> String {
        format!("{}/{}/{}", WEB_HOST, self.owner, self.name)
    }

    /// Resolve a relative submodule URL against this remote the way git does:
    /// `../lib.git` next to `acme/app` is `acme/lib`.
    pub fn join_relative(&self, url: &str) -> Result<RemoteInfo> {
        let mut segments = vec![self.owner.as_str(), self.name.as_str()];
        for component in url.trim().trim_end_matches('/').split('/') {
            match component {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        match segments.as_slice() {
            [.., owner, name] => Ok(RemoteInfo {
                owner: owner.to_string(),
                name: name.strip_suffix(".git").unwrap_or(*name).to_string(),
            }),
            _ => Err(AppError::UnrecognizedRemoteFormat(url.to_string())),
        }
    }
}

/// `.gitmodules` may declare a URL relative to the superproject's remote.
pub fn is_relative_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("./") || url.starts_with("../")
}

pub fn parse_remote_url(remote_url: &str) -> Result<RemoteInfo> {
    let trimmed = remote_url.trim();
    REMOTE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(trimmed))
        .map(|caps| RemoteInfo {
            owner: caps["owner"].to_string(),
            name: caps["name"].to_string(),
        })
        .ok_or_else(|| AppError::UnrecognizedRemoteFormat(remote_url.to_string()))
}
