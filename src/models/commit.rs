use super::RepoId;

/// Abbreviated hash length used for identity and display.
pub const SHORT_HASH_LEN: usize = 7;

#[derive(Debug, Clone)]
pub struct Commit {
    /// First seven characters of the hash; identity together with `repo`.
    pub hash: String,
    /// Longest form of the hash seen so far.
    pub long_hash: String,
    pub repo: RepoId,
    pub details: Option<CommitDetails>,
}

/// Set once, when the commit first shows up in a range query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDetails {
    pub subject: String,
    pub author: String,
}

impl Commit {
    pub fn new(hash: &str, repo: RepoId) -> Self {
        Self {
            hash: short_hash(hash).to_string(),
            long_hash: hash.to_string(),
            repo,
            details: None,
        }
    }

    pub fn subject(&self) -> &str {
        self.details.as_ref().map(|d| d.subject.as_str()).unwrap_or("")
    }

    pub fn author(&self) -> &str {
        self.details.as_ref().map(|d| d.author.as_str()).unwrap_or("")
    }
}

pub fn short_hash(hash: &str) -> &str {
    match hash.char_indices().nth(SHORT_HASH_LEN) {
        Some((idx, _)) => &hash[..idx],
        None => hash,
    }
}
