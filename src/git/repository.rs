use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Oid, Repository, Sort, StatusOptions};

use crate::error::{AppError, Result};
use crate::git::gateway::{LogEntry, LogOrder, LogQuery, TreeEntry, VersionControl, WorkTree};
use crate::git::submodule::{self, SubmoduleDeclaration};

/// `VersionControl` backed by libgit2 for reads and the `git` binary for
/// checkout, pull and fetch.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitGateway;

impl VersionControl for GitGateway {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn WorkTree + 'a>> {
        Ok(Box::new(GitRepository::open(path)?))
    }

    fn declared_submodules(&self, path: &Path) -> Result<Vec<SubmoduleDeclaration>> {
        submodule::discover(path)
    }
}

pub struct GitRepository {
    pub repo: Repository,
    pub path: PathBuf,
}

impl GitRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let repo = Repository::open(&path)
            .map_err(|_| AppError::NotARepository(path.to_string_lossy().to_string()))?;

        Ok(Self { repo, path })
    }

    fn resolve_commit(&self, revision: &str) -> Result<Oid> {
        self.repo
            .revparse_single(revision)
            .and_then(|obj| obj.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(|_| AppError::RevisionNotFound(revision.to_string()))
    }

    fn run_git(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        tracing::debug!("{} (in {})", command, self.path.display());

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.path)
            .args(args)
            .output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(AppError::Command {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl WorkTree for GitRepository {
    fn path(&self) -> &Path {
        &self.path
    }

    fn current_ref(&self) -> Result<String> {
        let head = self.repo.head()?;
        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(name.to_string());
            }
        }
        Ok(head.peel_to_commit()?.id().to_string())
    }

    fn checkout(&self, revision: &str) -> Result<()> {
        self.run_git(&["checkout", "-f", revision])
            .map(|_| ())
            .map_err(|e| {
                tracing::debug!("checkout of {} failed: {}", revision, e);
                AppError::RevisionNotFound(revision.to_string())
            })
    }

    fn pull(&self) -> Result<()> {
        self.run_git(&["pull"]).map(|_| ())
    }

    fn has_tag(&self, name: &str) -> Result<bool> {
        let tags = self.repo.tag_names(None)?;
        Ok(tags.iter().flatten().any(|tag| tag == name))
    }

    fn resolve_tag_to_commit(&self, tag: &str) -> Result<String> {
        if let Err(e) = self.run_git(&["fetch", "origin", "tag", tag, "-f"]) {
            tracing::warn!("Could not fetch tag {} from origin: {}", tag, e);
        }
        let oid = self.resolve_commit(&format!("refs/tags/{}", tag))?;
        Ok(oid.to_string())
    }

    fn head_commit(&self) -> Result<String> {
        Ok(self.repo.head()?.peel_to_commit()?.id().to_string())
    }

    fn log_range(&self, query: &LogQuery) -> Result<Vec<LogEntry>> {
        let to = self.resolve_commit(&query.to)?;
        let from = self.resolve_commit(&query.from)?;

        let mut revwalk = self.repo.revwalk()?;
        let sorting = match query.order {
            LogOrder::NewestFirst => Sort::TOPOLOGICAL | Sort::TIME,
            LogOrder::OldestFirst => Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE,
        };
        revwalk.set_sorting(sorting)?;
        revwalk.push(to)?;
        revwalk.hide(from)?;

        let mut entries = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;

            if query.no_merges && commit.parent_count() > 1 {
                continue;
            }

            let author = commit.author().name().unwrap_or("Unknown").to_string();
            if let Some(wanted) = &query.author
                && *wanted != author
            {
                continue;
            }

            entries.push(LogEntry {
                hash: oid.to_string(),
                author,
                subject: commit.summary().unwrap_or("").to_string(),
            });

            if let Some(limit) = query.limit
                && entries.len() >= limit
            {
                break;
            }
        }

        Ok(entries)
    }

    fn tree_entries(&self, commit: Option<&str>, paths: &[String]) -> Result<Vec<TreeEntry>> {
        let commit = match commit {
            Some(revision) => self.repo.find_commit(self.resolve_commit(revision)?)?,
            None => self.repo.head()?.peel_to_commit()?,
        };
        let tree = commit.tree()?;

        let entries = paths
            .iter()
            .filter_map(|path| {
                let entry = tree.get_path(Path::new(path)).ok()?;
                Some(TreeEntry {
                    mode: entry.filemode(),
                    kind: entry.kind().map(|k| k.str()).unwrap_or("unknown").to_string(),
                    hash: entry.id().to_string(),
                    path: path.clone(),
                })
            })
            .collect();

        Ok(entries)
    }

    fn remote_url(&self) -> Result<String> {
        let remote = self.repo.find_remote("origin")?;
        Ok(remote.url().unwrap_or("").to_string())
    }

    fn uncommitted_changes(&self) -> Result<Vec<String>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let paths = statuses
            .iter()
            .filter(|entry| !entry.status().is_empty())
            .filter_map(|entry| entry.path().map(|p| p.to_string()))
            .collect();

        Ok(paths)
    }

    fn user_name(&self) -> Result<Option<String>> {
        let config = self.repo.config()?;
        Ok(config.get_string("user.name").ok())
    }
}
