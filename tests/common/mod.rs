#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

pub struct Fixture {
    pub dir: TempDir,
    pub repo: Repository,
}

impl Fixture {
    /// Empty repository on `main` with an `origin` that can never be reached.
    pub fn new(remote: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).unwrap();

        repo.remote("origin", remote).unwrap();
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "amy").unwrap();
        config.set_str("user.email", "amy@example.com").unwrap();
        // Fetch and pull fail immediately instead of reaching out over ssh.
        config.set_str("core.sshCommand", "false").unwrap();

        Self { dir, repo }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Write `file` and commit it on HEAD as `author`.
    pub fn commit(&self, author: &str, file: &str, content: &str, message: &str) -> Oid {
        fs::write(self.dir.path().join(file), content).unwrap();
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();
        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();

        let signature = signature(author);
        let parent = self.head();
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .unwrap()
    }

    /// Commit `file` on a side line off HEAD, then merge it back as `author`.
    /// Returns (side commit, merge commit).
    pub fn merge(&self, author: &str, side_author: &str, file: &str, message: &str) -> (Oid, Oid) {
        fs::write(self.dir.path().join(file), message).unwrap();
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();
        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();

        let head = self.head().unwrap();
        let side_signature = signature(side_author);
        let side = self
            .repo
            .commit(None, &side_signature, &side_signature, message, &tree, &[&head])
            .unwrap();
        let side_commit = self.repo.find_commit(side).unwrap();

        let signature = signature(author);
        let merge = self
            .repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                "Merge branch 'feature'",
                &tree,
                &[&head, &side_commit],
            )
            .unwrap();
        (side, merge)
    }

    /// Commit a tree holding only a gitlink `name` -> `pointer`.
    pub fn commit_gitlink(&self, name: &str, pointer: Oid) -> Oid {
        let head = self.head().unwrap();
        let mut builder = self.repo.treebuilder(Some(&head.tree().unwrap())).unwrap();
        builder.insert(name, pointer, 0o160000).unwrap();
        let tree = self.repo.find_tree(builder.write().unwrap()).unwrap();

        let signature = signature("amy");
        self.repo
            .commit(Some("HEAD"), &signature, &signature, "Bump submodule", &tree, &[&head])
            .unwrap()
    }

    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    pub fn branch(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).unwrap();
        self.repo.branch(name, &commit, false).unwrap();
    }

    fn head(&self) -> Option<git2::Commit<'_>> {
        self.repo.head().ok().and_then(|head| head.peel_to_commit().ok())
    }
}

fn signature(author: &str) -> Signature<'static> {
    Signature::now(author, &format!("{}@example.com", author)).unwrap()
}

/// Checkout and pull go through the `git` binary.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
