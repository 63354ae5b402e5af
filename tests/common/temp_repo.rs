//! Temporary git repositories for end-to-end tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A working repository on `develop` with a bare `origin` remote
pub struct TempGitRepo {
    dir: TempDir,
}

impl TempGitRepo {
    /// Create `work/` (develop, one commit, pushed) and `origin.git/`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let repo = Self { dir };

        fs::create_dir_all(repo.path()).expect("create work dir");
        git_in(repo.dir.path(), &["init", "--bare", "origin.git"]);

        repo.git(&["init"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/develop"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        // merge --edit must not block on a real editor
        repo.git(&["config", "core.editor", "true"]);

        repo.commit_file("README.md", "hello\n", "Initial commit");
        let origin = repo.origin_path();
        repo.git(&["remote", "add", "origin", origin.to_str().expect("utf-8 path")]);
        repo.git(&["push", "-u", "origin", "develop"]);
        repo
    }

    /// Working tree root
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    /// Bare remote
    pub fn origin_path(&self) -> PathBuf {
        self.dir.path().join("origin.git")
    }

    /// Directory next to the repository for helper files (editor scripts)
    pub fn scratch(&self) -> &Path {
        self.dir.path()
    }

    /// Run git in the working tree, panicking on failure
    pub fn git(&self, args: &[&str]) -> String {
        git_in(&self.path(), args)
    }

    /// Write a file and commit it
    pub fn commit_file(&self, name: &str, content: &str, message: &str) {
        fs::write(self.path().join(name), content).expect("write file");
        self.git(&["add", name]);
        self.git(&["commit", "-m", message]);
    }

    /// Create `branch` off the current branch with one commit per subject
    /// (oldest first)
    pub fn feature_branch(&self, branch: &str, subjects: &[&str]) {
        self.git(&["checkout", "-b", branch]);
        for subject in subjects {
            let file = format!("{}.txt", subject.to_lowercase().replace(' ', "-"));
            self.commit_file(&file, subject, subject);
        }
    }

    /// Write an executable editor script that saves `subject` as the message
    #[cfg(unix)]
    pub fn editor_script(&self, subject: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.scratch().join("editor.sh");
        fs::write(&path, format!("#!/bin/sh\nprintf '%s\\n' '{subject}' > \"$1\"\n"))
            .expect("write editor script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod editor");
        path
    }
}

fn git_in(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("LC_ALL", "C")
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}
