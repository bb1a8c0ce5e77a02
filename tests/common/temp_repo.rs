//! Temporary git repositories for working copy tests

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A git repository in a temporary directory, removed on drop
pub struct TempGitRepo {
    #[allow(dead_code)]
    dir: TempDir,
    path: PathBuf,
}

impl TempGitRepo {
    /// A non-bare repository on `master` with a committer identity
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("repo");
        std::fs::create_dir_all(&path).expect("failed to create repo dir");

        git(&path, &["init", "-q", "-b", "master"]);
        set_identity(&path);

        Self { dir, path }
    }

    /// A bare repository, usable as a push target
    pub fn bare() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("fork.git");
        std::fs::create_dir_all(&path).expect("failed to create repo dir");
        git(&path, &["init", "-q", "--bare"]);
        Self { dir, path }
    }

    /// Root of the repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path as a string, usable as a remote URL
    pub fn url(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Write `content` to `file`, commit everything and return the new sha
    pub fn commit_file(&self, file: &str, content: &str, message: &str) -> String {
        std::fs::write(self.path.join(file), content).expect("failed to write file");
        git(&self.path, &["add", "-A"]);
        git(&self.path, &["commit", "-q", "-m", message]);
        self.git(&["rev-parse", "HEAD"])
    }

    /// Run git in the repository and return trimmed stdout
    pub fn git(&self, args: &[&str]) -> String {
        git(&self.path, args)
    }
}

/// Give the repository at `dir` a committer identity
pub fn set_identity(dir: &Path) {
    git(dir, &["config", "user.name", "Test"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
