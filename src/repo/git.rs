//! Git subprocess implementation of [`VcsService`]

use crate::error::{Error, Result};
use crate::repo::{RemoteSpec, VcsService};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, warn};

/// Exit status git uses when a cherry-pick stops on conflicts
const CHERRY_PICK_CONFLICT_STATUS: i32 = 1;

/// Working copy driven by the `git` binary
pub struct GitCli {
    repo_path: PathBuf,
    /// Token embedded in remote URLs, masked in error messages
    secret: Option<String>,
}

impl GitCli {
    /// Create a handle on the working copy at `repo_path`
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            secret: None,
        }
    }

    /// Mask `secret` in command lines and output carried by errors
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    fn redact(&self, text: &str) -> String {
        match self.secret.as_deref() {
            Some(secret) if !secret.is_empty() => text.replace(secret, "***"),
            _ => text.to_string(),
        }
    }

    fn command_line(&self, args: &[&str]) -> String {
        self.redact(&format!("git {}", args.join(" ")))
    }

    /// Run git in `dir` and return its output regardless of exit status
    async fn output_in(&self, dir: &Path, args: &[&str]) -> Result<Output> {
        debug!(command = %self.command_line(args), dir = %dir.display(), "running git");
        let output = Command::new("git")
            .current_dir(dir)
            .args(args)
            .output()
            .await?;
        Ok(output)
    }

    /// Run git in `dir`, failing with [`Error::Git`] on a non-zero exit
    async fn run_in(&self, dir: &Path, args: &[&str]) -> Result<String> {
        let output = self.output_in(dir, args).await?;
        if !output.status.success() {
            return Err(self.git_error(args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        self.run_in(&self.repo_path, args).await
    }

    fn git_error(&self, args: &[&str], output: &Output) -> Error {
        Error::Git {
            command: self.command_line(args),
            message: self.redact(String::from_utf8_lossy(&output.stderr).trim()),
        }
    }

    fn conflict_error(&self, args: &[&str], output: &Output) -> Error {
        Error::Conflict {
            command: self.command_line(args),
            message: self.redact(String::from_utf8_lossy(&output.stderr).trim()),
        }
    }

    async fn remote_names(&self) -> Result<Vec<String>> {
        let stdout = self.run(&["remote"]).await?;
        Ok(stdout.lines().map(|l| l.trim().to_string()).collect())
    }
}

/// URL of remote `name` in the repository containing `dir`, if there is one
pub async fn get_remote_url(dir: &Path, name: &str) -> Option<String> {
    let output = Command::new("git")
        .current_dir(dir)
        .args(["remote", "get-url", name])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!url.is_empty()).then_some(url)
}

#[async_trait]
impl VcsService for GitCli {
    fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    async fn setup_repo(&self, remotes: &[RemoteSpec]) -> Result<()> {
        if !self.repo_path.join(".git").exists() {
            let origin = remotes
                .first()
                .ok_or_else(|| Error::Config("no upstream remote to clone from".to_string()))?;
            let parent = self.repo_path.parent().ok_or_else(|| {
                Error::Config(format!("invalid repository path: {}", self.repo_path.display()))
            })?;
            tokio::fs::create_dir_all(parent).await?;

            let target = self.repo_path.to_string_lossy().into_owned();
            debug!(path = %target, "cloning repository");
            self.run_in(parent, &["clone", origin.url.as_str(), target.as_str()])
                .await?;
        }

        let existing = self.remote_names().await?;
        for remote in remotes {
            if existing.contains(&remote.name) {
                self.run(&["remote", "set-url", remote.name.as_str(), remote.url.as_str()])
                    .await?;
            } else {
                self.run(&["remote", "add", remote.name.as_str(), remote.url.as_str()])
                    .await?;
            }
            debug!(remote = %remote.name, "registered remote");
        }
        Ok(())
    }

    async fn reset_and_pull_base(&self, base_branch: &str) -> Result<()> {
        self.run(&["reset", "--hard"]).await?;
        self.run(&["clean", "-d", "--force"]).await?;
        self.run(&["fetch", "origin", base_branch]).await?;
        let upstream = format!("origin/{base_branch}");
        self.run(&["checkout", "-B", base_branch, upstream.as_str()])
            .await?;
        debug!(base_branch, "base branch synced with upstream");
        Ok(())
    }

    async fn create_and_checkout_branch(
        &self,
        base_branch: &str,
        feature_branch: &str,
    ) -> Result<()> {
        self.run(&["checkout", "-B", feature_branch, base_branch])
            .await?;
        debug!(base_branch, feature_branch, "checked out feature branch");
        Ok(())
    }

    async fn cherry_pick(&self, sha: &str) -> Result<()> {
        let args = ["cherry-pick", sha];
        let output = self.output_in(&self.repo_path, &args).await?;
        if output.status.success() {
            return Ok(());
        }

        if output.status.code() == Some(CHERRY_PICK_CONFLICT_STATUS) {
            warn!(sha, "cherry-pick stopped on conflicts");
            return Err(self.conflict_error(&args, &output));
        }

        Err(self.git_error(&args, &output))
    }

    async fn is_index_dirty(&self) -> Result<bool> {
        let args = ["diff-index", "--quiet", "HEAD", "--"];
        let output = self.output_in(&self.repo_path, &args).await?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(self.git_error(&args, &output)),
        }
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<()> {
        let refspec = format!("{branch}:{branch}");
        self.run(&["push", remote, refspec.as_str(), "--force"])
            .await?;
        debug!(remote, branch, "pushed branch");
        Ok(())
    }
}
