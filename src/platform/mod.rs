//! Repository-hosting services
//!
//! Provides the pull request and commit lookup operations backport needs
//! from the hosting platform.

mod detection;
mod factory;
mod github;

pub use detection::{RepoInfo, parse_repo_info, parse_upstream};
pub use factory::create_platform_service;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{Commit, PullRequest, PullRequestPayload};
use async_trait::async_trait;

/// Repository coordinates a platform service is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// API hostname, e.g. `api.github.com`
    pub api_hostname: String,
}

/// Platform service trait for commit lookup and PR operations
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Most recent commits on the default branch, optionally filtered by author
    async fn fetch_commits_by_author(&self, author: Option<&str>) -> Result<Vec<Commit>>;

    /// Look up a commit by (possibly abbreviated) sha
    async fn fetch_commit_by_sha(&self, sha: &str) -> Result<Commit>;

    /// Number of the pull request a commit was merged through, if any
    async fn fetch_pull_number_by_sha(&self, sha: &str) -> Result<Option<u64>>;

    /// Open a pull request
    async fn create_pull_request(&self, payload: &PullRequestPayload) -> Result<PullRequest>;

    /// Attach labels to a pull request
    async fn add_labels(&self, pr_number: u64, labels: &[String]) -> Result<()>;

    /// Check that the token can access the repository
    async fn verify_access(&self) -> Result<()>;

    /// Login of the token's owner
    async fn authenticated_user(&self) -> Result<String>;
}
