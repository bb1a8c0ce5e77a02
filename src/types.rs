//! Core types for backport

use serde::{Deserialize, Serialize};

/// A commit to replicate onto target branches
///
/// Resolved once before any branch is processed and shared read-only
/// across all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit hash
    pub sha: String,
    /// First line of the commit message
    pub message: String,
    /// Number of the pull request the commit originated from, if any
    pub pull_number: Option<u64>,
}

impl Commit {
    /// Create a commit, keeping only the first line of `message`
    pub fn new(sha: impl Into<String>, message: &str, pull_number: Option<u64>) -> Self {
        Self {
            sha: sha.into(),
            message: first_line(message),
            pull_number,
        }
    }
}

/// First line of a commit message, trimmed
pub fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or_default().trim().to_string()
}

/// The unit of work for one target branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackportRequest {
    /// Owner of the upstream repository
    pub owner: String,
    /// Name of the upstream repository
    pub repo_name: String,
    /// Commits to cherry-pick, applied in this order
    pub commits: Vec<Commit>,
    /// Branch the pull request targets
    pub base_branch: String,
    /// Owner of the fork the feature branch is pushed to
    pub username: String,
    /// Labels attached to the created pull request
    pub labels: Vec<String>,
    /// Title template (`{baseBranch}` and `{commitMessages}` are substituted)
    pub pr_title: String,
    /// Free text appended to the pull request body
    pub pr_description: Option<String>,
}

/// Body sent to the hosting API to open a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestPayload {
    /// Pull request title
    pub title: String,
    /// Pull request description
    pub body: String,
    /// `<username>:<feature branch>`
    pub head: String,
    /// Target branch
    pub base: String,
}

/// A pull request created on the hosting platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Web URL of the pull request
    pub html_url: String,
}

/// Result of backporting to a single target branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
    /// The pull request was opened
    Created {
        /// Target branch
        branch: String,
        /// The created pull request
        pull_request: PullRequest,
        /// Set when labels could not be attached to the created pull request
        label_error: Option<String>,
    },
    /// A handled error ended work on this branch
    Failed {
        /// Target branch
        branch: String,
        /// Operator-facing message
        message: String,
    },
}

impl BranchOutcome {
    /// Target branch this outcome belongs to
    pub fn branch(&self) -> &str {
        match self {
            Self::Created { branch, .. } | Self::Failed { branch, .. } => branch,
        }
    }

    /// Whether a pull request was opened
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}
