//! Progress callback trait for interface-agnostic updates
//!
//! The orchestrator reports every step through this trait so the CLI can
//! render spinners while tests can stay silent.

use crate::error::Error;
use crate::types::{BranchOutcome, PullRequest};
use async_trait::async_trait;
use std::path::Path;

/// A step of backporting to one target branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Resetting the base branch and creating the feature branch
    PullingLatest,
    /// Cherry-picking one commit (short sha)
    CherryPicking(String),
    /// Pushing the feature branch (`<remote>:<branch>`)
    Pushing(String),
    /// Creating the pull request and attaching labels
    CreatingPullRequest,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PullingLatest => write!(f, "Pulling latest changes"),
            Self::CherryPicking(sha) => write!(f, "Cherry-picking commit {sha}"),
            Self::Pushing(head) => write!(f, "Pushing branch {head}"),
            Self::CreatingPullRequest => write!(f, "Creating pull request"),
        }
    }
}

/// Step status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Step started
    Started,
    /// Step succeeded
    Success,
    /// Step failed with error message
    Failed(String),
}

/// Progress callback trait
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called before any work on a target branch, with the commits' long references
    async fn on_branch_start(&self, branch: &str, references: &str);

    /// Called when a step starts or finishes
    async fn on_step(&self, step: &Step, status: StepStatus);

    /// Called when a cherry-pick stopped on a conflict the operator must resolve
    async fn on_conflict(&self, repo_path: &Path, command: &str);

    /// Called when a pull request is created
    async fn on_pr_created(&self, branch: &str, pr: &PullRequest);

    /// Called once a target branch is finished, successfully or not
    async fn on_branch_done(&self, outcome: &BranchOutcome);

    /// Called when an error ends work on a branch, or a whole run
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_branch_start(&self, _branch: &str, _references: &str) {}
    async fn on_step(&self, _step: &Step, _status: StepStatus) {}
    async fn on_conflict(&self, _repo_path: &Path, _command: &str) {}
    async fn on_pr_created(&self, _branch: &str, _pr: &PullRequest) {}
    async fn on_branch_done(&self, _outcome: &BranchOutcome) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
