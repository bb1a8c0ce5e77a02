//! Local working copy operations
//!
//! The orchestrator talks to the working copy only through [`VcsService`];
//! [`GitCli`] implements it by running git as a subprocess.

mod git;
mod remote;

pub use git::{GitCli, get_remote_url};
pub use remote::{RemoteSpec, remote_url, repo_path};

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Version control operations on the single working copy of one repository
#[async_trait]
pub trait VcsService: Send + Sync {
    /// Path of the working copy on disk
    fn repo_path(&self) -> &Path;

    /// Clone the upstream repository if needed and register the remotes
    async fn setup_repo(&self, remotes: &[RemoteSpec]) -> Result<()>;

    /// Discard local changes and make `base_branch` match upstream
    async fn reset_and_pull_base(&self, base_branch: &str) -> Result<()>;

    /// Create (or reset) `feature_branch` from upstream `base_branch` and check it out
    async fn create_and_checkout_branch(&self, base_branch: &str, feature_branch: &str)
    -> Result<()>;

    /// Cherry-pick a commit onto the checked-out branch.
    ///
    /// Fails with [`Error::Conflict`](crate::error::Error::Conflict) when the
    /// cherry-pick stops on conflicting changes.
    async fn cherry_pick(&self, sha: &str) -> Result<()>;

    /// Whether the index has uncommitted changes
    async fn is_index_dirty(&self) -> Result<bool>;

    /// Push `branch` to `remote`
    async fn push(&self, remote: &str, branch: &str) -> Result<()>;
}
