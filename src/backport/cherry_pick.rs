//! Cherry-pick with interactive conflict recovery
//!
//! A conflicting cherry-pick hands control to the operator. After each
//! confirmation the index is checked again; the loop only ends once it is
//! clean, or with [`Error::OperatorAborted`] when the operator declines.

use crate::backport::progress::{ProgressCallback, Step, StepStatus};
use crate::backport::prompt::Prompter;
use crate::backport::reference::short_sha;
use crate::error::{Error, Result};
use crate::repo::VcsService;
use tracing::{debug, info};

/// Question asked while waiting for the operator to resolve conflicts
pub const RESOLVE_PROMPT: &str = "Press enter when you have committed all changes";

/// Cherry-pick `sha`, waiting for manual resolution if it conflicts.
///
/// Non-conflict failures propagate immediately.
pub async fn cherry_pick_and_confirm(
    vcs: &dyn VcsService,
    prompter: &dyn Prompter,
    progress: &dyn ProgressCallback,
    sha: &str,
) -> Result<()> {
    let step = Step::CherryPicking(short_sha(sha).to_string());
    progress.on_step(&step, StepStatus::Started).await;

    match vcs.cherry_pick(sha).await {
        Ok(()) => {
            progress.on_step(&step, StepStatus::Success).await;
            return Ok(());
        }
        Err(Error::Conflict { command, message }) => {
            debug!(sha, %message, "conflict detected");
            progress
                .on_step(&step, StepStatus::Failed("Cherry-picking failed".to_string()))
                .await;
            progress.on_conflict(vcs.repo_path(), &command).await;
        }
        Err(e) => {
            progress
                .on_step(&step, StepStatus::Failed(e.to_string()))
                .await;
            return Err(e);
        }
    }

    resolve_conflicts_or_abort(vcs, prompter, progress).await
}

/// Wait until the operator leaves a clean index, or declines.
async fn resolve_conflicts_or_abort(
    vcs: &dyn VcsService,
    prompter: &dyn Prompter,
    progress: &dyn ProgressCallback,
) -> Result<()> {
    loop {
        if !prompter.confirm(RESOLVE_PROMPT)? {
            info!("operator aborted conflict resolution");
            return Err(Error::OperatorAborted);
        }

        if !vcs.is_index_dirty().await? {
            debug!("index clean after manual resolution");
            return Ok(());
        }

        progress
            .on_message("There are still uncommitted changes in the working copy")
            .await;
    }
}
