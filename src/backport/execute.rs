//! Per-branch backport orchestration
//!
//! Each target branch goes through sync, replicate, publish and request in
//! order. Branches are processed one at a time because they share a single
//! working copy.

use crate::backport::branch::feature_branch_name;
use crate::backport::cherry_pick::cherry_pick_and_confirm;
use crate::backport::payload::build_payload;
use crate::backport::progress::{ProgressCallback, Step, StepStatus};
use crate::backport::prompt::Prompter;
use crate::backport::reference::long_reference;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::repo::VcsService;
use crate::types::{BackportRequest, BranchOutcome, Commit, PullRequest};
use tracing::{debug, error, info, warn};

/// Collaborators shared by every branch of one invocation
pub struct BackportContext<'a> {
    /// Repository-hosting API
    pub platform: &'a dyn PlatformService,
    /// The working copy
    pub vcs: &'a dyn VcsService,
    /// Operator prompts
    pub prompter: &'a dyn Prompter,
    /// Progress reporting
    pub progress: &'a dyn ProgressCallback,
}

/// Everything needed to backport a set of commits to several branches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackportJob {
    /// Owner of the upstream repository
    pub owner: String,
    /// Name of the upstream repository
    pub repo_name: String,
    /// Commits to cherry-pick, in order
    pub commits: Vec<Commit>,
    /// Target branches, processed in this order
    pub branches: Vec<String>,
    /// Owner of the fork the feature branches are pushed to
    pub username: String,
    /// Labels attached to every created pull request
    pub labels: Vec<String>,
    /// Title template
    pub pr_title: String,
    /// Free text appended to every pull request body
    pub pr_description: Option<String>,
}

impl BackportJob {
    /// The request for one target branch
    pub fn request_for(&self, base_branch: &str) -> BackportRequest {
        BackportRequest {
            owner: self.owner.clone(),
            repo_name: self.repo_name.clone(),
            commits: self.commits.clone(),
            base_branch: base_branch.to_string(),
            username: self.username.clone(),
            labels: self.labels.clone(),
            pr_title: self.pr_title.clone(),
            pr_description: self.pr_description.clone(),
        }
    }
}

/// Backport the job's commits to each of its branches.
///
/// A handled error on one branch is reported and recorded as
/// [`BranchOutcome::Failed`]; the next branch is still attempted. Any other
/// error stops the run and is returned.
pub async fn backport_commits(
    ctx: &BackportContext<'_>,
    job: &BackportJob,
) -> Result<Vec<BranchOutcome>> {
    let mut outcomes = Vec::with_capacity(job.branches.len());

    for branch in &job.branches {
        let request = job.request_for(branch);
        let outcome = match backport_to_branch(ctx, &request).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_handled() => {
                warn!(branch = %branch, error = %e, "backport failed");
                ctx.progress.on_error(&e).await;
                BranchOutcome::Failed {
                    branch: branch.clone(),
                    message: e.to_string(),
                }
            }
            Err(e) => {
                error!(branch = %branch, error = %e, "unexpected failure, stopping");
                ctx.progress.on_error(&e).await;
                return Err(e);
            }
        };

        ctx.progress.on_branch_done(&outcome).await;
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Backport to a single target branch and open its pull request
pub async fn backport_to_branch(
    ctx: &BackportContext<'_>,
    request: &BackportRequest,
) -> Result<BranchOutcome> {
    let base_branch = request.base_branch.as_str();
    let feature_branch = feature_branch_name(base_branch, &request.commits);
    let references = request
        .commits
        .iter()
        .map(long_reference)
        .collect::<Vec<_>>()
        .join(", ");

    info!(base_branch, feature_branch = %feature_branch, "backporting {references}");
    ctx.progress.on_branch_start(base_branch, &references).await;

    // Sync
    let step = Step::PullingLatest;
    run_step(ctx.progress, &step, async {
        ctx.vcs.reset_and_pull_base(base_branch).await?;
        ctx.vcs
            .create_and_checkout_branch(base_branch, &feature_branch)
            .await
    })
    .await?;

    // Replicate
    for commit in &request.commits {
        cherry_pick_and_confirm(ctx.vcs, ctx.prompter, ctx.progress, &commit.sha).await?;
    }

    // Publish
    let step = Step::Pushing(format!("{}:{feature_branch}", request.username));
    run_step(
        ctx.progress,
        &step,
        ctx.vcs.push(&request.username, &feature_branch),
    )
    .await?;

    // Request
    let step = Step::CreatingPullRequest;
    let payload = build_payload(request);
    let pull_request: PullRequest =
        run_step(ctx.progress, &step, ctx.platform.create_pull_request(&payload)).await?;
    debug!(pr_number = pull_request.number, "pull request created");
    ctx.progress.on_pr_created(base_branch, &pull_request).await;

    let mut label_error = None;
    if !request.labels.is_empty() {
        match ctx
            .platform
            .add_labels(pull_request.number, &request.labels)
            .await
        {
            Ok(()) => debug!(pr_number = pull_request.number, "labels attached"),
            Err(e) if e.is_handled() => {
                warn!(pr_number = pull_request.number, error = %e, "could not attach labels");
                label_error = Some(e.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(BranchOutcome::Created {
        branch: base_branch.to_string(),
        pull_request,
        label_error,
    })
}

/// Report a step as started, await it, then report how it ended
async fn run_step<T>(
    progress: &dyn ProgressCallback,
    step: &Step,
    fut: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    progress.on_step(step, StepStatus::Started).await;
    match fut.await {
        Ok(value) => {
            progress.on_step(step, StepStatus::Success).await;
            Ok(value)
        }
        Err(e) => {
            progress.on_step(step, StepStatus::Failed(e.to_string())).await;
            Err(e)
        }
    }
}
