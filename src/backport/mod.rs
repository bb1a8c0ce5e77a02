//! Backport engine
//!
//! Turns a list of commits and target branches into one pull request per
//! branch:
//! 1. Sync - reset the base branch and create the feature branch
//! 2. Replicate - cherry-pick every commit, pausing on conflicts
//! 3. Publish - push the feature branch to the operator's fork
//! 4. Request - open the pull request and attach labels

mod branch;
mod cherry_pick;
mod execute;
mod payload;
mod progress;
mod prompt;
mod reference;

pub use branch::{MAX_REFERENCES_LEN, feature_branch_name};
pub use cherry_pick::{RESOLVE_PROMPT, cherry_pick_and_confirm};
pub use execute::{BackportContext, BackportJob, backport_commits, backport_to_branch};
pub use payload::{DEFAULT_PR_TITLE, MAX_COMMIT_MESSAGES_LEN, build_payload, pr_body, pr_title};
pub use progress::{NoopProgress, ProgressCallback, Step, StepStatus};
pub use prompt::Prompter;
pub use reference::{SHORT_SHA_LEN, long_reference, short_reference, short_sha};
