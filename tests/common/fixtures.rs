//! Test fixtures

use async_trait::async_trait;
use backport::backport::{
    BackportJob, DEFAULT_PR_TITLE, ProgressCallback, Prompter, Step, StepStatus,
};
use backport::error::{Error, Result};
use backport::types::{BranchOutcome, Commit, PullRequest};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

/// A random 40 character hex sha
pub fn fake_sha() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("{hex}{}", &hex[..8])
}

/// A commit with a random sha
pub fn commit(message: &str, pull_number: Option<u64>) -> Commit {
    Commit::new(fake_sha(), message, pull_number)
}

/// A job backporting `commits` to `branches` for `alice` on elastic/kibana
pub fn job(commits: Vec<Commit>, branches: &[&str]) -> BackportJob {
    BackportJob {
        owner: "elastic".to_string(),
        repo_name: "kibana".to_string(),
        commits,
        branches: branches.iter().map(ToString::to_string).collect(),
        username: "alice".to_string(),
        labels: vec![],
        pr_title: DEFAULT_PR_TITLE.to_string(),
        pr_description: None,
    }
}

/// Prompter answering from a fixed script; panics when the script runs out
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    /// Answer with `answers`, in order
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.asked.lock().unwrap().push(prompt.to_string());
        Ok(self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .expect("prompter asked more often than scripted"))
    }
}

/// Progress callback keeping the error and branch-done events it receives
#[derive(Default)]
pub struct RecordingProgress {
    errors: Mutex<Vec<String>>,
    outcomes: Mutex<Vec<BranchOutcome>>,
}

impl RecordingProgress {
    /// Messages of every reported error
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    /// Outcomes reported as branches finish
    pub fn outcomes(&self) -> Vec<BranchOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_branch_start(&self, _branch: &str, _references: &str) {}

    async fn on_step(&self, _step: &Step, _status: StepStatus) {}

    async fn on_conflict(&self, _repo_path: &Path, _command: &str) {}

    async fn on_pr_created(&self, _branch: &str, _pr: &PullRequest) {}

    async fn on_branch_done(&self, outcome: &BranchOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }

    async fn on_error(&self, error: &Error) {
        self.errors.lock().unwrap().push(error.to_string());
    }

    async fn on_message(&self, _message: &str) {}
}
