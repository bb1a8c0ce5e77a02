//! Shared CLI progress callback

use crate::cli::style::{Stylize, check, cross, hyperlink, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use backport::backport::{ProgressCallback, Step, StepStatus};
use backport::error::Error;
use backport::types::{BranchOutcome, PullRequest};
use indicatif::ProgressBar;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// CLI progress callback that renders one spinner per running step
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// Create a progress reporter with no active spinner
    pub const fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: String) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(spinner) {
                previous.finish_and_clear();
            }
        }
    }

    fn clear_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(spinner) = slot.take()
        {
            spinner.finish_and_clear();
        }
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_branch_start(&self, branch: &str, references: &str) {
        println!();
        println!(
            "{}",
            format!("Backporting {references} to {branch}:").emphasis()
        );
    }

    async fn on_step(&self, step: &Step, status: StepStatus) {
        match status {
            StepStatus::Started => self.start_spinner(step.to_string()),
            StepStatus::Success => {
                self.clear_spinner();
                println!("{} {step}", check());
            }
            StepStatus::Failed(_) => {
                self.clear_spinner();
                println!("{} {step}", cross());
            }
        }
    }

    async fn on_conflict(&self, repo_path: &Path, command: &str) {
        self.clear_spinner();
        println!("{}", format!("`{command}` stopped on conflicts.").muted());
        println!(
            "Please resolve conflicts in: {} and when all conflicts have been resolved and staged run:",
            repo_path.display().accent()
        );
        println!();
        println!("    {}", "git cherry-pick --continue".accent());
        println!();
    }

    async fn on_pr_created(&self, _branch: &str, pr: &PullRequest) {
        println!("View pull request: {}", hyperlink(&pr.html_url));
    }

    async fn on_branch_done(&self, outcome: &BranchOutcome) {
        if let BranchOutcome::Created {
            label_error: Some(message),
            ..
        } = outcome
        {
            println!("  {}", format!("Labels were not added: {message}").muted());
        }
    }

    async fn on_error(&self, error: &Error) {
        self.clear_spinner();
        eprintln!("{error}");
    }

    async fn on_message(&self, message: &str) {
        self.clear_spinner();
        println!("{message}");
    }
}
