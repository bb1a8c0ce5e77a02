//! In-memory platform service

use async_trait::async_trait;
use backport::error::{Error, Result};
use backport::platform::PlatformService;
use backport::types::{Commit, PullRequest, PullRequestPayload};
use std::collections::HashMap;
use std::sync::Mutex;

/// Kind of failure to inject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// An API error the operator can act on
    Handled,
    /// A systemic failure
    Unexpected,
}

impl MockFailure {
    fn to_error(self, url: &str) -> Error {
        match self {
            Self::Handled => Error::GitHubApi {
                url: url.to_string(),
                message: "{\n    \"message\": \"Validation Failed\"\n}".to_string(),
            },
            Self::Unexpected => Error::Unexpected("connection reset".to_string()),
        }
    }
}

/// Platform service recording every pull request and label request
pub struct MockPlatformService {
    commits: Vec<Commit>,
    created: Mutex<Vec<PullRequestPayload>>,
    labels: Mutex<Vec<(u64, Vec<String>)>>,
    create_failures: Mutex<HashMap<String, MockFailure>>,
    label_failure: Mutex<Option<MockFailure>>,
}

impl MockPlatformService {
    /// Mock with no known commits
    pub fn new() -> Self {
        Self::with_commits(vec![])
    }

    /// Mock that knows about `commits`
    pub fn with_commits(commits: Vec<Commit>) -> Self {
        Self {
            commits,
            created: Mutex::new(Vec::new()),
            labels: Mutex::new(Vec::new()),
            create_failures: Mutex::new(HashMap::new()),
            label_failure: Mutex::new(None),
        }
    }

    /// Fail pull request creation against `base`
    pub fn fail_create_for(&self, base: &str, failure: MockFailure) {
        self.create_failures
            .lock()
            .unwrap()
            .insert(base.to_string(), failure);
    }

    /// Fail every label request
    pub fn fail_labels(&self, failure: MockFailure) {
        *self.label_failure.lock().unwrap() = Some(failure);
    }

    /// Payloads of created pull requests
    pub fn created(&self) -> Vec<PullRequestPayload> {
        self.created.lock().unwrap().clone()
    }

    /// Label requests as `(pr number, labels)`
    pub fn labels(&self) -> Vec<(u64, Vec<String>)> {
        self.labels.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn fetch_commits_by_author(&self, _author: Option<&str>) -> Result<Vec<Commit>> {
        Ok(self.commits.clone())
    }

    async fn fetch_commit_by_sha(&self, sha: &str) -> Result<Commit> {
        self.commits
            .iter()
            .find(|c| c.sha.starts_with(sha))
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("No commit found for SHA: {sha}")))
    }

    async fn fetch_pull_number_by_sha(&self, sha: &str) -> Result<Option<u64>> {
        Ok(self
            .commits
            .iter()
            .find(|c| c.sha == sha)
            .and_then(|c| c.pull_number))
    }

    async fn create_pull_request(&self, payload: &PullRequestPayload) -> Result<PullRequest> {
        if let Some(failure) = self.create_failures.lock().unwrap().get(&payload.base) {
            return Err(failure.to_error("https://api.github.com/repos/elastic/kibana/pulls"));
        }

        let mut created = self.created.lock().unwrap();
        created.push(payload.clone());
        let number = 100 + created.len() as u64;
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/elastic/kibana/pull/{number}"),
        })
    }

    async fn add_labels(&self, pr_number: u64, labels: &[String]) -> Result<()> {
        if let Some(failure) = *self.label_failure.lock().unwrap() {
            return Err(failure.to_error(&format!(
                "https://api.github.com/repos/elastic/kibana/issues/{pr_number}/labels"
            )));
        }
        self.labels
            .lock()
            .unwrap()
            .push((pr_number, labels.to_vec()));
        Ok(())
    }

    async fn verify_access(&self) -> Result<()> {
        Ok(())
    }

    async fn authenticated_user(&self) -> Result<String> {
        Ok("alice".to_string())
    }
}
