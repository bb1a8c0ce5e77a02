//! Scripted working copy

use async_trait::async_trait;
use backport::error::{Error, Result};
use backport::repo::{RemoteSpec, VcsService};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Result of one scripted cherry-pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CherryPickResult {
    Clean,
    Conflict,
    Fatal,
}

/// Working copy recording every call and replaying scripted results.
///
/// Cherry-picks succeed unless scripted; the index is clean unless a dirty
/// sequence is queued.
pub struct MockVcs {
    path: PathBuf,
    calls: Mutex<Vec<String>>,
    cherry_picks: Mutex<HashMap<String, VecDeque<CherryPickResult>>>,
    dirty: Mutex<VecDeque<bool>>,
    fail_push: Mutex<bool>,
}

impl MockVcs {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from("/home/alice/.backport/repositories/elastic/kibana"),
            calls: Mutex::new(Vec::new()),
            cherry_picks: Mutex::new(HashMap::new()),
            dirty: Mutex::new(VecDeque::new()),
            fail_push: Mutex::new(false),
        }
    }

    /// Queue results for successive cherry-picks of `sha`
    pub fn script_cherry_pick(&self, sha: &str, results: &[CherryPickResult]) {
        self.cherry_picks
            .lock()
            .unwrap()
            .entry(sha.to_string())
            .or_default()
            .extend(results.iter().copied());
    }

    /// Queue answers for successive index checks
    pub fn script_dirty(&self, answers: &[bool]) {
        self.dirty.lock().unwrap().extend(answers.iter().copied());
    }

    /// Make every push fail
    pub fn fail_push(&self) {
        *self.fail_push.lock().unwrap() = true;
    }

    /// Calls in the order they were made
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl VcsService for MockVcs {
    fn repo_path(&self) -> &Path {
        &self.path
    }

    async fn setup_repo(&self, remotes: &[RemoteSpec]) -> Result<()> {
        let names: Vec<_> = remotes.iter().map(|r| r.name.as_str()).collect();
        self.record(format!("setup {}", names.join(",")));
        Ok(())
    }

    async fn reset_and_pull_base(&self, base_branch: &str) -> Result<()> {
        self.record(format!("reset {base_branch}"));
        Ok(())
    }

    async fn create_and_checkout_branch(
        &self,
        base_branch: &str,
        feature_branch: &str,
    ) -> Result<()> {
        self.record(format!("checkout {feature_branch} from {base_branch}"));
        Ok(())
    }

    async fn cherry_pick(&self, sha: &str) -> Result<()> {
        self.record(format!("cherry-pick {sha}"));
        let result = self
            .cherry_picks
            .lock()
            .unwrap()
            .get_mut(sha)
            .and_then(VecDeque::pop_front)
            .unwrap_or(CherryPickResult::Clean);

        match result {
            CherryPickResult::Clean => Ok(()),
            CherryPickResult::Conflict => Err(Error::Conflict {
                command: format!("git cherry-pick {sha}"),
                message: "error: could not apply".to_string(),
            }),
            CherryPickResult::Fatal => Err(Error::Git {
                command: format!("git cherry-pick {sha}"),
                message: format!("fatal: bad revision '{sha}'"),
            }),
        }
    }

    async fn is_index_dirty(&self) -> Result<bool> {
        self.record("dirty?".to_string());
        Ok(self.dirty.lock().unwrap().pop_front().unwrap_or(false))
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push {remote} {branch}"));
        if *self.fail_push.lock().unwrap() {
            return Err(Error::Git {
                command: format!("git push {remote} {branch}:{branch} --force"),
                message: "fatal: could not read from remote repository".to_string(),
            });
        }
        Ok(())
    }
}
