//! Remote URLs and working copy location

use std::path::{Path, PathBuf};

/// A git remote to register in the working copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSpec {
    /// Remote name (`origin` for upstream, the username for a fork)
    pub name: String,
    /// Fetch/push URL
    pub url: String,
}

impl RemoteSpec {
    /// Remote pointing at `<owner>/<repo_name>` on `git_hostname`
    pub fn new(
        name: impl Into<String>,
        access_token: &str,
        git_hostname: &str,
        owner: &str,
        repo_name: &str,
    ) -> Self {
        Self {
            name: name.into(),
            url: remote_url(access_token, git_hostname, owner, repo_name),
        }
    }
}

/// Authenticated HTTPS remote URL
pub fn remote_url(access_token: &str, git_hostname: &str, owner: &str, repo_name: &str) -> String {
    format!("https://{access_token}@{git_hostname}/{owner}/{repo_name}.git")
}

/// Location of the working copy for a repository under the backport home directory
pub fn repo_path(backport_home: &Path, owner: &str, repo_name: &str) -> PathBuf {
    backport_home
        .join("repositories")
        .join(owner)
        .join(repo_name)
}
