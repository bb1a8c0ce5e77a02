//! Configuration files
//!
//! Settings come from three layers, later ones overriding earlier ones:
//! the global `~/.backport/config.toml`, a project `.backportrc.toml` in the
//! working directory, and command-line flags.

use crate::backport::DEFAULT_PR_TITLE;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the per-project config file
pub const PROJECT_CONFIG_FILE: &str = ".backportrc.toml";

/// Name of the global config file inside the backport home directory
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Default GitHub API hostname
pub const DEFAULT_API_HOSTNAME: &str = "api.github.com";

/// Default git hostname
pub const DEFAULT_GIT_HOSTNAME: &str = "github.com";

/// One layer of configuration; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackportConfig {
    /// GitHub personal access token
    pub access_token: Option<String>,
    /// Owner of the fork feature branches are pushed to
    pub username: Option<String>,
    /// Upstream repository as `owner/repo`
    pub upstream: Option<String>,
    /// Target branches offered for selection
    pub branches: Option<Vec<String>>,
    /// Labels attached to created pull requests
    pub labels: Option<Vec<String>>,
    /// Pull request title template
    pub pr_title: Option<String>,
    /// Text appended to pull request bodies
    pub pr_description: Option<String>,
    /// GitHub API hostname
    pub api_hostname: Option<String>,
    /// Git hostname used for remotes
    pub git_hostname: Option<String>,
    /// List commits from all authors, not only the operator's
    pub all: Option<bool>,
    /// Allow selecting several commits
    pub multiple_commits: Option<bool>,
    /// Allow selecting several target branches
    pub multiple_branches: Option<bool>,
}

impl BackportConfig {
    /// Overlay `other` on top of `self`; values set in `other` win
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            access_token: other.access_token.or(self.access_token),
            username: other.username.or(self.username),
            upstream: other.upstream.or(self.upstream),
            branches: other.branches.or(self.branches),
            labels: other.labels.or(self.labels),
            pr_title: other.pr_title.or(self.pr_title),
            pr_description: other.pr_description.or(self.pr_description),
            api_hostname: other.api_hostname.or(self.api_hostname),
            git_hostname: other.git_hostname.or(self.git_hostname),
            all: other.all.or(self.all),
            multiple_commits: other.multiple_commits.or(self.multiple_commits),
            multiple_branches: other.multiple_branches.or(self.multiple_branches),
        }
    }

    /// Title template, falling back to the default
    pub fn pr_title(&self) -> &str {
        self.pr_title.as_deref().unwrap_or(DEFAULT_PR_TITLE)
    }

    /// API hostname, falling back to `api.github.com`
    pub fn api_hostname(&self) -> &str {
        self.api_hostname.as_deref().unwrap_or(DEFAULT_API_HOSTNAME)
    }

    /// Git hostname: the configured one, else `detected` (the host of the
    /// `origin` remote), else `github.com`
    pub fn git_hostname<'a>(&'a self, detected: Option<&'a str>) -> &'a str {
        self.git_hostname
            .as_deref()
            .or(detected)
            .unwrap_or(DEFAULT_GIT_HOSTNAME)
    }

    /// Labels, deduplicated in first-seen order
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for label in self.labels.iter().flatten() {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }
        labels
    }
}

/// Backport home directory: `$BACKPORT_HOME` or `~/.backport`
pub fn backport_home() -> Result<PathBuf> {
    if let Some(home) = env::var_os("BACKPORT_HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir()
        .map(|home| home.join(".backport"))
        .ok_or_else(|| Error::Config("cannot determine home directory".to_string()))
}

/// Read one config file; a missing file is not an error
pub fn read_config_file(path: &Path) -> Result<Option<BackportConfig>> {
    if !path.exists() {
        debug!(path = %path.display(), "config file not found");
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)?;
    let config = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("invalid config file {}: {e}", path.display())))?;
    debug!(path = %path.display(), "loaded config file");
    Ok(Some(config))
}

/// Load the global config from `home` and the project config from `project_dir`
pub fn load_config(home: &Path, project_dir: &Path) -> Result<BackportConfig> {
    let global = read_config_file(&home.join(GLOBAL_CONFIG_FILE))?.unwrap_or_default();
    let project = read_config_file(&project_dir.join(PROJECT_CONFIG_FILE))?.unwrap_or_default();
    Ok(global.merge(project))
}
