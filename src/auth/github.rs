//! GitHub authentication

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use crate::platform::{GitHubService, PlatformService};
use std::env;
use tokio::process::Command;
use tracing::debug;

/// GitHub authentication configuration
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Personal access token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"***")
            .field("source", &self.source)
            .finish()
    }
}

/// Pick a token from the config file or the environment.
///
/// Priority:
/// 1. `access_token` from the backport config
/// 2. `GITHUB_TOKEN` environment variable
/// 3. `GH_TOKEN` environment variable
pub fn resolve_github_token(
    config_token: Option<&str>,
    lookup_env: impl Fn(&str) -> Option<String>,
) -> Option<GitHubAuthConfig> {
    if let Some(token) = config_token.map(str::trim).filter(|t| !t.is_empty()) {
        debug!("using access token from config");
        return Some(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::Config,
        });
    }

    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        debug!("checking {var} env var");
        if let Some(token) = lookup_env(var).map(|t| t.trim().to_string())
            && !token.is_empty()
        {
            debug!("obtained GitHub token from {var} env var");
            return Some(GitHubAuthConfig {
                token,
                source: AuthSource::EnvVar,
            });
        }
    }

    None
}

/// Get GitHub authentication, falling back to `gh auth token`
pub async fn get_github_auth(config_token: Option<&str>) -> Result<GitHubAuthConfig> {
    if let Some(auth) = resolve_github_token(config_token, |var| env::var(var).ok()) {
        return Ok(auth);
    }

    debug!("no token configured, attempting to get GitHub token via gh CLI");
    if let Some(token) = get_gh_cli_token().await {
        debug!("obtained GitHub token from gh CLI");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    debug!("no GitHub authentication found");
    Err(Error::Config(
        "No GitHub access token found. Set access_token in ~/.backport/config.toml, export GITHUB_TOKEN, or run `gh auth login`".to_string(),
    ))
}

async fn get_gh_cli_token() -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}

/// Test GitHub authentication, returning the authenticated login
pub async fn test_github_auth(config: &GitHubAuthConfig, api_hostname: &str) -> Result<String> {
    // Owner and repo are irrelevant for the user lookup
    let service = GitHubService::new(
        &config.token,
        String::new(),
        String::new(),
        api_hostname.to_string(),
    )?;
    service.authenticated_user().await
}
