//! Authentication for GitHub
//!
//! Supports a token from the config file, environment variables and the
//! GitHub CLI. The resolved token is returned to the caller and threaded
//! through explicitly; it is never stored in process-wide state.

mod github;

pub use github::{GitHubAuthConfig, get_github_auth, resolve_github_token, test_github_auth};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from the backport config file
    Config,
    /// Token from CLI tool (gh)
    Cli,
    /// Token from environment variable
    EnvVar,
}
