//! Error types for backport
//!
//! Errors fall into two groups. Handled errors carry a message meant for the
//! operator and only end work on the current target branch. Everything else
//! is systemic and stops the whole run.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while backporting
#[derive(Debug, Error)]
pub enum Error {
    /// A commit, pull request or repository could not be found
    #[error("{0}")]
    NotFound(String),

    /// The access token is invalid or lacks the required scopes
    #[error("{0}")]
    Unauthorized(String),

    /// A cherry-pick stopped on conflicting changes
    #[error("Cherry-pick conflict while running `{command}`: {message}")]
    Conflict {
        /// The git command line that failed
        command: String,
        /// Output captured from git
        message: String,
    },

    /// The operator declined to continue after a conflict
    #[error("Aborted")]
    OperatorAborted,

    /// The hosting API rejected a request
    #[error("GitHub API request to {url} failed:\n{message}")]
    GitHubApi {
        /// The request URL
        url: String,
        /// Pretty-printed response payload
        message: String,
    },

    /// A git command failed for a reason other than a conflict
    #[error("Git command `{command}` failed: {message}")]
    Git {
        /// The git command line that failed
        command: String,
        /// Output captured from git
        message: String,
    },

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Response or state that should never happen
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// Transport-level octocrab failure
    #[error("GitHub client error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error is anticipated and has an operator-facing message.
    ///
    /// Handled errors end processing of the current target branch only;
    /// the orchestrator logs them and moves on to the next branch.
    pub const fn is_handled(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::Unauthorized(_)
                | Self::OperatorAborted
                | Self::GitHubApi { .. }
                | Self::Config(_)
                | Self::InvalidArgument(_)
        )
    }
}
