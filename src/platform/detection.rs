//! Repository detection from `owner/repo` strings and remote URLs

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Regex for SSH URLs: git@host:owner/repo.git
static RE_SSH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"git@[^:]+:(.+?)(?:\.git)?$").unwrap());

/// Regex for HTTPS URLs: `https://host/owner/repo.git`
static RE_HTTPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^/]+/(.+?)(?:\.git)?$").unwrap());

/// Regex for an upstream given as `owner/repo`
static RE_UPSTREAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.\-]+)/([A-Za-z0-9_.\-]+)$").unwrap());

/// Owner, repository and host parsed from a remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Git hostname, when one could be determined
    pub host: Option<String>,
}

/// Parse an upstream given as `owner/repo`
pub fn parse_upstream(upstream: &str) -> Result<(String, String)> {
    let caps = RE_UPSTREAM.captures(upstream.trim()).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "upstream must be in the format \"owner/repo\", got: {upstream}"
        ))
    })?;
    Ok((caps[1].to_string(), caps[2].to_string()))
}

/// Parse repository info (owner/repo) from a remote URL
pub fn parse_repo_info(url: &str) -> Result<RepoInfo> {
    // Normalize: strip trailing slashes
    let url = url.trim_end_matches('/');

    let path = RE_SSH
        .captures(url)
        .or_else(|| RE_HTTPS.captures(url))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::InvalidArgument(format!("cannot parse remote URL: {url}")))?;

    let (owner, repo) = path
        .rsplit_once('/')
        .ok_or_else(|| Error::InvalidArgument(format!("invalid repo path: {path}")))?;

    Ok(RepoInfo {
        owner: owner.to_string(),
        repo: repo.to_string(),
        host: extract_hostname(url),
    })
}

fn extract_hostname(url: &str) -> Option<String> {
    // SSH format
    if url.starts_with("git@") {
        return url
            .strip_prefix("git@")
            .and_then(|s| s.split(':').next())
            .map(ToString::to_string);
    }

    // HTTPS format
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(ToString::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upstream() {
        let (owner, repo) = parse_upstream("elastic/kibana").unwrap();
        assert_eq!(owner, "elastic");
        assert_eq!(repo, "kibana");
    }

    #[test]
    fn test_parse_upstream_rejects_missing_repo() {
        assert!(matches!(
            parse_upstream("elastic"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(parse_upstream("a/b/c").is_err());
    }

    #[test]
    fn test_parse_github_https() {
        let info = parse_repo_info("https://github.com/owner/repo.git").unwrap();
        assert_eq!(info.owner, "owner");
        assert_eq!(info.repo, "repo");
        assert_eq!(info.host.as_deref(), Some("github.com"));
    }

    #[test]
    fn test_parse_github_ssh() {
        let info = parse_repo_info("git@github.my-company.com:elastic/kibana.git").unwrap();
        assert_eq!(info.owner, "elastic");
        assert_eq!(info.repo, "kibana");
        assert_eq!(info.host.as_deref(), Some("github.my-company.com"));
    }

    #[test]
    fn test_parse_trailing_slash() {
        let info = parse_repo_info("https://github.com/owner/repo/").unwrap();
        assert_eq!(info.repo, "repo");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_repo_info("not a url").is_err());
    }
}
