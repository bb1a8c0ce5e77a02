//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::{PlatformConfig, PlatformService};
use crate::types::{Commit, PullRequest, PullRequestPayload};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Commits listed when no author filter is set
const COMMITS_PER_PAGE: u8 = 10;

/// Commits listed when filtering by author
const AUTHOR_COMMITS_PER_PAGE: u8 = 5;

const USER_AGENT: &str = concat!("backport/", env!("CARGO_PKG_VERSION"));

// REST response types

#[derive(Deserialize)]
struct SearchResults<T> {
    items: Vec<T>,
}

#[derive(Deserialize)]
struct GitHubCommit {
    sha: String,
    commit: GitHubCommitDetails,
}

#[derive(Deserialize)]
struct GitHubCommitDetails {
    message: String,
}

#[derive(Deserialize)]
struct GitHubIssue {
    number: u64,
}

#[derive(Deserialize)]
struct CreatedPullRequest {
    number: u64,
    html_url: String,
}

impl From<CreatedPullRequest> for PullRequest {
    fn from(pr: CreatedPullRequest) -> Self {
        Self {
            number: pr.number,
            html_url: pr.html_url,
        }
    }
}

#[derive(Serialize)]
struct CommitsQuery<'a> {
    per_page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
}

#[derive(Serialize)]
struct SearchQuery {
    q: String,
    per_page: u8,
}

#[derive(Serialize)]
struct LabelsBody<'a> {
    labels: &'a [String],
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    http: reqwest::Client,
    token: String,
    api_base: String,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a service talking to `https://<api_hostname>`
    pub fn new(token: &str, owner: String, repo: String, api_hostname: String) -> Result<Self> {
        let base_url = format!("https://{api_hostname}");
        Self::with_base_url(token, owner, repo, api_hostname, &base_url)
    }

    /// Create a service against an explicit API base URL
    pub fn with_base_url(
        token: &str,
        owner: String,
        repo: String,
        api_hostname: String,
        base_url: &str,
    ) -> Result<Self> {
        let api_base = base_url.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::Config(format!("invalid API base URL {api_base}: {e}")))?
            .build()?;

        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            http,
            token: token.to_string(),
            api_base,
            config: PlatformConfig {
                owner,
                repo,
                api_hostname,
            },
        })
    }

    fn repo_route(&self, suffix: &str) -> String {
        format!("/repos/{}/{}{suffix}", self.config.owner, self.config.repo)
    }

    /// Wrap an API failure so the operator sees the payload and the request URL
    fn api_error(&self, route: &str, err: octocrab::Error) -> Error {
        match err {
            octocrab::Error::GitHub { source, .. } => {
                let payload = serde_json::json!({
                    "message": source.message,
                    "errors": source.errors,
                    "documentation_url": source.documentation_url,
                });
                Error::GitHubApi {
                    url: format!("{}{route}", self.api_base),
                    message: serde_json::to_string_pretty(&payload)
                        .unwrap_or_else(|_| source.message.clone()),
                }
            }
            other => Error::Octocrab(other),
        }
    }

    async fn get<T, P>(&self, route: &str, params: &P) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        P: Serialize + Sync + ?Sized,
    {
        self.client
            .get(route, Some(params))
            .await
            .map_err(|e| self.api_error(route, e))
    }

    async fn post<T, B>(&self, route: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.client
            .post(route, Some(body))
            .await
            .map_err(|e| self.api_error(route, e))
    }

    async fn resolve_commit(&self, commit: GitHubCommit) -> Result<Commit> {
        let pull_number = self.fetch_pull_number_by_sha(&commit.sha).await?;
        Ok(Commit::new(commit.sha, &commit.commit.message, pull_number))
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn fetch_commits_by_author(&self, author: Option<&str>) -> Result<Vec<Commit>> {
        debug!(?author, "listing recent commits");
        let route = self.repo_route("/commits");
        let per_page = if author.is_some() {
            AUTHOR_COMMITS_PER_PAGE
        } else {
            COMMITS_PER_PAGE
        };
        let items: Vec<GitHubCommit> = self
            .get(&route, &CommitsQuery { per_page, author })
            .await?;

        let mut commits = Vec::with_capacity(items.len());
        for item in items {
            commits.push(self.resolve_commit(item).await?);
        }
        debug!(count = commits.len(), "listed recent commits");
        Ok(commits)
    }

    async fn fetch_commit_by_sha(&self, sha: &str) -> Result<Commit> {
        debug!(sha, "searching commit");
        let query = SearchQuery {
            q: format!("hash:{sha} repo:{}/{}", self.config.owner, self.config.repo),
            per_page: 1,
        };
        let results: SearchResults<GitHubCommit> = self.get("/search/commits", &query).await?;

        let commit = results
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("No commit found for SHA: {sha}")))?;
        self.resolve_commit(commit).await
    }

    async fn fetch_pull_number_by_sha(&self, sha: &str) -> Result<Option<u64>> {
        let query = SearchQuery {
            q: format!(
                "repo:{}/{} {sha} base:master",
                self.config.owner, self.config.repo
            ),
            per_page: 1,
        };
        let results: SearchResults<GitHubIssue> = self.get("/search/issues", &query).await?;

        let number = results.items.first().map(|issue| issue.number);
        debug!(sha, ?number, "resolved pull request for commit");
        Ok(number)
    }

    async fn create_pull_request(&self, payload: &PullRequestPayload) -> Result<PullRequest> {
        debug!(head = %payload.head, base = %payload.base, "creating PR");
        let route = self.repo_route("/pulls");
        let pr: CreatedPullRequest = self.post(&route, payload).await?;
        debug!(pr_number = pr.number, "created PR");
        Ok(pr.into())
    }

    async fn add_labels(&self, pr_number: u64, labels: &[String]) -> Result<()> {
        debug!(pr_number, ?labels, "adding labels");
        let route = self.repo_route(&format!("/issues/{pr_number}/labels"));
        let _: serde_json::Value = self.post(&route, &LabelsBody { labels }).await?;
        Ok(())
    }

    async fn verify_access(&self) -> Result<()> {
        let url = format!("{}{}", self.api_base, self.repo_route(""));
        debug!(%url, "verifying access token");

        let response = self
            .http
            .head(&url)
            .header("Authorization", format!("token {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        let granted_scopes = header("x-oauth-scopes");
        let required_scopes = header("x-accepted-oauth-scopes");
        let full_name = format!("{}/{}", self.config.owner, self.config.repo);

        match status {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized(
                "Please check your access token and make sure it is valid".to_string(),
            )),
            StatusCode::NOT_FOUND if granted_scopes == required_scopes => Err(Error::NotFound(
                format!("The repository \"{full_name}\" doesn't exist"),
            )),
            StatusCode::NOT_FOUND => Err(Error::Unauthorized(format!(
                "You do not have access to the repository \"{full_name}\". Please make sure your access token has the required scopes.\n\nRequired scopes: {required_scopes}\nAccess token scopes: {granted_scopes}"
            ))),
            other => Err(Error::Unexpected(format!(
                "unexpected status {other} from {url}"
            ))),
        }
    }

    async fn authenticated_user(&self) -> Result<String> {
        let user = self.client.current().user().await?;
        Ok(user.login)
    }
}
