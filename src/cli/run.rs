//! Default command - cherry-pick commits to branches and open PRs

use crate::cli::CliProgress;
use crate::cli::prompt::{DialoguerPrompter, select_branches, select_commits};
use crate::cli::style::{Stylize, check, cross, hyperlink, spinner_style};
use anstream::println;
use backport::auth::get_github_auth;
use backport::backport::{BackportContext, BackportJob, backport_commits};
use backport::config::{BackportConfig, backport_home, load_config};
use backport::error::{Error, Result};
use backport::platform::{
    PlatformConfig, PlatformService, RepoInfo, create_platform_service, parse_repo_info,
    parse_upstream,
};
use backport::repo::{GitCli, RemoteSpec, VcsService, get_remote_url, repo_path};
use backport::types::{BranchOutcome, Commit};
use indicatif::ProgressBar;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Options for the backport command
#[derive(Debug, Clone, Default)]
pub struct BackportOptions {
    /// Upstream repository (`owner/repo`)
    pub upstream: Option<String>,
    /// Commits to backport; prompts when empty
    pub shas: Vec<String>,
    /// Target branches; prompts when empty
    pub branches: Vec<String>,
    /// Labels to add to created PRs
    pub labels: Vec<String>,
    /// Fork owner to push to
    pub username: Option<String>,
    /// List commits from all authors
    pub all: bool,
    /// Allow selecting several commits and branches
    pub multiple: bool,
    /// Title template
    pub pr_title: Option<String>,
    /// Text appended to PR bodies
    pub pr_description: Option<String>,
    /// GitHub API hostname
    pub api_hostname: Option<String>,
}

impl BackportOptions {
    /// Command-line layer on top of the config files
    fn overlay(&self) -> BackportConfig {
        BackportConfig {
            username: self.username.clone(),
            upstream: self.upstream.clone(),
            labels: (!self.labels.is_empty()).then(|| self.labels.clone()),
            pr_title: self.pr_title.clone(),
            pr_description: self.pr_description.clone(),
            api_hostname: self.api_hostname.clone(),
            all: self.all.then_some(true),
            multiple_commits: self.multiple.then_some(true),
            multiple_branches: self.multiple.then_some(true),
            ..BackportConfig::default()
        }
    }
}

/// Load config files and apply command-line overrides
pub fn load_settings(cwd: &Path, options: &BackportOptions) -> Result<BackportConfig> {
    let home = backport_home()?;
    Ok(load_config(&home, cwd)?.merge(options.overlay()))
}

/// Run the backport command
pub async fn run_backport(cwd: &Path, options: &BackportOptions) -> Result<()> {
    let home = backport_home()?;
    let config = load_settings(cwd, options)?;

    let RepoInfo {
        owner,
        repo: repo_name,
        host,
    } = resolve_upstream(cwd, &config).await?;
    let git_hostname = config.git_hostname(host.as_deref());
    debug!(owner = %owner, repo = %repo_name, git_hostname, "resolved upstream");

    let auth = get_github_auth(config.access_token.as_deref()).await?;
    let platform = create_platform_service(
        &PlatformConfig {
            owner: owner.clone(),
            repo: repo_name.clone(),
            api_hostname: config.api_hostname().to_string(),
        },
        &auth,
    )?;

    with_spinner("Verifying access token", platform.verify_access()).await?;

    let username = match config.username.clone() {
        Some(username) => username,
        None => platform.authenticated_user().await?,
    };

    let commits = resolve_commits(platform.as_ref(), &config, &options.shas, &username).await?;
    let branches = resolve_branches(&config, &options.branches)?;

    let vcs = GitCli::new(repo_path(&home, &owner, &repo_name)).with_secret(auth.token.clone());
    let remotes = [
        RemoteSpec::new("origin", &auth.token, git_hostname, &owner, &repo_name),
        RemoteSpec::new(&username, &auth.token, git_hostname, &username, &repo_name),
    ];
    with_spinner(
        &format!("Preparing repository {owner}/{repo_name}"),
        vcs.setup_repo(&remotes),
    )
    .await?;

    let job = BackportJob {
        owner,
        repo_name,
        commits,
        branches,
        username,
        labels: config.labels(),
        pr_title: config.pr_title().to_string(),
        pr_description: config.pr_description.clone(),
    };

    let progress = CliProgress::new();
    let ctx = BackportContext {
        platform: platform.as_ref(),
        vcs: &vcs,
        prompter: &DialoguerPrompter,
        progress: &progress,
    };
    let outcomes = backport_commits(&ctx, &job).await?;

    print_summary(&outcomes);
    Ok(())
}

/// Upstream from config/flags, else from the `origin` remote of the current directory.
///
/// Only the remote carries a host.
async fn resolve_upstream(cwd: &Path, config: &BackportConfig) -> Result<RepoInfo> {
    if let Some(upstream) = config.upstream.as_deref() {
        let (owner, repo) = parse_upstream(upstream)?;
        return Ok(RepoInfo {
            owner,
            repo,
            host: None,
        });
    }

    let url = get_remote_url(cwd, "origin").await.ok_or_else(|| {
        Error::Config(
            "No upstream configured. Pass --upstream owner/repo or set upstream in .backportrc.toml"
                .to_string(),
        )
    })?;
    parse_repo_info(&url)
}

async fn resolve_commits(
    platform: &dyn PlatformService,
    config: &BackportConfig,
    shas: &[String],
    username: &str,
) -> Result<Vec<Commit>> {
    if !shas.is_empty() {
        let mut commits = Vec::with_capacity(shas.len());
        for sha in shas {
            let commit = with_spinner(
                &format!("Loading commit {sha}"),
                platform.fetch_commit_by_sha(sha),
            )
            .await?;
            commits.push(commit);
        }
        return Ok(commits);
    }

    let author = if config.all.unwrap_or(false) {
        None
    } else {
        Some(username)
    };
    let commits = with_spinner(
        "Loading commits",
        platform.fetch_commits_by_author(author),
    )
    .await?;

    if commits.is_empty() {
        return Err(Error::NotFound(match author {
            Some(author) => format!("There are no commits by \"{author}\" in this repository"),
            None => "There are no commits in this repository".to_string(),
        }));
    }

    select_commits(commits, config.multiple_commits.unwrap_or(false))
}

fn resolve_branches(config: &BackportConfig, flags: &[String]) -> Result<Vec<String>> {
    if !flags.is_empty() {
        return Ok(flags.to_vec());
    }

    match config.branches.as_deref() {
        Some(branches) if !branches.is_empty() => {
            select_branches(branches, config.multiple_branches.unwrap_or(false))
        }
        _ => Err(Error::Config(
            "No target branches. Pass --branch or set branches in .backportrc.toml".to_string(),
        )),
    }
}

/// Show a spinner while `fut` runs
async fn with_spinner<T>(message: &str, fut: impl Future<Output = Result<T>>) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = fut.await;
    spinner.finish_and_clear();
    result
}

fn print_summary(outcomes: &[BranchOutcome]) {
    if outcomes.len() < 2 {
        return;
    }

    println!();
    println!("{}", "Summary".emphasis());
    for outcome in outcomes {
        match outcome {
            BranchOutcome::Created {
                branch,
                pull_request,
                ..
            } => println!(
                "  {} {} {}",
                check(),
                branch.accent(),
                hyperlink(&pull_request.html_url)
            ),
            BranchOutcome::Failed { branch, message } => {
                println!("  {} {} {}", cross(), branch.accent(), message.muted());
            }
        }
    }
}
