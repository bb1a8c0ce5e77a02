//! Auth command - test and manage authentication

use crate::cli::style::{Stylize, check, spinner_style};
use anstream::println;
use backport::auth::{get_github_auth, test_github_auth};
use backport::config::{BackportConfig, GLOBAL_CONFIG_FILE};
use backport::error::Result;
use indicatif::ProgressBar;
use std::time::Duration;

/// Run the auth test command
pub async fn run_auth_test(config: &BackportConfig) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message("Testing GitHub authentication...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let auth = match get_github_auth(config.access_token.as_deref()).await {
        Ok(auth) => auth,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    let username = test_github_auth(&auth, config.api_hostname()).await;
    spinner.finish_and_clear();
    let username = username?;

    println!("{} Authenticated as: {}", check(), username.accent());
    println!("  {} {:?}", "Token source:".muted(), auth.source);
    println!("  {} {}", "API host:".muted(), config.api_hostname());
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup() {
    println!("{}", "GitHub Authentication Setup".emphasis());
    println!();
    println!("{}", "Option 1: Backport config (recommended)".emphasis());
    println!(
        "  Create a token at {} with the {} scope",
        "https://github.com/settings/tokens/new".accent(),
        "repo".accent()
    );
    println!(
        "  Add {} to {}",
        "access_token = \"<token>\"".accent(),
        format!("~/.backport/{GLOBAL_CONFIG_FILE}").accent()
    );
    println!();
    println!("{}", "Option 2: Environment variable".emphasis());
    println!(
        "  Set {} or {}",
        "GITHUB_TOKEN".accent(),
        "GH_TOKEN".accent()
    );
    println!();
    println!("{}", "Option 3: GitHub CLI".emphasis());
    println!("  Install: {}", "https://cli.github.com/".accent());
    println!("  Run: {}", "gh auth login".accent());
    println!();
    println!("{}", "For GitHub Enterprise:".muted());
    println!(
        "  {}",
        "Set api_hostname and git_hostname in your config".muted()
    );
}
