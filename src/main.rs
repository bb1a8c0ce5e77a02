//! backport - Cherry-pick commits to release branches and open pull requests
//!
//! CLI binary for backporting commits with GitHub.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "backport")]
#[command(about = "Backport commits to release branches and open pull requests")]
#[command(version)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    backport: BackportArgs,
}

#[derive(Args)]
struct BackportArgs {
    /// Upstream repository as owner/repo (defaults to the origin remote)
    #[arg(long)]
    upstream: Option<String>,

    /// Commit to backport; repeat for several (prompts when omitted)
    #[arg(long = "sha", short = 's')]
    shas: Vec<String>,

    /// Branch to backport to; repeat for several (prompts when omitted)
    #[arg(long = "branch", short = 'b')]
    branches: Vec<String>,

    /// Label to add to the pull request; repeat for several
    #[arg(long = "label", short = 'l')]
    labels: Vec<String>,

    /// GitHub user owning the fork to push to
    #[arg(long)]
    username: Option<String>,

    /// List commits from all authors instead of only your own
    #[arg(long, short = 'a')]
    all: bool,

    /// Select several commits and branches
    #[arg(long, short = 'm')]
    multiple: bool,

    /// Pull request title template ({baseBranch}, {commitMessages})
    #[arg(long)]
    pr_title: Option<String>,

    /// Text appended to the pull request description
    #[arg(long)]
    pr_description: Option<String>,

    /// GitHub API hostname (for GitHub Enterprise)
    #[arg(long)]
    api_hostname: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

impl From<BackportArgs> for cli::BackportOptions {
    fn from(args: BackportArgs) -> Self {
        Self {
            upstream: args.upstream,
            shas: args.shas,
            branches: args.branches,
            labels: args.labels,
            username: args.username,
            all: args.all,
            multiple: args.multiple,
            pr_title: args.pr_title,
            pr_description: args.pr_description,
            api_hostname: args.api_hostname,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("backport=debug")
    } else {
        EnvFilter::try_from_env("BACKPORT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let options: cli::BackportOptions = cli.backport.into();

    let result = match cli.command {
        None => cli::run_backport(&cwd, &options).await,
        Some(Commands::Auth { action }) => match action {
            AuthAction::Test => match cli::load_settings(&cwd, &options) {
                Ok(config) => cli::run_auth_test(&config).await,
                Err(e) => Err(e),
            },
            AuthAction::Setup => {
                cli::run_auth_setup();
                Ok(())
            }
        },
    };

    // Handled errors already carry a message for the operator
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_handled() => {
            anstream::eprintln!("{e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
