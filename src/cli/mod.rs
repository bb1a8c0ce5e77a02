//! CLI front end

mod auth;
mod progress;
mod prompt;
mod run;
mod style;

pub use auth::{run_auth_setup, run_auth_test};
pub use progress::CliProgress;
pub use run::{BackportOptions, load_settings, run_backport};
