//! backport - Cherry-pick commits onto release branches and open pull requests
//!
//! This library holds everything except the terminal front end: resolving
//! commits against GitHub, naming feature branches, cherry-picking with
//! operator-driven conflict recovery, and building and submitting pull
//! requests, one target branch at a time.
//!
//! All I/O is async and state is passed explicitly (no globals). The hosting
//! API, the working copy and the operator are reached through the
//! [`platform::PlatformService`], [`repo::VcsService`] and
//! [`backport::Prompter`] traits so the engine can be driven by fakes.

pub mod auth;
pub mod backport;
pub mod config;
pub mod error;
pub mod platform;
pub mod repo;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
