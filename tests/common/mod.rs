//! Common test utilities for backport tests

pub mod fixtures;
pub mod mock_platform;
pub mod mock_vcs;
pub mod temp_repo;

// Re-exports for convenience - not all test binaries use all exports
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_platform::{MockFailure, MockPlatformService};
#[allow(unused_imports)]
pub use mock_vcs::{CherryPickResult, MockVcs};
#[allow(unused_imports)]
pub use temp_repo::{TempGitRepo, set_identity};
