//! Platform service factory
//!
//! Creates platform services based on configuration.

use crate::auth::GitHubAuthConfig;
use crate::error::Result;
use crate::platform::{GitHubService, PlatformConfig, PlatformService};

/// Create a platform service from configuration
///
/// The token is passed in explicitly; nothing is read from process state here.
pub fn create_platform_service(
    config: &PlatformConfig,
    auth: &GitHubAuthConfig,
) -> Result<Box<dyn PlatformService>> {
    Ok(Box::new(GitHubService::new(
        &auth.token,
        config.owner.clone(),
        config.repo.clone(),
        config.api_hostname.clone(),
    )?))
}
