pub mod engine;
pub mod outcome;

use crate::config::AppConfig;
use crate::credentials;
use crate::error::Result;
use crate::platform::github::GitHubPlatform;

use engine::{AgentConfig, AgentEngine};
use outcome::Outcome;

/// Arguments of one pipeline invocation.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub target_branch: String,
    pub title_prefix: String,
    pub dry_run: bool,
}

/// Resolve a credential, then probe and create against GitHub.
///
/// A missing credential fails before any network call is made.
pub async fn run_once(app: &AppConfig, request: &RunRequest) -> Result<Outcome> {
    let agent_config = AgentConfig::new(
        app,
        &request.target_branch,
        &request.title_prefix,
        request.dry_run,
    )?;

    let credential = credentials::resolve(&credentials::default_sources(&app.credentials))?;
    let platform = GitHubPlatform::new(&app.github, credential)?;

    AgentEngine::new(platform, agent_config).run().await
}
