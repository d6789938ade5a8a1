use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{AppError, Result};

/// Settings collected once by the binary and handed to the agent.
///
/// Sources, lowest precedence first: an optional `auto-pr.toml`, then
/// `AUTO_PR__SECTION__KEY` environment variables, then the CI pipeline
/// variables (`GITHUB_REPOSITORY`, `GITHUB_HEAD_REF`/`GITHUB_REF_NAME`,
/// `GITHUB_TOKEN`, `GH_PAT`).
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GitHubConfig,
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub credentials: CredentialConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Only treat a 422 as a benign conflict when GitHub says the PR already exists.
    #[serde(default)]
    pub strict_conflict: bool,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            strict_conflict: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// `owner/repo`
    pub repository: String,
    /// Branch the pipeline is running on; becomes the PR head.
    pub branch: String,
}

#[derive(Deserialize, Clone, Default)]
pub struct CredentialConfig {
    pub github_token: Option<String>,
    pub automation_token: Option<String>,
}

// Manual Debug impl to avoid leaking tokens
impl std::fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("CredentialConfig")
            .field("github_token", &redact(&self.github_token))
            .field("automation_token", &redact(&self.automation_token))
            .finish()
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    "auto-pr".to_string()
}

fn non_empty(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl AppConfig {
    /// Load from the process environment.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(config_path, &vars)
    }

    /// Load from an explicit variable map instead of the process environment.
    pub fn from_vars(config_path: Option<&str>, vars: &HashMap<String, String>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("auto-pr").required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("AUTO_PR")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        let branch = non_empty(vars, "GITHUB_HEAD_REF").or_else(|| non_empty(vars, "GITHUB_REF_NAME"));

        builder = builder
            .set_override_option("pipeline.repository", non_empty(vars, "GITHUB_REPOSITORY"))?
            .set_override_option("pipeline.branch", branch)?
            .set_override_option("credentials.github_token", vars.get("GITHUB_TOKEN").cloned())?
            .set_override_option("credentials.automation_token", vars.get("GH_PAT").cloned())?;

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}
