//! Bearer-token selection from an ordered list of sources.

use crate::config::CredentialConfig;
use crate::error::{AppError, Result};

/// A bearer token. Never empty, never printed.
#[derive(Clone)]
pub struct Credential {
    source: &'static str,
    token: String,
}

impl Credential {
    /// Name of the source that supplied this token.
    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn expose(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("source", &self.source)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// A named place that may hold a token.
pub struct CredentialSource {
    name: &'static str,
    provider: Box<dyn Fn() -> Option<String> + Send + Sync>,
}

impl CredentialSource {
    pub fn new(
        name: &'static str,
        provider: impl Fn() -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            provider: Box::new(provider),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// The fixed lookup order: the pipeline's `GITHUB_TOKEN` first, then the
/// `GH_PAT` automation token.
pub fn default_sources(config: &CredentialConfig) -> Vec<CredentialSource> {
    let github_token = config.github_token.clone();
    let automation_token = config.automation_token.clone();
    vec![
        CredentialSource::new("GITHUB_TOKEN", move || github_token.clone()),
        CredentialSource::new("GH_PAT", move || automation_token.clone()),
    ]
}

/// Return the first source yielding a non-blank token.
pub fn resolve(sources: &[CredentialSource]) -> Result<Credential> {
    for source in sources {
        let Some(value) = (source.provider)() else {
            continue;
        };
        let token = value.trim();
        if token.is_empty() {
            tracing::debug!(source = source.name(), "Credential source is blank");
            continue;
        }
        tracing::info!(source = source.name(), "Using credential");
        return Ok(Credential {
            source: source.name(),
            token: token.to_string(),
        });
    }

    let names: Vec<&str> = sources.iter().map(CredentialSource::name).collect();
    Err(AppError::Config(format!(
        "No credential available; set one of: {}",
        names.join(", ")
    )))
}
