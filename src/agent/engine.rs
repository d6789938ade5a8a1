use crate::agent::outcome::{classify, Outcome};
use crate::config::AppConfig;
use crate::error::Result;
use crate::payload::PayloadBuilder;
use crate::platform::types::{IdentityPair, RepoSlug};
use crate::platform::PullRequestApi;

/// Everything one invocation needs, resolved up front by the caller.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub pair: IdentityPair,
    pub title_prefix: String,
    pub dry_run: bool,
    pub strict_conflict: bool,
}

impl AgentConfig {
    pub fn new(app: &AppConfig, target_branch: &str, title_prefix: &str, dry_run: bool) -> Result<Self> {
        let repo = RepoSlug::parse(&app.pipeline.repository)?;
        let pair = IdentityPair::new(repo, &app.pipeline.branch, target_branch)?;

        Ok(Self {
            pair,
            title_prefix: title_prefix.to_string(),
            dry_run,
            strict_conflict: app.github.strict_conflict,
        })
    }
}

/// Opens a pull request for `config.pair` unless an open one already exists.
pub struct AgentEngine<P> {
    platform: P,
    config: AgentConfig,
}

impl<P: PullRequestApi> AgentEngine<P> {
    pub fn new(platform: P, config: AgentConfig) -> Self {
        Self { platform, config }
    }

    pub async fn run(&self) -> Result<Outcome> {
        let pair = &self.config.pair;

        if pair.head == pair.base {
            tracing::info!(branch = %pair.head, "Source equals target, skipping");
            return Ok(Outcome::SameBranch {
                branch: pair.head.clone(),
            });
        }

        tracing::info!(
            repo = %pair.repo,
            head = %pair.head,
            base = %pair.base,
            "Checking for an open pull request"
        );

        if let Some(existing) = self.platform.find_open(pair).await? {
            tracing::info!(
                number = ?existing.number,
                url = ?existing.html_url,
                "Pull request already open"
            );
            return Ok(Outcome::AlreadyExists {
                url: existing.html_url,
                detail: None,
            });
        }

        let payload = PayloadBuilder::new(pair, &self.config.title_prefix).build();

        if self.config.dry_run {
            tracing::info!(title = %payload.title, "Dry run, not creating");
            return Ok(Outcome::WouldCreate {
                title: payload.title,
            });
        }

        tracing::info!(title = %payload.title, "Creating pull request");
        let response = self.platform.create(&pair.repo, &payload).await?;
        tracing::info!(status = response.status, "Creation responded");

        Ok(classify(response, self.config.strict_conflict))
    }
}
