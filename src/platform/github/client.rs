use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};

use crate::config::GitHubConfig;
use crate::credentials::Credential;
use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::PullRequestApi;

use super::mapper;

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

pub struct GitHubPlatform {
    client: Client,
    api_url: String,
    credential: Credential,
}

impl GitHubPlatform {
    pub fn new(config: &GitHubConfig, credential: Credential) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        tracing::debug!(
            api_url = %config.api_url,
            credential = credential.source(),
            "GitHub client ready"
        );

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            credential,
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(self.credential.expose())
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    fn pulls_url(&self, repo: &RepoSlug) -> String {
        format!("{}/repos/{}/{}/pulls", self.api_url, repo.owner, repo.repo)
    }
}

#[async_trait]
impl PullRequestApi for GitHubPlatform {
    async fn find_open(&self, pair: &IdentityPair) -> Result<Option<ExistingPullRequest>> {
        let url = format!(
            "{}?state=open&head={}&base={}",
            self.pulls_url(&pair.repo),
            urlencoding::encode(&pair.qualified_head()),
            urlencoding::encode(&pair.base),
        );
        tracing::debug!(%url, "GET");

        let response = self.request(Method::GET, &url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Auth {
                status: status.as_u16(),
                body,
            }),
            s if !s.is_success() => Err(AppError::Probe {
                status: s.as_u16(),
                body,
            }),
            _ => mapper::first_open(&body),
        }
    }

    async fn create(&self, repo: &RepoSlug, payload: &CreatePullRequest) -> Result<RawResponse> {
        let url = self.pulls_url(repo);
        tracing::debug!(%url, head = %payload.head, base = %payload.base, "POST");

        let response = self.request(Method::POST, &url).json(payload).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}
