pub mod github;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use types::*;

#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// Find an open pull request from `pair.head` into `pair.base`.
    ///
    /// Any non-success response is an error, never "not found".
    async fn find_open(&self, pair: &IdentityPair) -> Result<Option<ExistingPullRequest>>;

    /// Send a single creation request and return the raw status and body,
    /// whatever the status.
    async fn create(&self, repo: &RepoSlug, payload: &CreatePullRequest) -> Result<RawResponse>;
}
