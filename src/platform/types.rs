use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// An `owner/repo` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    /// Split `owner/repo` on the first `/`.
    pub fn parse(full_name: &str) -> Result<Self> {
        match full_name.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(AppError::Config(format!(
                "Invalid repository name (expected owner/repo): {full_name}"
            ))),
        }
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Source and target of the proposed merge within one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPair {
    pub repo: RepoSlug,
    pub head: String,
    pub base: String,
}

impl IdentityPair {
    pub fn new(repo: RepoSlug, head: &str, base: &str) -> Result<Self> {
        if head.is_empty() || base.is_empty() {
            return Err(AppError::Config(
                "Source and target branch names must not be empty".to_string(),
            ));
        }
        Ok(Self {
            repo,
            head: head.to_string(),
            base: base.to_string(),
        })
    }

    /// `owner:branch`, the form GitHub uses to disambiguate forks.
    pub fn qualified_head(&self) -> String {
        format!("{}:{}", self.repo.owner, self.head)
    }
}

/// An open pull request already linking the same head and base.
///
/// Any listed entry is a match; the fields are only used for reporting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExistingPullRequest {
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Status and full body of a creation attempt, kept for classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// JSON body of `POST /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePullRequest {
    pub title: String,
    pub head: String,
    pub base: String,
    pub body: String,
    pub maintainer_can_modify: bool,
    pub draft: bool,
}
