use serde::Deserialize;

use crate::platform::types::RawResponse;

const ALREADY_EXISTS: &str = "pull request already exists";

/// Terminal state of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The creation request succeeded.
    Created { url: Option<String> },
    /// An open pull request was found by the probe (`url` set), or GitHub
    /// rejected the creation as a conflict (`detail` holds the raw body).
    AlreadyExists {
        url: Option<String>,
        detail: Option<String>,
    },
    /// Dry run: nothing exists and this is what would have been opened.
    WouldCreate { title: String },
    /// Source and target are the same branch.
    SameBranch { branch: String },
    /// Any other creation response.
    Failed { status: u16, body: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed { .. })
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Operator-facing report. Raw response bodies are included verbatim.
    pub fn summary(&self) -> String {
        match self {
            Outcome::Created { url: Some(url) } => format!("Pull request created: {url}"),
            Outcome::Created { url: None } => {
                "Pull request created (no URL in response)".to_string()
            }
            Outcome::AlreadyExists { url: Some(url), .. } => {
                format!("An open pull request already exists: {url}")
            }
            Outcome::AlreadyExists {
                url: None,
                detail: Some(body),
            } => format!(
                "GitHub reports the pull request already exists; nothing to do.\n{body}"
            ),
            Outcome::AlreadyExists {
                url: None,
                detail: None,
            } => "An open pull request already exists".to_string(),
            Outcome::WouldCreate { title } => format!("Dry run: would open \"{title}\""),
            Outcome::SameBranch { branch } => {
                format!("Source and target are both '{branch}'; nothing to do")
            }
            Outcome::Failed { status, body } => {
                format!("Failed to create pull request (HTTP {status})\n{body}")
            }
        }
    }
}

#[derive(Deserialize)]
struct CreatedBody {
    html_url: String,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Map a creation response onto a terminal outcome.
///
/// 2xx is `Created`, 422 is `AlreadyExists`, everything else is `Failed`.
/// With `strict_conflict`, a 422 only counts as a conflict when the body
/// says the pull request already exists.
pub fn classify(response: RawResponse, strict_conflict: bool) -> Outcome {
    let RawResponse { status, body } = response;

    match status {
        200..=299 => {
            let url = serde_json::from_str::<CreatedBody>(&body)
                .ok()
                .map(|created| created.html_url);
            if url.is_none() {
                tracing::warn!(status, "Creation succeeded but response had no html_url");
            }
            Outcome::Created { url }
        }
        422 if !strict_conflict || reports_existing(&body) => Outcome::AlreadyExists {
            url: None,
            detail: Some(body),
        },
        _ => Outcome::Failed { status, body },
    }
}

fn reports_existing(body: &str) -> bool {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    std::iter::once(parsed.message.as_str())
        .chain(parsed.errors.iter().filter_map(|e| e.message.as_deref()))
        .any(|m| m.to_lowercase().contains(ALREADY_EXISTS))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXISTS_BODY: &str = r#"{"message":"Validation Failed","errors":[{"resource":"PullRequest","code":"custom","message":"A pull request already exists for octo:feature/x."}],"documentation_url":"https://docs.github.com/rest/pulls/pulls#create-a-pull-request"}"#;
    const NO_COMMITS_BODY: &str = r#"{"message":"Validation Failed","errors":[{"resource":"PullRequest","code":"custom","message":"No commits between main and feature/x"}]}"#;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_created() {
        let outcome = classify(
            raw(201, r#"{"number":3,"html_url":"https://github.com/octo/widgets/pull/3"}"#),
            false,
        );
        assert_eq!(
            outcome,
            Outcome::Created {
                url: Some("https://github.com/octo/widgets/pull/3".to_string())
            }
        );
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn test_created_without_url_is_still_success() {
        let outcome = classify(raw(200, "garbage"), false);
        assert_eq!(outcome, Outcome::Created { url: None });
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn test_conflict_is_benign_and_body_verbatim() {
        let outcome = classify(raw(422, EXISTS_BODY), false);
        assert_eq!(outcome.exit_code(), 0);
        assert!(outcome.summary().contains(EXISTS_BODY));
    }

    #[test]
    fn test_any_422_benign_by_default() {
        let outcome = classify(raw(422, NO_COMMITS_BODY), false);
        assert!(matches!(outcome, Outcome::AlreadyExists { .. }));
    }

    #[test]
    fn test_strict_conflict_requires_exists_message() {
        assert!(matches!(
            classify(raw(422, EXISTS_BODY), true),
            Outcome::AlreadyExists { .. }
        ));

        let outcome = classify(raw(422, NO_COMMITS_BODY), true);
        assert_eq!(
            outcome,
            Outcome::Failed {
                status: 422,
                body: NO_COMMITS_BODY.to_string()
            }
        );
        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn test_strict_conflict_unparseable_body_fails() {
        assert!(matches!(
            classify(raw(422, "<html>"), true),
            Outcome::Failed { status: 422, .. }
        ));
    }

    #[test]
    fn test_server_error_fails_with_body() {
        let outcome = classify(raw(500, "boom"), false);
        assert_eq!(outcome.exit_code(), 1);
        assert!(outcome.summary().contains("HTTP 500"));
        assert!(outcome.summary().ends_with("boom"));
    }

    #[test]
    fn test_other_4xx_fails() {
        assert_eq!(classify(raw(404, "{}"), false).exit_code(), 1);
        assert_eq!(classify(raw(403, "{}"), false).exit_code(), 1);
    }
}
