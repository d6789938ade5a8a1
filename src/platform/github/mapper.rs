use crate::error::Result;
use crate::platform::types::ExistingPullRequest;

/// Take the first entry of a `GET /pulls` listing, if any.
///
/// A non-empty listing is a match even when the entry lacks the fields we report.
pub fn first_open(body: &str) -> Result<Option<ExistingPullRequest>> {
    let pulls: Vec<serde_json::Value> = serde_json::from_str(body)?;
    Ok(pulls
        .into_iter()
        .next()
        .map(|pr| serde_json::from_value(pr).unwrap_or_default()))
}
