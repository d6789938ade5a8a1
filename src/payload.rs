//! Typed construction of the pull request creation payload.

use crate::platform::types::{CreatePullRequest, IdentityPair};

const HEAD_PLACEHOLDER: &str = "{head}";
const BASE_PLACEHOLDER: &str = "{base}";

/// Body template. Each placeholder appears exactly once.
const BODY_TEMPLATE: &str = "\
## Automated pull request

This pull request was opened by the CI pipeline to merge `{head}` into `{base}`.

The source branch was not modified. Review the changes and merge when ready.
";

pub struct PayloadBuilder<'a> {
    pair: &'a IdentityPair,
    title_prefix: &'a str,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new(pair: &'a IdentityPair, title_prefix: &'a str) -> Self {
        Self { pair, title_prefix }
    }

    pub fn title(&self) -> String {
        format!(
            "[Automated] {} {} -> {}",
            self.title_prefix, self.pair.head, self.pair.base
        )
    }

    pub fn body(&self) -> String {
        render_template(BODY_TEMPLATE, &self.pair.head, &self.pair.base)
    }

    pub fn build(&self) -> CreatePullRequest {
        CreatePullRequest {
            title: self.title(),
            head: self.pair.qualified_head(),
            base: self.pair.base.clone(),
            body: self.body(),
            maintainer_can_modify: true,
            draft: false,
        }
    }
}

/// Single left-to-right pass: the first `{head}` and first `{base}` are
/// replaced, and substituted text is never scanned again.
fn render_template(template: &str, head: &str, base: &str) -> String {
    let mut out = String::with_capacity(template.len() + head.len() + base.len());
    let mut rest = template;
    let mut head_done = false;
    let mut base_done = false;

    loop {
        let next_head = (!head_done).then(|| rest.find(HEAD_PLACEHOLDER)).flatten();
        let next_base = (!base_done).then(|| rest.find(BASE_PLACEHOLDER)).flatten();

        let (idx, placeholder, value) = match (next_head, next_base) {
            (Some(h), Some(b)) if b < h => (b, BASE_PLACEHOLDER, base),
            (Some(h), _) => (h, HEAD_PLACEHOLDER, head),
            (None, Some(b)) => (b, BASE_PLACEHOLDER, base),
            (None, None) => break,
        };

        out.push_str(&rest[..idx]);
        out.push_str(value);
        rest = &rest[idx + placeholder.len()..];

        if placeholder == HEAD_PLACEHOLDER {
            head_done = true;
        } else {
            base_done = true;
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::types::RepoSlug;

    fn pair(head: &str, base: &str) -> IdentityPair {
        IdentityPair::new(RepoSlug::parse("octo/widgets").unwrap(), head, base).unwrap()
    }

    #[test]
    fn test_title() {
        let pair = pair("feature/login", "develop");
        assert_eq!(
            PayloadBuilder::new(&pair, "Feature").title(),
            "[Automated] Feature feature/login -> develop"
        );
    }

    #[test]
    fn test_build_fields() {
        let pair = pair("feature/login", "develop");
        let payload = PayloadBuilder::new(&pair, "Feature").build();

        assert_eq!(payload.head, "octo:feature/login");
        assert_eq!(payload.base, "develop");
        assert!(payload.maintainer_can_modify);
        assert!(!payload.draft);
        assert!(payload.body.contains("`feature/login` into `develop`"));
        assert!(!payload.body.contains(HEAD_PLACEHOLDER));
        assert!(!payload.body.contains(BASE_PLACEHOLDER));
    }

    #[test]
    fn test_template_has_each_placeholder_once() {
        assert_eq!(BODY_TEMPLATE.matches(HEAD_PLACEHOLDER).count(), 1);
        assert_eq!(BODY_TEMPLATE.matches(BASE_PLACEHOLDER).count(), 1);
    }

    #[test]
    fn test_no_double_substitution() {
        let rendered = render_template("{head} -> {base}", "weird-{base}", "main");
        assert_eq!(rendered, "weird-{base} -> main");

        let rendered = render_template("{base} <- {head}", "dev", "{head}");
        assert_eq!(rendered, "{head} <- dev");
    }

    #[test]
    fn test_only_first_occurrence_replaced() {
        let rendered = render_template("{head} {head} {base}", "a", "b");
        assert_eq!(rendered, "a {head} b");
    }

    #[test]
    fn test_serialized_payload_shape() {
        let pair = pair("feature/x", "main");
        let json = serde_json::to_value(PayloadBuilder::new(&pair, "Sync").build()).unwrap();
        assert_eq!(json["title"], "[Automated] Sync feature/x -> main");
        assert_eq!(json["head"], "octo:feature/x");
        assert_eq!(json["maintainer_can_modify"], true);
        assert_eq!(json["draft"], false);
    }
}
