//! Hyperlink targets for nodes and edges.

use crate::model::{LinkKind, LinkSettings};

/// Turns link settings into a base URL.
///
/// Dashboard links usually need knowledge of the hosting application, so
/// embedders supply their own resolver; [`DirectLinks`] covers the rest.
pub trait LinkResolver {
    fn resolve(&self, settings: &LinkSettings) -> Option<String>;
}

/// Uses the configured URIs as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectLinks;

impl LinkResolver for DirectLinks {
    fn resolve(&self, settings: &LinkSettings) -> Option<String> {
        match settings.kind {
            LinkKind::None => None,
            LinkKind::Dashboard => settings.dash_uri.clone(),
            LinkKind::Absolute => settings.absolute_uri.clone(),
        }
    }
}

/// Append `params` (already URL-encoded, without a leading `?`) to `base`.
pub fn with_params(base: &str, params: Option<&str>) -> String {
    let params = params.map(|p| p.trim_start_matches(['?', '&'])).unwrap_or("");
    if params.is_empty() {
        return base.to_string();
    }
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}{params}")
}

/// The full link for an element, if its settings resolve to a base URL.
pub fn link_for(
    resolver: &dyn LinkResolver,
    settings: &LinkSettings,
    params: Option<&str>,
) -> Option<String> {
    resolver
        .resolve(settings)
        .map(|base| with_params(&base, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_with_question_mark_or_ampersand() {
        assert_eq!(with_params("https://x/d", Some("var-a=1")), "https://x/d?var-a=1");
        assert_eq!(
            with_params("https://x/d?orgId=1", Some("var-a=1")),
            "https://x/d?orgId=1&var-a=1"
        );
        assert_eq!(with_params("https://x/d", Some("?var-a=1")), "https://x/d?var-a=1");
        assert_eq!(with_params("https://x/d", None), "https://x/d");
        assert_eq!(with_params("https://x/d", Some("")), "https://x/d");
    }

    #[test]
    fn direct_links_by_kind() {
        let mut settings = LinkSettings {
            kind: LinkKind::None,
            dashboard: Some("net".into()),
            dash_uri: Some("/d/net".into()),
            absolute_uri: Some("https://example.com/".into()),
        };
        assert_eq!(DirectLinks.resolve(&settings), None);
        settings.kind = LinkKind::Dashboard;
        assert_eq!(DirectLinks.resolve(&settings).as_deref(), Some("/d/net"));
        settings.kind = LinkKind::Absolute;
        assert_eq!(
            link_for(&DirectLinks, &settings, Some("x=1")).as_deref(),
            Some("https://example.com/?x=1")
        );
    }
}
