//! Self-checks listed by the developer panel and `/api/self-test`.

use crate::url_guard::{UrlGuard, with_embedded_flag};
use cec_domain::constants::EMBEDDED_MARKER;
use cec_domain::endpoints::EndpointConfig;
use serde::Serialize;
use strum::IntoEnumIterator;
use cec_domain::modules::ModuleKey;

/// Outcome of one self-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct SelfCheck {
    /// Check name, e.g. `explore URL is valid`
    pub name: String,
    pub pass: bool,
    /// The checked value or the failure reason
    pub message: String,
}

impl SelfCheck {
    fn new(name: impl Into<String>, pass: bool, message: impl Into<String>) -> Self {
        Self { name: name.into(), pass, message: message.into() }
    }
}

/// True when `url` carries the embedding marker as a complete query parameter.
#[must_use]
pub fn has_embedded_marker(url: &str) -> bool {
    url.match_indices(EMBEDDED_MARKER).any(|(at, _)| {
        let before = url[..at].chars().next_back();
        let after = url[at + EMBEDDED_MARKER.len()..].chars().next();
        matches!(before, Some('?' | '&')) && matches!(after, None | Some('&'))
    })
}

/// Runs every check against the resolved endpoints.
///
/// Two checks per module (validity and embedding), then one over the built-in defaults.
#[must_use]
pub fn run_self_checks(endpoints: &EndpointConfig, guard: &UrlGuard) -> Vec<SelfCheck> {
    let mut checks = Vec::with_capacity(ModuleKey::iter().len() * 2 + 1);

    for (key, url) in endpoints.iter() {
        let valid = guard.is_valid_http_url(url);
        let message = if valid { url.to_owned() } else { format!("Invalid URL: {url}") };
        checks.push(SelfCheck::new(format!("{key} URL is valid"), valid, message));

        let embedded = with_embedded_flag(url);
        checks.push(SelfCheck::new(
            format!("{key} appends embedded=true"),
            has_embedded_marker(&embedded),
            embedded,
        ));
    }

    let defaults = EndpointConfig::defaults();
    let present = defaults.iter().all(|(_, url)| !url.is_empty());
    let message = serde_json::to_string(&defaults).unwrap_or_else(|err| err.to_string());
    checks.push(SelfCheck::new("Defaults present", present, message));

    checks
}
