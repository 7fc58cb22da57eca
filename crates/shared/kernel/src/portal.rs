//! What the portal page shows for one request, independent of how it is rendered.

use crate::diagnostics::{SelfCheck, run_self_checks};
use crate::resolver::{ConfigSource, QueryParams, Resolution};
use crate::url_guard::{UrlGuard, with_embedded_flag};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cec_domain::config::HeroConfig;
use cec_domain::constants::{DEV_PARAM, HERO_PARAM, OPEN_PARAM};
use cec_domain::modules::ModuleKey;
use std::sync::LazyLock;
use tracing::{debug, warn};

const HERO_PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1200 600">
  <rect width="1200" height="600" fill="white"/>
  <rect x="40" y="40" width="1120" height="520" fill="#f8fafc" stroke="#d4d4d8"/>
  <text x="600" y="300" font-family="Inter, Arial, sans-serif" font-size="28" text-anchor="middle" fill="#374151">CEC conceptual framework: image placeholder</text>
  <text x="600" y="340" font-family="Inter, Arial, sans-serif" font-size="16" text-anchor="middle" fill="#6b7280">Provide ?hero=https://... to show the real figure</text>
</svg>"##;

/// Data URL of the built-in hero figure.
pub static HERO_PLACEHOLDER: LazyLock<String> = LazyLock::new(|| {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(HERO_PLACEHOLDER_SVG))
});

/// One module tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub key: ModuleKey,
    pub title: &'static str,
    pub summary: &'static str,
    pub accent: &'static str,
    pub url: String,
    pub valid: bool,
    /// Page link opening the overlay. `None` when the URL is invalid.
    pub open_href: Option<String>,
    /// The raw URL for a new tab. `None` when the URL is invalid.
    pub new_tab_href: Option<String>,
    /// `Invalid URL for <title>: <url>` when the URL is invalid.
    pub invalid_reason: Option<String>,
}

/// The embedded dashboard viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub key: ModuleKey,
    pub title: &'static str,
    pub frame_src: String,
    pub new_tab_href: String,
    pub close_href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalView {
    pub tiles: Vec<TileView>,
    pub overlay: Option<OverlayView>,
    pub hero_image: String,
    /// Present only in developer mode (`dev=1`).
    pub self_checks: Option<Vec<SelfCheck>>,
}

impl PortalView {
    /// Builds the view for a request.
    ///
    /// `open=<key>` shows the overlay only when that module's URL is valid; an unknown key or
    /// an invalid URL leaves the page without an overlay.
    #[must_use]
    pub fn build(
        resolution: &Resolution,
        guard: &UrlGuard,
        query: &QueryParams,
        hero: &HeroConfig,
    ) -> Self {
        let endpoints = &resolution.endpoints;
        let tiles: Vec<TileView> = endpoints
            .iter()
            .map(|(key, url)| tile(key, url, resolution.source(key), guard, query))
            .collect();

        let overlay = query.get_non_empty(OPEN_PARAM).and_then(|requested| {
            let Ok(key) = requested.parse::<ModuleKey>() else {
                debug!(requested, "Ignoring unknown module in open parameter");
                return None;
            };
            let tile = tiles.iter().find(|t| t.key == key)?;
            if !tile.valid {
                return None;
            }
            Some(OverlayView {
                key,
                title: tile.title,
                frame_src: with_embedded_flag(&tile.url),
                new_tab_href: tile.url.clone(),
                close_href: href(&query.without(OPEN_PARAM)),
            })
        });

        let hero_image = query
            .get_non_empty(HERO_PARAM)
            .or_else(|| hero.image.as_deref().filter(|i| !i.is_empty()))
            .map_or_else(|| HERO_PLACEHOLDER.clone(), str::to_owned);

        let self_checks =
            (query.get(DEV_PARAM) == Some("1")).then(|| run_self_checks(endpoints, guard));

        Self { tiles, overlay, hero_image, self_checks }
    }
}

fn tile(
    key: ModuleKey,
    url: &str,
    source: ConfigSource,
    guard: &UrlGuard,
    query: &QueryParams,
) -> TileView {
    let valid = guard.is_valid_http_url(url);
    if !valid && source == ConfigSource::QueryParameters {
        debug!(module = %key, url, %source, "Module URL is not a valid http(s) URL");
    } else if !valid {
        warn!(module = %key, url, %source, "Module URL is not a valid http(s) URL");
    }

    TileView {
        key,
        title: key.title(),
        summary: key.summary(),
        accent: key.accent(),
        url: url.to_owned(),
        valid,
        open_href: valid.then(|| href(&query.with(OPEN_PARAM, key.as_str()))),
        new_tab_href: valid.then(|| url.to_owned()),
        invalid_reason: (!valid).then(|| format!("Invalid URL for {}: {url}", key.title())),
    }
}

/// Relative link to the current page with `query`.
fn href(query: &QueryParams) -> String {
    format!("?{}", query.to_query_string())
}
