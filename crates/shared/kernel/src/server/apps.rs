use super::{PageRequest, PortalState};
use crate::diagnostics::{SelfCheck, run_self_checks};
use crate::url_guard::with_embedded_flag;
use axum::Json;
use axum::extract::State;
use cec_domain::constants::PORTAL_TAG;
use serde::Serialize;
use utoipa::ToSchema;

/// Resolved endpoint of one module
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(super) struct AppEndpoint {
    /// Module key (`explore`, `tradeoffs`, `blender`)
    key: String,
    title: String,
    /// Endpoint as resolved, before validation
    url: String,
    /// Whether the endpoint is an http(s) URL
    valid: bool,
    /// Endpoint with the embedding marker, as loaded by the overlay
    embedded_url: String,
    /// Source that supplied the endpoint
    source: String,
}

#[allow(clippy::unused_async)]
#[utoipa::path(
    get,
    path = "/api/apps",
    params(
        ("explore" = Option<String>, Query, description = "Override the explore endpoint"),
        ("tradeoffs" = Option<String>, Query, description = "Override the tradeoffs endpoint"),
        ("technologyTradeoffs" = Option<String>, Query, description = "Deprecated alias of tradeoffs"),
        ("attributeTradeoffs" = Option<String>, Query, description = "Deprecated alias of tradeoffs"),
        ("blender" = Option<String>, Query, description = "Override the blender endpoint"),
    ),
    responses((status = OK, description = "Endpoints resolved for this request", body = Vec<AppEndpoint>)),
    tag = PORTAL_TAG,
)]
pub(super) async fn apps_handler(
    State(state): State<PortalState>,
    request: PageRequest,
) -> Json<Vec<AppEndpoint>> {
    let resolution = state.resolver.explain(&request.query);

    let apps = resolution
        .endpoints
        .iter()
        .map(|(key, url)| AppEndpoint {
            key: key.as_str().to_owned(),
            title: key.title().to_owned(),
            url: url.to_owned(),
            valid: request.guard.is_valid_http_url(url),
            embedded_url: with_embedded_flag(url),
            source: resolution.source(key).to_string(),
        })
        .collect();

    Json(apps)
}

#[allow(clippy::unused_async)]
#[utoipa::path(
    get,
    path = "/api/self-test",
    responses((status = OK, description = "Configuration self-checks", body = Vec<SelfCheck>)),
    tag = PORTAL_TAG,
)]
pub(super) async fn self_test_handler(
    State(state): State<PortalState>,
    request: PageRequest,
) -> Json<Vec<SelfCheck>> {
    let endpoints = state.resolver.resolve(&request.query);
    Json(run_self_checks(&endpoints, &request.guard))
}
