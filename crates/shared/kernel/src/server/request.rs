use super::PortalState;
use crate::resolver::QueryParams;
use crate::url_guard::UrlGuard;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use cec_domain::config::ServerConfig;
use std::convert::Infallible;

/// Origin the browser used to reach the portal.
///
/// `server.public_origin` when configured, otherwise built from the `Host` header with the
/// scheme the server listens on. `None` when neither is available.
#[must_use]
pub fn request_origin(server: &ServerConfig, headers: &HeaderMap) -> Option<String> {
    if let Some(origin) = server.public_origin.as_deref().filter(|o| !o.is_empty()) {
        return Some(origin.to_owned());
    }

    let host = headers.get(header::HOST)?.to_str().ok().filter(|h| !h.is_empty())?;
    let scheme = if server.ssl.is_some() { "https" } else { "http" };
    Some(format!("{scheme}://{host}"))
}

/// Per-request inputs of the page and the JSON routes.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub guard: UrlGuard,
    pub query: QueryParams,
}

impl FromRequestParts<PortalState> for PageRequest {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &PortalState,
    ) -> Result<Self, Self::Rejection> {
        let origin = request_origin(&state.config.server, &parts.headers);
        Ok(Self {
            guard: UrlGuard::new(origin.as_deref()),
            query: QueryParams::parse(parts.uri.query()),
        })
    }
}
