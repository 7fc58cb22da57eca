use crate::page;
use axum::Router;
use axum::routing::get;
use cec_kernel::prelude::PortalState;
use cec_kernel::server::router::{api_router, system_router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Community Energy Compass portal"))]
struct ApiDoc;

pub(crate) fn init(state: PortalState) -> Router {
    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(system_router())
        .merge(api_router())
        .split_for_parts();

    let scalar_routes = Scalar::with_url("/api/docs", api_doc);

    Router::new()
        .route("/", get(page::page_handler))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .merge(scalar_routes)
}
