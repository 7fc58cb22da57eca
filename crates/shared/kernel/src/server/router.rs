use super::{PortalState, apps, health};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    health::mark_start();
    OpenApiRouter::<S>::new().routes(routes!(health::health_handler))
}

pub fn api_router() -> OpenApiRouter<PortalState> {
    OpenApiRouter::new()
        .routes(routes!(apps::apps_handler))
        .routes(routes!(apps::self_test_handler))
}
