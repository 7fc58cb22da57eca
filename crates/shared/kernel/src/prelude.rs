pub use crate::diagnostics::{SelfCheck, run_self_checks};
pub use crate::portal::PortalView;
pub use crate::resolver::{ConfigResolver, ConfigSource, ProcessEnv, QueryParams, VariableStore};
#[cfg(feature = "server")]
pub use crate::server::PortalState;
pub use crate::url_guard::{UrlGuard, with_embedded_flag};
pub use cec_domain::endpoints::{EndpointConfig, PartialEndpoints};
pub use cec_domain::modules::ModuleKey;
