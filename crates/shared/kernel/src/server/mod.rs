//! HTTP plumbing shared by portal servers: state, request context and JSON routes.

mod apps;
mod health;
mod request;
pub mod router;
mod state;

pub use request::{PageRequest, request_origin};
pub use state::{PortalState, PortalStateBuilder, PortalStateError, PortalStateInner};
