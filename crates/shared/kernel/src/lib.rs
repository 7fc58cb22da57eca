//! Kernel of the portal: everything between raw configuration sources and the page.
//!
//! * [`config`] loads the portal configuration file with `CEC__` environment overrides.
//! * [`resolver`] merges defaults, process variables, deploy-time overrides and query
//!   parameters into one [`EndpointConfig`](cec_domain::endpoints::EndpointConfig).
//! * [`url_guard`] decides whether an endpoint is navigable and builds embedded variants.
//! * [`diagnostics`] and [`portal`] turn a resolution into what the page shows.
//!
//! ## Resolving endpoints
//! ```rust
//! use cec_domain::endpoints::PartialEndpoints;
//! use cec_kernel::resolver::{ConfigResolver, QueryParams};
//! use cec_kernel::url_guard::{UrlGuard, with_embedded_flag};
//! use std::collections::HashMap;
//!
//! let resolver = ConfigResolver::new(&HashMap::<String, String>::new(), PartialEndpoints::default());
//! let endpoints = resolver.resolve(&QueryParams::parse(Some("blender=https://b.example.org")));
//!
//! let guard = UrlGuard::new(Some("https://portal.example.org"));
//! assert!(guard.is_valid_http_url(endpoints.get("explore".parse().unwrap())));
//! assert_eq!(with_embedded_flag("/explore"), "/explore?embedded=true");
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod diagnostics;
#[cfg(test)]
mod log_capture;
pub mod portal;
pub mod prelude;
pub mod resolver;
#[cfg(feature = "server")]
pub mod server;
pub mod url_guard;

pub use cec_domain as domain;
