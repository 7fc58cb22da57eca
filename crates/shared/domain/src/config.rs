use crate::endpoints::PartialEndpoints;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level portal configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalConfigInner {
    pub server: ServerConfig,
    /// Endpoint overrides injected at deploy time, above process variables and below
    /// per-request query parameters.
    pub apps: PartialEndpoints,
    pub hero: HeroConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into handlers.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct PortalConfig {
    #[serde(flatten, default)]
    inner: Arc<PortalConfigInner>,
}

impl Deref for PortalConfig {
    type Target = PortalConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PortalConfig {
    fn deref_mut(&mut self) -> &mut PortalConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    /// Origin used to resolve relative dashboard URLs (e.g. `https://cec.example.org`).
    /// Falls back to the request `Host` header when unset.
    pub public_origin: Option<String>,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Hero figure URL; the `hero` query parameter still wins.
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for rolling log files. Console only when unset.
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub filter: Option<String>,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            public_origin: None,
            ssl: None,
        }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false, filter: None }
    }
}
