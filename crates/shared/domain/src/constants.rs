//! Names shared between the resolver, the server and the page.

/// Query parameter appended to a dashboard URL when it is shown inside the portal overlay.
pub const EMBEDDED_MARKER: &str = "embedded=true";

/// Base used to resolve relative URLs when no page origin is known.
pub const FALLBACK_BASE: &str = "http://localhost";

/// Deprecated query names for the `tradeoffs` module, in priority order.
pub const TRADEOFFS_ALIASES: [&str; 2] = ["technologyTradeoffs", "attributeTradeoffs"];

pub const HERO_PARAM: &str = "hero";
pub const DEV_PARAM: &str = "dev";
pub const OPEN_PARAM: &str = "open";

/// Prefix of environment variables that override the portal configuration file.
pub const CONFIG_ENV_PREFIX: &str = "CEC";

pub const SYSTEM_TAG: &str = "System";
pub const PORTAL_TAG: &str = "Portal";
