use cec_domain::constants::CONFIG_ENV_PREFIX;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file name, resolved with any extension `config` understands.
pub const DEFAULT_CONFIG_NAME: &str = "portal";

#[cec_derive::portal_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader.
///
/// 1. **Base file**: optional. `portal` resolves to `portal.toml`, `portal.json`, ...
///    A missing file is not an error; every setting has a default.
/// 2. **Environment overrides**: variables prefixed `CEC__`, nested with `__`
///    (`CEC__SERVER__PORT` maps to `server.port`, `CEC__APPS__EXPLORE` to `apps.explore`).
///    Numbers and booleans are parsed from their text.
///
/// ```rust
/// use cec_domain::config::PortalConfig;
/// use cec_kernel::config::ConfigLoader;
/// use std::collections::HashMap;
///
/// let env = HashMap::from([("CEC__SERVER__PORT".to_owned(), "9090".to_owned())]);
/// let cfg: PortalConfig = ConfigLoader::new()
///     .file("does-not-exist")
///     .environment(env)
///     .load()
///     .unwrap();
/// assert_eq!(cfg.server.port, 9090);
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    environment: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the process environment with an explicit variable map.
    #[must_use]
    pub fn environment(mut self, vars: HashMap<String, String>) -> Self {
        self.environment = Some(vars);
        self
    }

    /// # Errors
    /// Returns [`ConfigError`] if the file exists but cannot be parsed, or if a value does
    /// not fit the shape of `T`.
    pub fn load<T: DeserializeOwned>(self) -> Result<T, ConfigError> {
        let path = self.file.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME));

        let environment = Environment::with_prefix(CONFIG_ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(self.environment.map(|vars| vars.into_iter().collect()));

        info!("Loading config from {}", path.display());

        Config::builder()
            .add_source(File::from(path.as_path()).required(false))
            .add_source(environment)
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context("Failed to deserialize config")
    }
}

/// Loads `T` from `path` (or [`DEFAULT_CONFIG_NAME`]) overlaid by `CEC__*` process variables.
///
/// # Errors
/// See [`ConfigLoader::load`].
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let loader = ConfigLoader::new();
    match path {
        Some(path) => loader.file(path).load(),
        None => loader.load(),
    }
}
