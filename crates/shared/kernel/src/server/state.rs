use crate::resolver::ConfigResolver;
use cec_domain::config::PortalConfig;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[cec_derive::portal_error]
pub enum PortalStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct PortalStateInner {
    pub config: PortalConfig,
    /// Startup snapshot of defaults, process variables and `[apps]` overrides.
    pub resolver: ConfigResolver,
}

#[derive(Debug, Clone)]
pub struct PortalState {
    inner: Arc<PortalStateInner>,
}

impl PortalState {
    #[must_use]
    pub fn builder() -> PortalStateBuilder {
        PortalStateBuilder::default()
    }
}

impl Deref for PortalState {
    type Target = PortalStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Default)]
pub struct PortalStateBuilder {
    config: Option<PortalConfig>,
    resolver: Option<ConfigResolver>,
}

impl PortalStateBuilder {
    #[must_use]
    pub fn config(mut self, config: PortalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the resolver that would otherwise snapshot the process environment.
    #[must_use]
    pub fn resolver(mut self, resolver: ConfigResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// # Errors
    /// [`PortalStateError::Validation`] when no configuration was provided.
    pub fn build(self) -> Result<PortalState, PortalStateError> {
        let config = self.config.ok_or_else(|| PortalStateError::Validation {
            message: "PortalConfig not provided".into(),
            context: None,
        })?;
        let resolver =
            self.resolver.unwrap_or_else(|| ConfigResolver::from_process(config.apps.clone()));

        Ok(PortalState { inner: Arc::new(PortalStateInner { config, resolver }) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cec_domain::endpoints::PartialEndpoints;
    use cec_domain::modules::ModuleKey;

    #[test]
    fn build_requires_config() {
        let err = PortalState::builder().build().unwrap_err();
        assert!(matches!(err, PortalStateError::Validation { .. }));
    }

    #[test]
    fn explicit_resolver_is_kept() {
        let resolver = ConfigResolver::from_layers(
            PartialEndpoints::default(),
            PartialEndpoints::default().with(ModuleKey::Explore, "https://rt.example.org"),
        );
        let state = PortalState::builder()
            .config(PortalConfig::default())
            .resolver(resolver.clone())
            .build()
            .unwrap();
        assert_eq!(state.resolver, resolver);
    }

    #[test]
    fn clones_share_one_config() {
        let mut config = PortalConfig::default();
        config.server.port = 9191;
        let state = PortalState::builder().config(config).build().unwrap();
        let other = state.clone();
        assert!(std::ptr::eq(&state.config, &other.config));
        assert_eq!(other.config.server.port, 9191);
    }
}
