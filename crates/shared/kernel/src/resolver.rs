//! Endpoint resolution.
//!
//! Four sources contribute endpoints, lowest priority first:
//!
//! 1. [`ConfigSource::Defaults`]: [`EndpointConfig::defaults`].
//! 2. [`ConfigSource::Environment`]: one process variable per module ([`ModuleKey::env_var`]).
//! 3. [`ConfigSource::RuntimeOverride`]: the `[apps]` table of the portal configuration.
//! 4. [`ConfigSource::QueryParameters`]: the query string of the page request.
//!
//! A source overrides a key only when it provides a non-empty value. The first three are
//! snapshotted once when the [`ConfigResolver`] is built; the query layer is applied per
//! request. Reading a source never fails resolution: an unreadable source contributes nothing.

use cec_domain::constants::TRADEOFFS_ALIASES;
use cec_domain::endpoints::{EndpointConfig, PartialEndpoints};
use cec_domain::modules::ModuleKey;
use std::borrow::Cow;
use std::collections::HashMap;
use std::env::VarError;
use std::hash::BuildHasher;
use strum::{Display, EnumCount, IntoEnumIterator};
use tracing::debug;
use url::form_urlencoded;

/// Origin of an endpoint value, ordered by increasing priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ConfigSource {
    Defaults,
    Environment,
    RuntimeOverride,
    QueryParameters,
}

#[cec_derive::portal_error]
pub enum SourceError {
    #[error("Config source unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Read access to named process-level variables.
pub trait VariableStore: Send + Sync {
    /// `Ok(None)` when the variable is unset, `Err` when the store cannot be read.
    ///
    /// # Errors
    /// [`SourceError::Unavailable`] when the value exists but cannot be read.
    fn read(&self, name: &str) -> Result<Option<String>, SourceError>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl VariableStore for ProcessEnv {
    fn read(&self, name: &str) -> Result<Option<String>, SourceError> {
        match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(err @ VarError::NotUnicode(_)) => Err(SourceError::Unavailable {
                message: err.to_string().into(),
                context: Some(name.to_owned().into()),
            }),
        }
    }
}

impl<S: BuildHasher + Send + Sync> VariableStore for HashMap<String, String, S> {
    fn read(&self, name: &str) -> Result<Option<String>, SourceError> {
        Ok(self.get(name).cloned())
    }
}

/// Reads `name`, folding unset, empty and unreadable variables into `None`.
pub fn try_read_env(store: &dyn VariableStore, name: &str) -> Option<String> {
    match store.read(name) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(err) => {
            debug!(variable = name, error = %err, "Ignoring unreadable variable");
            None
        },
    }
}

/// The [`ConfigSource::Environment`] layer.
pub fn environment_endpoints(store: &dyn VariableStore) -> PartialEndpoints {
    ModuleKey::iter()
        .filter_map(|key| try_read_env(store, key.env_var()).map(|value| (key, value)))
        .collect()
}

/// Decoded query string of a page request.
///
/// Repeated names keep every pair; lookups see the last one, as a browser's
/// `URLSearchParams` folded into an object would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a raw query string, with or without the leading `?`. Never fails:
    /// malformed escapes are decoded lossily.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.unwrap_or_default();
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self {
            pairs: form_urlencoded::parse(raw.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self { pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().rev().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Like [`QueryParams::get`], but an empty value counts as absent.
    #[must_use]
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// A copy without any pair named `name`.
    #[must_use]
    pub fn without(&self, name: &str) -> Self {
        Self { pairs: self.pairs.iter().filter(|(k, _)| k != name).cloned().collect() }
    }

    /// A copy where `name` is set to exactly `value`.
    #[must_use]
    pub fn with(&self, name: &str, value: &str) -> Self {
        let mut next = self.without(name);
        next.pairs.push((name.to_owned(), value.to_owned()));
        next
    }

    /// Re-encodes the pairs as `application/x-www-form-urlencoded`, without a leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new()).extend_pairs(&self.pairs).finish()
    }
}

/// The [`ConfigSource::QueryParameters`] layer.
///
/// The canonical `tradeoffs` parameter wins over the deprecated aliases; without it, the
/// first non-empty alias in [`TRADEOFFS_ALIASES`] order is used.
#[must_use]
pub fn query_endpoints(query: &QueryParams) -> PartialEndpoints {
    let mut layer: PartialEndpoints = ModuleKey::iter()
        .filter_map(|key| query.get_non_empty(key.query_param()).map(|value| (key, value)))
        .collect();

    if !layer.provides(ModuleKey::Tradeoffs)
        && let Some(alias) = TRADEOFFS_ALIASES.iter().find_map(|name| query.get_non_empty(name))
    {
        layer.set(ModuleKey::Tradeoffs, alias);
    }

    layer
}

/// Endpoints together with the source that supplied each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub endpoints: EndpointConfig,
    sources: [ConfigSource; ModuleKey::COUNT],
}

impl Resolution {
    #[must_use]
    pub const fn source(&self, key: ModuleKey) -> ConfigSource {
        self.sources[key as usize]
    }
}

/// Immutable snapshot of the startup-time sources.
///
/// Built once at startup and shared by reference; every page request calls
/// [`ConfigResolver::resolve`] with its own query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigResolver {
    environment: PartialEndpoints,
    runtime: PartialEndpoints,
}

impl ConfigResolver {
    /// Snapshots `store` for the environment layer and keeps `runtime_override` as is.
    pub fn new(store: &dyn VariableStore, runtime_override: PartialEndpoints) -> Self {
        Self::from_layers(environment_endpoints(store), runtime_override)
    }

    /// Resolver over the real process environment.
    #[must_use]
    pub fn from_process(runtime_override: PartialEndpoints) -> Self {
        Self::new(&ProcessEnv, runtime_override)
    }

    #[must_use]
    pub fn from_layers(environment: PartialEndpoints, runtime_override: PartialEndpoints) -> Self {
        for (source, layer) in [
            (ConfigSource::Environment, &environment),
            (ConfigSource::RuntimeOverride, &runtime_override),
        ] {
            for key in ModuleKey::iter().filter(|key| layer.provides(*key)) {
                debug!(module = %key, %source, "Endpoint override registered");
            }
        }
        Self { environment, runtime: runtime_override }
    }

    /// Endpoints for a request carrying `query`.
    #[must_use]
    pub fn resolve(&self, query: &QueryParams) -> EndpointConfig {
        self.explain(query).endpoints
    }

    /// Endpoints without any query override.
    #[must_use]
    pub fn baseline(&self) -> EndpointConfig {
        self.resolve(&QueryParams::default())
    }

    /// Like [`ConfigResolver::resolve`], also recording which source won each key.
    #[must_use]
    pub fn explain(&self, query: &QueryParams) -> Resolution {
        let from_query = query_endpoints(query);
        let mut endpoints = EndpointConfig::defaults();
        let mut sources = [ConfigSource::Defaults; ModuleKey::COUNT];

        for (source, layer) in [
            (ConfigSource::Environment, &self.environment),
            (ConfigSource::RuntimeOverride, &self.runtime),
            (ConfigSource::QueryParameters, &from_query),
        ] {
            for key in ModuleKey::iter() {
                if let Some(value) = layer.get(key)
                    && endpoints.set(key, value)
                {
                    sources[key as usize] = source;
                }
            }
        }

        for key in ModuleKey::iter() {
            debug!(
                module = %key,
                source = %sources[key as usize],
                url = endpoints.get(key),
                "Endpoint resolved"
            );
        }

        Resolution { endpoints, sources }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    struct BrokenStore;

    impl VariableStore for BrokenStore {
        fn read(&self, name: &str) -> Result<Option<String>, SourceError> {
            Err(SourceError::Unavailable {
                message: "store offline".into(),
                context: Some(name.to_owned().into()),
            })
        }
    }

    #[test]
    fn defaults_only() {
        let resolver = ConfigResolver::new(&store(&[]), PartialEndpoints::default());
        let resolved = resolver.baseline();
        assert_eq!(resolved, EndpointConfig::defaults());
        assert_eq!(resolved.get(ModuleKey::Explore), "/explore");
        assert_eq!(resolved.get(ModuleKey::Tradeoffs), "/tradeoffs");
        assert_eq!(resolved.get(ModuleKey::Blender), "/blender");
    }

    #[test]
    fn environment_overrides_defaults() {
        let env = store(&[("NEXT_PUBLIC_CEC_BLEND_URL", "https://blend.example.org")]);
        let resolver = ConfigResolver::new(&env, PartialEndpoints::default());
        let resolution = resolver.explain(&QueryParams::default());

        assert_eq!(resolution.endpoints.get(ModuleKey::Blender), "https://blend.example.org");
        assert_eq!(resolution.source(ModuleKey::Blender), ConfigSource::Environment);
        assert_eq!(resolution.source(ModuleKey::Explore), ConfigSource::Defaults);
    }

    #[test]
    fn empty_variables_do_not_override() {
        let env = store(&[("NEXT_PUBLIC_CEC_EXPLORE_URL", "")]);
        let resolver = ConfigResolver::new(&env, PartialEndpoints::default());
        assert_eq!(resolver.baseline().get(ModuleKey::Explore), "/explore");
    }

    #[test]
    fn unreadable_store_degrades_to_defaults() {
        let resolver = ConfigResolver::new(&BrokenStore, PartialEndpoints::default());
        assert_eq!(resolver.baseline(), EndpointConfig::defaults());
    }

    #[test]
    fn runtime_override_beats_environment() {
        let env = store(&[("NEXT_PUBLIC_CEC_EXPLORE_URL", "https://env.example.org")]);
        let runtime = PartialEndpoints::default().with(ModuleKey::Explore, "https://rt.example.org");
        let resolver = ConfigResolver::new(&env, runtime);
        let resolution = resolver.explain(&QueryParams::default());

        assert_eq!(resolution.endpoints.get(ModuleKey::Explore), "https://rt.example.org");
        assert_eq!(resolution.source(ModuleKey::Explore), ConfigSource::RuntimeOverride);
    }

    #[test]
    fn query_beats_everything() {
        let env = store(&[("NEXT_PUBLIC_CEC_EXPLORE_URL", "https://env.example.org")]);
        let runtime = PartialEndpoints::default().with(ModuleKey::Explore, "https://rt.example.org");
        let resolver = ConfigResolver::new(&env, runtime);
        let query = QueryParams::parse(Some("?explore=https%3A%2F%2Fq.example.org%2Fx"));
        let resolution = resolver.explain(&query);

        assert_eq!(resolution.endpoints.get(ModuleKey::Explore), "https://q.example.org/x");
        assert_eq!(resolution.source(ModuleKey::Explore), ConfigSource::QueryParameters);
    }

    #[test]
    fn empty_query_value_falls_through() {
        let runtime = PartialEndpoints::default().with(ModuleKey::Blender, "https://rt.example.org");
        let resolver = ConfigResolver::from_layers(PartialEndpoints::default(), runtime);
        let resolved = resolver.resolve(&QueryParams::parse(Some("blender=")));
        assert_eq!(resolved.get(ModuleKey::Blender), "https://rt.example.org");
    }

    #[test]
    fn canonical_tradeoffs_beats_aliases() {
        let query = QueryParams::parse(Some(
            "attributeTradeoffs=/attr&tradeoffs=/canonical&technologyTradeoffs=/tech",
        ));
        assert_eq!(query_endpoints(&query).get(ModuleKey::Tradeoffs), Some("/canonical"));
    }

    #[test]
    fn first_alias_wins_when_canonical_absent() {
        let query = QueryParams::parse(Some("attributeTradeoffs=/attr&technologyTradeoffs=/tech"));
        assert_eq!(query_endpoints(&query).get(ModuleKey::Tradeoffs), Some("/tech"));

        let query = QueryParams::parse(Some("technologyTradeoffs=&attributeTradeoffs=/attr"));
        assert_eq!(query_endpoints(&query).get(ModuleKey::Tradeoffs), Some("/attr"));
    }

    #[test]
    fn empty_canonical_defers_to_alias() {
        let query = QueryParams::parse(Some("tradeoffs=&attributeTradeoffs=/attr"));
        assert_eq!(query_endpoints(&query).get(ModuleKey::Tradeoffs), Some("/attr"));
    }

    #[test]
    fn aliases_only_feed_tradeoffs() {
        let query = QueryParams::parse(Some("technologyTradeoffs=/tech"));
        let layer = query_endpoints(&query);
        assert!(!layer.provides(ModuleKey::Explore));
        assert!(!layer.provides(ModuleKey::Blender));
    }

    #[test]
    fn query_params_last_value_wins() {
        let query = QueryParams::parse(Some("explore=/one&explore=/two"));
        assert_eq!(query.get("explore"), Some("/two"));
    }

    #[test]
    fn query_params_decode_plus_and_percent() {
        let query = QueryParams::parse(Some("hero=a+b%2Fc&dev=1"));
        assert_eq!(query.get("hero"), Some("a b/c"));
        assert_eq!(query.get("dev"), Some("1"));
        assert_eq!(query.get("missing"), None);
    }

    #[test]
    fn query_params_rewrite_preserves_other_pairs() {
        let query = QueryParams::parse(Some("dev=1&open=explore&hero=x"));
        assert_eq!(query.with("open", "blender").to_query_string(), "dev=1&hero=x&open=blender");
        assert_eq!(query.without("open").to_query_string(), "dev=1&hero=x");
        assert!(QueryParams::parse(None).is_empty());
    }

    #[test]
    fn every_module_reports_its_source() {
        let resolver = ConfigResolver::from_layers(
            PartialEndpoints::default().with(ModuleKey::Explore, "https://env.example.org"),
            PartialEndpoints::default().with(ModuleKey::Blender, "https://rt.example.org"),
        );
        let resolution = resolver.explain(&QueryParams::parse(Some("attributeTradeoffs=/t")));

        let sources: Vec<_> = ModuleKey::iter().map(|key| resolution.source(key)).collect();
        assert_eq!(sources.len(), ModuleKey::COUNT);
        assert_eq!(resolution.source(ModuleKey::Explore), ConfigSource::Environment);
        assert_eq!(resolution.source(ModuleKey::Tradeoffs), ConfigSource::QueryParameters);
        assert_eq!(resolution.source(ModuleKey::Blender), ConfigSource::RuntimeOverride);
    }

    #[test]
    fn resolution_is_logged_at_debug() {
        let resolver = ConfigResolver::default();
        let logs = crate::log_capture::captured_logs(|| {
            let _ = resolver.baseline();
        });

        let line = crate::log_capture::line_for(&logs, "Endpoint resolved").unwrap();
        assert!(line.contains("DEBUG"), "{line}");
        assert_eq!(logs.matches("Endpoint resolved").count(), ModuleKey::COUNT);
    }

    #[test]
    fn process_env_reports_unset_as_none() {
        let value = ProcessEnv.read("CEC_PORTAL_TEST_VARIABLE_THAT_IS_NEVER_SET");
        assert!(matches!(value, Ok(None)));
    }
}
