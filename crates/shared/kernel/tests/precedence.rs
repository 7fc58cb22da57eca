use cec_kernel::prelude::*;
use proptest::prelude::*;
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// Per module: (environment, runtime override, query) values. `Some("")` is present but empty.
type Layers = [(Option<String>, Option<String>, Option<String>); 3];

fn value() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        Just(String::new()),
        "/[a-z]{1,8}",
        "https://[a-z]{1,8}\\.example\\.org/[a-z]{0,6}",
    ])
}

fn layers() -> impl Strategy<Value = Layers> {
    [(value(), value(), value()), (value(), value(), value()), (value(), value(), value())]
}

fn resolve(layers: &Layers) -> EndpointConfig {
    let mut env = HashMap::new();
    let mut runtime = PartialEndpoints::default();
    let mut query = Vec::new();

    for (key, (from_env, from_runtime, from_query)) in ModuleKey::iter().zip(layers) {
        if let Some(v) = from_env {
            env.insert(key.env_var().to_owned(), v.clone());
        }
        if let Some(v) = from_runtime {
            runtime.set(key, v.clone());
        }
        if let Some(v) = from_query {
            query.push((key.query_param(), v.clone()));
        }
    }

    ConfigResolver::new(&env, runtime).resolve(&QueryParams::from_pairs(query))
}

fn provided(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

proptest! {
    #[test]
    fn every_key_resolves_non_empty(layers in layers()) {
        let resolved = resolve(&layers);
        for key in ModuleKey::iter() {
            prop_assert!(!resolved.get(key).is_empty());
        }
    }

    #[test]
    fn highest_provided_source_wins(layers in layers()) {
        let resolved = resolve(&layers);
        for (key, (env, runtime, query)) in ModuleKey::iter().zip(&layers) {
            let expected = provided(query.as_ref())
                .or_else(|| provided(runtime.as_ref()))
                .or_else(|| provided(env.as_ref()))
                .unwrap_or(key.default_path());
            prop_assert_eq!(resolved.get(key), expected);
        }
    }

    #[test]
    fn tradeoffs_alias_applies_without_canonical(alias in "/[a-z]{1,8}", first in any::<bool>()) {
        let name = if first { "technologyTradeoffs" } else { "attributeTradeoffs" };
        let resolver = ConfigResolver::from_layers(PartialEndpoints::default(), PartialEndpoints::default());
        let resolved = resolver.resolve(&QueryParams::from_pairs([(name, alias.as_str())]));
        prop_assert_eq!(resolved.get(ModuleKey::Tradeoffs), alias.as_str());
        prop_assert_eq!(resolved.get(ModuleKey::Explore), "/explore");
    }
}

#[test]
fn defaults_are_valid_against_any_origin() {
    let resolved = ConfigResolver::from_layers(PartialEndpoints::default(), PartialEndpoints::default())
        .baseline();
    assert_eq!(resolved, EndpointConfig::defaults());

    for origin in [None, Some("https://cec.example.org"), Some("http://127.0.0.1:8080")] {
        let guard = UrlGuard::new(origin);
        for (_, url) in resolved.iter() {
            assert!(guard.is_valid_http_url(url), "{url} against {origin:?}");
        }
    }
}

#[test]
fn source_is_reported_per_key() {
    let env = HashMap::from([("NEXT_PUBLIC_CEC_TRADEOFFS_URL".to_owned(), "/env".to_owned())]);
    let runtime = PartialEndpoints::default().with(ModuleKey::Blender, "/rt");
    let resolution = ConfigResolver::new(&env, runtime)
        .explain(&QueryParams::parse(Some("explore=/q")));

    assert_eq!(resolution.source(ModuleKey::Explore), ConfigSource::QueryParameters);
    assert_eq!(resolution.source(ModuleKey::Tradeoffs), ConfigSource::Environment);
    assert_eq!(resolution.source(ModuleKey::Blender), ConfigSource::RuntimeOverride);
    assert_eq!(ConfigSource::RuntimeOverride.to_string(), "runtime_override");
}
