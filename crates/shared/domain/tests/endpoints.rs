use cec_domain::endpoints::{EndpointConfig, PartialEndpoints};
use cec_domain::modules::ModuleKey;
use std::str::FromStr;
use strum::{EnumCount, IntoEnumIterator};

#[test]
fn module_keys_are_lowercase_identifiers() {
    let keys: Vec<&str> = ModuleKey::iter().map(ModuleKey::as_str).collect();
    assert_eq!(keys, ["explore", "tradeoffs", "blender"]);
    assert_eq!(ModuleKey::COUNT, 3);
    assert_eq!(ModuleKey::from_str("blender").ok(), Some(ModuleKey::Blender));
    assert!(ModuleKey::from_str("Blender").is_err());
    assert_eq!(ModuleKey::Tradeoffs.to_string(), "tradeoffs");
}

#[test]
fn module_env_vars_match_deployment_names() {
    assert_eq!(ModuleKey::Explore.env_var(), "NEXT_PUBLIC_CEC_EXPLORE_URL");
    assert_eq!(ModuleKey::Tradeoffs.env_var(), "NEXT_PUBLIC_CEC_TRADEOFFS_URL");
    assert_eq!(ModuleKey::Blender.env_var(), "NEXT_PUBLIC_CEC_BLEND_URL");
}

#[test]
fn defaults_cover_every_module() {
    let defaults = EndpointConfig::defaults();
    for (key, url) in defaults.iter() {
        assert!(!url.is_empty(), "{key} has an empty default");
        assert_eq!(url, key.default_path());
    }
}

#[test]
fn endpoint_config_refuses_empty_values() {
    let mut cfg = EndpointConfig::defaults();
    assert!(!cfg.set(ModuleKey::Explore, ""));
    assert_eq!(cfg.get(ModuleKey::Explore), "/explore");

    assert!(cfg.set(ModuleKey::Explore, "https://explore.example.org"));
    assert_eq!(cfg.get(ModuleKey::Explore), "https://explore.example.org");
}

#[test]
fn partial_endpoints_ignore_empty_strings() {
    let partial = PartialEndpoints::default().with(ModuleKey::Blender, "");
    assert!(!partial.provides(ModuleKey::Blender));
    assert!(partial.is_empty());

    let partial: PartialEndpoints =
        [(ModuleKey::Blender, "/b"), (ModuleKey::Explore, "/e")].into_iter().collect();
    assert_eq!(partial.get(ModuleKey::Blender), Some("/b"));
    assert_eq!(partial.get(ModuleKey::Explore), Some("/e"));
    assert_eq!(partial.get(ModuleKey::Tradeoffs), None);
}

#[test]
fn endpoint_config_serializes_by_module_name() {
    let json = serde_json::to_value(EndpointConfig::defaults()).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({ "explore": "/explore", "tradeoffs": "/tradeoffs", "blender": "/blender" })
    );
}
