use crate::modules::ModuleKey;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Endpoint overrides contributed by one configuration source.
///
/// A key is only *provided* when it holds a non-empty string; `Some("")` is treated
/// exactly like `None`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialEndpoints {
    pub explore: Option<String>,
    pub tradeoffs: Option<String>,
    pub blender: Option<String>,
}

impl PartialEndpoints {
    /// The value for `key`, if this source provides one.
    #[must_use]
    pub fn get(&self, key: ModuleKey) -> Option<&str> {
        self.slot(key).as_deref().filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn provides(&self, key: ModuleKey) -> bool {
        self.get(key).is_some()
    }

    pub fn set(&mut self, key: ModuleKey, value: impl Into<String>) {
        *self.slot_mut(key) = Some(value.into());
    }

    #[must_use]
    pub fn with(mut self, key: ModuleKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// True when no key is provided.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ModuleKey::iter().all(|key| !self.provides(key))
    }

    const fn slot(&self, key: ModuleKey) -> &Option<String> {
        match key {
            ModuleKey::Explore => &self.explore,
            ModuleKey::Tradeoffs => &self.tradeoffs,
            ModuleKey::Blender => &self.blender,
        }
    }

    const fn slot_mut(&mut self, key: ModuleKey) -> &mut Option<String> {
        match key {
            ModuleKey::Explore => &mut self.explore,
            ModuleKey::Tradeoffs => &mut self.tradeoffs,
            ModuleKey::Blender => &mut self.blender,
        }
    }
}

impl<S: Into<String>> FromIterator<(ModuleKey, S)> for PartialEndpoints {
    fn from_iter<I: IntoIterator<Item = (ModuleKey, S)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |acc, (key, value)| acc.with(key, value))
    }
}

/// The effective endpoint of every module.
///
/// Built from [`EndpointConfig::defaults`], so every key always holds a non-empty string.
/// Values are opaque here; validation happens at the edge that wants to navigate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointConfig {
    explore: String,
    tradeoffs: String,
    blender: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl EndpointConfig {
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            explore: ModuleKey::Explore.default_path().to_owned(),
            tradeoffs: ModuleKey::Tradeoffs.default_path().to_owned(),
            blender: ModuleKey::Blender.default_path().to_owned(),
        }
    }

    #[must_use]
    pub fn get(&self, key: ModuleKey) -> &str {
        match key {
            ModuleKey::Explore => &self.explore,
            ModuleKey::Tradeoffs => &self.tradeoffs,
            ModuleKey::Blender => &self.blender,
        }
    }

    /// Replaces the endpoint for `key`. Empty values are ignored and `false` is returned.
    pub fn set(&mut self, key: ModuleKey, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        let slot = match key {
            ModuleKey::Explore => &mut self.explore,
            ModuleKey::Tradeoffs => &mut self.tradeoffs,
            ModuleKey::Blender => &mut self.blender,
        };
        value.clone_into(slot);
        true
    }

    /// Module endpoints in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ModuleKey, &str)> {
        ModuleKey::iter().map(move |key| (key, self.get(key)))
    }
}
