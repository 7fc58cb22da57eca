use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// The dashboard modules linked from the portal.
///
/// The set is closed; adding a module means adding a variant and its metadata below.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModuleKey {
    Explore,
    Tradeoffs,
    Blender,
}

impl ModuleKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Built-in endpoint, relative so a reverse proxy can mount the dashboards next to the portal.
    #[must_use]
    pub const fn default_path(self) -> &'static str {
        match self {
            Self::Explore => "/explore",
            Self::Tradeoffs => "/tradeoffs",
            Self::Blender => "/blender",
        }
    }

    /// Process variable that overrides the default endpoint.
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Explore => "NEXT_PUBLIC_CEC_EXPLORE_URL",
            Self::Tradeoffs => "NEXT_PUBLIC_CEC_TRADEOFFS_URL",
            Self::Blender => "NEXT_PUBLIC_CEC_BLEND_URL",
        }
    }

    /// Canonical query parameter that overrides the endpoint for one page load.
    #[must_use]
    pub fn query_param(self) -> &'static str {
        self.as_str()
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Explore => "Explore Solutions",
            Self::Tradeoffs => "Explore Tradeoffs",
            Self::Blender => "Preference Blender",
        }
    }

    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Explore => {
                "Browse near-cost-optimal technology pathways from capacity expansion model. \
                 Compare system cost, CO2, reliability, land use, transmission, and jobs across \
                 feasible build-outs."
            },
            Self::Tradeoffs => {
                "Interrogate technology & attribute trade-offs side-by-side: PV, wind, storage \
                 (incl. LDES), and transmission vs. cost, emissions, land, equity, biodiversity, \
                 viewshed, and water."
            },
            Self::Blender => {
                "Co-create pathways with stakeholders. Apply weights and constraints, mix \
                 elements from multiple solutions, and see viability and impacts update instantly."
            },
        }
    }

    /// CSS class selecting the tile accent gradient.
    #[must_use]
    pub const fn accent(self) -> &'static str {
        match self {
            Self::Explore => "accent-teal",
            Self::Tradeoffs => "accent-amber",
            Self::Blender => "accent-violet",
        }
    }
}
