//! Inclusion rules deciding which fetched entities reach the output.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::generation::{Generation, GenerationRange};

/// Abilities kept regardless of debut generation.
pub const DEFAULT_ABILITY_INCLUDES: &[&str] = &[
    "competitive",
    "neutralizing-gas",
    "protean",
    "sharpness",
    "slush-rush",
    "wind-rider",
];

/// Move types dropped regardless of generation.
pub const DEFAULT_EXCLUDED_MOVE_TYPES: &[&str] = &["shadow"];

/// Slug fragments marking regional forms, cosmetic variants and event forms.
pub const DEFAULT_VARIANT_MARKERS: &[&str] = &[
    "-mega",
    "-gmax",
    "-alola",
    "-hisui",
    "-galar",
    "-rock-star",
    "-belle",
    "-pop-star",
    "-phd",
    "-libre",
    "-cosplay",
    "-original-cap",
    "-hoenn-cap",
    "-sinnoh-cap",
    "-unova-cap",
    "-kalos-cap",
    "-partner-cap",
    "-starter",
    "-world-cap",
    "-primal",
    "-paldea",
    "-totem",
    "palkia-origin",
    "dialga-origin",
    "basculin-white-striped",
    "unown-a",
    "arceus-normal",
    "arceus-unknown",
    "arceus-fairy",
    "mothim-plant",
    "pichu-spiky-eared",
    "burmy-plant",
    "cherrim-overcast",
    "shellos-west",
    "gastrodon-west",
    "deerling-spring",
    "sawsbuck-spring",
];

/// Generation window plus explicit include/exclude overrides for one dataset.
///
/// The exclude list is consulted first, then the include list, then the
/// generation window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InclusionRules {
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
    pub generations: GenerationRange,
}

impl InclusionRules {
    /// Rules for abilities: generations I-V plus a handful of later abilities.
    pub fn abilities() -> Self {
        Self {
            include: DEFAULT_ABILITY_INCLUDES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..Self::default()
        }
    }

    pub fn is_excluded(&self, slug: &str) -> bool {
        self.exclude.contains(slug)
    }

    pub fn is_included(&self, slug: &str) -> bool {
        self.include.contains(slug)
    }

    /// Whether an entity with this slug and debut generation is kept.
    ///
    /// An entity with no known generation is only kept when listed in `include`.
    pub fn admits(&self, slug: &str, generation: Option<Generation>) -> bool {
        if self.is_excluded(slug) {
            return false;
        }
        if self.is_included(slug) {
            return true;
        }
        generation.is_some_and(|g| self.generations.contains(g))
    }
}

/// Substring markers excluding Pokémon varieties and forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantFilter {
    markers: Vec<String>,
}

impl Default for VariantFilter {
    fn default() -> Self {
        Self::new(DEFAULT_VARIANT_MARKERS.iter().map(|s| s.to_string()))
    }
}

impl VariantFilter {
    pub fn new(markers: impl IntoIterator<Item = String>) -> Self {
        Self {
            markers: markers.into_iter().collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Returns the first marker contained in `slug`, if any.
    pub fn matching_marker(&self, slug: &str) -> Option<&str> {
        self.markers
            .iter()
            .find(|m| slug.contains(m.as_str()))
            .map(String::as_str)
    }

    pub fn excludes(&self, slug: &str) -> bool {
        self.matching_marker(slug).is_some()
    }
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
