//! Canonical mapping keys.
//!
//! Every output mapping is keyed by a slug: the display name lowercased with
//! spaces replaced by hyphens. Species names from the local dumps carry
//! punctuation and gender symbols that the remote catalog spells differently,
//! so they go through [`SpeciesNames`] first.

use std::collections::BTreeMap;

/// Lowercase a display name and replace spaces with hyphens.
///
/// ```
/// use pokedata_core::slug::slugify;
///
/// assert_eq!(slugify("Silk Scarf"), "silk-scarf");
/// assert_eq!(slugify("TM01"), "tm01");
/// ```
pub fn slugify(name: &str) -> String {
    name.replace(' ', "-").to_lowercase()
}

/// Species names whose dump spelling differs from the catalog slug.
const DEFAULT_SPECIES_OVERRIDES: &[(&str, &str)] = &[
    ("nidoran♀", "nidoran-f"),
    ("nidoran♂", "nidoran-m"),
    ("farfetch'd", "farfetchd"),
    ("mr. mime", "mr-mime"),
    ("mime jr.", "mime-jr"),
];

/// Lookup table that turns dump species names into catalog slugs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesNames {
    overrides: BTreeMap<String, String>,
}

impl Default for SpeciesNames {
    fn default() -> Self {
        Self::new(
            DEFAULT_SPECIES_OVERRIDES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
        )
    }
}

impl SpeciesNames {
    /// Build a table from `(lowercase dump name, slug)` pairs.
    pub fn new(overrides: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(from, to)| (from.to_lowercase(), to))
                .collect(),
        }
    }

    /// Add or replace entries, keeping the rest of the table.
    pub fn extend(&mut self, overrides: impl IntoIterator<Item = (String, String)>) {
        for (from, to) in overrides {
            self.overrides.insert(from.to_lowercase(), to);
        }
    }

    /// Normalize a dump species name into the key used by the Pokémon dataset.
    pub fn normalize(&self, name: &str) -> String {
        let lower = name.to_lowercase();
        match self.overrides.get(&lower) {
            Some(slug) => slug.clone(),
            None => slugify(&lower),
        }
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}
