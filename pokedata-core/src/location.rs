//! Encounter locations: compilation, manual patches and re-indexing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Time qualifier used when a location string has no trailing parenthetical.
pub const ALL_TIMES: &str = "ALL";

/// Bucket for encounters lacking the field a report groups by.
pub const UNKNOWN_BUCKET: &str = "unknown";

/// One place a species can be encountered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub encounter_type: Option<String>,
    /// Remaining dump fields (levels, region ids, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Encounter {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            time: None,
            rarity: None,
            region_name: None,
            encounter_type: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Move a trailing `(qualifier)` from the location into `time`.
    ///
    /// Without a qualifier an existing `time` is kept, otherwise it becomes
    /// [`ALL_TIMES`].
    pub fn normalized(mut self) -> Self {
        match split_time_qualifier(&self.location) {
            Some((location, time)) => {
                self.location = location;
                self.time = Some(time);
            }
            None => {
                self.location = self.location.trim().to_string();
                if self.time.is_none() {
                    self.time = Some(ALL_TIMES.to_string());
                }
            }
        }
        self
    }
}

/// Split `"Route 1 (Day)"` into `("Route 1", "Day")`.
///
/// Returns `None` when the string does not end in a parenthetical.
pub fn split_time_qualifier(raw: &str) -> Option<(String, String)> {
    let trimmed = raw.trim();
    let inner = trimmed.strip_suffix(')')?;
    let open = inner.rfind('(')?;
    let location = inner[..open].trim_end().to_string();
    let time = inner[open + 1..].trim().to_string();
    Some((location, time))
}

/// Encounter list of one species.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PokemonLocations {
    #[serde(default, alias = "encounters")]
    pub locations: Vec<Encounter>,
}

/// Compiled location dataset keyed by species slug.
pub type LocationMap = BTreeMap<String, PokemonLocations>;

/// Build the location dataset from `(slug, raw encounters)` pairs.
///
/// A slug seen twice keeps the later list.
pub fn compile_locations<I>(entries: I) -> LocationMap
where
    I: IntoIterator<Item = (String, Vec<Encounter>)>,
{
    entries
        .into_iter()
        .map(|(slug, encounters)| {
            let locations = encounters.into_iter().map(Encounter::normalized).collect();
            (slug, PokemonLocations { locations })
        })
        .collect()
}

/// Manual corrections applied after compilation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationPatch {
    /// Encounters appended per species; the species is created if missing.
    pub add: BTreeMap<String, Vec<Encounter>>,
    /// Exact location names removed per species.
    pub remove: BTreeMap<String, Vec<String>>,
}

impl LocationPatch {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Apply additions, then removals. A species left without locations by a
/// removal is dropped.
pub fn apply_patch(map: &mut LocationMap, patch: &LocationPatch) {
    for (slug, encounters) in &patch.add {
        map.entry(slug.clone())
            .or_default()
            .locations
            .extend(encounters.iter().cloned().map(Encounter::normalized));
    }

    for (slug, blacklist) in &patch.remove {
        let Some(entry) = map.get_mut(slug) else {
            continue;
        };
        entry
            .locations
            .retain(|e| !blacklist.iter().any(|name| *name == e.location));
        if entry.locations.is_empty() {
            map.remove(slug);
        }
    }
}

/// Field a location report groups encounters by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterIndex {
    Rarity,
    Region,
    Type,
}

impl EncounterIndex {
    pub fn all() -> &'static [EncounterIndex] {
        &[Self::Rarity, Self::Region, Self::Type]
    }

    pub fn value<'a>(&self, encounter: &'a Encounter) -> Option<&'a str> {
        match self {
            Self::Rarity => encounter.rarity.as_deref(),
            Self::Region => encounter.region_name.as_deref(),
            Self::Type => encounter.encounter_type.as_deref(),
        }
    }
}

impl std::fmt::Display for EncounterIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Rarity => "rarity",
            Self::Region => "region",
            Self::Type => "type",
        };
        write!(f, "{name}")
    }
}

/// Flatten every species' encounters and bucket them by `index`.
pub fn regroup(map: &LocationMap, index: EncounterIndex) -> BTreeMap<String, Vec<Encounter>> {
    let mut buckets: BTreeMap<String, Vec<Encounter>> = BTreeMap::new();
    for encounter in map.values().flat_map(|p| p.locations.iter()) {
        let key = index.value(encounter).unwrap_or(UNKNOWN_BUCKET);
        buckets
            .entry(key.to_string())
            .or_default()
            .push(encounter.clone());
    }
    buckets
}

#[cfg(test)]
#[path = "tests/location_tests.rs"]
mod tests;
