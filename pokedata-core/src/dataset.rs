use std::collections::BTreeMap;

/// An output mapping from slug to record. Ordered so repeated runs serialize
/// identically.
pub type Dataset<T> = BTreeMap<String, T>;

/// Every JSON artifact the pipelines read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Abilities,
    Moves,
    Natures,
    Sprites,
    Types,
    Items,
    GenderRates,
    Locations,
    LocationRarities,
    LocationRegions,
    LocationTypes,
    /// Produced outside this workspace; read and patched only.
    Pokemon,
}

impl DatasetKind {
    pub fn all() -> &'static [DatasetKind] {
        &[
            Self::Abilities,
            Self::Moves,
            Self::Natures,
            Self::Sprites,
            Self::Types,
            Self::Items,
            Self::GenderRates,
            Self::Locations,
            Self::LocationRarities,
            Self::LocationRegions,
            Self::LocationTypes,
            Self::Pokemon,
        ]
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Abilities => "abilities-data.json",
            Self::Moves => "moves-data.json",
            Self::Natures => "natures-data.json",
            Self::Sprites => "pokemon-sprites.json",
            Self::Types => "types-data.json",
            Self::Items => "item-data.json",
            Self::GenderRates => "gender-rates.json",
            Self::Locations => "locations.json",
            Self::LocationRarities => "location-rarities.json",
            Self::LocationRegions => "location-regions.json",
            Self::LocationTypes => "location-types.json",
            Self::Pokemon => "pokemon-data.json",
        }
    }

    /// Short name used in log lines and progress messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Abilities => "abilities",
            Self::Moves => "moves",
            Self::Natures => "natures",
            Self::Sprites => "sprites",
            Self::Types => "types",
            Self::Items => "items",
            Self::GenderRates => "gender rates",
            Self::Locations => "locations",
            Self::LocationRarities => "location rarities",
            Self::LocationRegions => "location regions",
            Self::LocationTypes => "location types",
            Self::Pokemon => "pokemon",
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
