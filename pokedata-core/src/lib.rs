//! Domain model and pure transformations for the Pokémon data pipelines.
//!
//! Nothing here performs I/O. Fetching lives in `pokedata-api`, local dumps
//! and artifacts in `pokedata-dump`, and the pipelines tying them together in
//! `pokedata-lib`.

pub mod dataset;
pub mod filter;
pub mod gender;
pub mod generation;
pub mod location;
pub mod records;
pub mod slug;
pub mod sprite;
pub mod translation;

pub use dataset::{Dataset, DatasetKind};
pub use filter::{InclusionRules, VariantFilter};
pub use gender::GenderRate;
pub use generation::{Generation, GenerationParseError, GenerationRange};
pub use location::{
    Encounter, EncounterIndex, LocationMap, LocationPatch, PokemonLocations, apply_patch,
    compile_locations, regroup,
};
pub use records::{
    AbilityRecord, BattleStylePreference, GenderRateRecord, HeldItemRef, ItemRecord, MoveRecord,
    NamedRef, NatureRecord, PokemonEntry, TypeRecord,
};
pub use slug::{SpeciesNames, slugify};
pub use sprite::{PokemonSprites, SlotUrls, SpriteNaming, SpriteSet, SpriteVersions};
pub use translation::{EffectText, NameText, TierMerger, TranslationTable};
