//! Response payloads, decoded once at the client boundary.
//!
//! Only the fields the pipelines read are declared; unknown fields are
//! ignored.

use pokedata_core::Generation;
use pokedata_core::sprite::SpriteSet;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    /// Numeric id at the end of the resource URL.
    pub fn id(&self) -> Option<u32> {
        resource_id(&self.url)
    }
}

/// Trailing numeric segment of a resource URL, e.g. `.../ability/65/` → `65`.
pub fn resource_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

/// One page of a listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPage {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub language: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerboseEffect {
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub short_effect: Option<String>,
    pub language: NamedResource,
}

impl VerboseEffect {
    /// Short effect, or the long effect when the short one is blank.
    pub fn text(&self) -> Option<&str> {
        non_blank(self.short_effect.as_deref()).or_else(|| non_blank(self.effect.as_deref()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Effect {
    #[serde(default)]
    pub effect: Option<String>,
    pub language: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EffectChange {
    #[serde(default)]
    pub effect_entries: Vec<Effect>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlavorText {
    #[serde(default)]
    pub flavor_text: Option<String>,
    pub language: NamedResource,
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// Fields shared by abilities and moves for translation merging.
pub trait EffectSources {
    fn effect_entries(&self) -> &[VerboseEffect];
    fn effect_changes(&self) -> &[EffectChange];
    fn flavor_text_entries(&self) -> &[FlavorText];
    fn names(&self) -> &[LocalizedName];

    /// English primary effect text.
    fn english_effect(&self) -> Option<&str> {
        self.effect_entries()
            .iter()
            .find(|e| e.language.name == "en")
            .and_then(VerboseEffect::text)
    }
}

macro_rules! effect_sources {
    ($ty:ty) => {
        impl EffectSources for $ty {
            fn effect_entries(&self) -> &[VerboseEffect] {
                &self.effect_entries
            }
            fn effect_changes(&self) -> &[EffectChange] {
                &self.effect_changes
            }
            fn flavor_text_entries(&self) -> &[FlavorText] {
                &self.flavor_text_entries
            }
            fn names(&self) -> &[LocalizedName] {
                &self.names
            }
        }
    };
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilityDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub is_main_series: Option<bool>,
    #[serde(default)]
    pub generation: Option<NamedResource>,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub effect_entries: Vec<VerboseEffect>,
    #[serde(default)]
    pub effect_changes: Vec<EffectChange>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
}

impl AbilityDetail {
    /// Only an explicit `true` counts; a missing or null flag does not.
    pub fn in_main_series(&self) -> bool {
        self.is_main_series == Some(true)
    }

    pub fn generation(&self) -> Option<Generation> {
        debut_generation(self.generation.as_ref())
    }
}

effect_sources!(AbilityDetail);

#[derive(Debug, Clone, Deserialize)]
pub struct MoveDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub accuracy: Option<u32>,
    #[serde(default)]
    pub effect_chance: Option<u32>,
    #[serde(default)]
    pub pp: Option<u32>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default)]
    pub damage_class: Option<NamedResource>,
    #[serde(default, rename = "type")]
    pub move_type: Option<NamedResource>,
    #[serde(default)]
    pub generation: Option<NamedResource>,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub effect_entries: Vec<VerboseEffect>,
    #[serde(default)]
    pub effect_changes: Vec<EffectChange>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
}

impl MoveDetail {
    pub fn generation(&self) -> Option<Generation> {
        debut_generation(self.generation.as_ref())
    }

    pub fn type_name(&self) -> Option<&str> {
        self.move_type.as_ref().map(|t| t.name.as_str())
    }

    /// Short effect of the first primary entry, whatever its language.
    pub fn first_short_effect(&self) -> Option<&str> {
        self.effect_entries
            .first()
            .and_then(|e| e.short_effect.as_deref())
    }
}

effect_sources!(MoveDetail);

#[derive(Debug, Clone, Deserialize)]
pub struct MoveBattleStylePreference {
    #[serde(default)]
    pub low_hp_preference: Option<u32>,
    #[serde(default)]
    pub high_hp_preference: Option<u32>,
    #[serde(default)]
    pub move_battle_style: Option<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NatureDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub increased_stat: Option<NamedResource>,
    #[serde(default)]
    pub decreased_stat: Option<NamedResource>,
    #[serde(default)]
    pub likes_flavor: Option<NamedResource>,
    #[serde(default)]
    pub hates_flavor: Option<NamedResource>,
    #[serde(default)]
    pub move_battle_style_preferences: Vec<MoveBattleStylePreference>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesVariety {
    #[serde(default)]
    pub is_default: bool,
    pub pokemon: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub generation: Option<NamedResource>,
    #[serde(default)]
    pub varieties: Vec<SpeciesVariety>,
}

impl SpeciesDetail {
    pub fn generation(&self) -> Option<Generation> {
        debut_generation(self.generation.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub forms: Vec<NamedResource>,
    #[serde(default)]
    pub sprites: SpriteSet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub form_name: String,
    #[serde(default)]
    pub sprites: SpriteSet,
}

/// Generation from its slug (`generation-iii`), falling back to the URL id.
fn debut_generation(resource: Option<&NamedResource>) -> Option<Generation> {
    let resource = resource?;
    resource
        .name
        .parse()
        .ok()
        .or_else(|| Generation::from_resource_url(&resource.url))
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
