//! Normalized output records, one type per dataset.
//!
//! Field declaration order is serialization order; keep it stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::gender::GenderRate;
use crate::translation::{EffectText, NameText, TranslationTable};

/// `{name, id}` summary used by every cross-reference list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
    pub id: u32,
}

impl NamedRef {
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityRecord {
    pub id: u32,
    pub name: String,
    pub effect: Option<String>,
    pub effect_translations: TranslationTable<EffectText>,
    pub name_translations: TranslationTable<NameText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: u32,
    pub name: String,
    pub accuracy: Option<u32>,
    pub effect_chance: Option<u32>,
    pub pp: Option<u32>,
    pub priority: Option<i32>,
    pub power: Option<u32>,
    pub damage_class: Option<String>,
    #[serde(rename = "type")]
    pub move_type: Option<String>,
    pub effect: Option<String>,
    pub name_translations: TranslationTable<NameText>,
    pub effect_translations: TranslationTable<EffectText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStylePreference {
    pub move_battle_style: Option<String>,
    pub low_hp_preference: Option<u32>,
    pub high_hp_preference: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatureRecord {
    pub id: u32,
    pub name: String,
    pub increased_stat: Option<String>,
    pub decreased_stat: Option<String>,
    pub likes_flavor: Option<String>,
    pub hates_flavor: Option<String>,
    pub move_battle_style_preferences: Vec<BattleStylePreference>,
}

/// An item entry. Entries created from a held-item reference alone carry
/// only `id`, `name` and `pokemon_with_item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_translations: Option<TranslationTable<NameText>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect_translations: Option<TranslationTable<EffectText>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pokemon_with_item: Option<Vec<NamedRef>>,
}

impl ItemRecord {
    /// Bare entry for an item known only from a held-item reference.
    pub fn placeholder(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            name_translations: None,
            effect: None,
            effect_translations: None,
            sprite: None,
            pokemon_with_item: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub pokemon: Vec<NamedRef>,
    pub moves: Vec<NamedRef>,
    pub name_translations: TranslationTable<NameText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderRateRecord {
    pub name: String,
    #[serde(serialize_with = "percentage")]
    pub female_percentage: f64,
    #[serde(serialize_with = "percentage")]
    pub male_percentage: f64,
    pub pokemon_list: Vec<NamedRef>,
}

/// Whole percentages are written as integers: `100`, not `100.0`.
fn percentage<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= 100.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl From<GenderRate> for GenderRateRecord {
    fn from(rate: GenderRate) -> Self {
        Self {
            name: rate.label(),
            female_percentage: rate.female_percentage(),
            male_percentage: rate.male_percentage(),
            pokemon_list: Vec::new(),
        }
    }
}

/// `{id, item_name}` entry of a Pokémon's `held_items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldItemRef {
    pub id: u32,
    pub item_name: String,
}

/// Entry of the externally produced Pokémon dataset.
///
/// Only the fields the pipelines read are typed; everything else round-trips
/// through `extra`. `held_items` is overwritten wholesale, so whatever shape
/// it arrives in is kept as raw JSON until then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonEntry {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_rate: Option<i8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub held_items: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PokemonEntry {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            types: None,
            gender_rate: None,
            held_items: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn types(&self) -> &[String] {
        self.types.as_deref().unwrap_or_default()
    }

    pub fn gender(&self) -> Option<GenderRate> {
        self.gender_rate.and_then(GenderRate::from_code)
    }

    /// Held items in `{id, item_name}` form, or `None` if unset or in any
    /// other shape.
    pub fn held_items(&self) -> Option<Vec<HeldItemRef>> {
        Vec::<HeldItemRef>::deserialize(self.held_items.as_ref()?).ok()
    }

    pub fn set_held_items(&mut self, items: &[HeldItemRef]) {
        let entries = items
            .iter()
            .map(|held| {
                let mut entry = serde_json::Map::new();
                entry.insert("id".to_string(), held.id.into());
                entry.insert("item_name".to_string(), held.item_name.clone().into());
                serde_json::Value::Object(entry)
            })
            .collect();
        self.held_items = Some(serde_json::Value::Array(entries));
    }
}
