//! Sprite URL sets and legacy animated-sprite synthesis.
//!
//! Form variants often lack hosted `generation-v/black-white` sprites in the
//! catalog even though the static asset host serves them under a fixed
//! naming convention. [`synthesize_legacy`] rebuilds those URLs from the
//! variety id and the form-name suffix.

use serde::{Deserialize, Serialize};

/// Root of the legacy asset group on the static sprite host.
pub const LEGACY_SPRITE_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/versions/generation-v/black-white";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Front,
    Back,
}

/// One of the eight front/back × default/shiny × plain/female sprite slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSlot {
    pub facing: Facing,
    pub shiny: bool,
    pub female: bool,
}

impl SpriteSlot {
    pub const fn new(facing: Facing, shiny: bool, female: bool) -> Self {
        Self {
            facing,
            shiny,
            female,
        }
    }

    /// All slots in the order the catalog serializes them.
    pub const ALL: [SpriteSlot; 8] = [
        Self::new(Facing::Back, false, false),
        Self::new(Facing::Back, false, true),
        Self::new(Facing::Back, true, false),
        Self::new(Facing::Back, true, true),
        Self::new(Facing::Front, false, false),
        Self::new(Facing::Front, false, true),
        Self::new(Facing::Front, true, false),
        Self::new(Facing::Front, true, true),
    ];

    /// Field name in the catalog's sprite object, e.g. `back_shiny_female`.
    pub fn key(&self) -> &'static str {
        match (self.facing, self.shiny, self.female) {
            (Facing::Back, false, false) => "back_default",
            (Facing::Back, false, true) => "back_female",
            (Facing::Back, true, false) => "back_shiny",
            (Facing::Back, true, true) => "back_shiny_female",
            (Facing::Front, false, false) => "front_default",
            (Facing::Front, false, true) => "front_female",
            (Facing::Front, true, false) => "front_shiny",
            (Facing::Front, true, true) => "front_shiny_female",
        }
    }

    /// Legacy asset URL for this slot. Path segments go `back/`, `shiny/`, `female/`.
    pub fn legacy_url(&self, stem: &str, animated: bool) -> String {
        let mut url = String::from(LEGACY_SPRITE_BASE);
        if animated {
            url.push_str("/animated");
        }
        url.push('/');
        if self.facing == Facing::Back {
            url.push_str("back/");
        }
        if self.shiny {
            url.push_str("shiny/");
        }
        if self.female {
            url.push_str("female/");
        }
        url.push_str(stem);
        url.push_str(if animated { ".gif" } else { ".png" });
        url
    }
}

/// The eight slot URLs of one sprite group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotUrls {
    pub back_default: Option<String>,
    pub back_female: Option<String>,
    pub back_shiny: Option<String>,
    pub back_shiny_female: Option<String>,
    pub front_default: Option<String>,
    pub front_female: Option<String>,
    pub front_shiny: Option<String>,
    pub front_shiny_female: Option<String>,
}

impl SlotUrls {
    /// URL in `slot`, treating empty strings as absent.
    pub fn get(&self, slot: SpriteSlot) -> Option<&str> {
        let value = match (slot.facing, slot.shiny, slot.female) {
            (Facing::Back, false, false) => &self.back_default,
            (Facing::Back, false, true) => &self.back_female,
            (Facing::Back, true, false) => &self.back_shiny,
            (Facing::Back, true, true) => &self.back_shiny_female,
            (Facing::Front, false, false) => &self.front_default,
            (Facing::Front, false, true) => &self.front_female,
            (Facing::Front, true, false) => &self.front_shiny,
            (Facing::Front, true, true) => &self.front_shiny_female,
        };
        value.as_deref().filter(|url| !url.is_empty())
    }

    pub fn set(&mut self, slot: SpriteSlot, url: Option<String>) {
        let field = match (slot.facing, slot.shiny, slot.female) {
            (Facing::Back, false, false) => &mut self.back_default,
            (Facing::Back, false, true) => &mut self.back_female,
            (Facing::Back, true, false) => &mut self.back_shiny,
            (Facing::Back, true, true) => &mut self.back_shiny_female,
            (Facing::Front, false, false) => &mut self.front_default,
            (Facing::Front, false, true) => &mut self.front_female,
            (Facing::Front, true, false) => &mut self.front_shiny,
            (Facing::Front, true, true) => &mut self.front_shiny_female,
        };
        *field = url;
    }
}

/// A catalog sprite object. `other` and `versions` pass through untouched
/// unless versions are synthesized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteSet {
    #[serde(flatten)]
    pub slots: SlotUrls,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<SpriteVersions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpriteVersions {
    /// Versions as served by the catalog.
    Catalog(serde_json::Value),
    /// Synthesized legacy URLs.
    Legacy(LegacyVersions),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyVersions {
    #[serde(rename = "generation-v")]
    pub generation_v: BlackWhiteGroup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackWhiteGroup {
    #[serde(rename = "black-white")]
    pub black_white: BlackWhiteSprites,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackWhiteSprites {
    pub animated: SlotUrls,
    #[serde(flatten)]
    pub still: SlotUrls,
}

/// Which slots receive synthesized URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpriteNaming {
    /// All eight slots, female variants under `female/`.
    #[default]
    WithFemale,
    /// Default and shiny slots only; female slots stay null.
    DefaultOnly,
}

/// Filename stem for a form: the variety id, plus the form-name remainder
/// after the first hyphen.
pub fn filename_stem(variety_id: u32, form_name: &str) -> String {
    match form_name.split_once('-') {
        Some((_, suffix)) => format!("{variety_id}-{suffix}"),
        None => variety_id.to_string(),
    }
}

/// Build the legacy URL set for a form from its own sprite slots.
///
/// A slot is synthesized only when the form has a still sprite in that slot.
pub fn synthesize_legacy(stem: &str, own: &SlotUrls, naming: SpriteNaming) -> LegacyVersions {
    let mut animated = SlotUrls::default();
    let mut still = SlotUrls::default();

    for slot in SpriteSlot::ALL {
        if slot.female && naming == SpriteNaming::DefaultOnly {
            continue;
        }
        if own.get(slot).is_none() {
            continue;
        }
        animated.set(slot, Some(slot.legacy_url(stem, true)));
        still.set(slot, Some(slot.legacy_url(stem, false)));
    }

    LegacyVersions {
        generation_v: BlackWhiteGroup {
            black_white: BlackWhiteSprites { animated, still },
        },
    }
}

/// One entry of the sprite dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSprites {
    pub id: u32,
    pub name: String,
    pub sprites: SpriteSet,
}

#[cfg(test)]
#[path = "tests/sprite_tests.rs"]
mod tests;
