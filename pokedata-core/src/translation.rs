//! Per-language text tables.
//!
//! Effect text is assembled from several fallback tiers. A language takes the
//! first non-empty text it meets, so a later tier can only fill languages that
//! earlier tiers left absent. Name tables are a direct projection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from language code to a localized record.
pub type TranslationTable<T> = BTreeMap<String, T>;

/// Localized effect text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectText {
    pub effect: String,
}

/// Localized display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameText {
    pub name: String,
}

/// Accumulates effect text across tiers in priority order.
#[derive(Debug, Clone, Default)]
pub struct TierMerger {
    texts: BTreeMap<String, String>,
}

impl TierMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one tier of `(language, text)` pairs.
    ///
    /// Missing or blank text does not claim its language.
    pub fn tier<'a, I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        for (language, text) in entries {
            let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
                continue;
            };
            self.texts
                .entry(language.to_string())
                .or_insert_with(|| text.to_string());
        }
        self
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.texts.get(language).map(String::as_str)
    }

    pub fn into_effects(self) -> TranslationTable<EffectText> {
        self.texts
            .into_iter()
            .map(|(language, effect)| (language, EffectText { effect }))
            .collect()
    }
}

/// Project `(language, name)` pairs into a name table.
pub fn name_table<'a, I>(entries: I) -> TranslationTable<NameText>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    entries
        .into_iter()
        .map(|(language, name)| {
            (
                language.to_string(),
                NameText {
                    name: name.to_string(),
                },
            )
        })
        .collect()
}
