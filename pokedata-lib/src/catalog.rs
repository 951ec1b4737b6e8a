//! Abilities, moves and natures: fetched entity by entity from the catalog.

use pokedata_api::ResourceKind;
use pokedata_api::Transport;
use pokedata_api::types::{
    AbilityDetail, EffectSources, LocalizedName, MoveDetail, NamedResource, NatureDetail,
};
use pokedata_core::translation::name_table;
use pokedata_core::{
    AbilityRecord, BattleStylePreference, Dataset, DatasetKind, EffectText, Generation, MoveRecord,
    NameText, NatureRecord, TierMerger, TranslationTable, slugify,
};
use pokedata_dump::Skill;

use crate::error::PipelineError;
use crate::pipeline::{Pipeline, RunReport, Step};
use crate::progress::PipelineEvent;

/// Effect text per language: primary entries, then effect changes, then
/// flavor text. The first non-blank text for a language wins.
pub fn effect_translations(source: &impl EffectSources) -> TranslationTable<EffectText> {
    TierMerger::new()
        .tier(
            source
                .effect_entries()
                .iter()
                .map(|e| (e.language.name.as_str(), e.text())),
        )
        .tier(
            source
                .effect_changes()
                .iter()
                .flat_map(|change| change.effect_entries.iter())
                .map(|e| (e.language.name.as_str(), e.effect.as_deref())),
        )
        .tier(
            source
                .flavor_text_entries()
                .iter()
                .map(|f| (f.language.name.as_str(), f.flavor_text.as_deref())),
        )
        .into_effects()
}

pub fn name_translations(names: &[LocalizedName]) -> TranslationTable<NameText> {
    name_table(
        names
            .iter()
            .map(|n| (n.language.name.as_str(), n.name.as_str())),
    )
}

pub fn normalize_ability(detail: &AbilityDetail) -> AbilityRecord {
    AbilityRecord {
        id: detail.id,
        name: detail.name.clone(),
        effect: detail.english_effect().map(str::to_string),
        effect_translations: effect_translations(detail),
        name_translations: name_translations(&detail.names),
    }
}

/// Normalize a move, preferring dump stats over catalog stats where the dump
/// has a value.
pub fn normalize_move(detail: &MoveDetail, skill: Option<&Skill>) -> MoveRecord {
    let (power, accuracy, pp) = match skill {
        Some(skill) => (
            skill.base_power.or(detail.power),
            skill.base_accuracy.or(detail.accuracy),
            skill.base_pp.or(detail.pp),
        ),
        None => (detail.power, detail.accuracy, detail.pp),
    };

    MoveRecord {
        id: detail.id,
        name: detail.name.clone(),
        accuracy,
        effect_chance: detail.effect_chance,
        pp,
        priority: detail.priority,
        power,
        damage_class: resource_name(detail.damage_class.as_ref()),
        move_type: detail.type_name().map(str::to_string),
        effect: detail.first_short_effect().map(str::to_string),
        name_translations: name_translations(&detail.names),
        effect_translations: effect_translations(detail),
    }
}

pub fn normalize_nature(detail: &NatureDetail) -> NatureRecord {
    NatureRecord {
        id: detail.id,
        name: detail.name.clone(),
        increased_stat: resource_name(detail.increased_stat.as_ref()),
        decreased_stat: resource_name(detail.decreased_stat.as_ref()),
        likes_flavor: resource_name(detail.likes_flavor.as_ref()),
        hates_flavor: resource_name(detail.hates_flavor.as_ref()),
        move_battle_style_preferences: detail
            .move_battle_style_preferences
            .iter()
            .map(|p| BattleStylePreference {
                move_battle_style: resource_name(p.move_battle_style.as_ref()),
                low_hp_preference: p.low_hp_preference,
                high_hp_preference: p.high_hp_preference,
            })
            .collect(),
    }
}

fn resource_name(resource: Option<&NamedResource>) -> Option<String> {
    resource.map(|r| r.name.clone())
}

fn generation_reason(generation: Option<Generation>) -> String {
    match generation {
        Some(g) => format!("debuted in generation {g}"),
        None => "unknown generation".to_string(),
    }
}

impl<T: Transport> Pipeline<T> {
    pub(crate) fn run_abilities(&self) -> Result<RunReport, PipelineError> {
        let rules = &self.config().abilities;
        let entries = self.list(ResourceKind::Ability)?;
        let total = entries.len();

        let mut abilities = Dataset::new();
        let mut skipped = 0;
        for (index, entry) in entries.iter().enumerate() {
            self.emit(PipelineEvent::processing(index, total, &entry.name));

            if rules.is_excluded(&entry.name) {
                self.skip(&entry.name, "excluded");
                skipped += 1;
                continue;
            }
            let Some(detail) = self.client().fetch::<AbilityDetail>(&entry.url)? else {
                self.skip(&entry.name, "no detail");
                skipped += 1;
                continue;
            };
            if !detail.in_main_series() {
                self.skip(&entry.name, "not a main-series ability");
                skipped += 1;
                continue;
            }
            if !rules.admits(&entry.name, detail.generation()) {
                self.skip(&entry.name, generation_reason(detail.generation()));
                skipped += 1;
                continue;
            }

            let record = normalize_ability(&detail);
            abilities.insert(slugify(&record.name), record);
        }

        let written = self.write_dataset(DatasetKind::Abilities, &abilities, abilities.len())?;
        Ok(RunReport {
            step: Step::Abilities,
            outputs: vec![written],
            skipped,
        })
    }

    pub(crate) fn run_moves(&self) -> Result<RunReport, PipelineError> {
        let moves_config = &self.config().moves;
        let skills = self.dump().skills()?;
        log::debug!("Loaded {} skill overrides", skills.len());

        let entries = self.list(ResourceKind::Move)?;
        let total = entries.len();

        let mut moves = Dataset::new();
        let mut skipped = 0;
        for (index, entry) in entries.iter().enumerate() {
            self.emit(PipelineEvent::processing(index, total, &entry.name));

            if moves_config.filter.is_excluded(&entry.name) {
                self.skip(&entry.name, "excluded");
                skipped += 1;
                continue;
            }
            let Some(detail) = self.client().fetch::<MoveDetail>(&entry.url)? else {
                self.skip(&entry.name, "no detail");
                skipped += 1;
                continue;
            };
            if !moves_config.filter.admits(&entry.name, detail.generation()) {
                self.skip(&entry.name, generation_reason(detail.generation()));
                skipped += 1;
                continue;
            }
            if let Some(move_type) = detail.type_name() {
                if moves_config.excludes_type(move_type) {
                    self.skip(&entry.name, format!("{move_type}-type move"));
                    skipped += 1;
                    continue;
                }
            }

            let record = normalize_move(&detail, skills.get(detail.id));
            moves.insert(slugify(&record.name), record);
        }

        let written = self.write_dataset(DatasetKind::Moves, &moves, moves.len())?;
        Ok(RunReport {
            step: Step::Moves,
            outputs: vec![written],
            skipped,
        })
    }

    pub(crate) fn run_natures(&self) -> Result<RunReport, PipelineError> {
        let entries = self.list(ResourceKind::Nature)?;
        let total = entries.len();

        let mut natures = Dataset::new();
        let mut skipped = 0;
        for (index, entry) in entries.iter().enumerate() {
            self.emit(PipelineEvent::processing(index, total, &entry.name));

            let Some(detail) = self.client().fetch::<NatureDetail>(&entry.url)? else {
                self.skip(&entry.name, "no detail");
                skipped += 1;
                continue;
            };
            let record = normalize_nature(&detail);
            natures.insert(slugify(&record.name), record);
        }

        let written = self.write_dataset(DatasetKind::Natures, &natures, natures.len())?;
        Ok(RunReport {
            step: Step::Natures,
            outputs: vec![written],
            skipped,
        })
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
