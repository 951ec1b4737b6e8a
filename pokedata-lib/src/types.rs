//! Type report: Pokémon and moves grouped by type, with localized type names.

use std::collections::BTreeMap;

use serde::Deserialize;

use pokedata_api::types::TypeDetail;
use pokedata_api::{ResourceKind, Transport};
use pokedata_core::{Dataset, DatasetKind, NameText, NamedRef, PokemonEntry, TranslationTable, TypeRecord};

use crate::catalog::name_translations;
use crate::error::PipelineError;
use crate::pipeline::{Pipeline, RunReport, Step};
use crate::progress::PipelineEvent;

/// The two fields of a move record the type report needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoveTypeRef {
    pub id: u32,
    #[serde(default, rename = "type")]
    pub move_type: Option<String>,
}

/// Group Pokémon and moves by type.
///
/// Only types carried by at least one Pokémon get an entry; moves of any
/// other type are ignored.
pub fn build_type_report(
    pokemon: &Dataset<PokemonEntry>,
    moves: &Dataset<MoveTypeRef>,
    translations: &BTreeMap<String, TranslationTable<NameText>>,
) -> Dataset<TypeRecord> {
    let mut report: Dataset<TypeRecord> = Dataset::new();

    for (slug, entry) in pokemon {
        for type_name in entry.types() {
            report
                .entry(type_name.clone())
                .or_insert_with(|| TypeRecord {
                    pokemon: Vec::new(),
                    moves: Vec::new(),
                    name_translations: translations.get(type_name).cloned().unwrap_or_default(),
                })
                .pokemon
                .push(NamedRef::new(slug.as_str(), entry.id));
        }
    }

    for (slug, move_ref) in moves {
        let Some(ref move_type) = move_ref.move_type else {
            continue;
        };
        if let Some(record) = report.get_mut(move_type) {
            record.moves.push(NamedRef::new(slug.as_str(), move_ref.id));
        }
    }

    report
}

impl<T: Transport> Pipeline<T> {
    /// Localized names for every listed type, keyed by type slug.
    fn fetch_type_translations(
        &self,
    ) -> Result<BTreeMap<String, TranslationTable<NameText>>, PipelineError> {
        let entries = self.list(ResourceKind::Type)?;
        let total = entries.len();

        let mut translations = BTreeMap::new();
        for (index, entry) in entries.iter().enumerate() {
            self.emit(PipelineEvent::processing(index, total, &entry.name));
            match self.client().fetch::<TypeDetail>(&entry.url)? {
                Some(detail) => {
                    translations.insert(entry.name.clone(), name_translations(&detail.names));
                }
                None => self.skip(&entry.name, "no type detail"),
            }
        }
        Ok(translations)
    }

    pub(crate) fn run_types(&self) -> Result<RunReport, PipelineError> {
        let pokemon: Dataset<PokemonEntry> = self.read_dataset(DatasetKind::Pokemon)?;
        let moves: Dataset<MoveTypeRef> = self.read_dataset(DatasetKind::Moves)?;
        let translations = self.fetch_type_translations()?;

        let report = build_type_report(&pokemon, &moves, &translations);
        let untranslated = report
            .keys()
            .filter(|t| !translations.contains_key(*t))
            .count();
        if untranslated > 0 {
            log::warn!("{untranslated} types have no name translations");
        }

        let written = self.write_dataset(DatasetKind::Types, &report, report.len())?;
        Ok(RunReport {
            step: Step::Types,
            outputs: vec![written],
            skipped: 0,
        })
    }
}
