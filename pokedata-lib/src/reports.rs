//! Local re-indexing steps: gender-rate buckets, compiled locations and the
//! per-field location reports.

use pokedata_api::Transport;
use pokedata_core::location::{EncounterIndex, LocationMap, LocationPatch, apply_patch, compile_locations, regroup};
use pokedata_core::{Dataset, DatasetKind, GenderRate, GenderRateRecord, NamedRef, PokemonEntry, SpeciesNames};
use pokedata_dump::{Monster, load_optional_json};

use crate::error::PipelineError;
use crate::pipeline::{Pipeline, RunReport, Step};

/// All ten gender-rate buckets keyed by code, each listing its Pokémon.
///
/// Pokémon without a recognized code are counted in the second value.
pub fn build_gender_report(pokemon: &Dataset<PokemonEntry>) -> (Dataset<GenderRateRecord>, usize) {
    let mut report: Dataset<GenderRateRecord> = GenderRate::all()
        .map(|rate| (rate.code().to_string(), GenderRateRecord::from(rate)))
        .collect();

    let mut unmatched = 0;
    for (slug, entry) in pokemon {
        let bucket = entry
            .gender()
            .and_then(|rate| report.get_mut(&rate.code().to_string()));
        match bucket {
            Some(record) => record.pokemon_list.push(NamedRef::new(slug.as_str(), entry.id)),
            None => {
                log::debug!("{slug} has no usable gender rate ({:?})", entry.gender_rate);
                unmatched += 1;
            }
        }
    }

    (report, unmatched)
}

/// Location dataset from the monster dump, keyed by normalized species slug.
pub fn locations_from_monsters(monsters: Vec<Monster>, species: &SpeciesNames) -> LocationMap {
    compile_locations(
        monsters
            .into_iter()
            .map(|m| (species.normalize(&m.name), m.locations)),
    )
}

impl<T: Transport> Pipeline<T> {
    pub(crate) fn run_gender_rates(&self) -> Result<RunReport, PipelineError> {
        let pokemon: Dataset<PokemonEntry> = self.read_dataset(DatasetKind::Pokemon)?;
        let (report, unmatched) = build_gender_report(&pokemon);

        let written = self.write_dataset(DatasetKind::GenderRates, &report, report.len())?;
        Ok(RunReport {
            step: Step::GenderRates,
            outputs: vec![written],
            skipped: unmatched,
        })
    }

    pub(crate) fn run_locations(&self) -> Result<RunReport, PipelineError> {
        let monsters = self.dump().monsters()?;
        let species = self.config().species_names();
        let mut locations = locations_from_monsters(monsters, &species);

        let patch_path = &self.config().paths.patch_file;
        if let Some(patch) = load_optional_json::<LocationPatch>(patch_path)? {
            let before = locations.len();
            apply_patch(&mut locations, &patch);
            log::debug!(
                "Applied {} ({} additions, {} removals): {before} -> {} species",
                patch_path.display(),
                patch.add.len(),
                patch.remove.len(),
                locations.len()
            );
        }

        let written = self.write_dataset(DatasetKind::Locations, &locations, locations.len())?;
        Ok(RunReport {
            step: Step::Locations,
            outputs: vec![written],
            skipped: 0,
        })
    }

    pub(crate) fn run_location_reports(&self) -> Result<RunReport, PipelineError> {
        let locations: LocationMap = self.read_dataset(DatasetKind::Locations)?;

        let mut outputs = Vec::new();
        for index in EncounterIndex::all() {
            let kind = match index {
                EncounterIndex::Rarity => DatasetKind::LocationRarities,
                EncounterIndex::Region => DatasetKind::LocationRegions,
                EncounterIndex::Type => DatasetKind::LocationTypes,
            };
            let report = regroup(&locations, *index);
            outputs.push(self.write_dataset(kind, &report, report.len())?);
        }

        Ok(RunReport {
            step: Step::LocationReports,
            outputs,
            skipped: 0,
        })
    }
}
