//! Sprite dataset: every variety of every in-range species, plus form
//! variants with synthesized legacy animated-sprite URLs.

use pokedata_api::types::{FormDetail, PokemonDetail, SpeciesDetail};
use pokedata_api::{ResourceKind, Transport};
use pokedata_core::sprite::{filename_stem, synthesize_legacy};
use pokedata_core::{Dataset, DatasetKind, PokemonSprites, SpriteNaming, SpriteVersions};

use crate::error::PipelineError;
use crate::pipeline::{Pipeline, RunReport, Step};
use crate::progress::PipelineEvent;

/// Sprite entry for a form, with `versions` replaced by synthesized URLs.
pub fn form_sprites(variety_id: u32, form: FormDetail, naming: SpriteNaming) -> PokemonSprites {
    let stem = filename_stem(variety_id, &form.name);
    let mut sprites = form.sprites;
    let legacy = synthesize_legacy(&stem, &sprites.slots, naming);
    sprites.versions = Some(SpriteVersions::Legacy(legacy));
    PokemonSprites {
        id: form.id,
        name: form.name,
        sprites,
    }
}

impl<T: Transport> Pipeline<T> {
    pub(crate) fn run_sprites(&self) -> Result<RunReport, PipelineError> {
        let settings = &self.config().sprites;
        let markers = &settings.excluded_markers;
        let species = self.list(ResourceKind::PokemonSpecies)?;
        let total = species.len();

        let mut sprites: Dataset<PokemonSprites> = Dataset::new();
        let mut skipped = 0;
        for (index, entry) in species.iter().enumerate() {
            self.emit(PipelineEvent::processing(index, total, &entry.name));

            let Some(detail) = self.client().fetch::<SpeciesDetail>(&entry.url)? else {
                self.skip(&entry.name, "no species detail");
                skipped += 1;
                continue;
            };
            if !detail
                .generation()
                .is_some_and(|g| settings.generations.contains(g))
            {
                self.skip(&entry.name, "outside generation range");
                skipped += 1;
                continue;
            }

            for variety in &detail.varieties {
                let variety_name = &variety.pokemon.name;
                if let Some(marker) = markers.matching_marker(variety_name) {
                    self.skip(variety_name, format!("variant marker {marker}"));
                    skipped += 1;
                    continue;
                }
                let Some(variety_id) = variety.pokemon.id() else {
                    self.skip(variety_name, "no id in resource URL");
                    skipped += 1;
                    continue;
                };

                let url = self.client().detail_url(ResourceKind::Pokemon, variety_id);
                let Some(pokemon) = self.client().fetch::<PokemonDetail>(&url)? else {
                    self.skip(variety_name, "no pokemon detail");
                    skipped += 1;
                    continue;
                };

                let forms = pokemon.forms;
                sprites.insert(
                    pokemon.name.clone(),
                    PokemonSprites {
                        id: variety_id,
                        name: pokemon.name,
                        sprites: pokemon.sprites,
                    },
                );

                for form in forms {
                    if let Some(marker) = markers.matching_marker(&form.name) {
                        self.skip(&form.name, format!("variant marker {marker}"));
                        skipped += 1;
                        continue;
                    }
                    if sprites.contains_key(&form.name) {
                        continue;
                    }

                    let url = self.client().detail_url(ResourceKind::PokemonForm, &form.name);
                    let Some(detail) = self.client().fetch::<FormDetail>(&url)? else {
                        self.skip(&form.name, "no form detail");
                        skipped += 1;
                        continue;
                    };
                    sprites.insert(form.name, form_sprites(variety_id, detail, settings.naming));
                }
            }
        }

        let written = self.write_dataset(DatasetKind::Sprites, &sprites, sprites.len())?;
        Ok(RunReport {
            step: Step::Sprites,
            outputs: vec![written],
            skipped,
        })
    }
}
