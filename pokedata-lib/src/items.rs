//! Item dataset from the local dump, and the held-item cross-reference
//! between items and Pokémon.

use pokedata_api::Transport;
use pokedata_core::{
    Dataset, DatasetKind, EffectText, HeldItemRef, ItemRecord, NameText, NamedRef, PokemonEntry,
    SpeciesNames, slugify,
};
use pokedata_dump::{DumpItem, Monster, StringTables, update_json};

use crate::error::PipelineError;
use crate::pipeline::{Pipeline, RunReport, Step, WrittenArtifact};
use crate::progress::PipelineEvent;

/// Full item record with a name and effect for every language.
///
/// Ids missing from a language's table, or whole missing tables, give `""`.
pub fn item_record(item: &DumpItem, strings: &StringTables, languages: &[String]) -> ItemRecord {
    let name_id = item.name_string_id.as_deref().unwrap_or_default();
    let desc_id = item.desc_string_id.as_deref().unwrap_or_default();

    let name_translations = languages
        .iter()
        .map(|lang| {
            let name = strings.lookup(lang, name_id).to_string();
            (lang.clone(), NameText { name })
        })
        .collect();
    let effect_translations = languages
        .iter()
        .map(|lang| {
            let effect = strings.lookup(lang, desc_id).to_string();
            (lang.clone(), EffectText { effect })
        })
        .collect();

    ItemRecord {
        id: item.id,
        name: item.name.clone(),
        name_translations: Some(name_translations),
        effect: item.desc.clone(),
        effect_translations: Some(effect_translations),
        sprite: item.icon_id,
        pokemon_with_item: None,
    }
}

/// `{id, name, effect, sprite}` entry for a dump item absent from the dataset.
pub fn minimal_item(item: &DumpItem) -> ItemRecord {
    ItemRecord {
        effect: item.desc.clone(),
        sprite: item.icon_id,
        ..ItemRecord::placeholder(item.id, item.name.clone())
    }
}

/// Rebuild `pokemon_with_item` on every item from the monster dump.
///
/// Dump items missing from `items` are added first. Held items that are still
/// unknown get a bare entry named by their slug.
pub fn link_items(
    mut items: Dataset<ItemRecord>,
    monsters: &[Monster],
    dump_items: &[DumpItem],
    species: &SpeciesNames,
) -> Dataset<ItemRecord> {
    for item in dump_items {
        items
            .entry(slugify(&item.name))
            .or_insert_with(|| minimal_item(item));
    }
    for item in items.values_mut() {
        item.pokemon_with_item = None;
    }

    for monster in monsters {
        let pokemon = species.normalize(&monster.name);
        for held in &monster.held_items {
            let slug = slugify(&held.name);
            items
                .entry(slug.clone())
                .or_insert_with(|| ItemRecord::placeholder(held.id, slug))
                .pokemon_with_item
                .get_or_insert_with(Vec::new)
                .push(NamedRef::new(pokemon.as_str(), monster.id));
        }
    }

    items
}

/// Replace `held_items` on every Pokémon the monster dump knows about.
///
/// Returns the dataset and how many entries were patched. Monsters without a
/// matching entry are ignored.
pub fn patch_held_items(
    mut pokemon: Dataset<PokemonEntry>,
    monsters: &[Monster],
    species: &SpeciesNames,
) -> (Dataset<PokemonEntry>, usize) {
    let mut patched = 0;
    for monster in monsters {
        let slug = species.normalize(&monster.name);
        let Some(entry) = pokemon.get_mut(&slug) else {
            log::debug!("{slug} is not in the Pokémon dataset, skipping held items");
            continue;
        };
        let held: Vec<HeldItemRef> = monster
            .held_items
            .iter()
            .map(|held| HeldItemRef {
                id: held.id,
                item_name: slugify(&held.name),
            })
            .collect();
        entry.set_held_items(&held);
        patched += 1;
    }
    (pokemon, patched)
}

impl<T: Transport> Pipeline<T> {
    pub(crate) fn run_items(&self) -> Result<RunReport, PipelineError> {
        let dump = self.dump();
        let languages = &self.config().items.languages;
        let strings = StringTables::load(&dump.strings_dir(), languages)?;
        let raw = dump.items()?;
        let total = raw.len();

        let mut items = Dataset::new();
        for (index, item) in raw.iter().enumerate() {
            self.emit(PipelineEvent::processing(index, total, &item.name));
            items.insert(slugify(&item.name), item_record(item, &strings, languages));
        }

        let written = self.write_dataset(DatasetKind::Items, &items, items.len())?;
        Ok(RunReport {
            step: Step::Items,
            outputs: vec![written],
            skipped: 0,
        })
    }

    pub(crate) fn run_held_items(&self) -> Result<RunReport, PipelineError> {
        let dump = self.dump();
        let monsters = dump.monsters()?;
        let dump_items = dump.items()?;
        let species = self.config().species_names();

        let pokemon_path = self.data_path(DatasetKind::Pokemon);
        let items_path = self.data_path(DatasetKind::Items);

        let mut patched = 0;
        self.emit(PipelineEvent::Writing {
            path: pokemon_path.clone(),
        });
        let pokemon = update_json(&pokemon_path, |pokemon: Dataset<PokemonEntry>| {
            let (pokemon, count) = patch_held_items(pokemon, &monsters, &species);
            patched = count;
            pokemon
        })?;
        log::debug!("Patched held items on {patched} of {} Pokémon", pokemon.len());

        self.emit(PipelineEvent::Writing {
            path: items_path.clone(),
        });
        let items = update_json(&items_path, |items: Dataset<ItemRecord>| {
            link_items(items, &monsters, &dump_items, &species)
        })?;

        Ok(RunReport {
            step: Step::HeldItems,
            outputs: vec![
                WrittenArtifact {
                    kind: DatasetKind::Pokemon,
                    path: pokemon_path,
                    records: patched,
                },
                WrittenArtifact {
                    kind: DatasetKind::Items,
                    path: items_path,
                    records: items.len(),
                },
            ],
            skipped: monsters.len().saturating_sub(patched),
        })
    }
}

#[cfg(test)]
#[path = "tests/items_tests.rs"]
mod tests;
