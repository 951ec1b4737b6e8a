//! Bulk game-data dumps under `info/`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pokedata_core::location::Encounter;
use serde::{Deserialize, Deserializer, Serialize};

use crate::artifact::load_json;
use crate::error::DumpError;

/// `{id, name}` held-item reference inside a monster record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldItem {
    pub id: u32,
    pub name: String,
}

/// One species from `monsters.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub locations: Vec<Encounter>,
    #[serde(default)]
    pub held_items: Vec<HeldItem>,
}

/// One item from `items.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DumpItem {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub icon_id: Option<u32>,
    #[serde(default, deserialize_with = "string_id")]
    pub name_string_id: Option<String>,
    #[serde(default, deserialize_with = "string_id")]
    pub desc_string_id: Option<String>,
}

/// Move stat overrides from `skills.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Skill {
    pub id: u32,
    #[serde(default)]
    pub base_power: Option<u32>,
    #[serde(default)]
    pub base_accuracy: Option<u32>,
    #[serde(default)]
    pub base_pp: Option<u32>,
}

/// Skills keyed by move id. A repeated id keeps the first record.
#[derive(Debug, Clone, Default)]
pub struct SkillIndex {
    by_id: BTreeMap<u32, Skill>,
}

impl SkillIndex {
    pub fn new(skills: impl IntoIterator<Item = Skill>) -> Self {
        let mut by_id = BTreeMap::new();
        for skill in skills {
            by_id.entry(skill.id).or_insert(skill);
        }
        Self { by_id }
    }

    pub fn get(&self, id: u32) -> Option<&Skill> {
        self.by_id.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// String ids appear as numbers or strings depending on the dump version.
fn string_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    }))
}

/// Layout of a dump directory.
#[derive(Debug, Clone)]
pub struct DumpDir {
    root: PathBuf,
}

impl DumpDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn monsters_path(&self) -> PathBuf {
        self.root.join("info").join("monsters.json")
    }

    pub fn items_path(&self) -> PathBuf {
        self.root.join("info").join("items.json")
    }

    pub fn skills_path(&self) -> PathBuf {
        self.root.join("info").join("skills.json")
    }

    pub fn strings_dir(&self) -> PathBuf {
        self.root.join("strings")
    }

    pub fn monsters(&self) -> Result<Vec<Monster>, DumpError> {
        load_json(&self.monsters_path())
    }

    pub fn items(&self) -> Result<Vec<DumpItem>, DumpError> {
        load_json(&self.items_path())
    }

    pub fn skills(&self) -> Result<SkillIndex, DumpError> {
        let skills: Vec<Skill> = load_json(&self.skills_path())?;
        Ok(SkillIndex::new(skills))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monster_defaults() {
        let monster: Monster = serde_json::from_str(r#"{"id": 1, "name": "Bulbasaur"}"#).unwrap();
        assert!(monster.locations.is_empty());
        assert!(monster.held_items.is_empty());
    }

    #[test]
    fn test_item_string_ids_accept_numbers_and_strings() {
        let item: DumpItem = serde_json::from_str(
            r#"{"id": 1, "name": "Master Ball", "desc": "Catches anything.", "icon_id": 1,
                "name_string_id": 5000, "desc_string_id": "5001"}"#,
        )
        .unwrap();
        assert_eq!(item.name_string_id.as_deref(), Some("5000"));
        assert_eq!(item.desc_string_id.as_deref(), Some("5001"));
    }

    #[test]
    fn test_skill_index_first_wins() {
        let index = SkillIndex::new([
            Skill { id: 33, base_power: Some(40), base_accuracy: Some(100), base_pp: Some(35) },
            Skill { id: 33, base_power: Some(50), base_accuracy: None, base_pp: None },
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(33).and_then(|s| s.base_power), Some(40));
        assert!(index.get(1).is_none());
    }

    #[test]
    fn test_dump_dir_layout() {
        let dump = DumpDir::new("dump");
        assert_eq!(dump.monsters_path(), Path::new("dump/info/monsters.json"));
        assert_eq!(dump.strings_dir(), Path::new("dump/strings"));
    }
}
