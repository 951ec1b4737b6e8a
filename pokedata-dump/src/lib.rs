//! Local inputs (game-data dumps, string tables) and JSON artifacts.

pub mod artifact;
pub mod error;
pub mod info;
pub mod strings;

pub use artifact::{load_json, load_optional_json, to_pretty_json, update_json, write_json};
pub use error::DumpError;
pub use info::{DumpDir, DumpItem, HeldItem, Monster, Skill, SkillIndex};
pub use strings::{StringTable, StringTables};
