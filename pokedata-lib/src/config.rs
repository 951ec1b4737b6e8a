//! Pipeline configuration (`pokedata.toml`).
//!
//! Every field has a default, so an empty or missing file reproduces the
//! stock behavior. Resolution order: an explicit `--config` path, then
//! `~/.config/pokedata/pokedata.toml`, then built-in defaults.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use pokedata_api::{DEFAULT_BASE_URL, RetryPolicy};
use pokedata_core::filter::DEFAULT_EXCLUDED_MOVE_TYPES;
use pokedata_core::{DatasetKind, GenerationRange, InclusionRules, SpeciesNames, SpriteNaming, VariantFilter};

use crate::error::PipelineError;

/// Languages pulled from the string dumps for item names and descriptions.
pub const DEFAULT_ITEM_LANGUAGES: &[&str] =
    &["en", "de", "es", "fr", "it", "ja", "ko", "pl", "pt-BR", "zh-Hant"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub paths: PathsConfig,
    pub api: ApiConfig,
    pub retry: RetryPolicy,
    #[serde(deserialize_with = "ability_rules")]
    pub abilities: InclusionRules,
    pub moves: MovesConfig,
    pub sprites: SpritesConfig,
    pub items: ItemsConfig,
    /// Extra dump-name → slug overrides on top of the built-in table.
    pub species_names: BTreeMap<String, String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            api: ApiConfig::default(),
            retry: RetryPolicy::default(),
            abilities: InclusionRules::abilities(),
            moves: MovesConfig::default(),
            sprites: SpritesConfig::default(),
            items: ItemsConfig::default(),
            species_names: BTreeMap::new(),
        }
    }
}

/// Fields missing from a partial `[abilities]` table keep the ability
/// defaults, not the empty ones.
fn ability_rules<'de, D: Deserializer<'de>>(deserializer: D) -> Result<InclusionRules, D::Error> {
    #[derive(Deserialize)]
    struct PartialRules {
        include: Option<BTreeSet<String>>,
        exclude: Option<BTreeSet<String>>,
        generations: Option<GenerationRange>,
    }

    let partial = PartialRules::deserialize(deserializer)?;
    let defaults = InclusionRules::abilities();
    Ok(InclusionRules {
        include: partial.include.unwrap_or(defaults.include),
        exclude: partial.exclude.unwrap_or(defaults.exclude),
        generations: partial.generations.unwrap_or(defaults.generations),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    pub dump_dir: PathBuf,
    pub patch_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            dump_dir: PathBuf::from("dump"),
            patch_file: PathBuf::from("patch_locations.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// `?limit=N` on the first listing request; the service default when unset.
    pub page_size: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: format!("pokedata/{}", env!("CARGO_PKG_VERSION")),
            page_size: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovesConfig {
    pub filter: InclusionRules,
    pub excluded_types: Vec<String>,
}

impl Default for MovesConfig {
    fn default() -> Self {
        Self {
            filter: InclusionRules::default(),
            excluded_types: DEFAULT_EXCLUDED_MOVE_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl MovesConfig {
    pub fn excludes_type(&self, move_type: &str) -> bool {
        self.excluded_types.iter().any(|t| t == move_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpritesConfig {
    pub generations: GenerationRange,
    pub excluded_markers: VariantFilter,
    pub naming: SpriteNaming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemsConfig {
    pub languages: Vec<String>,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            languages: DEFAULT_ITEM_LANGUAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`.
    Explicit(PathBuf),
    /// Found at the per-user location.
    User(PathBuf),
    /// No file; built-in defaults.
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::User(p) => write!(f, "{}", p.display()),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Per-user config file: `~/.config/pokedata/pokedata.toml`.
pub fn config_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("pokedata").join("pokedata.toml")
}

impl PipelineConfig {
    /// Resolve and load the configuration.
    ///
    /// An explicit path must exist; the per-user file is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, ConfigSource), PipelineError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(PipelineError::config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            let config = Self::load(path)?;
            return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
        }

        let user = config_path();
        if user.exists() {
            let config = Self::load(&user)?;
            return Ok((config, ConfigSource::User(user)));
        }

        Ok((Self::default(), ConfigSource::Defaults))
    }

    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents).map_err(|source| PipelineError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn to_toml(&self) -> Result<String, PipelineError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Species-name table with configured overrides applied.
    pub fn species_names(&self) -> SpeciesNames {
        let mut names = SpeciesNames::default();
        names.extend(self.species_names.clone());
        names
    }

    pub fn data_path(&self, kind: DatasetKind) -> PathBuf {
        self.paths.data_dir.join(kind.file_name())
    }
}
