//! The pipeline runner: one [`Step`] per output dataset (or group of
//! datasets), all sharing a client, a config and an optional event channel.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use serde::Serialize;
use serde::de::DeserializeOwned;

use pokedata_api::types::NamedResource;
use pokedata_api::{PokeApiClient, ReqwestTransport, ResourceKind, Transport};
use pokedata_core::DatasetKind;
use pokedata_dump::{DumpDir, load_json, write_json};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::progress::PipelineEvent;

/// A runnable unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Abilities,
    Moves,
    Natures,
    Sprites,
    Types,
    Items,
    HeldItems,
    GenderRates,
    Locations,
    LocationReports,
}

impl Step {
    pub fn all() -> &'static [Step] {
        &[
            Self::Abilities,
            Self::Moves,
            Self::Natures,
            Self::Sprites,
            Self::Types,
            Self::Items,
            Self::HeldItems,
            Self::GenderRates,
            Self::Locations,
            Self::LocationReports,
        ]
    }

    /// Name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Abilities => "abilities",
            Self::Moves => "moves",
            Self::Natures => "natures",
            Self::Sprites => "sprites",
            Self::Types => "types",
            Self::Items => "items",
            Self::HeldItems => "held-items",
            Self::GenderRates => "gender-rates",
            Self::Locations => "locations",
            Self::LocationReports => "location-reports",
        }
    }

    /// Whether the step talks to the catalog service.
    pub fn uses_network(&self) -> bool {
        matches!(
            self,
            Self::Abilities | Self::Moves | Self::Natures | Self::Sprites | Self::Types
        )
    }

    /// Datasets the step writes.
    pub fn outputs(&self) -> &'static [DatasetKind] {
        match self {
            Self::Abilities => &[DatasetKind::Abilities],
            Self::Moves => &[DatasetKind::Moves],
            Self::Natures => &[DatasetKind::Natures],
            Self::Sprites => &[DatasetKind::Sprites],
            Self::Types => &[DatasetKind::Types],
            Self::Items => &[DatasetKind::Items],
            Self::HeldItems => &[DatasetKind::Items, DatasetKind::Pokemon],
            Self::GenderRates => &[DatasetKind::GenderRates],
            Self::Locations => &[DatasetKind::Locations],
            Self::LocationReports => &[
                DatasetKind::LocationRarities,
                DatasetKind::LocationRegions,
                DatasetKind::LocationTypes,
            ],
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One file a step wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub kind: DatasetKind,
    pub path: PathBuf,
    /// Top-level keys in the written mapping.
    pub records: usize,
}

/// Outcome of a successful step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub step: Step,
    pub outputs: Vec<WrittenArtifact>,
    /// Entities left out by filters or missing details.
    pub skipped: usize,
}

/// Runs pipeline steps against a catalog transport and the local dump.
pub struct Pipeline<T> {
    config: PipelineConfig,
    client: PokeApiClient<T>,
    events: Option<Sender<PipelineEvent>>,
}

impl Pipeline<ReqwestTransport> {
    /// Pipeline backed by a real HTTP client built from `config.api`.
    pub fn connect(config: PipelineConfig) -> Result<Self, PipelineError> {
        let transport = ReqwestTransport::new(config.api.timeout(), &config.api.user_agent)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> Pipeline<T> {
    pub fn new(config: PipelineConfig, transport: T) -> Self {
        let client = PokeApiClient::new(transport, config.api.base_url.clone())
            .with_page_size(config.api.page_size)
            .with_retry(config.retry.clone());
        Self {
            config,
            client,
            events: None,
        }
    }

    pub fn with_events(mut self, events: Sender<PipelineEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn client(&self) -> &PokeApiClient<T> {
        &self.client
    }

    pub fn dump(&self) -> DumpDir {
        DumpDir::new(&self.config.paths.dump_dir)
    }

    /// Run one step to completion.
    pub fn run(&self, step: Step) -> Result<RunReport, PipelineError> {
        log::debug!("Running step {step}");
        self.emit(PipelineEvent::Started { step });
        let report = match step {
            Step::Abilities => self.run_abilities()?,
            Step::Moves => self.run_moves()?,
            Step::Natures => self.run_natures()?,
            Step::Sprites => self.run_sprites()?,
            Step::Types => self.run_types()?,
            Step::Items => self.run_items()?,
            Step::HeldItems => self.run_held_items()?,
            Step::GenderRates => self.run_gender_rates()?,
            Step::Locations => self.run_locations()?,
            Step::LocationReports => self.run_location_reports()?,
        };
        self.emit(PipelineEvent::Completed { step });
        Ok(report)
    }

    pub(crate) fn emit(&self, event: PipelineEvent) {
        if let Some(ref tx) = self.events {
            let _ = tx.send(event);
        }
    }

    pub(crate) fn skip(&self, name: &str, reason: impl Into<String>) {
        let reason = reason.into();
        log::debug!("Skipping {name}: {reason}");
        self.emit(PipelineEvent::skipped(name, reason));
    }

    /// Full listing for `kind`.
    pub(crate) fn list(&self, kind: ResourceKind) -> Result<Vec<NamedResource>, PipelineError> {
        self.emit(PipelineEvent::Listing {
            resource: kind.path().to_string(),
        });
        let entries = self.client.list_all(kind)?;
        log::debug!("Listed {} {kind} entries", entries.len());
        self.emit(PipelineEvent::Listed {
            total: entries.len(),
        });
        Ok(entries)
    }

    pub(crate) fn data_path(&self, kind: DatasetKind) -> PathBuf {
        self.config.data_path(kind)
    }

    pub(crate) fn read_dataset<D: DeserializeOwned>(&self, kind: DatasetKind) -> Result<D, PipelineError> {
        Ok(load_json(&self.data_path(kind))?)
    }

    pub(crate) fn write_dataset<D: Serialize>(
        &self,
        kind: DatasetKind,
        dataset: &D,
        records: usize,
    ) -> Result<WrittenArtifact, PipelineError> {
        let path = self.data_path(kind);
        self.emit(PipelineEvent::Writing { path: path.clone() });
        write_json(&path, dataset)?;
        log::debug!("Wrote {records} {kind} records to {}", path.display());
        Ok(WrittenArtifact {
            kind,
            path,
            records,
        })
    }
}
