// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

/// Pipeline description as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// stop_exit_code = 3
///
/// [unit.LocationExtraction]
/// cmd = "python -m modules.location_extraction"
///
/// [unit.SatelliteLoader]
/// cmd = "python -m modules.satellite_loader"
/// after = ["LocationExtraction"]
///
/// [unit.ClimateReport]
/// cmd = "python -m modules.climate_report"
/// after = ["SatelliteLoader"]
/// soft_after = ["WaterAnalysis"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawPipelineConfig {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All units from `[unit.<name>]`, keyed by unit name, in file order.
    #[serde(default)]
    pub unit: IndexMap<String, UnitConfig>,
}

/// A validated pipeline description.
///
/// Only obtainable through `TryFrom<RawPipelineConfig>` (see
/// [`validate`](super::validate)), so holders can assume every dependency
/// reference resolves and the graph is acyclic.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub config: ConfigSection,
    pub unit: IndexMap<String, UnitConfig>,
}

impl PipelineConfig {
    pub(crate) fn new_unchecked(config: ConfigSection, unit: IndexMap<String, UnitConfig>) -> Self {
        Self { config, unit }
    }

    /// Units with neither hard nor soft dependencies.
    pub fn root_units(&self) -> Vec<&str> {
        self.unit
            .iter()
            .filter(|(_, u)| u.after.is_empty() && u.soft_after.is_empty())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Exit code a unit command uses to request `StopDependencyChain`.
    #[serde(default = "default_stop_exit_code")]
    pub stop_exit_code: i32,

    /// Optional bound on how often one unit may be re-queued while waiting.
    #[serde(default)]
    pub max_requeues: Option<usize>,

    /// Working directory for unit commands; defaults to the current one.
    #[serde(default)]
    pub workdir: Option<PathBuf>,
}

fn default_stop_exit_code() -> i32 {
    3
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            stop_exit_code: default_stop_exit_code(),
            max_requeues: None,
            workdir: None,
        }
    }
}

/// `[unit.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitConfig {
    /// Shell command performing the unit's work.
    pub cmd: String,

    /// Hard dependencies: these must succeed before this unit runs.
    #[serde(default)]
    pub after: Vec<String>,

    /// Soft dependencies: these must have finished, successfully or not.
    #[serde(default)]
    pub soft_after: Vec<String>,

    /// Extra environment variables for the command.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Per-unit override of `[config].stop_exit_code`.
    #[serde(default)]
    pub stop_exit_code: Option<i32>,
}

impl UnitConfig {
    pub fn effective_stop_exit_code(&self, default: i32) -> i32 {
        self.stop_exit_code.unwrap_or(default)
    }
}
