use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Hypothetical conditions to compare against the session averages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub temp_c: f64,
    pub humidity_pct: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub data_root: PathBuf,
    pub track: String,
    pub race: u32,
    /// Generate a race instead of reading CSV exports.
    pub synthetic: bool,
    pub generator: GeneratorConfig,
    pub speed_multiplier: f64,
    pub poll_interval_ms: u64,
    pub total_laps: u32,
    /// Driver to advise; the current leader when unset.
    pub driver_number: Option<u32>,
    pub target_position: u32,
    pub forecast: Option<ForecastConfig>,
    pub bridge_port: u16,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("."),
            track: "barber".to_string(),
            race: 1,
            synthetic: false,
            generator: GeneratorConfig::default(),
            speed_multiplier: 60.0,
            poll_interval_ms: 500,
            total_laps: 30,
            driver_number: None,
            target_position: 1,
            forecast: None,
            bridge_port: 9000,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(data_root: PathBuf, track: String, race: u32) -> Self {
        Self {
            data_root,
            track,
            race,
            ..Default::default()
        }
    }
}
