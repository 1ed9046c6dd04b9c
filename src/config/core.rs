use serde::{Deserialize, Serialize};

use super::parallel::ParallelConfig;
use crate::io::output::OutputFormat;
use crate::steps::Measure;

pub const CONFIG_FILE_NAME: &str = ".dovmap.toml";

/// Root configuration structure for dovmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DovmapConfig {
    /// Parallel classification settings
    #[serde(default)]
    pub parallel: Option<ParallelConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Defaults for the step commands
    #[serde(default)]
    pub steps: Option<StepsConfig>,
}

impl DovmapConfig {
    pub fn parallel(&self) -> ParallelConfig {
        self.parallel.clone().unwrap_or_default()
    }

    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }

    pub fn steps(&self) -> StepsConfig {
        self.steps.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Format used when `--format` is not given
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StepsConfig {
    /// Minimum step growth reported by `compare-steps`
    #[serde(default)]
    pub threshold: u64,
    /// Counter read by `steps` when `--measure` is not given
    #[serde(default)]
    pub measure: Measure,
}
