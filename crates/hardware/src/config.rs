//! Configuration system for the simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! pipeline. It provides:
//! 1. **Defaults:** Baseline structure sizes and latencies.
//! 2. **Structures:** Hierarchical config for general, pipeline and latency settings.
//! 3. **Validation:** Rejects zero-sized structures and zero latencies.
//!
//! Configuration is supplied as JSON (`Config::from_json`, the CLI's `--config`)
//! or built with `Config::default()`. Every field is optional in JSON.

use serde::{Deserialize, Serialize};

use crate::common::error::SimError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline machine when not explicitly overridden.
mod defaults {
    use crate::common::constants;

    /// Reorder buffer slots.
    pub const ROB_SIZE: usize = constants::ROB_SIZE;

    /// ALU/Branch reservation stations.
    pub const ALU_RS_SIZE: usize = constants::ALU_RS_SIZE;

    /// Multiply/Divide reservation stations.
    pub const MUL_DIV_RS_SIZE: usize = constants::MUL_DIV_RS_SIZE;

    /// Load-store buffer entries.
    pub const LSB_SIZE: usize = constants::LSB_SIZE;

    /// Return Address Stack depth.
    pub const RAS_SIZE: usize = constants::RAS_SIZE;

    /// ALU and branch latency in cycles.
    pub const ALU_LATENCY: u32 = constants::ALU_LATENCY;

    /// MUL latency in cycles.
    pub const MUL_LATENCY: u32 = constants::MUL_LATENCY;

    /// DIV latency in cycles.
    pub const DIV_LATENCY: u32 = constants::DIV_LATENCY;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use tomasim_core::config::Config;
///
/// let json = r#"{
///     "general": { "initial_sp": 4096, "max_cycles": 10000 },
///     "pipeline": { "rob_size": 16 },
///     "latency": { "div": 12 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.initial_sp, 4096);
/// assert_eq!(config.pipeline.rob_size, 16);
/// assert_eq!(config.pipeline.alu_rs_size, 6);
/// assert_eq!(config.latency.div, 12);
/// assert_eq!(config.latency.mul, 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Structure sizes
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Functional-unit latencies
    #[serde(default)]
    pub latency: LatencyConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for malformed JSON and
    /// [`SimError::InvalidConfig`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every structure has at least one slot and every latency is
    /// at least one cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SimError> {
        let sizes = [
            ("pipeline.rob_size", self.pipeline.rob_size),
            ("pipeline.alu_rs_size", self.pipeline.alu_rs_size),
            ("pipeline.mul_div_rs_size", self.pipeline.mul_div_rs_size),
            ("pipeline.lsb_size", self.pipeline.lsb_size),
            ("pipeline.ras_size", self.pipeline.ras_size),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| *v == 0) {
            return Err(SimError::InvalidConfig(format!("{name} must be at least 1")));
        }
        let latencies = [
            ("latency.alu", self.latency.alu),
            ("latency.mul", self.latency.mul),
            ("latency.div", self.latency.div),
        ];
        if let Some((name, _)) = latencies.iter().find(|(_, v)| *v == 0) {
            return Err(SimError::InvalidConfig(format!("{name} must be at least 1")));
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Value of RSP at power-on and after every load.
    #[serde(default)]
    pub initial_sp: i64,

    /// Raise a fatal condition after this many cycles. `None` runs until the
    /// program drains.
    #[serde(default)]
    pub max_cycles: Option<u64>,

    /// Record every committed instruction in the commit log.
    #[serde(default)]
    pub commit_log: bool,
}

/// Sizes of the pipeline structures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Reorder buffer slots
    #[serde(default = "PipelineConfig::default_rob_size")]
    pub rob_size: usize,

    /// ALU/Branch reservation stations
    #[serde(default = "PipelineConfig::default_alu_rs_size")]
    pub alu_rs_size: usize,

    /// Multiply/Divide reservation stations
    #[serde(default = "PipelineConfig::default_mul_div_rs_size")]
    pub mul_div_rs_size: usize,

    /// Load-store buffer entries
    #[serde(default = "PipelineConfig::default_lsb_size")]
    pub lsb_size: usize,

    /// Return Address Stack depth
    #[serde(default = "PipelineConfig::default_ras_size")]
    pub ras_size: usize,
}

impl PipelineConfig {
    fn default_rob_size() -> usize {
        defaults::ROB_SIZE
    }

    fn default_alu_rs_size() -> usize {
        defaults::ALU_RS_SIZE
    }

    fn default_mul_div_rs_size() -> usize {
        defaults::MUL_DIV_RS_SIZE
    }

    fn default_lsb_size() -> usize {
        defaults::LSB_SIZE
    }

    fn default_ras_size() -> usize {
        defaults::RAS_SIZE
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rob_size: defaults::ROB_SIZE,
            alu_rs_size: defaults::ALU_RS_SIZE,
            mul_div_rs_size: defaults::MUL_DIV_RS_SIZE,
            lsb_size: defaults::LSB_SIZE,
            ras_size: defaults::RAS_SIZE,
        }
    }
}

/// Functional-unit latencies, in cycles from operands-ready to result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LatencyConfig {
    /// ALU, compare, move and branch operations
    #[serde(default = "LatencyConfig::default_alu")]
    pub alu: u32,

    /// MUL
    #[serde(default = "LatencyConfig::default_mul")]
    pub mul: u32,

    /// DIV
    #[serde(default = "LatencyConfig::default_div")]
    pub div: u32,
}

impl LatencyConfig {
    fn default_alu() -> u32 {
        defaults::ALU_LATENCY
    }

    fn default_mul() -> u32 {
        defaults::MUL_LATENCY
    }

    fn default_div() -> u32 {
        defaults::DIV_LATENCY
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            alu: defaults::ALU_LATENCY,
            mul: defaults::MUL_LATENCY,
            div: defaults::DIV_LATENCY,
        }
    }
}
