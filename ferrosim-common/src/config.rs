use crate::params::ParameterSet;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Configuration for the simulation grid
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GridConfig {
    /// Side length of the square grid.
    #[serde(default = "default_grid_size")]
    pub size: usize,
    /// Fixed seed for the initial field. Omit for a fresh draw per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { size: default_grid_size(), seed: None }
    }
}

fn default_grid_size() -> usize {
    512
}

// Configuration for run length and recording cadence
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RunConfig {
    /// Number of generations the runner drives.
    pub generations: u32,
    /// Record a snapshot every this many generations.
    #[serde(default = "default_record_interval")]
    pub record_interval: u32,
}

fn default_record_interval() -> u32 {
    100
}

// Configuration for output settings
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_base_filename")]
    pub base_filename: String,
    /// Snapshot output format: "json", "bincode", "messagepack"
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default = "default_save_snapshots")]
    pub save_snapshots: bool,
    /// Embed the raw field in every snapshot (can be very large).
    #[serde(default)]
    pub save_field_in_snapshot: bool,
    /// Write the final field as CSV (one row per cell).
    #[serde(default)]
    pub save_final_field_csv: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_filename: default_base_filename(),
            format: None,
            save_snapshots: default_save_snapshots(),
            save_field_in_snapshot: false,
            save_final_field_csv: false,
        }
    }
}

fn default_base_filename() -> String {
    "ferrosim".to_string()
}

fn default_save_snapshots() -> bool {
    true
}

// Main simulation configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SimulationConfig {
    #[serde(default)]
    pub grid: GridConfig,
    pub run: RunConfig,
    #[serde(default)]
    pub params: ParameterSet,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Loads the simulation configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        let config: SimulationConfig = toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML from '{}': {}", path_ref.display(), e))?;

        config.validate()?;
        Ok(config)
    }

    /// Sanity checks on the structural knobs. Parameter values themselves are
    /// deliberately unchecked: out-of-range rates are the caller's business.
    pub fn validate(&self) -> Result<()> {
        if self.grid.size < 2 {
            anyhow::bail!("grid.size must be at least 2 (got {}).", self.grid.size);
        }
        if self.run.generations == 0 {
            anyhow::bail!("run.generations must be greater than 0.");
        }
        if self.run.record_interval == 0 {
            anyhow::bail!("run.record_interval must be greater than 0.");
        }
        if self.params.time_step <= 0.0 {
            anyhow::bail!("params.time_step must be positive (got {}).", self.params.time_step);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<SimulationConfig> {
        let config: SimulationConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = parse("[run]\ngenerations = 10\n").expect("minimal config loads");
        assert_eq!(config.grid.size, 512);
        assert_eq!(config.grid.seed, None);
        assert_eq!(config.run.record_interval, 100);
        assert_eq!(config.params, ParameterSet::default());
        assert!(config.output.save_snapshots);
        assert!(!config.output.save_field_in_snapshot);
    }

    #[test]
    fn params_section_overrides_field_by_field() {
        let config = parse(
            "[run]\ngenerations = 5\n\n[params]\nr_r = 0.7\nfe3_scale = 12.5\n",
        )
        .expect("partial params section loads");
        assert_eq!(config.params.r_r, 0.7);
        assert_eq!(config.params.fe3_scale, 12.5);
        assert_eq!(config.params.r_d, ParameterSet::default().r_d);
    }

    #[test]
    fn fixed_seed_round_trips() {
        let config = parse("[grid]\nsize = 64\nseed = 1234\n\n[run]\ngenerations = 1\n")
            .expect("seeded config loads");
        assert_eq!(config.grid.size, 64);
        assert_eq!(config.grid.seed, Some(1234));
    }

    #[test]
    fn degenerate_grid_is_rejected() {
        assert!(parse("[grid]\nsize = 1\n\n[run]\ngenerations = 1\n").is_err());
        assert!(parse("[run]\ngenerations = 0\n").is_err());
        assert!(parse("[run]\ngenerations = 1\nrecord_interval = 0\n").is_err());
        assert!(parse("[run]\ngenerations = 1\n\n[params]\ntime_step = 0.0\n").is_err());
    }

    #[test]
    fn config_serializes_back_to_toml() {
        let config = parse("[run]\ngenerations = 3\n").unwrap();
        let text = toml::to_string(&config).expect("config serializes");
        let reparsed: SimulationConfig = toml::from_str(&text).expect("round trip parses");
        assert_eq!(reparsed.run.generations, 3);
        assert_eq!(reparsed.params, config.params);
    }
}
