//! Application configuration loaded from `config.toml`.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::workload::{AlgorithmRequest, WorkloadError, parse_algorithm_list};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "SCHEDULING_VISUALIZER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub const LAST_INSTANT_RANGE: std::ops::RangeInclusive<u32> = 10..=100;
pub const PROCESS_COUNT_RANGE: std::ops::RangeInclusive<usize> = 1..=10;

/// Settings for the scheduling engine and the initial workload form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AppConfig {
    /// Scheduling engine executable
    pub engine_path: String,
    /// Working directory the engine is started in
    pub working_dir: Option<String>,
    pub default_last_instant: u32,
    pub default_process_count: usize,
    pub default_quantum: u32,
    /// Initial selection in the engine's list syntax, e.g. `1,2-4`
    pub default_algorithms: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine_path: "lab4".to_string(),
            working_dir: None,
            default_last_instant: 20,
            default_process_count: 5,
            default_quantum: 4,
            default_algorithms: "1".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the configuration from the path named by `SCHEDULING_VISUALIZER_CONFIG`,
    /// falling back to `./config.toml`.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn from_env() -> anyhow::Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Parameters
    ///
    /// * `config_path` - Path to the config.toml file
    ///
    /// # Returns
    ///
    /// The parsed and range-checked configuration, or an error describing
    /// which step failed.
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        let config = Self::parse(&content).with_context(|| format!("Invalid config file: {}", config_path.display()))?;
        log::info!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.engine_path.trim().is_empty() {
            anyhow::bail!("engine-path must not be empty");
        }
        if !LAST_INSTANT_RANGE.contains(&self.default_last_instant) {
            anyhow::bail!(
                "default-last-instant {} is outside {}..={}",
                self.default_last_instant,
                LAST_INSTANT_RANGE.start(),
                LAST_INSTANT_RANGE.end()
            );
        }
        if !PROCESS_COUNT_RANGE.contains(&self.default_process_count) {
            anyhow::bail!(
                "default-process-count {} is outside {}..={}",
                self.default_process_count,
                PROCESS_COUNT_RANGE.start(),
                PROCESS_COUNT_RANGE.end()
            );
        }
        if self.default_quantum == 0 {
            anyhow::bail!("default-quantum must be positive");
        }
        self.initial_algorithms()?;
        Ok(())
    }

    /// The initial algorithm selection.
    pub fn initial_algorithms(&self) -> Result<Vec<AlgorithmRequest>, WorkloadError> {
        parse_algorithm_list(&self.default_algorithms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::AlgorithmId;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.engine_path, "lab4");
        assert_eq!(config.default_last_instant, 20);
        assert_eq!(config.default_process_count, 5);
        assert_eq!(config.default_quantum, 4);
    }

    #[test]
    fn test_kebab_case_keys() {
        let config = AppConfig::parse(
            "engine-path = \"./bin/scheduler\"\n\
             working-dir = \"/tmp\"\n\
             default-last-instant = 40\n\
             default-algorithms = \"1,2-3,5\"\n",
        )
        .unwrap();
        assert_eq!(config.engine_path, "./bin/scheduler");
        assert_eq!(config.working_dir.as_deref(), Some("/tmp"));
        assert_eq!(config.default_last_instant, 40);
        assert_eq!(config.default_process_count, 5);

        let algorithms = config.initial_algorithms().unwrap();
        assert_eq!(algorithms.len(), 3);
        assert_eq!(algorithms[1].id(), AlgorithmId::RoundRobin);
        assert_eq!(algorithms[1].quantum(), Some(3));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(AppConfig::parse("default-last-instant = 5").is_err());
        assert!(AppConfig::parse("default-process-count = 11").is_err());
        assert!(AppConfig::parse("default-quantum = 0").is_err());
        assert!(AppConfig::parse("engine-path = \"  \"").is_err());
        assert!(AppConfig::parse("default-algorithms = \"9\"").is_err());
        assert!(AppConfig::parse("engine-path = 3").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error_for_load() {
        let result = AppConfig::load(Path::new("/nonexistent/dir/config.toml"));
        assert!(result.is_err());
    }
}
