//! Configuration management for beatstream

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use processor::config::ProcessorConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main beatstream configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeatstreamConfig {
    /// Operator and pipeline parameters
    pub processor: ProcessorConfig,

    /// Input recordings
    pub data: DataConfig,

    /// Observability settings
    pub observability: ObservabilityConfig,
}

impl BeatstreamConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new();

        // Load from file if provided
        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }

        // Override with environment variables (prefixed with BEATSTREAM_)
        figment = figment.merge(Env::prefixed("BEATSTREAM_").split("__"));

        figment.extract().map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.processor
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.observability.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationError("Log level must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Input recording configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Recording used for threshold calibration
    pub training_path: Option<PathBuf>,

    /// Recording to analyze
    pub input_path: Option<PathBuf>,
}

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,

    /// Enable structured JSON logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = BeatstreamConfig::default();
        assert_eq!(config.processor.detector.cooldown, 72);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = BeatstreamConfig::default();
        config.processor.curve_length.length_taps = 0;
        assert!(config.validate().is_err());

        config.processor.curve_length.length_taps = 41;
        config.observability.log_level = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_yaml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "beatstream.yaml",
                r#"
processor:
  detector:
    cooldown: 60
  heart_rate:
    sample_period_ms: 4.0
data:
  training_path: data/100-samples-200.csv
"#,
            )?;

            let config = BeatstreamConfig::load(Some(PathBuf::from("beatstream.yaml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.processor.detector.cooldown, 60);
            assert_eq!(config.processor.detector.search_window, 40);
            assert_eq!(config.processor.heart_rate.sample_period_ms, 4.0);
            assert_eq!(
                config.data.training_path,
                Some(PathBuf::from("data/100-samples-200.csv"))
            );
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("beatstream.yaml", "observability:\n  log_level: warn\n")?;
            jail.set_env("BEATSTREAM_OBSERVABILITY__LOG_LEVEL", "debug");
            jail.set_env("BEATSTREAM_PROCESSOR__CURVE_LENGTH__DC_OFFSET", "512");

            let config = BeatstreamConfig::load(Some(PathBuf::from("beatstream.yaml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.observability.log_level, "debug");
            assert_eq!(config.processor.curve_length.dc_offset, 512);
            Ok(())
        });
    }

    #[test]
    fn test_load_without_file() {
        Jail::expect_with(|_jail| {
            let config = BeatstreamConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, BeatstreamConfig::default());
            Ok(())
        });
    }
}
