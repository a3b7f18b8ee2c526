//! Configuration management for the fraud demo helpers

use anyhow::{ensure, Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub api: ApiConfig,
    pub detection: DetectionConfig,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    pub logging: LoggingConfig,
}

/// Input dataset locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Credit-card transaction CSV
    pub creditcard_path: String,
    /// World cities CSV (city_ascii, country, lat, lng)
    pub cities_path: String,
    /// Name of the binary fraud label column in the transaction CSV
    #[serde(default = "default_label_column")]
    pub label_column: String,
}

fn default_label_column() -> String {
    "Class".to_string()
}

/// Scoring API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the scoring service
    pub url: String,
    /// Liveness probe timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    5000
}

/// Detection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Score above which a transaction is labelled fraudulent
    pub threshold: f64,
    /// Path of the baseline model served by the scoring API
    #[serde(default = "default_baseline_model")]
    pub baseline_model: String,
}

fn default_baseline_model() -> String {
    "save/lgb.model".to_string()
}

/// Train/test split configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SplitConfig {
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: crate::split::DEFAULT_TEST_FRACTION,
            seed: crate::split::DEFAULT_SPLIT_SEED,
        }
    }
}

/// Random wait bounds used to pace demo traffic
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    pub min_wait_secs: f64,
    pub max_wait_secs: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_wait_secs: 0.0,
            max_wait_secs: 2.0,
        }
    }
}

/// Demo driver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// Number of demo events to emit
    pub events: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { events: 10 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from the default file
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Load the default file if present, otherwise fall back to defaults
    pub fn load_or_default() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load()
        } else {
            Ok(Self::default())
        }
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.split.test_fraction > 0.0 && self.split.test_fraction < 1.0,
            "split.test_fraction must be in (0, 1), got {}",
            self.split.test_fraction
        );
        ensure!(
            (0.0..=1.0).contains(&self.detection.threshold),
            "detection.threshold must be in [0, 1], got {}",
            self.detection.threshold
        );
        ensure!(
            self.pacing.min_wait_secs >= 0.0
                && self.pacing.min_wait_secs <= self.pacing.max_wait_secs,
            "pacing bounds must satisfy 0 <= min <= max, got [{}, {}]",
            self.pacing.min_wait_secs,
            self.pacing.max_wait_secs
        );
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                creditcard_path: "data/creditcard.csv".to_string(),
                cities_path: "data/worldcities.csv".to_string(),
                label_column: default_label_column(),
            },
            api: ApiConfig {
                url: "http://localhost:5000".to_string(),
                timeout_ms: default_timeout_ms(),
            },
            detection: DetectionConfig {
                threshold: crate::threshold::DEFAULT_THRESHOLD,
                baseline_model: default_baseline_model(),
            },
            split: SplitConfig::default(),
            pacing: PacingConfig::default(),
            demo: DemoConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.url, "http://localhost:5000");
        assert_eq!(config.detection.threshold, 0.5);
        assert_eq!(config.detection.baseline_model, "save/lgb.model");
        assert_eq!(config.split.test_fraction, 0.2);
        assert_eq!(config.split.seed, 42);
        assert_eq!(config.data.label_column, "Class");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut config = AppConfig::default();
        config.split.test_fraction = 1.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.pacing.min_wait_secs = 3.0;
        config.pacing.max_wait_secs = 1.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.detection.threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(AppConfig::load_from_path("does/not/exist.toml").is_err());
    }
}
