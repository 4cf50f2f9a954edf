// config.rs -- TOML configuration for the runtime knobs of the crate.
//
// Every section is optional in the file; missing sections and fields fall
// back to the Default impls, so an empty document is a valid config.
//
//   [parallel]
//   num_threads = 4
//
//   [ransac]
//   max_iterations = 500
//   threshold = 0.5
//   confidence = 0.99
//   seed = 42
//
//   [progress]
//   bar_size = 50
//   enabled = true
//
//   [logging]
//   level = "debug"

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::transform::ransac::RansacConfig;

/// Top-level configuration.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidopConfig {
    #[serde(default)]
    pub parallel: ParallelConfig,

    #[serde(default)]
    pub ransac: RansacConfig,

    #[serde(default)]
    pub progress: ProgressConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Thread pool sizing for `core::parallel`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// None means "use hardware concurrency".
    #[serde(default)]
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    pub fn threads(&self) -> usize {
        self.num_threads
            .unwrap_or_else(crate::core::parallel::optimal_number_of_threads)
            .max(1)
    }
}

/// Console progress indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_bar_size")]
    pub bar_size: usize,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        ProgressConfig {
            bar_size: default_bar_size(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { level: default_level() }
    }
}

fn default_bar_size() -> usize {
    50
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

impl TidopConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: TidopConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.parallel.num_threads == Some(0) {
            return Err(Error::invalid("parallel.num_threads must be at least 1"));
        }
        self.ransac.validate()?;
        if self.progress.bar_size == 0 {
            return Err(Error::invalid("progress.bar_size must be at least 1"));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" | "off" => Ok(()),
            other => Err(Error::invalid(format!("unknown log level '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = TidopConfig::from_toml_str("").unwrap();
        assert_eq!(config, TidopConfig::default());
        assert_eq!(config.progress.bar_size, 50);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let config = TidopConfig::from_toml_str(
            r#"
            [parallel]
            num_threads = 3

            [ransac]
            threshold = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.parallel.threads(), 3);
        assert!((config.ransac.threshold - 0.25).abs() < 1e-12);
        assert_eq!(config.ransac.max_iterations, RansacConfig::default().max_iterations);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(TidopConfig::from_toml_str("[ransac]\nconfidence = 1.5").is_err());
        assert!(TidopConfig::from_toml_str("[ransac]\nmax_iterations = 0").is_err());
        assert!(TidopConfig::from_toml_str("[progress]\nbar_size = 0").is_err());
        assert!(TidopConfig::from_toml_str("[parallel]\nnum_threads = 0").is_err());
        assert!(TidopConfig::from_toml_str("[logging]\nlevel = \"loud\"").is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = TidopConfig::from_toml_str("[ransac\nthreshold = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = TidopConfig::default();
        config.ransac.seed = 7;
        config.progress.enabled = false;
        let text = config.to_toml_string().unwrap();
        let back = TidopConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tidop.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        let config = TidopConfig::load(&path).unwrap();
        assert_eq!(config.logging.level, "debug");

        assert!(matches!(
            TidopConfig::load(dir.path().join("missing.toml")),
            Err(Error::Io(_))
        ));
    }
}
