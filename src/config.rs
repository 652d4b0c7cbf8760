//! Configuration management for the prediction front-end

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Prefix of environment overrides, e.g. `TELCO_PREDICTOR__MODELS__MODELS_DIR`
pub const ENV_PREFIX: &str = "TELCO_PREDICTOR";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub models: ModelsConfig,
    pub logging: LoggingConfig,
}

/// Model artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory containing the model artifacts
    pub models_dir: String,
    /// Trained predictor (ONNX)
    #[serde(default = "default_model_file")]
    pub model_file: String,
    /// Optional fitted scaler (JSON)
    #[serde(default = "default_scaler_file")]
    pub scaler_file: String,
    /// Feature schema and training metrics (JSON)
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,
    /// Number of threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
    /// Model output holding the prediction; first output when unset
    #[serde(default)]
    pub output_name: Option<String>,
}

fn default_model_file() -> String {
    "best_regresor_model.onnx".to_string()
}

fn default_scaler_file() -> String {
    "scaler.json".to_string()
}

fn default_metadata_file() -> String {
    "best_regresor_info.json".to_string()
}

fn default_onnx_threads() -> usize {
    1
}

impl ModelsConfig {
    pub fn model_path(&self) -> PathBuf {
        Path::new(&self.models_dir).join(&self.model_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        Path::new(&self.models_dir).join(&self.scaler_file)
    }

    pub fn metadata_path(&self) -> PathBuf {
        Path::new(&self.models_dir).join(&self.metadata_file)
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
    /// Load configuration from the default file (if present) and environment
    pub fn load() -> Result<Self> {
        Self::build(Path::new(DEFAULT_CONFIG_PATH), false)
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(path.as_ref(), true)
    }

    fn build(path: &Path, required: bool) -> Result<Self> {
        let defaults = Self::default();

        let config = Config::builder()
            .set_default("models.models_dir", defaults.models.models_dir)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .add_source(File::from(path).required(required))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models: ModelsConfig {
                models_dir: "models".to_string(),
                model_file: default_model_file(),
                scaler_file: default_scaler_file(),
                metadata_file: default_metadata_file(),
                onnx_threads: default_onnx_threads(),
                output_name: None,
            },
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
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.models.models_dir, "models");
        assert_eq!(
            config.models.model_path(),
            PathBuf::from("models/best_regresor_model.onnx")
        );
        assert_eq!(config.models.scaler_path(), PathBuf::from("models/scaler.json"));
        assert_eq!(config.models.onnx_threads, 1);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[models]
models_dir = "artifacts"
model_file = "classifier.onnx"
output_name = "output_label"

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.models.model_path(), PathBuf::from("artifacts/classifier.onnx"));
        assert_eq!(config.models.metadata_file, "best_regresor_info.json");
        assert_eq!(config.models.output_name.as_deref(), Some("output_label"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        assert!(AppConfig::load_from_path("does/not/exist.toml").is_err());
    }
}
