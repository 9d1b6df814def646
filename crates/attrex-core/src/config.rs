//! ATTREX Configuration Management
//!
//! Handles configuration from environment variables and TOML files,
//! with defaults that run the pipeline against local JSON Lines files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::VocabularyEntry;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Extraction vocabulary configuration
    pub extraction: ExtractionConfig,

    /// Dataset pipeline configuration
    pub pipeline: PipelineConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply every recognised variable found by `lookup`
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Pipeline
        if let Some(path) = lookup("ATTREX_INPUT") {
            self.pipeline.input = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("ATTREX_OUTPUT") {
            self.pipeline.output = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("ATTREX_PREVIOUS") {
            self.pipeline.previous = Some(PathBuf::from(path));
        }
        if let Some(column) = lookup("ATTREX_NAME_COLUMN") {
            if column.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "ATTREX_NAME_COLUMN".to_string(),
                    value: column,
                });
            }
            self.pipeline.name_column = column;
        }
        if let Some(parallel) = lookup("ATTREX_PARALLEL") {
            self.pipeline.parallel = parse_bool("ATTREX_PARALLEL", &parallel)?;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("LOG_JSON") {
            self.logging.json_format = parse_bool("LOG_JSON", &json)?;
        }

        Ok(self)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Entries appended after the built-in vocabulary
    pub extra_vocabulary: Vec<VocabularyEntry>,
}

/// Dataset pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// JSON Lines file with the input records
    pub input: Option<PathBuf>,

    /// JSON Lines file new entries are appended to
    pub output: Option<PathBuf>,

    /// Previous results to diff against (defaults to `output`)
    pub previous: Option<PathBuf>,

    /// Column holding the product name
    pub name_column: String,

    /// Extract on the rayon thread pool
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            previous: None,
            name_column: "name".to_string(),
            parallel: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
