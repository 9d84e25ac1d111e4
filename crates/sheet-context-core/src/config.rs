//! YAML configuration for the processor
//! Controls sampling sizes and the input size ceiling

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Processor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Rows sampled per sheet in the summary (default: 3)
    #[serde(default = "default_summary_sample_rows")]
    pub summary_sample_rows: usize,
    /// Rows emitted per sheet in the model context (default: 10)
    #[serde(default = "default_context_row_limit")]
    pub context_row_limit: usize,
    /// Largest accepted input (default: 50MB)
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

fn default_summary_sample_rows() -> usize {
    crate::summary::DEFAULT_SAMPLE_ROWS
}

fn default_context_row_limit() -> usize {
    crate::context::DEFAULT_ROW_LIMIT
}

fn default_max_input_bytes() -> usize {
    50 * 1024 * 1024 // 50MB
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            summary_sample_rows: default_summary_sample_rows(),
            context_row_limit: default_context_row_limit(),
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

impl ProcessorConfig {
    /// Parse a YAML config file from a path
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, is not valid YAML, or fails validation.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(content.as_str())?;
        tracing::debug!("Loaded processor config from {}", path.display());
        Ok(config)
    }

    /// Parse a YAML config from a string
    ///
    /// # Errors
    /// Returns an error when the YAML is malformed or fails validation.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: ProcessorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.context_row_limit == 0 {
            return Err(ConfigError::Validation("context_row_limit must be at least 1".into()));
        }
        if self.max_input_bytes == 0 {
            return Err(ConfigError::Validation("max_input_bytes must be at least 1".into()));
        }
        Ok(())
    }
}
