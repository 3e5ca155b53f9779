//! Configuration system for SpecForge.
//!
//! Load evaluation settings from TOML or YAML to control trace mode,
//! memoization capacity and console output without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use specforge_config::{SpecConfig, TraceSetting};
//!
//! let config = SpecConfig::from_toml_str(r#"
//!     [trace]
//!     mode = "short_circuit"
//!
//!     [memo]
//!     capacity = 256
//!
//!     [console]
//!     filter = "specforge=debug"
//!     color = false
//! "#).unwrap();
//!
//! assert_eq!(config.trace.mode, TraceSetting::ShortCircuit);
//! assert_eq!(config.memo.capacity, 256);
//! assert!(!config.console.color);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use specforge_config::SpecConfig;
//!
//! let config = SpecConfig::load("specforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```


use std::path::Path;

use serde::{Deserialize, Serialize};
use specforge_core::{Memoized, Record, Specification, Trace, TraceMode};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main evaluation configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SpecConfig {
    /// Traced evaluation settings.
    #[serde(default)]
    pub trace: TraceConfig,

    /// Memoization settings.
    #[serde(default)]
    pub memo: MemoConfig,

    /// Console output settings.
    #[serde(default)]
    pub console: ConsoleConfig,
}

impl SpecConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the trace mode.
    pub fn with_trace_mode(mut self, mode: TraceSetting) -> Self {
        self.trace.mode = mode;
        self
    }

    /// Sets the memoization capacity.
    pub fn with_memo_capacity(mut self, capacity: usize) -> Self {
        self.memo.capacity = capacity;
        self
    }

    /// Sets the console log filter directive.
    pub fn with_console_filter(mut self, filter: impl Into<String>) -> Self {
        self.console.filter = Some(filter.into());
        self
    }

    /// Enables or disables colored console output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.console.color = color;
        self
    }

    /// Checks settings that deserialization cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero memo capacity or a blank
    /// console filter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memo.capacity == 0 {
            return Err(ConfigError::Invalid(
                "memo.capacity must be greater than 0".to_string(),
            ));
        }
        if self
            .console
            .filter
            .as_deref()
            .is_some_and(|f| f.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "console.filter must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured trace mode.
    pub fn trace_mode(&self) -> TraceMode {
        self.trace.mode.into()
    }

    /// Evaluates `entity` with a trace recorded in the configured mode.
    pub fn evaluate_with_trace<T: Record + 'static>(
        &self,
        spec: &Specification<T>,
        entity: &T,
    ) -> Result<(bool, Trace), specforge_core::EvalError> {
        spec.evaluate_with_trace_mode(entity, self.trace_mode())
    }

    /// Wraps `spec` in a memoizing wrapper with the configured capacity.
    pub fn memoize<T: 'static>(&self, spec: &Specification<T>) -> Memoized<T> {
        Memoized::with_capacity(spec.clone(), self.memo.capacity)
    }
}

/// How traced evaluation treats `AND`/`OR` operands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSetting {
    /// Both operands are always evaluated and recorded.
    #[default]
    Exhaustive,

    /// Operands that cannot change the result are skipped.
    ShortCircuit,
}

impl From<TraceSetting> for TraceMode {
    fn from(setting: TraceSetting) -> Self {
        match setting {
            TraceSetting::Exhaustive => TraceMode::Exhaustive,
            TraceSetting::ShortCircuit => TraceMode::ShortCircuit,
        }
    }
}

/// Traced evaluation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TraceConfig {
    #[serde(default)]
    pub mode: TraceSetting,
}

/// Memoization configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemoConfig {
    /// Maximum number of live entities cached per wrapper.
    #[serde(default = "default_memo_capacity")]
    pub capacity: usize,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            capacity: default_memo_capacity(),
        }
    }
}

fn default_memo_capacity() -> usize {
    Memoized::<()>::DEFAULT_CAPACITY
}

/// Console output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConsoleConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default)]
    pub filter: Option<String>,

    /// Whether rendered traces use ANSI colors.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            filter: None,
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}
