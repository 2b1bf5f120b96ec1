//! Configuration system for RosterForge.
//!
//! Load roster configuration from TOML or YAML files to control the period
//! grid, the demand policy and the solve time limit without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use rosterforge_config::RosterConfig;
//! use std::time::Duration;
//!
//! let config = RosterConfig::from_toml_str(r#"
//!     [grid]
//!     weekdays = ["Mon", "Tue", "Wed", "Thu", "Fri"]
//!     day_start_hour = 8
//!     day_end_hour = 17
//!
//!     [demand]
//!     mode = "banded"
//!     tolerance = 1
//!
//!     [termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.period_grid().unwrap().period_count(), 45);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use rosterforge_config::RosterConfig;
//!
//! let config = RosterConfig::load_or_default("roster.toml")?;
//! // Proceeds with defaults if file doesn't exist
//! # Ok::<(), rosterforge_config::ConfigError>(())
//! ```

use std::path::Path;
use std::time::Duration;

use rosterforge_core::{DemandPolicy, PeriodGrid};
use serde::{Deserialize, Serialize};
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

impl From<ConfigError> for rosterforge_core::RosterError {
    fn from(err: ConfigError) -> Self {
        rosterforge_core::RosterError::Config(err.to_string())
    }
}

/// Main roster configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterConfig {
    /// Weekdays and daily hour window.
    #[serde(default)]
    pub grid: GridConfig,

    /// How demand values become headcount constraints.
    #[serde(default)]
    pub demand: DemandPolicy,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl RosterConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file, or defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the termination time limit.
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the grid.
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the demand policy.
    pub fn with_demand_policy(mut self, policy: DemandPolicy) -> Self {
        self.demand = policy;
        self
    }

    /// Returns the validated period grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the grid cannot describe a week.
    pub fn period_grid(&self) -> Result<PeriodGrid, ConfigError> {
        self.grid.to_period_grid()
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }
}

/// Weekday names and the daily hour window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GridConfig {
    pub weekdays: Vec<String>,
    pub day_start_hour: u32,
    pub day_end_hour: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        let grid = PeriodGrid::default();
        Self {
            weekdays: grid.weekdays().to_vec(),
            day_start_hour: grid.day_start_hour(),
            day_end_hour: grid.day_end_hour(),
        }
    }
}

impl GridConfig {
    pub fn to_period_grid(&self) -> Result<PeriodGrid, ConfigError> {
        PeriodGrid::new(
            self.weekdays.clone(),
            self.day_start_hour,
            self.day_end_hour,
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}
