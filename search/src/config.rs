//! TOML-loadable search configuration.
//!
//! [`SearchConfig`] mirrors [`SearchParams`] with positions given by name.
//! It is resolved against a [`PositionTable`] into parameters:
//!
//! ```
//! use lodestar_kernel::carrier::position::PositionTable;
//! use lodestar_kernel::carrier::state_set::StateSet;
//! use lodestar_search::config::SearchConfig;
//! use lodestar_search::policy::TerminationCondition;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     destinations = ["Peak"]
//!     max_cost = 12.5
//!     termination = "any"
//!
//!     [[starts]]
//!     position = "Town"
//! "#).unwrap();
//!
//! let table = PositionTable::from_names(["Town", "Peak"]).unwrap();
//! let params = config.to_params(&table, &StateSet::indeterminate()).unwrap();
//! assert_eq!(params.termination, TerminationCondition::Any);
//! assert_eq!(params.destinations, vec![table.resolve("Peak").unwrap()]);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lodestar_kernel::carrier::position::PositionTable;
use lodestar_kernel::carrier::state_set::StateSet;
use lodestar_kernel::error::KernelError;

use crate::policy::{SearchParams, StartPosition, TerminationCondition};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("position lookup failed: {0}")]
    Position(#[from] KernelError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// One configured start.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct StartConfig {
    /// Position name.
    pub position: String,

    /// Initial path cost.
    #[serde(default)]
    pub cost: f64,

    /// Frontier-sharing group key.
    #[serde(default)]
    pub group: Option<String>,
}

/// Search configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default)]
    pub starts: Vec<StartConfig>,

    /// Destination position names.
    #[serde(default)]
    pub destinations: Vec<String>,

    /// Per-call time budget in milliseconds.
    #[serde(default)]
    pub max_time_ms: Option<u64>,

    #[serde(default)]
    pub max_cost: Option<f64>,

    #[serde(default)]
    pub max_depth: Option<u32>,

    #[serde(default)]
    pub termination: TerminationCondition,

    #[serde(default)]
    pub stateless: bool,

    #[serde(default)]
    pub continue_stateless: bool,

    #[serde(default)]
    pub disallow_backtracking: bool,
}

impl SearchConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed input or unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// The configured time limit.
    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.max_time_ms.map(Duration::from_millis)
    }

    /// Resolve position names through `table` and build parameters. Every
    /// start begins with `initial` as its state set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Position`] for an unknown position name, or
    /// [`ConfigError::Invalid`] if the result fails
    /// [`SearchParams::validate`].
    pub fn to_params(
        &self,
        table: &PositionTable,
        initial: &StateSet,
    ) -> Result<SearchParams, ConfigError> {
        let mut starts = Vec::with_capacity(self.starts.len());
        for start in &self.starts {
            let mut resolved =
                StartPosition::new(table.resolve(&start.position)?, initial.clone())
                    .with_cost(start.cost);
            resolved.group.clone_from(&start.group);
            starts.push(resolved);
        }
        let destinations = self
            .destinations
            .iter()
            .map(|name| table.resolve(name))
            .collect::<Result<Vec<_>, _>>()?;

        let params = SearchParams {
            starts,
            destinations,
            max_time: self.time_limit(),
            max_cost: self.max_cost.unwrap_or(f64::INFINITY),
            max_depth: self.max_depth.unwrap_or(u32::MAX),
            termination: self.termination,
            stateless: self.stateless,
            continue_stateless: self.continue_stateless,
            disallow_backtracking: self.disallow_backtracking,
        };
        params
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(params)
    }
}
