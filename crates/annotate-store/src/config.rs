//! Store adapter configuration
//!
//! Loaded from TOML. Every section and field is optional:
//!
//! ```toml
//! [store]
//! unknown_operations = "reject"   # or "warn" (default)
//!
//! [events]
//! capacity = 128                  # broadcast buffer per receiver (default: 64)
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::definition::UnknownOperationPolicy;
use crate::error::StoreError;
use crate::events::{DEFAULT_CAPACITY, MAX_CAPACITY};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub events: EventsSection,
}

impl StoreConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// [`StoreError::Config`] if the file cannot be read or does not parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// [`StoreError::Config`] if the TOML is malformed or a value is out of range.
    pub fn from_str(s: &str) -> Result<Self, StoreError> {
        let config: Self = toml::from_str(s)
            .map_err(|e| StoreError::Config(format!("Failed to parse TOML configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.events.capacity == 0 || self.events.capacity > MAX_CAPACITY {
            return Err(StoreError::Config(format!(
                "events.capacity must be between 1 and {}, got {}",
                MAX_CAPACITY, self.events.capacity
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    /// Handling of definition entries that name no known operation
    #[serde(default)]
    pub unknown_operations: UnknownOperationPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsSection {
    /// How many events a broadcast receiver may fall behind (default: 64)
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for EventsSection {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}
