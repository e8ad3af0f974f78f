//! Simulation settings
//!
//! Loaded from a JSON file when one is given, otherwise defaults. Missing
//! fields fall back to their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Real-time period between ticks (milliseconds)
    pub tick_period_ms: u64,
    /// Horizontal advance per tick
    pub delta_x: f64,
    /// Display density applied to trajectory heights
    pub unit_scale: f64,
    /// Bound on waiting for the scheduler thread to stop (milliseconds)
    pub teardown_timeout_ms: u64,

    // === Target ===
    pub target_width: f64,
    pub target_height: f64,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            delta_x: DEFAULT_DELTA_X,
            unit_scale: 1.0,
            teardown_timeout_ms: DEFAULT_TEARDOWN_TIMEOUT_MS,
            target_width: DEFAULT_TARGET_SIZE,
            target_height: DEFAULT_TARGET_SIZE,
        }
    }
}

impl SimSettings {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn teardown_timeout(&self) -> Duration {
        Duration::from_millis(self.teardown_timeout_ms)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
