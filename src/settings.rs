//! Movement tuning
//!
//! Loaded from an optional JSON file; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY, JUMP_SPEED, MAX_FRAME_STEP, MAX_STEP, PLAYER_X_SPEED};
use crate::error::SchemaError;

/// Player physics and stepping parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal run speed (cells/s)
    pub player_x_speed: f64,
    /// Downward acceleration (cells/s²)
    pub gravity: f64,
    /// Upward speed applied by a jump (cells/s)
    pub jump_speed: f64,
    /// Longest substep a frame is split into (s)
    pub max_step: f64,
    /// Longest frame advanced per tick; longer frames are clamped (s)
    pub max_frame_step: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_x_speed: PLAYER_X_SPEED,
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            max_step: MAX_STEP,
            max_frame_step: MAX_FRAME_STEP,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Substep length, falling back to the default for non-positive values
    pub fn effective_max_step(&self) -> f64 {
        if self.max_step > 0.0 {
            self.max_step
        } else {
            MAX_STEP
        }
    }

    /// Frame clamp, falling back to the default for non-positive or NaN values
    pub fn effective_max_frame_step(&self) -> f64 {
        if self.max_frame_step > 0.0 {
            self.max_frame_step
        } else {
            MAX_FRAME_STEP
        }
    }
}
