//! Lava Jump - A tile-based platformer simulation core
//!
//! Core modules:
//! - `sim`: Simulation (vectors, actors, terrain, level state machine, tick)
//! - `levels`: Level plan loading (JSON schema)
//! - `render`: Plain-text frame rendering
//! - `settings`: Data-driven movement tuning

pub mod error;
pub mod levels;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{SchemaError, SimError};
pub use settings::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest simulation substep (seconds)
    pub const MAX_STEP: f64 = 0.05;
    /// Longest frame the simulation will advance in one tick; longer frames
    /// (lag spikes) are clamped to prevent a spiral of death
    pub const MAX_FRAME_STEP: f64 = 0.1;
    /// Maximum substeps per tick
    pub const MAX_SUBSTEPS: usize = 64;
    /// Frame step used by the native runner (60 Hz)
    pub const FRAME_DT: f64 = 1.0 / 60.0;

    /// Settle window after win/lose before the level reports finished
    pub const FINISH_DELAY: f64 = 1.0;

    /// Player box, spawned half a cell up so the parsed cell marks the feet
    pub const PLAYER_SIZE: (f64, f64) = (0.8, 1.5);
    pub const PLAYER_SPAWN_OFFSET: (f64, f64) = (0.0, -0.5);

    /// Coin box, nudged toward the cell center
    pub const COIN_SIZE: (f64, f64) = (0.6, 0.6);
    pub const COIN_SPAWN_OFFSET: (f64, f64) = (0.2, 0.1);
    /// Coin bobbing: angular speed (rad/s) and amplitude (cells)
    pub const COIN_WOBBLE_SPEED: f64 = 8.0;
    pub const COIN_WOBBLE_DIST: f64 = 0.07;

    /// Hazards always occupy one full cell
    pub const FIREBALL_SIZE: (f64, f64) = (1.0, 1.0);
    pub const HORIZONTAL_FIREBALL_SPEED: (f64, f64) = (2.0, 0.0);
    pub const VERTICAL_FIREBALL_SPEED: (f64, f64) = (0.0, 2.0);
    pub const FIRE_RAIN_SPEED: (f64, f64) = (0.0, 3.0);

    /// Player movement defaults (cells per second, cells per second squared)
    pub const PLAYER_X_SPEED: f64 = 7.0;
    pub const GRAVITY: f64 = 30.0;
    pub const JUMP_SPEED: f64 = 17.0;
}
