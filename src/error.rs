//! Error types
//!
//! `SimError` covers contract violations inside the simulation core. They are
//! programming errors and are surfaced to the caller, never recovered from.
//! `SchemaError` covers loading level plans and tuning files.

/// Simulation contract violation
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A vector component is NaN or infinite
    #[error("type mismatch: {field} must be a finite vector, got ({x}, {y})")]
    NonFiniteVector { field: &'static str, x: f64, y: f64 },

    /// Actor sizes must be strictly positive on both axes
    #[error("type mismatch: actor size must be positive, got ({x}, {y})")]
    NonPositiveSize { x: f64, y: f64 },
}

/// Level plan / tuning loading error
#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The plan file contained no levels
    #[error("level plan list is empty")]
    NoLevels,

    /// Requested level index is out of range
    #[error("level {index} requested but only {count} available")]
    LevelOutOfRange { index: usize, count: usize },
}
