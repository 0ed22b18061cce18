//! Level plan loading
//!
//! Plans are stored as JSON: an array of levels, each an array of row strings.

use std::path::Path;

use crate::error::SchemaError;

/// Rows of a single level
pub type LevelPlan = Vec<String>;

/// Small level used when no plan file is given
pub const DEMO_PLAN: &[&str] = &[
    "                      ",
    "                      ",
    "  |                   ",
    "     o        o    v  ",
    "  x    =    xxxxx     ",
    "  x  @    o    =  o   ",
    "  xxxxx!!!!xxxx  xxx  ",
    "      x!!!!x          ",
    "      xxxxxx          ",
];

pub fn demo_plan() -> LevelPlan {
    DEMO_PLAN.iter().map(|row| row.to_string()).collect()
}

/// Parse a JSON list of level plans
pub fn load_plans(json: &str) -> Result<Vec<LevelPlan>, SchemaError> {
    let plans: Vec<LevelPlan> = serde_json::from_str(json)?;
    if plans.is_empty() {
        return Err(SchemaError::NoLevels);
    }
    log::info!("Loaded {} level plan(s)", plans.len());
    Ok(plans)
}

pub fn load_plans_from_path(path: impl AsRef<Path>) -> Result<Vec<LevelPlan>, SchemaError> {
    let json = std::fs::read_to_string(path)?;
    load_plans(&json)
}

/// Pick one plan by index
pub fn select_plan(mut plans: Vec<LevelPlan>, index: usize) -> Result<LevelPlan, SchemaError> {
    let count = plans.len();
    if index >= count {
        return Err(SchemaError::LevelOutOfRange { index, count });
    }
    Ok(plans.swap_remove(index))
}
