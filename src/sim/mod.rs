//! Simulation module
//!
//! All gameplay logic lives here:
//! - Stable iteration order (actor insertion order from parsing)
//! - Seeded spawn randomness only
//! - No rendering or platform dependencies

pub mod actor;
pub mod level;
pub mod parser;
pub mod terrain;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, ActorType, FireballKind};
pub use level::{Level, LevelStatus, TouchKind};
pub use parser::{ActorFactory, LevelParser, SpawnRng, standard_symbols};
pub use terrain::{Grid, Terrain};
pub use tick::{TickInput, tick};
pub use vector::Vector;
