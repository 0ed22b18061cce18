//! Level plan parsing
//!
//! A plan is a list of text rows. Each character is terrain (`x` wall, `!`
//! lava) or an actor symbol looked up in the parser's symbol table. Unknown
//! symbols are treated as empty space.

use std::collections::HashMap;
use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::level::Level;
use super::terrain::{Grid, Terrain};
use super::vector::Vector;
use crate::error::SimError;

/// Builds an actor for the cell at the given (column, row)
pub type ActorFactory = fn(Vector, &mut SpawnRng) -> Result<Actor, SimError>;

/// Seeded randomness for actor spawning
#[derive(Debug, Clone)]
pub struct SpawnRng(Pcg32);

impl SpawnRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Uniform angle in [0, 2π)
    pub fn phase(&mut self) -> f64 {
        self.0.random_range(0.0..TAU)
    }
}

/// The symbol table used by the shipped levels
pub fn standard_symbols() -> HashMap<char, ActorFactory> {
    let mut symbols: HashMap<char, ActorFactory> = HashMap::new();
    symbols.insert('@', |cell, _| Actor::player(cell));
    symbols.insert('o', |cell, rng| Actor::coin(cell, rng.phase()));
    symbols.insert('=', |cell, _| Actor::horizontal_fireball(cell));
    symbols.insert('|', |cell, _| Actor::vertical_fireball(cell));
    symbols.insert('v', |cell, _| Actor::fire_rain(cell));
    symbols
}

#[derive(Debug, Clone)]
pub struct LevelParser {
    symbols: HashMap<char, ActorFactory>,
}

impl Default for LevelParser {
    fn default() -> Self {
        Self {
            symbols: standard_symbols(),
        }
    }
}

impl LevelParser {
    /// Parser over a private copy of `symbols`
    pub fn new(symbols: &HashMap<char, ActorFactory>) -> Self {
        Self {
            symbols: symbols.clone(),
        }
    }

    pub fn actor_from_symbol(&self, symbol: char) -> Option<ActorFactory> {
        self.symbols.get(&symbol).copied()
    }

    pub fn obstacle_from_symbol(&self, symbol: char) -> Option<Terrain> {
        match symbol {
            'x' => Some(Terrain::Wall),
            '!' => Some(Terrain::Lava),
            _ => None,
        }
    }

    /// Terrain for every character, keeping ragged row lengths
    pub fn create_grid<S: AsRef<str>>(&self, rows: &[S]) -> Grid {
        Grid::new(
            rows.iter()
                .map(|row| {
                    row.as_ref()
                        .chars()
                        .map(|symbol| self.obstacle_from_symbol(symbol))
                        .collect()
                })
                .collect(),
        )
    }

    /// Actors in row-major order, with fresh spawn randomness
    pub fn create_actors<S: AsRef<str>>(&self, rows: &[S]) -> Vec<Actor> {
        self.create_actors_with(rows, &mut SpawnRng::from_entropy())
    }

    /// Actors in row-major order. Symbols without a factory, and factories that
    /// reject their input, are skipped.
    pub fn create_actors_with<S: AsRef<str>>(&self, rows: &[S], rng: &mut SpawnRng) -> Vec<Actor> {
        let mut actors = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                let Some(factory) = self.actor_from_symbol(symbol) else {
                    continue;
                };
                match factory(Vector::new(x as f64, y as f64), rng) {
                    Ok(actor) => actors.push(actor),
                    Err(e) => log::debug!("Skipping '{symbol}' at ({x}, {y}): {e}"),
                }
            }
        }
        actors
    }

    pub fn parse<S: AsRef<str>>(&self, rows: &[S]) -> Level {
        Level::new(self.create_grid(rows), self.create_actors(rows))
    }

    /// Reproducible parse: the same seed gives the same coin phases
    pub fn parse_with_seed<S: AsRef<str>>(&self, rows: &[S], seed: u64) -> Level {
        let mut rng = SpawnRng::from_seed(seed);
        Level::new(self.create_grid(rows), self.create_actors_with(rows, &mut rng))
    }
}
