//! Actors: every moving rectangle in a level
//!
//! One struct with a tagged `ActorKind`; per-kind behaviour is dispatched by
//! `Actor::act`. Hazards move with a fixed velocity and react to terrain,
//! coins bob in place, the player is moved by the tick driver.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Deserializer, Serialize};

use super::terrain::Grid;
use super::vector::Vector;
use crate::consts::*;
use crate::error::SimError;

static NEXT_ACTOR_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of an actor. Clones share it; fresh constructions never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ActorId(u32);

impl ActorId {
    fn next() -> Self {
        Self(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Loading an id moves the counter past it, so actors restored from a
/// snapshot never share identity with actors built afterwards.
impl<'de> Deserialize<'de> for ActorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u32::deserialize(deserializer)?;
        NEXT_ACTOR_ID.fetch_max(raw.saturating_add(1), Ordering::Relaxed);
        Ok(Self(raw))
    }
}

/// Read-only discriminator used for routing touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorType {
    Actor,
    Fireball,
    Coin,
    Player,
}

impl ActorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorType::Actor => "actor",
            ActorType::Fireball => "fireball",
            ActorType::Coin => "coin",
            ActorType::Player => "player",
        }
    }
}

impl std::fmt::Display for ActorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hazard flavours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FireballKind {
    /// Free fireball with caller-chosen velocity; bounces
    Basic,
    /// Patrols left/right; bounces
    Horizontal,
    /// Patrols up/down; bounces
    Vertical,
    /// Falls and respawns at its start position on impact
    Rain { start_pos: Vector },
}

/// Per-kind state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActorKind {
    /// Bare actor, does nothing on its own
    Plain,
    Player,
    Coin {
        start_pos: Vector,
        /// Wobble phase (radians)
        spring: f64,
    },
    Fireball(FireballKind),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    pub pos: Vector,
    /// Strictly positive; outside the crate change it through `resize`
    pub(crate) size: Vector,
    pub speed: Vector,
    pub kind: ActorKind,
}

impl Default for Actor {
    fn default() -> Self {
        Self::from_parts(Vector::ZERO, Vector::ONE, Vector::ZERO, ActorKind::Plain)
    }
}

impl Actor {
    /// Create a plain actor, validating all three vectors
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> Result<Self, SimError> {
        Self::with_kind(pos, size, speed, ActorKind::Plain)
    }

    /// Create an actor of any kind, validating all three vectors
    pub fn with_kind(
        pos: Vector,
        size: Vector,
        speed: Vector,
        kind: ActorKind,
    ) -> Result<Self, SimError> {
        pos.ensure_finite("pos")?;
        speed.ensure_finite("speed")?;
        let mut actor = Self::from_parts(pos, Vector::ONE, speed, kind);
        actor.resize(size)?;
        Ok(actor)
    }

    fn from_parts(pos: Vector, size: Vector, speed: Vector, kind: ActorKind) -> Self {
        Self {
            id: ActorId::next(),
            pos,
            size,
            speed,
            kind,
        }
    }

    /// Player standing on the given cell
    pub fn player(cell: Vector) -> Result<Self, SimError> {
        let pos = cell.plus(PLAYER_SPAWN_OFFSET.into());
        Self::with_kind(pos, PLAYER_SIZE.into(), Vector::ZERO, ActorKind::Player)
    }

    /// Coin centered in the given cell, starting at wobble phase `spring`
    pub fn coin(cell: Vector, spring: f64) -> Result<Self, SimError> {
        let start_pos = cell.plus(COIN_SPAWN_OFFSET.into());
        Self::with_kind(
            start_pos,
            COIN_SIZE.into(),
            Vector::ZERO,
            ActorKind::Coin { start_pos, spring },
        )
    }

    /// One-cell hazard with an arbitrary velocity
    pub fn fireball(pos: Vector, speed: Vector) -> Result<Self, SimError> {
        Self::with_kind(
            pos,
            FIREBALL_SIZE.into(),
            speed,
            ActorKind::Fireball(FireballKind::Basic),
        )
    }

    pub fn horizontal_fireball(pos: Vector) -> Result<Self, SimError> {
        Self::with_kind(
            pos,
            FIREBALL_SIZE.into(),
            HORIZONTAL_FIREBALL_SPEED.into(),
            ActorKind::Fireball(FireballKind::Horizontal),
        )
    }

    pub fn vertical_fireball(pos: Vector) -> Result<Self, SimError> {
        Self::with_kind(
            pos,
            FIREBALL_SIZE.into(),
            VERTICAL_FIREBALL_SPEED.into(),
            ActorKind::Fireball(FireballKind::Vertical),
        )
    }

    pub fn fire_rain(pos: Vector) -> Result<Self, SimError> {
        Self::with_kind(
            pos,
            FIREBALL_SIZE.into(),
            FIRE_RAIN_SPEED.into(),
            ActorKind::Fireball(FireballKind::Rain { start_pos: pos }),
        )
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.id
    }

    #[inline]
    pub fn size(&self) -> Vector {
        self.size
    }

    /// Change the bounding box, keeping it finite and strictly positive
    pub fn resize(&mut self, size: Vector) -> Result<(), SimError> {
        size.ensure_finite("size")?;
        if size.x() <= 0.0 || size.y() <= 0.0 {
            return Err(SimError::NonPositiveSize {
                x: size.x(),
                y: size.y(),
            });
        }
        self.size = size;
        Ok(())
    }

    pub fn actor_type(&self) -> ActorType {
        match self.kind {
            ActorKind::Plain => ActorType::Actor,
            ActorKind::Player => ActorType::Player,
            ActorKind::Coin { .. } => ActorType::Coin,
            ActorKind::Fireball(_) => ActorType::Fireball,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.pos.x()
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y()
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.pos.x() + self.size.x()
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y() + self.size.y()
    }

    /// Strict AABB overlap. Touching edges do not count, and an actor never
    /// intersects itself.
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if self.id == other.id {
            return false;
        }
        other.left() < self.right()
            && other.right() > self.left()
            && other.top() < self.bottom()
            && other.bottom() > self.top()
    }

    /// Where a hazard would be after `time`, without moving it
    pub fn next_position(&self, time: f64) -> Vector {
        self.pos.plus(self.speed.times(time))
    }

    /// Hazard reaction to terrain: rain respawns, everything else bounces
    pub fn handle_obstacle(&mut self) {
        match self.kind {
            ActorKind::Fireball(FireballKind::Rain { start_pos }) => {
                log::trace!("fire rain {:?} reset to {:?}", self.id, start_pos);
                self.pos = start_pos;
            }
            _ => {
                log::trace!("{} {:?} bounced", self.actor_type(), self.id);
                self.speed = -self.speed;
            }
        }
    }

    /// Advance by `time` seconds against `terrain`.
    ///
    /// The player is not self-driven; see `tick` for its movement.
    pub fn act(&mut self, time: f64, terrain: &Grid) {
        match self.kind {
            ActorKind::Plain | ActorKind::Player => {}
            ActorKind::Coin { start_pos, spring } => {
                let spring = spring + COIN_WOBBLE_SPEED * time;
                self.kind = ActorKind::Coin { start_pos, spring };
                self.pos = start_pos.plus(Vector::new(0.0, spring.sin() * COIN_WOBBLE_DIST));
            }
            ActorKind::Fireball(_) => {
                let next = self.next_position(time);
                if terrain.obstacle_at(next, self.size).is_some() {
                    self.handle_obstacle();
                } else {
                    self.pos = next;
                }
            }
        }
    }
}
