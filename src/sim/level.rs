//! Level state: terrain, live actors, and the win/lose state machine
//!
//! Status starts unset and moves to `Won` or `Lost` exactly once; later
//! touches are ignored. Once set, the driver counts `finish_delay` down and
//! the level reports finished only after it goes negative, leaving one more
//! frame for the outcome to be shown.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorType};
use super::terrain::{Grid, Terrain};
use super::vector::Vector;
use crate::consts::FINISH_DELAY;

/// Terminal outcome of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelStatus {
    Won,
    Lost,
}

impl LevelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelStatus::Won => "won",
            LevelStatus::Lost => "lost",
        }
    }
}

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchKind {
    Terrain(Terrain),
    Actor(ActorType),
}

impl From<Terrain> for TouchKind {
    fn from(terrain: Terrain) -> Self {
        TouchKind::Terrain(terrain)
    }
}

impl From<ActorType> for TouchKind {
    fn from(actor_type: ActorType) -> Self {
        TouchKind::Actor(actor_type)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    grid: Grid,
    /// Live actors in parse order
    actors: Vec<Actor>,
    player: Option<ActorId>,
    status: Option<LevelStatus>,
    finish_delay: f64,
}

impl Level {
    /// Wrap a grid and actor list.
    ///
    /// At most one player lives in a level: the first player actor becomes
    /// `player` and any further player actors are removed from `actors`
    /// (logged as a warning) rather than left behind as unreferenced players.
    pub fn new(grid: Grid, actors: Vec<Actor>) -> Self {
        let mut player = None;
        let actors = actors
            .into_iter()
            .filter(|actor| {
                if actor.actor_type() != ActorType::Player {
                    return true;
                }
                if player.is_none() {
                    player = Some(actor.id());
                    true
                } else {
                    log::warn!("Dropping extra player {:?}", actor.id());
                    false
                }
            })
            .collect();

        Self {
            grid,
            actors,
            player,
            status: None,
            finish_delay: FINISH_DELAY,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Terrain and actors borrowed together, so actors can move against terrain
    pub(crate) fn terrain_and_actors_mut(&mut self) -> (&Grid, &mut [Actor]) {
        (&self.grid, &mut self.actors)
    }

    pub fn player_id(&self) -> Option<ActorId> {
        self.player
    }

    pub fn player(&self) -> Option<&Actor> {
        let id = self.player?;
        self.actors.iter().find(|a| a.id() == id)
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        let id = self.player?;
        self.actors.iter_mut().find(|a| a.id() == id)
    }

    pub fn status(&self) -> Option<LevelStatus> {
        self.status
    }

    pub fn finish_delay(&self) -> f64 {
        self.finish_delay
    }

    /// Outcome decided and the settle window has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// Count the settle window down; does nothing until an outcome is set
    pub fn advance_finish_delay(&mut self, amount: f64) {
        if self.status.is_some() {
            self.finish_delay -= amount;
        }
    }

    /// First other actor overlapping `actor`, in list order
    pub fn actor_at(&self, actor: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|other| other.is_intersect(actor))
    }

    /// Terrain obstructing a rectangle; see [`Grid::obstacle_at`]
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Terrain> {
        self.grid.obstacle_at(pos, size)
    }

    /// Remove an actor by identity, returning it if it was present
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|a| a.id() == id)?;
        Some(self.actors.remove(index))
    }

    /// True when no live actor has the given type
    pub fn no_more_actors(&self, actor_type: ActorType) -> bool {
        !self.actors.iter().any(|a| a.actor_type() == actor_type)
    }

    /// React to the player touching terrain or another actor.
    ///
    /// Lava and fireballs lose the level. A coin is collected and the level is
    /// won once the last one is gone. Everything else is ignored, as is any
    /// touch after the outcome is decided.
    pub fn player_touched(&mut self, kind: TouchKind, actor: Option<ActorId>) {
        if self.status.is_some() {
            return;
        }

        match kind {
            TouchKind::Terrain(Terrain::Lava) | TouchKind::Actor(ActorType::Fireball) => {
                self.finish(LevelStatus::Lost);
            }
            TouchKind::Actor(ActorType::Coin) => {
                if let Some(coin) = actor.and_then(|id| self.remove_actor(id)) {
                    log::debug!("Coin {:?} collected", coin.id());
                }
                if self.no_more_actors(ActorType::Coin) {
                    self.finish(LevelStatus::Won);
                }
            }
            _ => {}
        }
    }

    fn finish(&mut self, status: LevelStatus) {
        log::info!("Level {}", status.as_str());
        self.status = Some(status);
    }
}
