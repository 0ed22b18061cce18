//! Simulation tick
//!
//! Advances a level by one frame. The frame is clamped to
//! `Tuning::max_frame_step`, then split into equal substeps no longer than
//! `Tuning::max_step`; in each substep every non-player actor moves first,
//! then the player, then player touches are resolved, then the settle
//! countdown runs.

use super::actor::ActorType;
use super::level::{Level, LevelStatus};
use super::vector::Vector;
use crate::consts::MAX_SUBSTEPS;
use crate::settings::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump (only takes effect while standing on something)
    pub up: bool,
}

/// Advance the level by `step` seconds (NaN and non-positive steps do nothing)
pub fn tick(level: &mut Level, input: &TickInput, step: f64, tuning: &Tuning) {
    let Some((count, dt)) = substeps(step, tuning) else {
        return;
    };
    for _ in 0..count {
        substep(level, input, dt, tuning);
    }
}

/// Number and length of the substeps a frame of `step` seconds is split into
pub(crate) fn substeps(step: f64, tuning: &Tuning) -> Option<(usize, f64)> {
    if step.is_nan() || step <= 0.0 {
        return None;
    }
    let step = step.min(tuning.effective_max_frame_step());
    // Tolerance keeps 0.3 / 0.05 from rounding up to seven substeps
    let count = (step / tuning.effective_max_step() - 1e-9).ceil();
    let count = (count.max(1.0) as usize).min(MAX_SUBSTEPS);
    Some((count, step / count as f64))
}

fn substep(level: &mut Level, input: &TickInput, dt: f64, tuning: &Tuning) {
    let (terrain, actors) = level.terrain_and_actors_mut();
    for actor in actors.iter_mut() {
        if actor.actor_type() != ActorType::Player {
            actor.act(dt, terrain);
        }
    }

    update_player(level, input, dt, tuning);
    level.advance_finish_delay(dt);
}

fn update_player(level: &mut Level, input: &TickInput, dt: f64, tuning: &Tuning) {
    if level.status() == Some(LevelStatus::Lost) {
        sink_player(level, dt);
        return;
    }
    if level.player().is_none() {
        return;
    }

    move_x(level, input, dt, tuning);
    move_y(level, input, dt, tuning);

    let touched = level
        .player()
        .and_then(|player| level.actor_at(player))
        .map(|other| (other.actor_type(), other.id()));
    if let Some((actor_type, id)) = touched {
        level.player_touched(actor_type.into(), Some(id));
    }
}

fn move_x(level: &mut Level, input: &TickInput, dt: f64, tuning: &Tuning) {
    let Some(player) = level.player() else {
        return;
    };

    let mut speed_x = 0.0;
    if input.left {
        speed_x -= tuning.player_x_speed;
    }
    if input.right {
        speed_x += tuning.player_x_speed;
    }

    let new_pos = player.pos.plus(Vector::new(speed_x * dt, 0.0));
    let obstacle = level.obstacle_at(new_pos, player.size);
    if let Some(terrain) = obstacle {
        level.player_touched(terrain.into(), None);
    }

    let Some(player) = level.player_mut() else {
        return;
    };
    player.speed = Vector::new(speed_x, player.speed.y());
    if obstacle.is_none() {
        player.pos = new_pos;
    }
}

fn move_y(level: &mut Level, input: &TickInput, dt: f64, tuning: &Tuning) {
    let Some(player) = level.player() else {
        return;
    };

    let speed_y = player.speed.y() + dt * tuning.gravity;
    let new_pos = player.pos.plus(Vector::new(0.0, speed_y * dt));
    let obstacle = level.obstacle_at(new_pos, player.size);
    if let Some(terrain) = obstacle {
        level.player_touched(terrain.into(), None);
    }

    let Some(player) = level.player_mut() else {
        return;
    };
    let speed_y = match obstacle {
        None => {
            player.pos = new_pos;
            speed_y
        }
        // Landed (or bumped a ceiling): jump only while falling onto something
        Some(_) if input.up && speed_y > 0.0 => -tuning.jump_speed,
        Some(_) => 0.0,
    };
    player.speed = Vector::new(player.speed.x(), speed_y);
}

/// Losing animation: the player sinks and shrinks, ignoring input
fn sink_player(level: &mut Level, dt: f64) {
    let Some(player) = level.player_mut() else {
        return;
    };
    let shrunk = Vector::new(player.size().x(), player.size().y() - dt);
    if player.resize(shrunk).is_ok() {
        player.pos = player.pos.plus(Vector::new(0.0, dt));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::parser::LevelParser;

    const DT: f64 = 0.05;

    fn level(rows: &[&str]) -> Level {
        LevelParser::default().parse_with_seed(rows, 1)
    }

    fn run_until_finished(level: &mut Level, step: f64, tuning: &Tuning, max_frames: usize) -> usize {
        for frame in 0..max_frames {
            if level.is_finished() {
                return frame;
            }
            tick(level, &TickInput::default(), step, tuning);
        }
        max_frames
    }

    #[test]
    fn test_idle_player_rests_on_floor() {
        let mut level = level(&["     ", " @   ", "xxxxx"]);
        let start = level.player().unwrap().pos;
        for _ in 0..10 {
            tick(&mut level, &TickInput::default(), DT, &Tuning::default());
        }
        let player = level.player().unwrap();
        assert_eq!(player.pos, start);
        assert_eq!(player.speed, Vector::ZERO);
        assert_eq!(level.status(), None);
    }

    #[test]
    fn test_walk_right() {
        let mut level = level(&["     ", " @   ", "xxxxx"]);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut level, &input, DT, &Tuning::default());
        let player = level.player().unwrap();
        assert!((player.pos.x() - 1.35).abs() < 1e-9);
        assert_eq!(player.speed.x(), 7.0);
    }

    #[test]
    fn test_walls_block_walking() {
        let mut level = level(&["   ", "x@x", "xxx"]);
        let start = level.player().unwrap().pos;
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut level, &input, DT, &Tuning::default());
        }
        assert_eq!(level.player().unwrap().pos, start);
        assert_eq!(level.status(), None);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut level = level(&["     ", "     ", " @   ", "xxxxx"]);
        let input = TickInput {
            up: true,
            ..Default::default()
        };
        tick(&mut level, &input, DT, &Tuning::default());
        assert_eq!(level.player().unwrap().speed.y(), -17.0);

        // Next substep carries the player upward
        let before = level.player().unwrap().pos.y();
        tick(&mut level, &TickInput::default(), DT, &Tuning::default());
        assert!(level.player().unwrap().pos.y() < before);
    }

    #[test]
    fn test_standing_on_lava_loses() {
        let mut level = level(&["   ", " @ ", "!!!"]);
        tick(&mut level, &TickInput::default(), DT, &Tuning::default());
        assert_eq!(level.status(), Some(LevelStatus::Lost));
        assert!(!level.is_finished());
    }

    #[test]
    fn test_falling_off_the_bottom_loses() {
        let mut level = level(&["   ", " @ ", "   "]);
        let frames = run_until_finished(&mut level, DT, &Tuning::default(), 200);
        assert!(frames < 200);
        assert_eq!(level.status(), Some(LevelStatus::Lost));
    }

    #[test]
    fn test_collect_only_coin_wins() {
        let mut level = level(&["      ", " @o   ", "xxxxxx"]);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut level, &input, 2.0 * DT, &Tuning::default());
        assert_eq!(level.status(), Some(LevelStatus::Won));
        assert!(level.no_more_actors(ActorType::Coin));
    }

    #[test]
    fn test_bounced_fireball_hits_player() {
        let mut level = level(&["      ", "   @=x", "xxxxxx"]);
        tick(&mut level, &TickInput::default(), DT, &Tuning::default());
        // Bounced off the wall without moving
        let fireball = level
            .actors()
            .iter()
            .find(|a| a.actor_type() == ActorType::Fireball)
            .unwrap();
        assert_eq!(fireball.pos, Vector::new(4.0, 1.0));
        assert_eq!(fireball.speed, Vector::new(-2.0, 0.0));
        assert_eq!(level.status(), None);

        for _ in 0..4 {
            tick(&mut level, &TickInput::default(), DT, &Tuning::default());
        }
        assert_eq!(level.status(), Some(LevelStatus::Lost));
    }

    #[test]
    fn test_lost_player_sinks_and_ignores_input() {
        let mut level = level(&["   ", " @ ", "!!!"]);
        tick(&mut level, &TickInput::default(), DT, &Tuning::default());
        assert_eq!(level.status(), Some(LevelStatus::Lost));
        let before = level.player().unwrap().clone();

        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut level, &input, DT, &Tuning::default());
        let after = level.player().unwrap();
        assert_eq!(after.pos.x(), before.pos.x());
        assert!(after.pos.y() > before.pos.y());
        assert!(after.size.y() < before.size.y());
        assert!(after.size.y() > 0.0);
    }

    #[test]
    fn test_finish_delay_counts_substeps() {
        let mut level = level(&["   ", " @ ", "!!!"]);
        tick(&mut level, &TickInput::default(), DT, &Tuning::default());
        assert!((level.finish_delay() - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_finished_one_frame_after_countdown_crosses_zero() {
        // Quarter-second frames keep the countdown exact
        let tuning = Tuning {
            max_step: 0.25,
            max_frame_step: 0.25,
            ..Default::default()
        };
        let mut level = level(&["   ", " @ ", "!!!"]);
        tick(&mut level, &TickInput::default(), 0.25, &tuning);
        assert_eq!(level.status(), Some(LevelStatus::Lost));
        assert_eq!(level.finish_delay(), 0.75);

        // 0.5, 0.25, 0.0 are still settling; -0.25 is finished
        let frames = run_until_finished(&mut level, 0.25, &tuning, 100);
        assert_eq!(frames, 4);
        assert!(level.is_finished());
    }

    #[test]
    fn test_frame_split_into_substeps() {
        let mut split = level(&["    ", "  o ", "xxxx"]);
        let mut whole = split.clone();
        let tuning = Tuning::default();
        tick(&mut split, &TickInput::default(), 0.1, &tuning);
        for _ in 0..2 {
            tick(&mut whole, &TickInput::default(), DT, &tuning);
        }
        let y = |level: &Level| level.actors()[0].pos.y();
        assert!((y(&split) - y(&whole)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_step_is_noop() {
        let mut level = level(&["      ", "   @=x", "xxxxxx"]);
        let before = level.actors().to_vec();
        tick(&mut level, &TickInput::default(), 0.0, &Tuning::default());
        assert_eq!(level.actors(), before.as_slice());
    }

    #[test]
    fn test_level_without_player_still_moves_hazards() {
        let mut level = level(&["     ", " =   ", "xxxxx"]);
        tick(&mut level, &TickInput::default(), DT, &Tuning::default());
        assert!((level.actors()[0].pos.x() - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_substeps_are_equal_without_leftover() {
        let tuning = Tuning {
            max_frame_step: 1.0,
            ..Default::default()
        };
        let (count, dt) = substeps(0.3, &tuning).unwrap();
        assert_eq!(count, 6);
        assert!((dt - 0.05).abs() < 1e-12);

        let (count, dt) = substeps(0.12, &tuning).unwrap();
        assert_eq!(count, 3);
        assert!((dt - 0.04).abs() < 1e-12);

        assert_eq!(substeps(0.0, &tuning), None);
        assert_eq!(substeps(-1.0, &tuning), None);
        assert_eq!(substeps(f64::NAN, &tuning), None);
    }

    #[test]
    fn test_substep_count_is_bounded() {
        let tuning = Tuning {
            max_step: 1e-6,
            max_frame_step: 10.0,
            ..Default::default()
        };
        let (count, dt) = substeps(10.0, &tuning).unwrap();
        assert_eq!(count, MAX_SUBSTEPS);
        assert!((dt * count as f64 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_infinite_step_is_clamped() {
        let mut clamped = level(&["          ", " =        ", "xxxxxxxxxx"]);
        let mut reference = clamped.clone();
        tick(&mut clamped, &TickInput::default(), f64::INFINITY, &Tuning::default());
        tick(&mut reference, &TickInput::default(), 0.1, &Tuning::default());
        // Horizontal fireball at speed 2 covers 0.2 cells in the clamped 0.1s
        assert!((clamped.actors()[0].pos.x() - 1.2).abs() < 1e-9);
        assert_eq!(clamped.actors(), reference.actors());

        // Lag spikes are clamped the same way
        tick(&mut clamped, &TickInput::default(), 1e9, &Tuning::default());
        assert!((clamped.actors()[0].pos.x() - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_nan_step_is_ignored() {
        let mut level = level(&["          ", " =        ", "xxxxxxxxxx"]);
        let before = level.actors().to_vec();
        tick(&mut level, &TickInput::default(), f64::NAN, &Tuning::default());
        assert_eq!(level.actors(), before.as_slice());
    }
}
