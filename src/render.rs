//! Plain-text frame rendering
//!
//! Read-only view of a level: terrain first, then actors drawn over it at
//! their floored top-left cell, then a status line.

use crate::sim::{Actor, ActorType, Level, LevelStatus, Terrain};

/// Character used for an actor
pub fn actor_symbol(actor: &Actor) -> char {
    use crate::sim::{ActorKind, FireballKind};

    match actor.kind {
        ActorKind::Plain => '#',
        ActorKind::Player => '@',
        ActorKind::Coin { .. } => 'o',
        ActorKind::Fireball(FireballKind::Horizontal | FireballKind::Basic) => '=',
        ActorKind::Fireball(FireballKind::Vertical) => '|',
        ActorKind::Fireball(FireballKind::Rain { .. }) => 'v',
    }
}

pub fn status_line(level: &Level) -> &'static str {
    match level.status() {
        None => "playing",
        Some(LevelStatus::Won) => "won",
        Some(LevelStatus::Lost) => "lost",
    }
}

/// Render one complete frame
pub fn render_frame(level: &Level) -> String {
    let width = level.width();
    let mut cells: Vec<Vec<char>> = (0..level.height())
        .map(|row| {
            (0..width)
                .map(|col| level.grid().get(col, row).map_or(' ', |t: Terrain| t.symbol()))
                .collect()
        })
        .collect();

    // Player last so it stays visible on top of whatever it touches
    let (players, others): (Vec<&Actor>, Vec<&Actor>) = level
        .actors()
        .iter()
        .partition(|a| a.actor_type() == ActorType::Player);
    for actor in others.into_iter().chain(players) {
        let col = actor.pos.x().floor();
        let row = actor.pos.y().floor();
        if col < 0.0 || row < 0.0 {
            continue;
        }
        if let Some(cell) = cells
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            *cell = actor_symbol(actor);
        }
    }

    let mut frame = String::with_capacity((width + 1) * (cells.len() + 1));
    for row in cells {
        frame.extend(row);
        frame.push('\n');
    }
    frame.push_str(status_line(level));
    frame.push('\n');
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LevelParser;

    #[test]
    fn test_render_matches_plan() {
        let rows = ["  o  ", " =   ", "xx!xx"];
        let level = LevelParser::default().parse_with_seed(&rows, 3);
        let frame = render_frame(&level);
        assert_eq!(frame, "  o  \n =   \nxx!xx\nplaying\n");
    }

    #[test]
    fn test_player_drawn_at_head_cell() {
        // Player spawns half a cell up, so its top-left lands in the row above
        let rows = ["   ", " @ ", "xxx"];
        let level = LevelParser::default().parse(&rows);
        let frame = render_frame(&level);
        assert_eq!(frame, " @ \n   \nxxx\nplaying\n");
    }

    #[test]
    fn test_ragged_rows_padded() {
        let level = LevelParser::default().parse(&["x", "xxx"]);
        assert_eq!(render_frame(&level), "x  \nxxx\nplaying\n");
    }

    #[test]
    fn test_status_line() {
        let rows = ["   ", " @ ", "!!!"];
        let mut level = LevelParser::default().parse(&rows);
        level.player_touched(Terrain::Lava.into(), None);
        assert!(render_frame(&level).ends_with("lost\n"));
    }
}
