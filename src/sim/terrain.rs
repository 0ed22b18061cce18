//! Static terrain grid and obstruction queries
//!
//! Cells are addressed as (column, row). Rows may be ragged; a missing cell
//! reads as empty. Anything outside the grid is extrapolated: the left, right
//! and top borders behave as wall, below the last row behaves as lava.

use serde::{Deserialize, Serialize};

use super::vector::Vector;

/// Static per-cell obstruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Wall,
    Lava,
}

impl Terrain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Wall => "wall",
            Terrain::Lava => "lava",
        }
    }

    /// Level-plan symbol for this terrain
    pub fn symbol(&self) -> char {
        match self {
            Terrain::Wall => 'x',
            Terrain::Lava => '!',
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terrain grid, row-major
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Option<Terrain>>>,
    width: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Option<Terrain>>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Longest row length
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row count
    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Option<Terrain>>] {
        &self.rows
    }

    /// Terrain at a cell; empty and undefined cells both read as `None`
    pub fn get(&self, col: usize, row: usize) -> Option<Terrain> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// First obstruction touched by the rectangle at `pos` with `size`.
    ///
    /// The rectangle is widened to whole cells (floor for the top-left corner,
    /// ceiling for the bottom-right). Border extrapolation wins over cell
    /// contents, and the wall borders are checked before the lava floor, so a
    /// rectangle that is both left of the grid and below it reports wall.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Terrain> {
        let start = pos.floor();
        let end = pos.plus(size).ceil();

        let left = start.x() as i64;
        let top = start.y() as i64;
        let right = end.x() as i64;
        let bottom = end.y() as i64;

        if left < 0 || right > self.width as i64 || top < 0 {
            return Some(Terrain::Wall);
        }
        if bottom > self.height() as i64 {
            return Some(Terrain::Lava);
        }

        for y in top..bottom {
            for x in left..right {
                if let Some(terrain) = self.get(x as usize, y as usize) {
                    return Some(terrain);
                }
            }
        }
        None
    }
}
