//! Directional refill
//!
//! After matched tiles are removed, every line running along the flow axis
//! (columns for vertical flow, rows for horizontal flow) is compacted toward
//! the sink edge and the vacated cells at the source edge get new tiles.
//!
//! Lines are processed by increasing index. Within a line, new tiles are
//! placed from the cell nearest the sink out to the source edge, which is
//! also the order colors are drawn from the [`ColorSource`].

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::rng::ColorSource;
use crate::types::{Cell, FlowSource, GridPos, TileColor};

/// A surviving tile that slid toward the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMove {
    pub from: GridPos,
    pub to: GridPos,
}

/// A tile created at the source edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    pub pos: GridPos,
    pub color: TileColor,
}

/// What one refill did to the board
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RefillReport {
    pub moved: Vec<TileMove>,
    pub spawned: Vec<SpawnedTile>,
}

impl RefillReport {
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty() && self.spawned.is_empty()
    }
}

/// Coordinates of line `index`, ordered from the sink edge to the source edge
fn line(board: &Board, source: FlowSource, index: usize) -> Vec<GridPos> {
    let w = board.width() as i32;
    let h = board.height() as i32;
    let i = index as i32;
    match source {
        FlowSource::Top => (0..h).map(|y| GridPos::new(i, y)).collect(),
        FlowSource::Bottom => (0..h).rev().map(|y| GridPos::new(i, y)).collect(),
        FlowSource::Left => (0..w).rev().map(|x| GridPos::new(x, i)).collect(),
        FlowSource::Right => (0..w).map(|x| GridPos::new(x, i)).collect(),
    }
}

/// Compact every line away from `source` and fill the gaps with new tiles
///
/// A board without empty cells is left untouched.
pub fn refill(board: &mut Board, source: FlowSource, colors: &mut dyn ColorSource) -> RefillReport {
    let mut report = RefillReport::default();
    if board.empty_count() == 0 {
        return report;
    }

    let lines = if source.is_vertical() {
        board.width()
    } else {
        board.height()
    };

    for index in 0..lines {
        let cells = line(board, source, index);
        if !cells.iter().any(|&pos| matches!(board.get(pos), Some(Cell::Empty))) {
            continue;
        }

        let mut write = 0;
        for read in 0..cells.len() {
            let Some(cell) = board.get(cells[read]) else {
                continue;
            };
            if cell.is_empty() {
                continue;
            }
            if read != write {
                board.set(cells[write], cell);
                board.set(cells[read], Cell::Empty);
                report.moved.push(TileMove {
                    from: cells[read],
                    to: cells[write],
                });
            }
            write += 1;
        }

        for &pos in &cells[write..] {
            let color = colors.next_color();
            board.set(pos, Cell::tile(color));
            report.spawned.push(SpawnedTile { pos, color });
        }
    }

    report
}
