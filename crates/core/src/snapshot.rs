//! Serializable engine view for renderers and save files

use serde::Serialize;

use crate::engine::MatchEngine;
use crate::scoring::ScoreState;
use crate::types::{SwipeDirection, TileColor};

/// Board contents plus score, captured at one instant
///
/// `rows[y][x]`, bottom row first. `None` marks an empty cell, which only
/// happens before the grid is initialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<Option<TileColor>>>,
    pub score: ScoreState,
    pub flow: SwipeDirection,
}

impl EngineSnapshot {
    pub fn capture(engine: &MatchEngine) -> Self {
        let board = engine.board();
        Self {
            width: board.width(),
            height: board.height(),
            rows: board.color_rows(),
            score: engine.score_state(),
            flow: engine.flow_direction(),
        }
    }

    /// One line per row, top row first, one letter per tile
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows.iter().rev() {
            for cell in row {
                let letter = cell
                    .and_then(|color| color.as_str().chars().next())
                    .map_or('.', |c| c.to_ascii_uppercase());
                out.push(letter);
            }
            out.push('\n');
        }
        out
    }
}
