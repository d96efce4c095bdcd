//! Match detection
//!
//! A scan walks every line of the board (rows, then columns, then optionally
//! both diagonals) and records each maximal run of at least
//! `min_match_size` equal, non-empty, unmatched tiles as one [`Match`].
//!
//! Runs never overlap within one direction. Across directions they may: a
//! tile at the corner of an L shape belongs to both the horizontal and the
//! vertical record.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::scoring::match_score_multiplier_for;
use crate::types::{GridPos, TileColor, ZoneType, DEFAULT_MIN_MATCH_SIZE};
use crate::zone::zone_of;

/// Scan parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    pub min_match_size: usize,
    pub enable_diagonals: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            min_match_size: DEFAULT_MIN_MATCH_SIZE,
            enable_diagonals: false,
        }
    }
}

/// One detected run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    /// Member coordinates in scan order
    positions: Vec<GridPos>,
    color: TileColor,
    primary_zone: ZoneType,
    score_multiplier: f32,
}

impl Match {
    /// Build a match from run coordinates on a `width` x `height` grid
    pub fn new(positions: Vec<GridPos>, color: TileColor, width: usize, height: usize) -> Self {
        let primary_zone = primary_zone(&positions, width, height);
        let score_multiplier = match_score_multiplier_for(primary_zone, positions.len());
        Self {
            positions,
            color,
            primary_zone,
            score_multiplier,
        }
    }

    pub fn positions(&self) -> &[GridPos] {
        &self.positions
    }

    pub fn color(&self) -> TileColor {
        self.color
    }

    pub fn size(&self) -> usize {
        self.positions.len()
    }

    /// Zone holding the most member tiles
    pub fn primary_zone(&self) -> ZoneType {
        self.primary_zone
    }

    /// Zone multiplier x size multiplier
    pub fn score_multiplier(&self) -> f32 {
        self.score_multiplier
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.positions.contains(&pos)
    }
}

/// Zone with the most members; ties go Center, then Transition, then Edge
fn primary_zone(positions: &[GridPos], width: usize, height: usize) -> ZoneType {
    let mut counts = [0usize; 3];
    for &pos in positions {
        counts[zone_of(pos, width, height).index()] += 1;
    }
    let edge = counts[ZoneType::Edge.index()];
    let transition = counts[ZoneType::Transition.index()];
    let center = counts[ZoneType::Center.index()];

    if center >= transition && center >= edge {
        ZoneType::Center
    } else if transition >= edge {
        ZoneType::Transition
    } else {
        ZoneType::Edge
    }
}

/// Scan the whole board once without mutating it
///
/// Order: rows bottom to top (each left to right), columns left to right
/// (each bottom to top), then the rising and falling diagonals when enabled.
pub fn find_matches(board: &Board, rules: &MatchRules) -> Vec<Match> {
    let width = board.width() as i32;
    let height = board.height() as i32;
    let mut matches = Vec::new();

    for y in 0..height {
        scan_line(board, GridPos::new(0, y), (1, 0), rules, &mut matches);
    }
    for x in 0..width {
        scan_line(board, GridPos::new(x, 0), (0, 1), rules, &mut matches);
    }

    if rules.enable_diagonals {
        // Rising: starts along the bottom row, then up the left column.
        for x in 0..width {
            scan_line(board, GridPos::new(x, 0), (1, 1), rules, &mut matches);
        }
        for y in 1..height {
            scan_line(board, GridPos::new(0, y), (1, 1), rules, &mut matches);
        }
        // Falling: starts up the left column, then along the top row.
        for y in 0..height {
            scan_line(board, GridPos::new(0, y), (1, -1), rules, &mut matches);
        }
        for x in 1..width {
            scan_line(board, GridPos::new(x, height - 1), (1, -1), rules, &mut matches);
        }
    }

    matches
}

/// Walk one line from `start` and record each qualifying run
fn scan_line(
    board: &Board,
    start: GridPos,
    (dx, dy): (i32, i32),
    rules: &MatchRules,
    out: &mut Vec<Match>,
) {
    let mut run: Vec<GridPos> = Vec::new();
    let mut run_color: Option<TileColor> = None;
    let mut pos = start;

    while board.contains(pos) {
        let color = board
            .get(pos)
            .filter(|cell| !cell.is_matched())
            .and_then(|cell| cell.color());

        if color.is_some() && color == run_color {
            run.push(pos);
        } else {
            flush_run(board, &mut run, run_color, rules, out);
            run_color = color;
            if color.is_some() {
                run.push(pos);
            }
        }
        pos = pos.offset(dx, dy);
    }
    flush_run(board, &mut run, run_color, rules, out);
}

fn flush_run(
    board: &Board,
    run: &mut Vec<GridPos>,
    color: Option<TileColor>,
    rules: &MatchRules,
    out: &mut Vec<Match>,
) {
    if let Some(color) = color {
        if run.len() >= rules.min_match_size {
            out.push(Match::new(
                std::mem::take(run),
                color,
                board.width(),
                board.height(),
            ));
        }
    }
    run.clear();
}
