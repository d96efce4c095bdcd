//! Match engine - the swap / match / cascade state machine
//!
//! [`MatchEngine`] owns the grid, the running score and the color source.
//! Each public operation runs to completion before returning; there is no
//! background work and no reentrancy. Collaborators learn what happened
//! from the returned values and from the event queue.

use serde::Serialize;

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::events::EngineEvent;
use crate::matcher::{find_matches, Match};
use crate::refill::{refill, RefillReport};
use crate::rng::{ColorSource, RandomColors};
use crate::scoring::{apply_match, ScoreState};
use crate::snapshot::EngineSnapshot;
use crate::types::{Cell, GridPos, SwipeDirection, TileColor, ZoneType, MAX_CASCADE_PASSES};
use crate::zone::zone_of;

/// Everything one resolve produced
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Resolution {
    /// Every match found across all passes, in detection order
    pub matches: Vec<Match>,
    /// Number of passes that removed tiles
    pub cascades: u32,
    pub score_delta: u32,
}

/// Result of a valid swap request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SwapOutcome {
    /// Nothing matched; the swap was undone
    NoMatch,
    Resolved(Resolution),
}

impl SwapOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, SwapOutcome::Resolved(_))
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            SwapOutcome::NoMatch => None,
            SwapOutcome::Resolved(resolution) => Some(resolution),
        }
    }
}

/// The match-3 engine
#[derive(Debug)]
pub struct MatchEngine {
    config: EngineConfig,
    board: Board,
    score: ScoreState,
    colors: Box<dyn ColorSource>,
    /// Swipe that drives refills for the current turn.
    flow: SwipeDirection,
    /// Pending events (consumed by collaborators).
    events: Vec<EngineEvent>,
}

impl MatchEngine {
    /// Create an engine with an empty grid and an entropy-seeded color source
    ///
    /// [`MatchEngine::initialize_grid`] reseeds the source, so a seeded
    /// game is still reproducible.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_color_source(config, Box::new(RandomColors::from_entropy()))
    }

    /// Create an engine drawing new tiles from `colors`
    pub fn with_color_source(
        config: EngineConfig,
        colors: Box<dyn ColorSource>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.width, config.height),
            config,
            score: ScoreState::new(),
            colors,
            flow: SwipeDirection::None,
            events: Vec::new(),
        })
    }

    /// Apply a new configuration
    ///
    /// Invalid values are rejected without touching the engine. A change of
    /// dimensions empties the grid; call [`MatchEngine::initialize_grid`]
    /// afterwards.
    pub fn configure(&mut self, config: EngineConfig) -> Result<(), EngineError> {
        if let Err(err) = config.validate() {
            log::warn!("rejected engine configuration: {}", err);
            return Err(err.into());
        }
        if config.width != self.board.width() || config.height != self.board.height() {
            self.board.resize(config.width, config.height);
        }
        self.config = config;
        log::info!(
            "engine configured: {}x{}, min match {}, diagonals {}",
            config.width,
            config.height,
            config.min_match_size,
            config.enable_diagonals
        );
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the color source used for new tiles
    pub fn set_color_source(&mut self, colors: Box<dyn ColorSource>) {
        self.colors = colors;
    }

    /// Fill the grid with random tiles that form no match
    ///
    /// With `Some(seed)` the board is fully determined by the seed and the
    /// color source; with `None` the seed comes from OS entropy.
    pub fn initialize_grid(&mut self, seed: Option<u32>) {
        let seed = seed.unwrap_or_else(rand::random);
        self.colors.reseed(seed);
        self.board.clear();
        self.flow = SwipeDirection::None;

        let positions: Vec<GridPos> = self.board.positions().collect();
        for pos in positions {
            let drawn = self.colors.next_color();
            let color = (0..TileColor::ALL.len())
                .map(|offset| TileColor::from_index(drawn.index() + offset))
                .find(|&candidate| !self.completes_run(pos, candidate))
                .unwrap_or(drawn);
            self.board.set(pos, Cell::tile(color));
        }

        log::info!(
            "grid initialized: {}x{} (seed {})",
            self.board.width(),
            self.board.height(),
            seed
        );
    }

    /// Would placing `color` at `pos` finish a run with already-filled cells?
    ///
    /// Filling goes row-major from the bottom-left, so only the cells to the
    /// left, below, and (with diagonals) below-left / below-right are set.
    fn completes_run(&self, pos: GridPos, color: TileColor) -> bool {
        let needed = self.config.min_match_size - 1;
        let mut directions = vec![(-1, 0), (0, -1)];
        if self.config.enable_diagonals {
            directions.push((-1, -1));
            directions.push((1, -1));
        }
        directions.into_iter().any(|(dx, dy)| {
            (1..=needed as i32)
                .all(|k| self.board.color_at(pos.offset(dx * k, dy * k)) == Some(color))
        })
    }

    fn check_position(&self, pos: GridPos) -> Result<(), EngineError> {
        if self.board.contains(pos) {
            Ok(())
        } else {
            Err(EngineError::InvalidPosition(pos))
        }
    }

    /// Swap two neighbouring tiles, refilling in the direction of the selection
    pub fn try_swap(&mut self, a: GridPos, b: GridPos) -> Result<SwapOutcome, EngineError> {
        self.try_swap_toward(a, b, SwipeDirection::between(a, b))
    }

    /// Swap two neighbouring tiles with an explicit refill direction
    ///
    /// Validation happens before any mutation. If the swap produces no match
    /// the tiles are put back, the combo resets and [`SwapOutcome::NoMatch`]
    /// is returned.
    pub fn try_swap_toward(
        &mut self,
        a: GridPos,
        b: GridPos,
        direction: SwipeDirection,
    ) -> Result<SwapOutcome, EngineError> {
        self.check_position(a)?;
        self.check_position(b)?;
        if a.manhattan(b) != 1 {
            return Err(EngineError::NotAdjacent { a, b });
        }

        let previous_flow = self.flow;
        self.flow = direction;
        self.board.swap(a, b);
        self.events.push(EngineEvent::Swapped { a, b });

        let resolution = self.scan_and_resolve();
        if !resolution.matches.is_empty() {
            return Ok(SwapOutcome::Resolved(resolution));
        }

        self.board.swap(a, b);
        self.flow = previous_flow;
        self.events.push(EngineEvent::SwapReverted { a, b });
        if self.score.combo != 0 {
            self.score.combo = 0;
            self.events.push(EngineEvent::ComboChanged { combo: 0 });
        }
        log::debug!("swap {} <-> {} reverted: no match", a, b);
        Ok(SwapOutcome::NoMatch)
    }

    /// Resolve matches until the board is stable
    ///
    /// Each pass scans, flags, scores, removes and refills. A stable board is
    /// left untouched, so calling this twice in a row yields nothing the
    /// second time.
    pub fn scan_and_resolve(&mut self) -> Resolution {
        let rules = self.config.match_rules();
        let score_rules = self.config.score_rules();
        let mut resolution = Resolution::default();

        loop {
            let found = find_matches(&self.board, &rules);
            if found.is_empty() {
                break;
            }
            if resolution.cascades >= MAX_CASCADE_PASSES {
                log::warn!(
                    "cascade stopped after {} passes with {} matches pending",
                    resolution.cascades,
                    found.len()
                );
                break;
            }

            resolution.cascades += 1;
            self.events.push(EngineEvent::CascadeStep {
                pass: resolution.cascades,
            });

            for m in &found {
                for &pos in m.positions() {
                    self.board.mark_matched(pos);
                }
            }

            for m in &found {
                let (next, result) = apply_match(&self.score, m, score_rules);
                self.score = next;
                resolution.score_delta = resolution.score_delta.saturating_add(result.total);

                log::debug!(
                    "match: {} {} tiles in {} zone, +{} (combo {})",
                    m.size(),
                    m.color().as_str(),
                    m.primary_zone().as_str(),
                    result.total,
                    next.combo
                );

                self.events.push(EngineEvent::MatchFound(m.clone()));
                self.events.push(EngineEvent::ScoreChanged { total: next.score });
                self.events.push(EngineEvent::ComboChanged { combo: next.combo });
                if result.new_high_score {
                    self.events.push(EngineEvent::HighScoreBeaten { score: next.high_score });
                }
            }

            let removed = self.board.take_matched();
            self.events.push(EngineEvent::TilesRemoved { positions: removed });
            self.refill_after_removal(self.flow);

            resolution.matches.extend(found);
        }

        if resolution.cascades > 0 {
            log::debug!(
                "resolved {} matches over {} passes, +{}",
                resolution.matches.len(),
                resolution.cascades,
                resolution.score_delta
            );
        }
        resolution
    }

    /// Compact and refill every line along the flow axis of `direction`
    ///
    /// A no-op when nothing is empty.
    pub fn refill_after_removal(&mut self, direction: SwipeDirection) -> RefillReport {
        let report = refill(&mut self.board, direction.flow_source(), self.colors.as_mut());
        if !report.moved.is_empty() {
            self.events.push(EngineEvent::TilesMoved {
                moves: report.moved.clone(),
            });
        }
        if !report.spawned.is_empty() {
            self.events.push(EngineEvent::TilesSpawned {
                tiles: report.spawned.clone(),
            });
        }
        report
    }

    /// One scan pass without removal or refill
    pub fn find_all_matches(&self) -> Vec<Match> {
        find_matches(&self.board, &self.config.match_rules())
    }

    pub fn get_cell(&self, pos: GridPos) -> Result<Cell, EngineError> {
        self.board.get(pos).ok_or(EngineError::InvalidPosition(pos))
    }

    pub fn get_zone(&self, pos: GridPos) -> Result<ZoneType, EngineError> {
        self.check_position(pos)?;
        Ok(zone_of(pos, self.board.width(), self.board.height()))
    }

    /// Place a tile directly (puzzle authoring, tutorials)
    pub fn set_color(&mut self, pos: GridPos, color: TileColor) -> Result<(), EngineError> {
        self.check_position(pos)?;
        self.board.set(pos, Cell::tile(color));
        Ok(())
    }

    /// Paint rows of colors, `rows[y][x]`, starting at the bottom row
    ///
    /// Every coordinate is checked before anything is written. Cells not
    /// covered by `rows` keep their tiles.
    pub fn load_rows(&mut self, rows: &[Vec<TileColor>]) -> Result<(), EngineError> {
        for (y, row) in rows.iter().enumerate() {
            if !row.is_empty() {
                self.check_position(GridPos::new(row.len() as i32 - 1, y as i32))?;
            }
        }
        for (y, row) in rows.iter().enumerate() {
            for (x, &color) in row.iter().enumerate() {
                self.board.set(GridPos::new(x as i32, y as i32), Cell::tile(color));
            }
        }
        Ok(())
    }

    pub fn score_state(&self) -> ScoreState {
        self.score
    }

    /// Clear score, combo and statistics; the high score survives
    pub fn reset_score(&mut self) {
        self.score.reset();
        self.events.push(EngineEvent::ScoreChanged { total: 0 });
        self.events.push(EngineEvent::ComboChanged { combo: 0 });
    }

    /// Seed the session high score (e.g. from a persisted value)
    pub fn restore_high_score(&mut self, high_score: u32) {
        self.score.high_score = self.score.high_score.max(high_score);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Swipe driving refills (that of the last accepted swap)
    pub fn flow_direction(&self) -> SwipeDirection {
        self.flow
    }

    /// Events not yet drained
    pub fn pending_events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::capture(self)
    }
}
