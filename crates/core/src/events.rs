//! Engine events
//!
//! The engine never calls out to collaborators. Each operation appends
//! events to a queue that the caller drains with
//! [`MatchEngine::drain_events`](crate::engine::MatchEngine::drain_events)
//! and forwards to renderers, audio, the pressure meter or persistence.
//!
//! Within one turn the order is:
//!
//! ```text
//! Swapped
//! ( CascadeStep
//!   ( MatchFound ScoreChanged ComboChanged HighScoreBeaten? )+
//!   TilesRemoved TilesMoved? TilesSpawned )*
//! SwapReverted ComboChanged?      <- only when nothing matched
//! ```

use serde::Serialize;

use crate::matcher::Match;
use crate::refill::{SpawnedTile, TileMove};
use crate::types::GridPos;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// Two tiles were exchanged
    Swapped { a: GridPos, b: GridPos },
    /// The exchange produced nothing and was undone
    SwapReverted { a: GridPos, b: GridPos },
    /// A scan pass found matches (1-based)
    CascadeStep { pass: u32 },
    MatchFound(Match),
    TilesRemoved { positions: Vec<GridPos> },
    TilesMoved { moves: Vec<TileMove> },
    TilesSpawned { tiles: Vec<SpawnedTile> },
    ScoreChanged { total: u32 },
    ComboChanged { combo: u32 },
    HighScoreBeaten { score: u32 },
}

impl EngineEvent {
    /// snake_case event name, matching the serialized `type` tag
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::Swapped { .. } => "swapped",
            EngineEvent::SwapReverted { .. } => "swap_reverted",
            EngineEvent::CascadeStep { .. } => "cascade_step",
            EngineEvent::MatchFound(_) => "match_found",
            EngineEvent::TilesRemoved { .. } => "tiles_removed",
            EngineEvent::TilesMoved { .. } => "tiles_moved",
            EngineEvent::TilesSpawned { .. } => "tiles_spawned",
            EngineEvent::ScoreChanged { .. } => "score_changed",
            EngineEvent::ComboChanged { .. } => "combo_changed",
            EngineEvent::HighScoreBeaten { .. } => "high_score_beaten",
        }
    }
}
