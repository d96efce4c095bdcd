//! Core match engine - pure, deterministic, and testable
//!
//! This crate contains the rules of the game: the grid, run detection, zone
//! weighted scoring, directional refill and the cascade loop. It knows
//! nothing about rendering, input devices, timers or persistence, which
//! makes it:
//!
//! - **Deterministic**: the same seed and color source produce identical boards
//! - **Testable**: every rule is reachable from plain function calls
//! - **Portable**: it can be hosted by a game engine, a terminal, or a server
//!
//! # Module Structure
//!
//! - [`board`]: W x H grid of cells with flat row-major storage
//! - [`zone`]: Edge / Transition / Center classification of coordinates
//! - [`matcher`]: run detection producing [`Match`] records
//! - [`scoring`]: zone and size multipliers, combo bonus, running score state
//! - [`refill`]: directional gravity that compacts lines and spawns tiles
//! - [`rng`]: deterministic color sources
//! - [`engine`]: the swap -> match -> remove -> refill -> cascade state machine
//! - [`pressure`]: decaying pressure meter fed by match events
//! - [`session`]: game lifecycle wrapping engine and pressure
//! - [`events`]: events emitted for renderers, audio and persistence layers
//! - [`snapshot`]: serializable view of the engine for renderers
//!
//! # Turn Flow
//!
//! A turn is one call to [`MatchEngine::try_swap`]:
//!
//! 1. Both coordinates are validated (bounds, then adjacency). Nothing is
//!    mutated when validation fails.
//! 2. The two tiles are exchanged.
//! 3. The board is scanned for runs; matched tiles are scored, removed and
//!    the board is refilled from the edge opposite the swipe.
//! 4. Step 3 repeats until a pass finds nothing (the cascade).
//! 5. If the first pass found nothing the swap is reverted and the combo
//!    counter resets.
//!
//! Every step is recorded as an [`EngineEvent`] in a queue the caller drains.
//!
//! # Example
//!
//! ```
//! use flow_crush_core::{EngineConfig, MatchEngine, SwapOutcome};
//! use flow_crush_core::types::GridPos;
//!
//! let mut engine = MatchEngine::new(EngineConfig::default()).unwrap();
//! engine.initialize_grid(Some(12345));
//!
//! // A fresh board never starts with a match.
//! assert!(engine.find_all_matches().is_empty());
//!
//! match engine.try_swap(GridPos::new(0, 0), GridPos::new(1, 0)).unwrap() {
//!     SwapOutcome::NoMatch => {}
//!     SwapOutcome::Resolved(resolution) => assert!(!resolution.matches.is_empty()),
//! }
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod matcher;
pub mod pressure;
pub mod refill;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod zone;

pub use flow_crush_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{EngineConfig, PressureConfig};
pub use engine::{MatchEngine, Resolution, SwapOutcome};
pub use error::{ConfigError, EngineError};
pub use events::EngineEvent;
pub use matcher::{find_matches, Match, MatchRules};
pub use pressure::PressureSystem;
pub use refill::{RefillReport, SpawnedTile, TileMove};
pub use rng::{ColorSource, RandomColors, ScriptedColors, SimpleRng};
pub use scoring::{apply_match, match_score_multiplier, ScoreResult, ScoreRules, ScoreState};
pub use session::{GameSession, SessionError, SessionPhase, SessionStats};
pub use snapshot::EngineSnapshot;
pub use zone::classify;
