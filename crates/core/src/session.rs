//! Game session lifecycle
//!
//! A [`GameSession`] wraps the engine and the pressure meter and tracks
//! which phase the game is in:
//!
//! ```text
//! Menu --start--> Playing <--pause/resume--> Paused
//!                    |                          |
//!                    +-----------end------------+--> GameOver --start--> Playing
//! ```
//!
//! Swaps are only accepted while playing. Engine events are forwarded to
//! the pressure meter before the caller sees them.

use serde::Serialize;
use thiserror::Error;

use crate::config::{EngineConfig, PressureConfig};
use crate::engine::{MatchEngine, SwapOutcome};
use crate::error::EngineError;
use crate::events::EngineEvent;
use crate::pressure::PressureSystem;
use crate::types::{GridPos, SwipeDirection, ZoneType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Menu => "menu",
            SessionPhase::Playing => "playing",
            SessionPhase::Paused => "paused",
            SessionPhase::GameOver => "game_over",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("action requires a running game (phase: {})", .0.as_str())]
    NotPlaying(SessionPhase),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl SessionError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::NotPlaying(_) => "not_playing",
            SessionError::Engine(err) => err.code(),
        }
    }
}

/// End-of-game summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStats {
    pub last_score: u32,
    pub high_score: u32,
    pub total_matches: u32,
    pub max_combo: u32,
    pub edge_matches: u32,
    pub transition_matches: u32,
    pub center_matches: u32,
}

#[derive(Debug)]
pub struct GameSession {
    engine: MatchEngine,
    pressure: PressureSystem,
    phase: SessionPhase,
    events: Vec<EngineEvent>,
}

impl GameSession {
    pub fn new(config: EngineConfig, pressure: PressureConfig) -> Result<Self, EngineError> {
        Self::with_engine(MatchEngine::new(config)?, pressure)
    }

    /// Wrap an already configured engine
    pub fn with_engine(
        engine: MatchEngine,
        pressure: PressureConfig,
    ) -> Result<Self, EngineError> {
        let board = engine.board();
        let pressure = PressureSystem::new(pressure, board.width(), board.height())?;
        Ok(Self {
            engine,
            pressure,
            phase: SessionPhase::Menu,
            events: Vec::new(),
        })
    }

    /// Create from `FLOWCRUSH_*` environment variables
    pub fn from_env() -> Result<Self, EngineError> {
        Self::new(EngineConfig::from_env(), PressureConfig::from_env())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Direct engine access (puzzle setup, color sources)
    ///
    /// A grid size change made here reaches the pressure meter on the next
    /// swap or tick; [`GameSession::configure`] applies it immediately.
    pub fn engine_mut(&mut self) -> &mut MatchEngine {
        &mut self.engine
    }

    /// Reconfigure the engine and keep the pressure grid in step
    pub fn configure(&mut self, config: EngineConfig) -> Result<(), SessionError> {
        self.engine.configure(config)?;
        self.sync_pressure_size();
        Ok(())
    }

    pub fn pressure(&self) -> &PressureSystem {
        &self.pressure
    }

    /// Begin a new game from the menu or after a game over
    pub fn start(&mut self, seed: Option<u32>) -> Result<(), SessionError> {
        if !matches!(self.phase, SessionPhase::Menu | SessionPhase::GameOver) {
            return Err(SessionError::NotPlaying(self.phase));
        }
        self.engine.initialize_grid(seed);
        self.engine.reset_score();
        self.pressure.reset();
        self.sync_pressure_size();
        self.forward_events();
        self.phase = SessionPhase::Playing;
        log::info!("session started");
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Playing {
            return Err(SessionError::NotPlaying(self.phase));
        }
        self.phase = SessionPhase::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Paused {
            return Err(SessionError::NotPlaying(self.phase));
        }
        self.phase = SessionPhase::Playing;
        Ok(())
    }

    /// Finish the running game and report its statistics
    pub fn end(&mut self) -> Result<SessionStats, SessionError> {
        if !matches!(self.phase, SessionPhase::Playing | SessionPhase::Paused) {
            return Err(SessionError::NotPlaying(self.phase));
        }
        self.phase = SessionPhase::GameOver;
        let stats = self.stats();
        log::info!(
            "game over: score {} (high {}), {} matches",
            stats.last_score,
            stats.high_score,
            stats.total_matches
        );
        Ok(stats)
    }

    /// Swap two tiles, refilling in the direction of the selection
    pub fn swap(&mut self, a: GridPos, b: GridPos) -> Result<SwapOutcome, SessionError> {
        self.swap_toward(a, b, SwipeDirection::between(a, b))
    }

    pub fn swap_toward(
        &mut self,
        a: GridPos,
        b: GridPos,
        direction: SwipeDirection,
    ) -> Result<SwapOutcome, SessionError> {
        if self.phase != SessionPhase::Playing {
            return Err(SessionError::NotPlaying(self.phase));
        }
        self.sync_pressure_size();
        let outcome = self.engine.try_swap_toward(a, b, direction)?;
        self.forward_events();
        Ok(outcome)
    }

    /// Advance the pressure simulation; paused games do not tick
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        if self.phase != SessionPhase::Playing {
            return 0;
        }
        self.sync_pressure_size();
        self.pressure.advance(elapsed_secs)
    }

    pub fn stats(&self) -> SessionStats {
        let score = self.engine.score_state();
        SessionStats {
            last_score: score.score,
            high_score: score.high_score,
            total_matches: score.total_matches,
            max_combo: score.max_combo,
            edge_matches: score.zone_match_count(ZoneType::Edge),
            transition_matches: score.zone_match_count(ZoneType::Transition),
            center_matches: score.zone_match_count(ZoneType::Center),
        }
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Resize (and clear) the pressure grid if the board changed size
    fn sync_pressure_size(&mut self) {
        let board = self.engine.board();
        let size = (board.width(), board.height());
        if self.pressure.dimensions() != size {
            log::debug!("pressure grid resized to {}x{}", size.0, size.1);
            self.pressure.resize(size.0, size.1);
        }
    }

    fn forward_events(&mut self) {
        for event in self.engine.drain_events() {
            self.pressure.observe(&event);
            self.events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(EngineConfig::default(), PressureConfig::default()).unwrap()
    }

    #[test]
    fn lifecycle_transitions() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Menu);
        assert_eq!(s.pause(), Err(SessionError::NotPlaying(SessionPhase::Menu)));

        s.start(Some(3)).unwrap();
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert!(s.start(Some(3)).is_err());

        s.pause().unwrap();
        assert_eq!(s.advance(1.0), 0);
        assert!(matches!(
            s.swap(GridPos::new(0, 0), GridPos::new(1, 0)),
            Err(SessionError::NotPlaying(SessionPhase::Paused))
        ));
        s.resume().unwrap();

        let stats = s.end().unwrap();
        assert_eq!(stats.last_score, 0);
        assert_eq!(s.phase(), SessionPhase::GameOver);
        assert!(s.end().is_err());

        s.start(None).unwrap();
        assert_eq!(s.phase(), SessionPhase::Playing);
    }

    #[test]
    fn engine_errors_pass_through() {
        let mut s = session();
        s.start(Some(1)).unwrap();
        let err = s
            .swap(GridPos::new(0, 0), GridPos::new(0, 2))
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Engine(EngineError::NotAdjacent { .. })
        ));
        assert_eq!(err.to_string(), "positions (0, 0) and (0, 2) are not adjacent");
    }

    #[test]
    fn start_clears_start_up_events() {
        let mut s = session();
        s.start(Some(1)).unwrap();
        let names: Vec<_> = s.drain_events().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["score_changed", "combo_changed"]);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn resizing_the_engine_resizes_pressure() {
        let mut s = session();
        s.start(Some(1)).unwrap();
        let bigger = EngineConfig {
            width: 10,
            height: 12,
            ..EngineConfig::default()
        };
        s.configure(bigger).unwrap();
        assert_eq!(s.pressure().dimensions(), (10, 12));

        let smaller = EngineConfig {
            width: 6,
            height: 6,
            ..EngineConfig::default()
        };
        s.engine_mut().configure(smaller).unwrap();
        s.advance(0.1);
        assert_eq!(s.pressure().dimensions(), (6, 6));
    }

    #[test]
    fn error_codes() {
        let mut s = session();
        let err = s.pause().unwrap_err();
        assert_eq!(err.code(), "not_playing");
        s.start(Some(1)).unwrap();
        let err = s
            .swap(GridPos::new(0, 0), GridPos::new(9, 0))
            .unwrap_err();
        assert_eq!(err.code(), "invalid_position");
    }

    #[test]
    fn rejects_invalid_pressure_config() {
        let bad = PressureConfig {
            strength: -1.0,
            ..PressureConfig::default()
        };
        let err = GameSession::new(EngineConfig::default(), bad).unwrap_err();
        assert_eq!(err.code(), "invalid_configuration");

        let stalled = PressureConfig {
            update_rate_secs: 0.0,
            ..PressureConfig::default()
        };
        let engine = MatchEngine::new(EngineConfig::default()).unwrap();
        assert!(GameSession::with_engine(engine, stalled).is_err());
    }
}
