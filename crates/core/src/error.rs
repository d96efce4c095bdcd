//! Error types
//!
//! Every failure is caller-correctable and is reported before anything is
//! mutated. A swap that produces no match is not an error; it is
//! [`SwapOutcome::NoMatch`](crate::engine::SwapOutcome::NoMatch).

use thiserror::Error;

use crate::types::{GridPos, MAX_GRID_DIMENSION, MIN_MATCH_SIZE_FLOOR};

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("minimum match size {0} is below {}", MIN_MATCH_SIZE_FLOOR)]
    MinMatchTooSmall(usize),

    #[error("grid {width}x{height} cannot hold a run of {min_match_size}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min_match_size: usize,
    },

    #[error("grid {width}x{height} exceeds {} cells per side", MAX_GRID_DIMENSION)]
    GridTooLarge { width: usize, height: usize },

    #[error("base score per match must be positive")]
    ZeroBaseScore,

    #[error("pressure setting `{0}` must be a positive finite number")]
    InvalidPressure(&'static str),
}

impl ConfigError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::MinMatchTooSmall(_) => "min_match_too_small",
            ConfigError::GridTooSmall { .. } => "grid_too_small",
            ConfigError::GridTooLarge { .. } => "grid_too_large",
            ConfigError::ZeroBaseScore => "zero_base_score",
            ConfigError::InvalidPressure(_) => "invalid_pressure",
        }
    }
}

/// Engine operation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("position {0} is outside the grid")]
    InvalidPosition(GridPos),

    #[error("positions {a} and {b} are not adjacent")]
    NotAdjacent { a: GridPos, b: GridPos },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

impl EngineError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidPosition(_) => "invalid_position",
            EngineError::NotAdjacent { .. } => "not_adjacent",
            EngineError::InvalidConfiguration(_) => "invalid_configuration",
        }
    }
}
