//! Engine and pressure configuration
//!
//! Both configs have sensible defaults and can be overridden from the
//! environment:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `FLOWCRUSH_WIDTH` | `width` | 8 |
//! | `FLOWCRUSH_HEIGHT` | `height` | 8 |
//! | `FLOWCRUSH_MIN_MATCH` | `min_match_size` | 3 |
//! | `FLOWCRUSH_DIAGONALS` | `enable_diagonals` | false |
//! | `FLOWCRUSH_BASE_SCORE` | `base_score_per_match` | 100 |
//! | `FLOWCRUSH_MAX_COMBO_BONUS` | `max_combo_bonus` | 5 |
//! | `FLOWCRUSH_PRESSURE_STRENGTH` | `strength` | 2.0 |
//! | `FLOWCRUSH_PRESSURE_RATE` | `update_rate_secs` | 0.1 |
//! | `FLOWCRUSH_MAX_PRESSURE` | `max_pressure` | 10.0 |
//! | `FLOWCRUSH_PRESSURE_RADIUS` | `influence_radius` | 2.0 |
//! | `FLOWCRUSH_PRESSURE_DISABLED` | `!enabled` | false |
//!
//! Unparseable values fall back to the default. Range checks happen in
//! `validate()`, not while reading.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::matcher::MatchRules;
use crate::scoring::ScoreRules;
use crate::types::{
    DEFAULT_BASE_SCORE_PER_MATCH, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
    DEFAULT_INFLUENCE_RADIUS, DEFAULT_MAX_COMBO_BONUS, DEFAULT_MAX_PRESSURE,
    DEFAULT_MIN_MATCH_SIZE, DEFAULT_PRESSURE_STRENGTH, DEFAULT_PRESSURE_UPDATE_SECS,
    MAX_GRID_DIMENSION, MIN_MATCH_SIZE_FLOOR,
};

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Grid, match and score settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub min_match_size: usize,
    pub enable_diagonals: bool,
    pub base_score_per_match: u32,
    pub max_combo_bonus: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            min_match_size: DEFAULT_MIN_MATCH_SIZE,
            enable_diagonals: false,
            base_score_per_match: DEFAULT_BASE_SCORE_PER_MATCH,
            max_combo_bonus: DEFAULT_MAX_COMBO_BONUS,
        }
    }
}

impl EngineConfig {
    /// Create from `FLOWCRUSH_*` environment variables
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            width: env_parse("FLOWCRUSH_WIDTH").unwrap_or(d.width),
            height: env_parse("FLOWCRUSH_HEIGHT").unwrap_or(d.height),
            min_match_size: env_parse("FLOWCRUSH_MIN_MATCH").unwrap_or(d.min_match_size),
            enable_diagonals: env_flag("FLOWCRUSH_DIAGONALS").unwrap_or(d.enable_diagonals),
            base_score_per_match: env_parse("FLOWCRUSH_BASE_SCORE")
                .unwrap_or(d.base_score_per_match),
            max_combo_bonus: env_parse("FLOWCRUSH_MAX_COMBO_BONUS").unwrap_or(d.max_combo_bonus),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_match_size < MIN_MATCH_SIZE_FLOOR {
            return Err(ConfigError::MinMatchTooSmall(self.min_match_size));
        }
        if self.width < self.min_match_size || self.height < self.min_match_size {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min_match_size: self.min_match_size,
            });
        }
        if self.width > MAX_GRID_DIMENSION || self.height > MAX_GRID_DIMENSION {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.base_score_per_match == 0 {
            return Err(ConfigError::ZeroBaseScore);
        }
        Ok(())
    }

    pub fn match_rules(&self) -> MatchRules {
        MatchRules {
            min_match_size: self.min_match_size,
            enable_diagonals: self.enable_diagonals,
        }
    }

    pub fn score_rules(&self) -> ScoreRules {
        ScoreRules {
            base_score_per_match: self.base_score_per_match,
            max_combo_bonus: self.max_combo_bonus,
        }
    }
}

/// Pressure meter settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureConfig {
    /// Pressure per matched tile before zone and curve scaling
    pub strength: f32,
    /// Length of one simulation step
    pub update_rate_secs: f32,
    pub max_pressure: f32,
    pub influence_radius: f32,
    pub enabled: bool,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self {
            strength: DEFAULT_PRESSURE_STRENGTH,
            update_rate_secs: DEFAULT_PRESSURE_UPDATE_SECS,
            max_pressure: DEFAULT_MAX_PRESSURE,
            influence_radius: DEFAULT_INFLUENCE_RADIUS,
            enabled: true,
        }
    }
}

impl PressureConfig {
    /// Create from `FLOWCRUSH_*` environment variables
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            strength: env_parse("FLOWCRUSH_PRESSURE_STRENGTH").unwrap_or(d.strength),
            update_rate_secs: env_parse("FLOWCRUSH_PRESSURE_RATE").unwrap_or(d.update_rate_secs),
            max_pressure: env_parse("FLOWCRUSH_MAX_PRESSURE").unwrap_or(d.max_pressure),
            influence_radius: env_parse("FLOWCRUSH_PRESSURE_RADIUS")
                .unwrap_or(d.influence_radius),
            enabled: !env_flag("FLOWCRUSH_PRESSURE_DISABLED").unwrap_or(false),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("strength", self.strength),
            ("update_rate_secs", self.update_rate_secs),
            ("max_pressure", self.max_pressure),
            ("influence_radius", self.influence_radius),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidPressure(name));
            }
        }
        Ok(())
    }
}
