//! Scoring module - zone weighted match scores and combo tracking
//!
//! Score rules:
//! - A match is worth `round(base * size * zone_multiplier)`.
//! - A combo bonus of `min(combo, max_combo_bonus) * base` is added once the
//!   combo counter (read before this match bumps it) is above 1.
//! - Every scored match bumps the combo counter. Only a swap that produces
//!   no match at all resets it.
//!
//! The size multiplier does not feed the score; it is part of the match's
//! advertised multiplier ([`match_score_multiplier`]) used by presentation
//! layers.

use serde::{Deserialize, Serialize};

use crate::matcher::Match;
use crate::types::{
    ZoneType, DEFAULT_BASE_SCORE_PER_MATCH, DEFAULT_MAX_COMBO_BONUS, SIZE_MULTIPLIERS,
    ZONE_SCORE_MULTIPLIERS,
};

/// Score multiplier for a zone (Edge 1.0, Transition 1.5, Center 2.0)
pub fn zone_multiplier(zone: ZoneType) -> f32 {
    ZONE_SCORE_MULTIPLIERS[zone.index()]
}

/// Step function over run length: 3 -> 1.0, 4 -> 1.5, 5 -> 2.0, 6+ -> 2.5
pub fn size_multiplier(size: usize) -> f32 {
    match size {
        0..=3 => SIZE_MULTIPLIERS[0],
        4 => SIZE_MULTIPLIERS[1],
        5 => SIZE_MULTIPLIERS[2],
        _ => SIZE_MULTIPLIERS[3],
    }
}

pub(crate) fn match_score_multiplier_for(zone: ZoneType, size: usize) -> f32 {
    zone_multiplier(zone) * size_multiplier(size)
}

/// Zone multiplier of the primary zone times the size multiplier
pub fn match_score_multiplier(m: &Match) -> f32 {
    match_score_multiplier_for(m.primary_zone(), m.size())
}

/// Base points for a match: `round(base * size * zone_multiplier)`
pub fn calculate_match_score(size: usize, zone: ZoneType, base_score_per_match: u32) -> u32 {
    let raw = base_score_per_match as f32 * size as f32 * zone_multiplier(zone);
    raw.round() as u32
}

/// Combo bonus for the combo value in effect before the match is counted
pub fn calculate_combo_bonus(combo: u32, max_combo_bonus: u32, base_score_per_match: u32) -> u32 {
    if combo <= 1 {
        return 0;
    }
    combo.min(max_combo_bonus).saturating_mul(base_score_per_match)
}

/// Scoring parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRules {
    pub base_score_per_match: u32,
    pub max_combo_bonus: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            base_score_per_match: DEFAULT_BASE_SCORE_PER_MATCH,
            max_combo_bonus: DEFAULT_MAX_COMBO_BONUS,
        }
    }
}

/// Score calculation result for one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreResult {
    /// Zone weighted points for the tiles themselves.
    pub match_score: u32,
    /// Combo bonus added on top of `match_score`.
    pub combo_bonus: u32,
    pub total: u32,
    /// Whether this match first pushed the score past the high score the
    /// game started with. Later matches of the same game report `false`.
    pub new_high_score: bool,
}

/// Running score for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    /// Highest `score` observed this session (survives [`ScoreState::reset`]).
    pub high_score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub total_matches: u32,
    /// Matches counted per primary zone, indexed by [`ZoneType::index`].
    pub zone_matches: [u32; 3],
    /// Set once this game's score has passed the previous high score.
    #[serde(default)]
    pub high_score_beaten: bool,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously persisted high score
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    pub fn zone_match_count(&self, zone: ZoneType) -> u32 {
        self.zone_matches[zone.index()]
    }

    /// Share of all matches whose primary zone is `zone`, in percent
    pub fn zone_match_percentage(&self, zone: ZoneType) -> f32 {
        if self.total_matches == 0 {
            return 0.0;
        }
        self.zone_match_count(zone) as f32 / self.total_matches as f32 * 100.0
    }

    /// Clear everything except the high score
    pub fn reset(&mut self) {
        *self = Self::with_high_score(self.high_score);
    }
}

/// Score one match against `state`
///
/// Pure: returns the next state and the points awarded.
pub fn apply_match(state: &ScoreState, m: &Match, rules: ScoreRules) -> (ScoreState, ScoreResult) {
    let match_score = calculate_match_score(m.size(), m.primary_zone(), rules.base_score_per_match);
    let combo_bonus =
        calculate_combo_bonus(state.combo, rules.max_combo_bonus, rules.base_score_per_match);
    let total = match_score.saturating_add(combo_bonus);

    let mut next = *state;
    next.score = next.score.saturating_add(total);
    next.combo = next.combo.saturating_add(1);
    next.max_combo = next.max_combo.max(next.combo);
    next.total_matches = next.total_matches.saturating_add(1);
    next.zone_matches[m.primary_zone().index()] += 1;

    if next.score > state.high_score {
        next.high_score = next.score;
    }
    let new_high_score = next.score > state.high_score && !state.high_score_beaten;
    if new_high_score {
        next.high_score_beaten = true;
    }

    (
        next,
        ScoreResult {
            match_score,
            combo_bonus,
            total,
            new_high_score,
        },
    )
}
