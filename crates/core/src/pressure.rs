//! Pressure meter
//!
//! Matches add pressure to the cells they cleared and to a global meter.
//! Pressure then spreads to neighbouring cells, drops below a floor and
//! decays over time. The simulation advances in fixed steps so results do
//! not depend on frame timing.
//!
//! | Zone | Pressure multiplier |
//! |------|---------------------|
//! | Edge | 0.5 |
//! | Transition | 1.0 |
//! | Center | 2.0 |
//!
//! Gains shrink as the meter fills: the added amount is scaled by
//! `1 - smoothstep(current / max_pressure)`.

use std::collections::BTreeMap;

use crate::board::neighbors;
use crate::config::PressureConfig;
use crate::error::ConfigError;
use crate::events::EngineEvent;
use crate::matcher::Match;
use crate::types::{GridPos, ZoneType, PRESSURE_FLOOR, ZONE_PRESSURE_MULTIPLIERS};
use crate::zone::zone_of;

/// Share of a neighbour's influence that actually transfers each step
const DIFFUSION_RATE: f32 = 0.1;
/// Share of per-cell decay applied to the global meter
const GLOBAL_DECAY_SHARE: f32 = 0.1;
/// Most steps one `advance` call runs; time beyond that is dropped
pub const MAX_STEPS_PER_ADVANCE: u32 = 1000;

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn zone_pressure_multiplier(zone: ZoneType) -> f32 {
    ZONE_PRESSURE_MULTIPLIERS[zone.index()]
}

#[derive(Debug, Clone)]
pub struct PressureSystem {
    config: PressureConfig,
    width: usize,
    height: usize,
    current: f32,
    map: BTreeMap<GridPos, f32>,
    accumulator: f32,
}

impl PressureSystem {
    pub fn new(config: PressureConfig, width: usize, height: usize) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            width,
            height,
            current: 0.0,
            map: BTreeMap::new(),
            accumulator: 0.0,
        })
    }

    pub fn config(&self) -> &PressureConfig {
        &self.config
    }

    /// Grid size used for neighbour clipping and zone totals
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Global meter value, in `0..=max_pressure`
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Global meter as a fraction of the maximum
    pub fn level(&self) -> f32 {
        self.current / self.config.max_pressure
    }

    pub fn pressure_at(&self, pos: GridPos) -> f32 {
        self.map.get(&pos).copied().unwrap_or(0.0)
    }

    /// Cells holding pressure, in coordinate order
    pub fn active_positions(&self) -> impl Iterator<Item = (GridPos, f32)> + '_ {
        self.map.iter().map(|(&pos, &p)| (pos, p))
    }

    /// Summed cell pressure per zone, indexed by [`ZoneType::index`]
    pub fn zone_totals(&self) -> [f32; 3] {
        let mut totals = [0.0; 3];
        for (&pos, &p) in &self.map {
            totals[zone_of(pos, self.width, self.height).index()] += p;
        }
        totals
    }

    /// Pressure a match of this size and zone would add right now
    pub fn match_pressure(&self, size: usize, zone: ZoneType) -> f32 {
        let damping = 1.0 - smoothstep(self.level());
        size as f32 * self.config.strength * zone_pressure_multiplier(zone) * damping
    }

    /// Feed one engine event; only matches add pressure
    pub fn observe(&mut self, event: &EngineEvent) {
        if let EngineEvent::MatchFound(m) = event {
            self.apply_match(m);
        }
    }

    /// Add pressure for a match and return the amount added per cell
    pub fn apply_match(&mut self, m: &Match) -> f32 {
        if !self.config.enabled {
            return 0.0;
        }
        let amount = self.match_pressure(m.size(), m.primary_zone());
        let max = self.config.max_pressure;
        for &pos in m.positions() {
            let entry = self.map.entry(pos).or_insert(0.0);
            *entry = (*entry + amount).min(max);
        }
        self.current = (self.current + amount).min(max);
        log::trace!(
            "pressure +{:.2} from {} match (meter {:.2})",
            amount,
            m.primary_zone().as_str(),
            self.current
        );
        amount
    }

    /// Run as many fixed steps as `elapsed` seconds cover
    ///
    /// Leftover time carries over to the next call. At most
    /// [`MAX_STEPS_PER_ADVANCE`] steps run per call; a longer gap drops the
    /// remainder. Returns the number of steps run.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if !self.config.enabled || !elapsed.is_finite() || elapsed <= 0.0 {
            return 0;
        }
        let rate = self.config.update_rate_secs;
        let due = ((self.accumulator + elapsed) / rate).floor();
        let steps = if due >= MAX_STEPS_PER_ADVANCE as f32 {
            log::debug!(
                "pressure fell {:.1}s behind, running {} steps",
                self.accumulator + elapsed,
                MAX_STEPS_PER_ADVANCE
            );
            self.accumulator = 0.0;
            MAX_STEPS_PER_ADVANCE
        } else {
            self.accumulator = (self.accumulator + elapsed) % rate;
            due as u32
        };
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// One simulation step: spread, drop, decay
    pub fn step(&mut self) {
        self.spread();
        self.map.retain(|_, p| *p >= PRESSURE_FLOOR);
        self.decay();
    }

    /// Move a share of each cell's pressure to its neighbours
    ///
    /// Transfers are computed from the pre-step values and the source cell
    /// pays for what it gives, so spreading never creates pressure.
    fn spread(&mut self) {
        let radius = self.config.influence_radius;
        let mut transfers = Vec::new();
        for (&pos, &p) in &self.map {
            for n in neighbors(pos, self.width, self.height) {
                let (dx, dy) = ((n.x - pos.x) as f32, (n.y - pos.y) as f32);
                let distance = (dx * dx + dy * dy).sqrt();
                let influence = p * (1.0 - distance / radius);
                if influence > PRESSURE_FLOOR {
                    transfers.push((pos, n, influence * DIFFUSION_RATE));
                }
            }
        }
        let max = self.config.max_pressure;
        for (from, to, amount) in transfers {
            if let Some(source) = self.map.get_mut(&from) {
                *source -= amount;
            }
            let entry = self.map.entry(to).or_insert(0.0);
            *entry = (*entry + amount).min(max);
        }
    }

    fn decay(&mut self) {
        let decay = self.config.update_rate_secs * 0.5;
        self.map.retain(|_, p| {
            *p -= decay;
            *p > 0.0
        });
        self.current = (self.current - decay * GLOBAL_DECAY_SHARE).max(0.0);
    }

    /// Empty the meter and the map
    pub fn reset(&mut self) {
        self.current = 0.0;
        self.map.clear();
        self.accumulator = 0.0;
    }

    /// Track a new grid size; clears all pressure
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.reset();
    }
}
