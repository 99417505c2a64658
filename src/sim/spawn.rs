//! Difficulty scaling: score thresholds paired with entity factories

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Arena;
use super::state::{GameEvent, Hazard, PowerUp, PowerUpKind, SimulationState};
use crate::config::SimConfig;

/// Which factory a rule feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Hazard,
    /// Kind picked uniformly between heal and shield
    PowerUp,
}

/// Spawn one `kind` every time score crosses a multiple of `interval`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRule {
    pub kind: SpawnKind,
    pub interval: u64,
}

impl SpawnRule {
    pub const fn new(kind: SpawnKind, interval: u64) -> Self {
        Self { kind, interval }
    }
}

/// Progress of one rule through the score line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnSchedule {
    pub rule: SpawnRule,
    /// Multiples already paid out
    pub fired: u64,
}

impl SpawnSchedule {
    pub fn new(rule: SpawnRule) -> Self {
        Self { rule, fired: 0 }
    }

    /// Spawns owed at `score`, marking them as paid
    pub fn due(&mut self, score: u64) -> u64 {
        if self.rule.interval == 0 {
            return 0;
        }
        let crossed = score / self.rule.interval;
        let owed = crossed.saturating_sub(self.fired);
        self.fired = self.fired.max(crossed);
        owed
    }
}

/// Run every rule against the current score
pub fn scale_difficulty(
    state: &mut SimulationState,
    config: &SimConfig,
    events: &mut Vec<GameEvent>,
) {
    for i in 0..state.schedules.len() {
        let owed = state.schedules[i].due(state.score);
        let kind = state.schedules[i].rule.kind;
        for _ in 0..owed {
            spawn(state, config, kind, events);
        }
    }
}

/// Append one entity of `kind` at a random position
pub fn spawn(
    state: &mut SimulationState,
    config: &SimConfig,
    kind: SpawnKind,
    events: &mut Vec<GameEvent>,
) {
    let id = state.next_entity_id();
    let arena = state.arena;
    match kind {
        SpawnKind::Hazard => {
            let hazard = random_hazard(&mut state.rng, config, arena, id);
            log::debug!(
                "Hazard {} spawned at score {} ({} alive)",
                id,
                state.score,
                state.hazards.len() + 1
            );
            state.hazards.push(hazard);
            events.push(GameEvent::HazardSpawned { id });
        }
        SpawnKind::PowerUp => {
            let power_up = random_power_up(&mut state.rng, config, arena, id);
            log::debug!("{} power-up {} spawned at score {}", power_up.kind.as_str(), id, state.score);
            events.push(GameEvent::PowerUpSpawned {
                id,
                kind: power_up.kind,
            });
            state.power_ups.push(power_up);
        }
    }
}

/// Hazard with random radius, position and velocity
pub fn random_hazard(rng: &mut impl Rng, config: &SimConfig, arena: Arena, id: u32) -> Hazard {
    let radius = rng.random_range(config.hazard_radius_min..config.hazard_radius_max);
    let pos = Vec2::new(
        sample_axis(rng, radius, arena.width),
        sample_axis(rng, radius, arena.height),
    );
    let max = config.hazard_max_speed;
    let vel = if max > 0.0 {
        Vec2::new(rng.random_range(-max..max), rng.random_range(-max..max))
    } else {
        Vec2::ZERO
    };
    Hazard {
        id,
        pos,
        vel,
        radius,
    }
}

/// Power-up of a uniformly random kind at a random position
pub fn random_power_up(rng: &mut impl Rng, config: &SimConfig, arena: Arena, id: u32) -> PowerUp {
    let kind = if rng.random_bool(0.5) {
        PowerUpKind::Heal
    } else {
        PowerUpKind::Shield
    };
    let radius = config.power_up_radius;
    PowerUp {
        id,
        kind,
        pos: Vec2::new(
            sample_axis(rng, radius, arena.width),
            sample_axis(rng, radius, arena.height),
        ),
        radius,
    }
}

/// Uniform coordinate keeping the circle inside `extent`; centered when it can't fit
fn sample_axis(rng: &mut impl Rng, radius: f32, extent: f32) -> f32 {
    let lo = radius;
    let hi = extent - radius;
    if lo < hi && hi.is_finite() {
        rng.random_range(lo..hi)
    } else if extent.is_finite() {
        extent.max(0.0) / 2.0
    } else {
        0.0
    }
}
