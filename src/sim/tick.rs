//! Simulation tick
//!
//! One call advances the session by exactly one frame. Order within a tick:
//! expire effects, move, collide, score, scale difficulty.

use glam::Vec2;

use super::collision;
use super::effects;
use super::geometry::Arena;
use super::motion::{self, HeldKeys};
use super::spawn;
use super::state::{GameEvent, SimulationState};
use crate::config::{ControlMode, SimConfig};

/// Everything sampled from the outside world for a single tick
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Current arena size (may change between ticks on resize)
    pub arena: Arena,
    /// Latest pointer position (direct-tracking mode)
    pub pointer: Option<Vec2>,
    /// Held movement keys (velocity-step mode)
    pub keys: HeldKeys,
    /// Monotonic clock, milliseconds
    pub now_ms: f64,
}

impl TickInput {
    pub fn new(arena: Arena, now_ms: f64) -> Self {
        Self {
            arena,
            pointer: None,
            keys: HeldKeys::default(),
            now_ms,
        }
    }
}

/// Advance the simulation by one tick and report what happened
///
/// Once the session is over this is a no-op returning no events.
pub fn tick(state: &mut SimulationState, config: &SimConfig, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_over() {
        return events;
    }

    state.time_ticks += 1;
    state.arena = input.arena;

    // An effect expiring exactly now no longer protects this tick's collisions
    if effects::expire(&mut state.effect, input.now_ms) {
        log::debug!("Shield expired at {:.0} ms", input.now_ms);
        events.push(GameEvent::ShieldExpired);
    }

    match config.control_mode {
        ControlMode::DirectTracking => motion::track_pointer(&mut state.player, input.pointer),
        ControlMode::VelocityStep => {
            motion::step_player(&mut state.player, &input.keys, config.player_speed, state.arena)
        }
    }
    motion::move_hazards(&mut state.hazards, state.arena);

    collision::resolve_hazard_pairs(&mut state.hazards);
    collision::resolve_player_hazards(state, &mut events);
    if state.is_over() {
        return events;
    }
    collision::resolve_power_ups(state, input.now_ms, config.shield_duration_ms, &mut events);

    state.advance_score();
    spawn::scale_difficulty(state, config, &mut events);

    events
}
