//! Idle/demo mode - the game plays itself
//!
//! Produces the same kind of input a human would (a pointer target or held
//! keys), so the simulation can't tell the difference.

use glam::Vec2;

use super::motion::HeldKeys;
use super::state::SimulationState;
use crate::config::{ControlMode, SimConfig};

/// Hazards closer than this (edge to edge) push the player away
const DANGER_DISTANCE: f32 = 120.0;
/// Below this on an axis, no key is pressed
const KEY_DEAD_ZONE: f32 = 0.2;

/// Input chosen by the autopilot for the next tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub pointer: Option<Vec2>,
    pub keys: HeldKeys,
}

/// Flee nearby hazards; when nothing is close, go grab the nearest power-up
pub fn steer(state: &SimulationState, config: &SimConfig) -> Steering {
    let player = &state.player;

    let mut flee = Vec2::ZERO;
    for hazard in &state.hazards {
        let away = player.pos - hazard.pos;
        let gap = away.length() - player.radius - hazard.radius;
        if gap < DANGER_DISTANCE {
            // Closer hazards weigh more
            let weight = 1.0 - gap.max(0.0) / DANGER_DISTANCE;
            flee += away.normalize_or_zero() * weight;
        }
    }

    let direction = if flee.length_squared() > 1e-6 {
        // Lean toward the middle so fleeing doesn't pin us to a wall
        let to_center = (state.arena.center() - player.pos).normalize_or_zero();
        flee.normalize_or_zero() + to_center * 0.3
    } else {
        state
            .power_ups
            .iter()
            .min_by(|a, b| {
                let da = a.pos.distance_squared(player.pos);
                let db = b.pos.distance_squared(player.pos);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|p| (p.pos - player.pos).normalize_or_zero())
            .unwrap_or(Vec2::ZERO)
    };
    let direction = direction.normalize_or_zero();

    match config.control_mode {
        ControlMode::DirectTracking => {
            let target = player.pos + direction * config.player_speed;
            Steering {
                pointer: Some(state.arena.clamp_inside(target, player.radius)),
                keys: HeldKeys::default(),
            }
        }
        ControlMode::VelocityStep => Steering {
            pointer: None,
            keys: HeldKeys {
                left: direction.x < -KEY_DEAD_ZONE,
                right: direction.x > KEY_DEAD_ZONE,
                up: direction.y < -KEY_DEAD_ZONE,
                down: direction.y > KEY_DEAD_ZONE,
            },
        },
    }
}
