//! Exclusive, time-bounded status effects
//!
//! Expiry is a timestamp compared against the clock sampled once at the top
//! of each tick. Nothing runs on its own timer.

use serde::{Deserialize, Serialize};

/// The single active protective effect
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ActiveEffect {
    #[default]
    None,
    /// Hazard contact is harmless until `expires_at_ms`
    Shield { expires_at_ms: f64 },
}

impl ActiveEffect {
    /// HUD label
    pub fn label(&self) -> &'static str {
        match self {
            ActiveEffect::None => "None",
            ActiveEffect::Shield { .. } => "Shield",
        }
    }

    pub fn is_shielded(&self) -> bool {
        matches!(self, ActiveEffect::Shield { .. })
    }

    /// Milliseconds left at `now_ms` (0 when no effect)
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        match self {
            ActiveEffect::None => 0.0,
            ActiveEffect::Shield { expires_at_ms } => (expires_at_ms - now_ms).max(0.0),
        }
    }
}

/// Activate the shield, replacing any running timer (durations never stack)
pub fn grant_shield(effect: &mut ActiveEffect, now_ms: f64, duration_ms: f64) -> f64 {
    let expires_at_ms = now_ms + duration_ms;
    *effect = ActiveEffect::Shield { expires_at_ms };
    expires_at_ms
}

/// Clear an effect whose expiry is at or before `now_ms`. Returns true if cleared.
pub fn expire(effect: &mut ActiveEffect, now_ms: f64) -> bool {
    match *effect {
        ActiveEffect::Shield { expires_at_ms } if expires_at_ms <= now_ms => {
            *effect = ActiveEffect::None;
            true
        }
        _ => false,
    }
}
