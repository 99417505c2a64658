//! Motion integration
//!
//! Hazards drift by their velocity and bounce off the arena walls. The player
//! either snaps to the pointer or steps by the held direction keys.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Arena;
use super::state::{Hazard, Player};

/// Movement keys held this tick (axes are independent, diagonals allowed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Unnormalized step direction; opposite keys cancel
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        // Screen coordinates: y grows downward
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        dir
    }
}

/// Direct tracking: the player is wherever the pointer is, unclamped
pub fn track_pointer(player: &mut Player, pointer: Option<Vec2>) {
    if let Some(target) = pointer {
        if target.is_finite() {
            player.pos = target;
        }
    }
}

/// Velocity step: move `speed` per held axis, then keep the circle inside
pub fn step_player(player: &mut Player, keys: &HeldKeys, speed: f32, arena: Arena) {
    player.pos += keys.direction() * speed;
    player.pos = arena.clamp_inside(player.pos, player.radius);
}

/// Advance every hazard by its velocity, then reflect off the walls
pub fn move_hazards(hazards: &mut [Hazard], arena: Arena) {
    for hazard in hazards.iter_mut() {
        hazard.pos += hazard.vel;
        reflect_off_walls(hazard, arena);
    }
}

/// Reflect a hazard whose leading edge has crossed a wall
///
/// The velocity component is pointed back into the arena. For a hazard moving
/// toward the wall this is a plain negation; a hazard stranded outside by a
/// resize keeps heading inward instead of flipping every tick.
pub fn reflect_off_walls(hazard: &mut Hazard, arena: Arena) {
    let r = hazard.radius;
    if hazard.pos.x - r < 0.0 {
        hazard.vel.x = hazard.vel.x.abs();
    } else if hazard.pos.x + r > arena.width {
        hazard.vel.x = -hazard.vel.x.abs();
    }
    if hazard.pos.y - r < 0.0 {
        hazard.vel.y = hazard.vel.y.abs();
    } else if hazard.pos.y + r > arena.height {
        hazard.vel.y = -hazard.vel.y.abs();
    }
}
