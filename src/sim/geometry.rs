//! Circle geometry shared by every entity
//!
//! All entities are circles. Overlap is strict: circles that exactly touch
//! do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Anything with a center and a radius
pub trait Body {
    fn pos(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// True iff the distance between centers is strictly less than the sum of radii
#[inline]
pub fn overlaps(a: &impl Body, b: &impl Body) -> bool {
    let d = a.pos() - b.pos();
    d.x.hypot(d.y) < a.radius() + b.radius()
}

/// Rectangular play area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a circle center so the whole circle stays inside the arena
    ///
    /// When the arena is narrower than the circle on an axis, the center is
    /// pinned to the middle of that axis.
    pub fn clamp_inside(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(pos.x, radius, self.width),
            clamp_axis(pos.y, radius, self.height),
        )
    }
}

fn clamp_axis(v: f32, radius: f32, extent: f32) -> f32 {
    let lo = radius;
    let hi = extent - radius;
    if !(lo <= hi) {
        // Also catches NaN extents
        return if extent.is_finite() { extent.max(0.0) / 2.0 } else { 0.0 };
    }
    v.max(lo).min(hi)
}
