//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, clock sampled once per tick
//! - Seeded RNG only
//! - Stable iteration order (ascending index)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod geometry;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::{Steering, steer};
pub use effects::ActiveEffect;
pub use geometry::{Arena, Body, overlaps};
pub use motion::HeldKeys;
pub use spawn::{SpawnKind, SpawnRule};
pub use state::{GameEvent, GamePhase, Hazard, Player, PowerUp, PowerUpKind, SimulationState};
pub use tick::{TickInput, tick};
