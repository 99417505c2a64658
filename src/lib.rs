//! Dodge Arena - a 2D survival arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, effects, spawning)
//! - `config`: Data-driven game balance and validation
//! - `session`: Frame orchestration and collaborator fan-out
//! - `platform`: Renderer/HUD/audio collaborator interfaces

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod platform;
pub mod session;
pub mod sim;

pub use config::{ConfigError, ControlMode, DifficultyPreset, SimConfig};
pub use session::{FrameStatus, Session, SessionSummary};

/// Game configuration constants (defaults for `SimConfig`)
pub mod consts {
    /// Controlled entity radius
    pub const PLAYER_RADIUS: f32 = 15.0;
    /// Per-tick displacement in velocity-step mode
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Hazards alive at session start
    pub const INITIAL_HAZARDS: usize = 6;
    /// Hazard radius range [min, max)
    pub const HAZARD_RADIUS_MIN: f32 = 8.0;
    pub const HAZARD_RADIUS_MAX: f32 = 20.0;
    /// Max per-axis hazard speed (units per tick)
    pub const HAZARD_MAX_SPEED: f32 = 2.0;

    /// Power-up pickup radius
    pub const POWER_UP_RADIUS: f32 = 10.0;

    /// Lives
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Shield lifetime in milliseconds
    pub const SHIELD_DURATION_MS: f64 = 5000.0;

    /// Score between difficulty spawns
    pub const HAZARD_SPAWN_INTERVAL: u64 = 500;
    pub const POWER_UP_SPAWN_INTERVAL: u64 = 800;
}
