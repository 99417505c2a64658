//! Platform abstraction layer
//!
//! The simulation only ever talks to the outside world through these traits:
//! - `Renderer`: draw circles and the game-over overlay
//! - `Hud`: show score, lives and the active effect
//! - `AudioSink`: fire-and-forget sound cues
//!
//! Browser implementations live in `web` (wasm only); `Headless` is used by
//! the native binary.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::{ActiveEffect, Arena, Hazard, Player, PowerUp, PowerUpKind};

/// Sound cues the core can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Damaging hazard contact
    Hit,
    /// Heal pickup that restored a life
    Heal,
    /// Shield pickup
    Power,
}

/// HUD contents after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u8,
    /// "None" or "Shield"
    pub effect: &'static str,
    /// Whole seconds of effect left (0 when none)
    pub effect_secs: u32,
}

pub trait Renderer {
    /// Start a new frame
    fn clear(&mut self, arena: Arena);
    fn draw_player(&mut self, player: &Player, effect: &ActiveEffect);
    fn draw_hazard(&mut self, hazard: &Hazard);
    fn draw_power_up(&mut self, power_up: &PowerUp);
    /// Called once, on the tick the session ends
    fn draw_game_over(&mut self, arena: Arena, score: u64);
}

pub trait Hud {
    fn update(&mut self, snapshot: &HudSnapshot);
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Everything a session needs from its host
pub trait Frontend: Renderer + Hud + AudioSink {}

impl<T: Renderer + Hud + AudioSink> Frontend for T {}

/// Player fill color
pub fn player_color(effect: &ActiveEffect) -> &'static str {
    match effect {
        ActiveEffect::None => "#22d3ee",
        ActiveEffect::Shield { .. } => "#facc15",
    }
}

pub const HAZARD_COLOR: &str = "#ef4444";

/// Power-up fill color
pub fn power_up_color(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::Heal => "#22c55e",
        PowerUpKind::Shield => "#3b82f6",
    }
}

/// No-window frontend: drops draw calls, logs HUD and audio
#[derive(Debug, Default)]
pub struct Headless {
    /// Log the HUD every this many updates (0 = never)
    pub hud_every: u64,
    updates: u64,
    pub last_hud: Option<HudSnapshot>,
    pub game_over_drawn: bool,
}

impl Headless {
    pub fn new(hud_every: u64) -> Self {
        Self {
            hud_every,
            ..Default::default()
        }
    }
}

impl Renderer for Headless {
    fn clear(&mut self, _arena: Arena) {}
    fn draw_player(&mut self, _player: &Player, _effect: &ActiveEffect) {}
    fn draw_hazard(&mut self, _hazard: &Hazard) {}
    fn draw_power_up(&mut self, _power_up: &PowerUp) {}

    fn draw_game_over(&mut self, _arena: Arena, score: u64) {
        log::info!("GAME OVER - final score {}", score);
        self.game_over_drawn = true;
    }
}

impl Hud for Headless {
    fn update(&mut self, snapshot: &HudSnapshot) {
        self.updates += 1;
        if self.hud_every > 0 && self.updates.is_multiple_of(self.hud_every) {
            log::info!(
                "Score: {}  Lives: {}  Power: {}",
                snapshot.score,
                snapshot.lives,
                snapshot.effect
            );
        }
        self.last_hud = Some(snapshot.clone());
    }
}

impl AudioSink for Headless {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("Sound: {:?}", cue);
    }
}
