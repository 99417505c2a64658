//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `SimulationState`, owned by a
//! single caller and passed down by `&mut`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::ActiveEffect;
use super::geometry::{Arena, Body};
use super::spawn::{self, SpawnSchedule};
use crate::config::SimConfig;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Terminal
    GameOver,
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Unshielded hazard contact cost a life
    Hit { lives: u8 },
    /// Hazard destroyed against an active shield
    ShieldBlocked,
    Healed { lives: u8 },
    /// Heal collected at full lives
    HealWasted,
    ShieldGranted { expires_at_ms: f64 },
    ShieldExpired,
    HazardSpawned { id: u32 },
    PowerUpSpawned { id: u32, kind: PowerUpKind },
    GameOver { score: u64 },
}

/// The player-steered circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
}

impl Body for Player {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A mobile obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Body for Hazard {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Heal,
    Shield,
}

impl PowerUpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Heal => "Heal",
            PowerUpKind::Shield => "Shield",
        }
    }
}

/// A stationary pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
}

impl Body for PowerUp {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Ticks survived; +1 per running tick
    pub score: u64,
    /// Always within [0, max_lives]
    pub lives: u8,
    pub max_lives: u8,
    pub phase: GamePhase,
    /// Arena as of the latest tick
    pub arena: Arena,
    pub player: Player,
    /// Live hazards, stable iteration order (ascending insertion)
    pub hazards: Vec<Hazard>,
    pub power_ups: Vec<PowerUp>,
    pub effect: ActiveEffect,
    /// Difficulty scaling progress, one per configured rule
    pub schedules: Vec<SpawnSchedule>,
    /// Simulation tick counter (keeps counting the fatal tick)
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl SimulationState {
    /// Create a fresh session: player centered, initial hazards spawned
    pub fn new(config: &SimConfig, arena: Arena, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: config.starting_lives.min(config.max_lives),
            max_lives: config.max_lives,
            phase: GamePhase::Running,
            arena,
            player: Player {
                pos: arena.center(),
                radius: config.player_radius,
            },
            hazards: Vec::new(),
            power_ups: Vec::new(),
            effect: ActiveEffect::None,
            schedules: config.spawn_rules.iter().map(|r| SpawnSchedule::new(*r)).collect(),
            time_ticks: 0,
            next_id: 1,
        };

        for _ in 0..config.initial_hazards {
            let id = state.next_entity_id();
            let hazard = spawn::random_hazard(&mut state.rng, config, arena, id);
            state.hazards.push(hazard);
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take one life. Returns true if this ended the game.
    ///
    /// Lives never go below zero; reaching zero is the only way into
    /// `GameOver`, and it happens exactly once.
    pub fn lose_life(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            return true;
        }
        false
    }

    /// Add one life, capped. Returns false when already at the cap.
    pub fn gain_life(&mut self) -> bool {
        if self.lives >= self.max_lives {
            return false;
        }
        self.lives += 1;
        true
    }

    /// Per-tick score increment (no-op once over)
    pub fn advance_score(&mut self) {
        if !self.is_over() {
            self.score += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SimulationState {
        SimulationState::new(&SimConfig::default(), Arena::new(800.0, 600.0), 7)
    }

    #[test]
    fn test_new_state() {
        let state = state();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.hazards.len(), 6);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));

        // IDs are unique and ascending
        let ids: Vec<u32> = state.hazards.iter().map(|h| h.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_lives_bounds() {
        let mut state = state();
        assert!(state.gain_life());
        assert!(state.gain_life());
        assert_eq!(state.lives, 5);
        assert!(!state.gain_life());
        assert_eq!(state.lives, 5);

        state.lives = 1;
        assert!(state.lose_life());
        assert_eq!(state.lives, 0);
        assert!(state.is_over());
        // Already over: no further transition, no underflow
        assert!(!state.lose_life());
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_score_frozen_after_game_over() {
        let mut state = state();
        state.advance_score();
        assert_eq!(state.score, 1);
        state.phase = GamePhase::GameOver;
        state.advance_score();
        assert_eq!(state.score, 1);
    }
}
