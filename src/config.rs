//! Game balance configuration
//!
//! Loaded from JSON (or built from a preset) and validated once, before a
//! session starts. The simulation never sees an invalid config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::spawn::{SpawnKind, SpawnRule};

/// How the controlled entity follows input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlMode {
    /// Snap to the latest pointer position every tick (no clamping)
    #[default]
    DirectTracking,
    /// Step by `player_speed` per held direction key, clamped inside the arena
    VelocityStep,
}

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Relaxed,
    #[default]
    Classic,
    Frantic,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Relaxed => "Relaxed",
            DifficultyPreset::Classic => "Classic",
            DifficultyPreset::Frantic => "Frantic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(DifficultyPreset::Relaxed),
            "classic" | "normal" => Some(DifficultyPreset::Classic),
            "frantic" | "hard" => Some(DifficultyPreset::Frantic),
            _ => None,
        }
    }

    /// Score between hazard spawns
    pub fn hazard_interval(&self) -> u64 {
        match self {
            DifficultyPreset::Relaxed => 600,
            DifficultyPreset::Classic => HAZARD_SPAWN_INTERVAL,
            DifficultyPreset::Frantic => 300,
        }
    }

    /// Score between power-up spawns
    pub fn power_up_interval(&self) -> u64 {
        match self {
            DifficultyPreset::Relaxed => 600,
            DifficultyPreset::Classic => POWER_UP_SPAWN_INTERVAL,
            DifficultyPreset::Frantic => 1000,
        }
    }

    /// Hazards alive at session start
    pub fn initial_hazards(&self) -> usize {
        match self {
            DifficultyPreset::Relaxed => 4,
            DifficultyPreset::Classic => INITIAL_HAZARDS,
            DifficultyPreset::Frantic => 10,
        }
    }
}

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("player radius must be positive and finite, got {0}")]
    PlayerRadius(f32),
    #[error("player speed must be positive and finite, got {0}")]
    PlayerSpeed(f32),
    #[error("power-up radius must be positive and finite, got {0}")]
    PowerUpRadius(f32),
    #[error("hazard radius range [{min}, {max}) must be positive and non-empty")]
    HazardRadius { min: f32, max: f32 },
    #[error("hazard max speed must be non-negative with a finite [-max, max) range, got {0}")]
    HazardSpeed(f32),
    #[error("starting lives {starting} must be within 1..={max}")]
    Lives { starting: u8, max: u8 },
    #[error("shield duration must be positive and finite, got {0} ms")]
    ShieldDuration(f64),
    #[error("spawn interval for {0:?} must be positive")]
    SpawnInterval(SpawnKind),
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub control_mode: ControlMode,

    // === Controlled entity ===
    pub player_radius: f32,
    /// Per-tick step in velocity-step mode
    pub player_speed: f32,

    // === Hazards ===
    pub initial_hazards: usize,
    pub hazard_radius_min: f32,
    pub hazard_radius_max: f32,
    /// Velocity components are drawn from [-max, max)
    pub hazard_max_speed: f32,

    // === Power-ups ===
    pub power_up_radius: f32,
    pub shield_duration_ms: f64,

    // === Lives ===
    pub starting_lives: u8,
    pub max_lives: u8,

    // === Difficulty scaling ===
    pub spawn_rules: Vec<SpawnRule>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            control_mode: ControlMode::DirectTracking,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,

            initial_hazards: INITIAL_HAZARDS,
            hazard_radius_min: HAZARD_RADIUS_MIN,
            hazard_radius_max: HAZARD_RADIUS_MAX,
            hazard_max_speed: HAZARD_MAX_SPEED,

            power_up_radius: POWER_UP_RADIUS,
            shield_duration_ms: SHIELD_DURATION_MS,

            starting_lives: STARTING_LIVES,
            max_lives: MAX_LIVES,

            spawn_rules: vec![
                SpawnRule::new(SpawnKind::Hazard, HAZARD_SPAWN_INTERVAL),
                SpawnRule::new(SpawnKind::PowerUp, POWER_UP_SPAWN_INTERVAL),
            ],
        }
    }
}

impl SimConfig {
    /// Create a config from a difficulty preset (other fields default)
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        Self {
            initial_hazards: preset.initial_hazards(),
            spawn_rules: vec![
                SpawnRule::new(SpawnKind::Hazard, preset.hazard_interval()),
                SpawnRule::new(SpawnKind::PowerUp, preset.power_up_interval()),
            ],
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.player_radius) {
            return Err(ConfigError::PlayerRadius(self.player_radius));
        }
        if !positive(self.player_speed) {
            return Err(ConfigError::PlayerSpeed(self.player_speed));
        }
        if !positive(self.power_up_radius) {
            return Err(ConfigError::PowerUpRadius(self.power_up_radius));
        }
        // Sampling needs a finite span, not just finite bounds
        if !positive(self.hazard_radius_min)
            || !self.hazard_radius_max.is_finite()
            || self.hazard_radius_max <= self.hazard_radius_min
            || !(self.hazard_radius_max - self.hazard_radius_min).is_finite()
        {
            return Err(ConfigError::HazardRadius {
                min: self.hazard_radius_min,
                max: self.hazard_radius_max,
            });
        }
        if !(2.0 * self.hazard_max_speed).is_finite() || self.hazard_max_speed < 0.0 {
            return Err(ConfigError::HazardSpeed(self.hazard_max_speed));
        }
        if self.starting_lives == 0 || self.starting_lives > self.max_lives {
            return Err(ConfigError::Lives {
                starting: self.starting_lives,
                max: self.max_lives,
            });
        }
        if !(self.shield_duration_ms.is_finite() && self.shield_duration_ms > 0.0) {
            return Err(ConfigError::ShieldDuration(self.shield_duration_ms));
        }
        if let Some(rule) = self.spawn_rules.iter().find(|r| r.interval == 0) {
            return Err(ConfigError::SpawnInterval(rule.kind));
        }
        Ok(())
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
        for preset in [
            DifficultyPreset::Relaxed,
            DifficultyPreset::Classic,
            DifficultyPreset::Frantic,
        ] {
            assert!(SimConfig::from_preset(preset).validate().is_ok(), "{}", preset.as_str());
        }
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(DifficultyPreset::from_str("HARD"), Some(DifficultyPreset::Frantic));
        assert_eq!(DifficultyPreset::from_str("classic"), Some(DifficultyPreset::Classic));
        assert_eq!(DifficultyPreset::from_str("nope"), None);
    }

    #[test]
    fn test_rejects_zero_spawn_interval() {
        let mut config = SimConfig::default();
        config.spawn_rules[1].interval = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnInterval(SpawnKind::PowerUp))
        ));
    }

    #[test]
    fn test_rejects_bad_radius_range() {
        let config = SimConfig {
            hazard_radius_min: 20.0,
            hazard_radius_max: 8.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::HazardRadius { .. })));

        let config = SimConfig {
            hazard_radius_min: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::HazardRadius { .. })));

        let config = SimConfig {
            player_radius: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::PlayerRadius(_))));
    }

    #[test]
    fn test_rejects_unsampleable_ranges() {
        let config = SimConfig {
            hazard_max_speed: f32::MAX,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::HazardSpeed(_))));
        assert!(SimConfig::from_json(&serde_json::to_string(&config).unwrap()).is_err());

        let config = SimConfig {
            hazard_radius_min: f32::MIN_POSITIVE,
            hazard_radius_max: f32::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = SimConfig {
            hazard_max_speed: f32::MAX / 2.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        // Accepted configs must build a state without panicking
        let state = crate::sim::SimulationState::new(&config, crate::sim::Arena::new(800.0, 600.0), 1);
        assert_eq!(state.hazards.len(), INITIAL_HAZARDS);
    }

    #[test]
    fn test_rejects_bad_lives() {
        let config = SimConfig {
            starting_lives: 6,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Lives { starting: 6, max: 5 })
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let config = SimConfig::from_json(
            r#"{ "control_mode": "VelocityStep", "spawn_rules": [{ "kind": "Hazard", "interval": 600 }] }"#,
        )
        .unwrap();
        assert_eq!(config.control_mode, ControlMode::VelocityStep);
        assert_eq!(config.spawn_rules.len(), 1);
        assert_eq!(config.spawn_rules[0].interval, 600);
        assert_eq!(config.starting_lives, STARTING_LIVES);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            SimConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "shield_duration_ms": 0.0 }"#),
            Err(ConfigError::ShieldDuration(_))
        ));
    }
}
