//! Frame orchestration
//!
//! A `Session` owns the simulation state exclusively. Each animation frame
//! calls `frame` once: one tick, then render, HUD and audio fan-out. After
//! the game-over overlay has been drawn every further call returns `Halt`.

use serde::Serialize;

use crate::config::{ConfigError, ControlMode, SimConfig};
use crate::platform::{Frontend, HudSnapshot, SoundCue};
use crate::sim::{Arena, GameEvent, SimulationState, TickInput, tick};

/// Whether the host should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Halt,
}

/// End-of-run statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub ticks: u64,
    pub score: u64,
    pub lives: u8,
    pub game_over: bool,
    pub hazards_alive: usize,
    pub hits_taken: u32,
    pub hits_blocked: u32,
    pub power_ups_collected: u32,
}

pub struct Session {
    config: SimConfig,
    state: SimulationState,
    hits_taken: u32,
    hits_blocked: u32,
    power_ups_collected: u32,
    overlay_drawn: bool,
}

impl Session {
    /// Validate the config and start a fresh run
    pub fn new(config: SimConfig, arena: Arena, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = SimulationState::new(&config, arena, seed);
        log::info!(
            "Session started: seed={} arena={}x{} hazards={} mode={:?}",
            seed,
            arena.width,
            arena.height,
            state.hazards.len(),
            config.control_mode
        );
        Ok(Self {
            config,
            state,
            hits_taken: 0,
            hits_blocked: 0,
            power_ups_collected: 0,
            overlay_drawn: false,
        })
    }

    /// Start over with the same config
    pub fn restart(&mut self, arena: Arena, seed: u64) {
        self.state = SimulationState::new(&self.config, arena, seed);
        self.hits_taken = 0;
        self.hits_blocked = 0;
        self.power_ups_collected = 0;
        self.overlay_drawn = false;
        log::info!("Session restarted with seed: {}", seed);
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Switch between pointer and key control; takes effect next tick
    pub fn set_control_mode(&mut self, mode: ControlMode) {
        if self.config.control_mode != mode {
            log::info!("Control mode: {:?}", mode);
            self.config.control_mode = mode;
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct state access for scripted setups
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Run one tick and push its results to the frontend
    pub fn frame(&mut self, input: &TickInput, frontend: &mut impl Frontend) -> FrameStatus {
        if self.overlay_drawn {
            return FrameStatus::Halt;
        }

        let events = tick(&mut self.state, &self.config, input);
        self.record(&events);

        // One cue per kind per tick, even if several pickups land together
        let mut played: Vec<SoundCue> = Vec::with_capacity(3);
        for cue in events.iter().filter_map(cue_for) {
            if !played.contains(&cue) {
                frontend.play(cue);
                played.push(cue);
            }
        }

        let state = &self.state;
        frontend.clear(state.arena);
        for power_up in &state.power_ups {
            frontend.draw_power_up(power_up);
        }
        for hazard in &state.hazards {
            frontend.draw_hazard(hazard);
        }
        frontend.draw_player(&state.player, &state.effect);

        let remaining_ms = state.effect.remaining_ms(input.now_ms);
        frontend.update(&HudSnapshot {
            score: state.score,
            lives: state.lives,
            effect: state.effect.label(),
            effect_secs: (remaining_ms / 1000.0).ceil() as u32,
        });

        if state.is_over() {
            frontend.draw_game_over(state.arena, state.score);
            self.overlay_drawn = true;
            return FrameStatus::Halt;
        }
        FrameStatus::Continue
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.state.seed,
            ticks: self.state.time_ticks,
            score: self.state.score,
            lives: self.state.lives,
            game_over: self.state.is_over(),
            hazards_alive: self.state.hazards.len(),
            hits_taken: self.hits_taken,
            hits_blocked: self.hits_blocked,
            power_ups_collected: self.power_ups_collected,
        }
    }

    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Hit { .. } => self.hits_taken += 1,
                GameEvent::ShieldBlocked => self.hits_blocked += 1,
                GameEvent::Healed { .. }
                | GameEvent::HealWasted
                | GameEvent::ShieldGranted { .. } => self.power_ups_collected += 1,
                _ => {}
            }
        }
    }
}

/// Sound for an event, if it has one
fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::Hit { .. } => Some(SoundCue::Hit),
        GameEvent::Healed { .. } => Some(SoundCue::Heal),
        GameEvent::ShieldGranted { .. } => Some(SoundCue::Power),
        _ => None,
    }
}
