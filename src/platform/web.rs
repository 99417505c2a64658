//! Browser frontend: Canvas 2D drawing, DOM HUD, Web Audio cues

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, Document};

use super::{AudioSink, Hud, HudSnapshot, Renderer, SoundCue, HAZARD_COLOR, player_color, power_up_color};
use crate::audio::AudioManager;
use crate::sim::{ActiveEffect, Arena, Hazard, Player, PowerUp};

pub struct WebFrontend {
    ctx: CanvasRenderingContext2d,
    document: Document,
    pub audio: AudioManager,
}

impl WebFrontend {
    pub fn new(ctx: CanvasRenderingContext2d, document: Document) -> Self {
        Self {
            ctx,
            document,
            audio: AudioManager::new(),
        }
    }

    fn fill_circle(&self, x: f32, y: f32, radius: f32, color: &str) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(x as f64, y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

impl Renderer for WebFrontend {
    fn clear(&mut self, arena: Arena) {
        self.ctx
            .clear_rect(0.0, 0.0, arena.width as f64, arena.height as f64);
    }

    fn draw_player(&mut self, player: &Player, effect: &ActiveEffect) {
        self.fill_circle(player.pos.x, player.pos.y, player.radius, player_color(effect));
    }

    fn draw_hazard(&mut self, hazard: &Hazard) {
        self.fill_circle(hazard.pos.x, hazard.pos.y, hazard.radius, HAZARD_COLOR);
    }

    fn draw_power_up(&mut self, power_up: &PowerUp) {
        self.fill_circle(
            power_up.pos.x,
            power_up.pos.y,
            power_up.radius,
            power_up_color(power_up.kind),
        );
    }

    fn draw_game_over(&mut self, arena: Arena, score: u64) {
        let (w, h) = (arena.width as f64, arena.height as f64);
        self.ctx.set_fill_style_str("rgba(0,0,0,0.6)");
        self.ctx.fill_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str("#fff");
        self.ctx.set_font("40px sans-serif");
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text("GAME OVER", w / 2.0, h / 2.0);
        self.ctx.set_font("20px sans-serif");
        let _ = self
            .ctx
            .fill_text(&format!("Score: {score}"), w / 2.0, h / 2.0 + 40.0);
    }
}

impl Hud for WebFrontend {
    fn update(&mut self, snapshot: &HudSnapshot) {
        self.set_text("score", &format!("Score: {}", snapshot.score));
        self.set_text("lives", &format!("Lives: {}", snapshot.lives));
        let power = if snapshot.effect_secs > 0 {
            format!("Power: {} ({}s)", snapshot.effect, snapshot.effect_secs)
        } else {
            format!("Power: {}", snapshot.effect)
        };
        self.set_text("power", &power);
    }
}

impl AudioSink for WebFrontend {
    fn play(&mut self, cue: SoundCue) {
        self.audio.play(cue);
    }
}
