//! Dodge Arena entry point
//!
//! Browser: wires canvas, input listeners and the animation-frame loop.
//! Native: runs a headless autopilot session and prints its summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use dodge_arena::platform::web::WebFrontend;
    use dodge_arena::sim::{Arena, HeldKeys, TickInput, steer};
    use dodge_arena::{ControlMode, FrameStatus, Session, SimConfig};

    /// Game instance holding all state
    struct Game {
        session: Session,
        frontend: WebFrontend,
        canvas: HtmlCanvasElement,
        /// Latest pointer position, sampled at the top of each tick
        pointer: Vec2,
        keys: HeldKeys,
        idle_mode: bool,
    }

    impl Game {
        fn arena(&self) -> Arena {
            Arena::new(self.canvas.width() as f32, self.canvas.height() as f32)
        }

        fn frame(&mut self, time: f64) -> FrameStatus {
            let mut input = TickInput {
                pointer: Some(self.pointer),
                keys: self.keys,
                ..TickInput::new(self.arena(), time)
            };
            if self.idle_mode {
                let steering = steer(self.session.state(), self.session.config());
                input.pointer = steering.pointer.or(input.pointer);
                input.keys = steering.keys;
            }
            self.session.frame(&input, &mut self.frontend)
        }

        /// Update held keys; returns false for non-movement keys
        fn set_key(&mut self, key: &str, held: bool) -> bool {
            match key {
                "ArrowUp" | "w" | "W" => self.keys.up = held,
                "ArrowDown" | "s" | "S" => self.keys.down = held,
                "ArrowLeft" | "a" | "A" => self.keys.left = held,
                "ArrowRight" | "d" | "D" => self.keys.right = held,
                _ => return false,
            }
            true
        }
    }

    fn resize_canvas(canvas: &HtmlCanvasElement) {
        let Some(window) = web_sys::window() else { return };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dodge Arena starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        resize_canvas(&canvas);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let arena = Arena::new(canvas.width() as f32, canvas.height() as f32);
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(SimConfig::default(), arena, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let game = Rc::new(RefCell::new(Game {
            session,
            frontend: WebFrontend::new(ctx, document),
            canvas: canvas.clone(),
            pointer: arena.center(),
            keys: HeldKeys::default(),
            idle_mode: false,
        }));

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Dodge Arena running with seed: {}", seed);
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Mouse move - pointer tracking (switches back from key control)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.pointer = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                g.session.set_control_mode(ControlMode::DirectTracking);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click after game over - restart
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let restart = {
                    let mut g = game.borrow_mut();
                    // Browsers only unlock audio inside a user gesture
                    g.frontend.audio.resume();
                    if g.session.is_over() {
                        let arena = g.arena();
                        g.session.restart(arena, js_sys::Date::now() as u64);
                        true
                    } else {
                        false
                    }
                };
                if restart {
                    request_animation_frame(game.clone());
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard - held movement keys (switch to key control), idle mode, mute
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.frontend.audio.resume();
                match event.key().as_str() {
                    "i" | "I" => {
                        g.idle_mode = !g.idle_mode;
                        log::info!("Idle mode: {}", g.idle_mode);
                    }
                    "m" | "M" => g.frontend.audio.toggle_muted(),
                    key => {
                        if g.set_key(key, true) {
                            g.session.set_control_mode(ControlMode::VelocityStep);
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().set_key(&event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize - the next tick picks up the new arena
        {
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                resize_canvas(&canvas);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let status = game.borrow_mut().frame(time);
        if status == FrameStatus::Continue {
            request_animation_frame(game);
        } else {
            log::info!("Game over - click to play again");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        web_sys::console::error_1(&e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run(std::env::args().skip(1)) {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;

    use dodge_arena::platform::Headless;
    use dodge_arena::sim::{Arena, TickInput, steer};
    use dodge_arena::{DifficultyPreset, FrameStatus, Session, SimConfig};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 5;

    /// Command line options
    #[derive(Debug, Default)]
    struct Options {
        config_path: Option<String>,
        preset: DifficultyPreset,
        seed: Option<u64>,
        max_ticks: Option<u64>,
    }

    fn parse(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
        let mut options = Options::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let v = args.next().ok_or("--seed needs a value")?;
                    options.seed = Some(v.parse().map_err(|_| format!("bad seed: {v}"))?);
                }
                "--max-ticks" => {
                    let v = args.next().ok_or("--max-ticks needs a value")?;
                    options.max_ticks =
                        Some(v.parse().map_err(|_| format!("bad tick count: {v}"))?);
                }
                "--preset" => {
                    let v = args.next().ok_or("--preset needs a value")?;
                    options.preset = DifficultyPreset::from_str(&v)
                        .ok_or_else(|| format!("unknown preset: {v}"))?;
                }
                flag if flag.starts_with("--") => return Err(format!("unknown flag: {flag}")),
                path => options.config_path = Some(path.to_string()),
            }
        }
        Ok(options)
    }

    pub fn run(args: impl Iterator<Item = String>) -> Result<(), Box<dyn Error>> {
        let options = parse(args)?;

        let config = match &options.config_path {
            Some(path) => SimConfig::from_json(&std::fs::read_to_string(path)?)?,
            None => SimConfig::from_preset(options.preset),
        };
        let seed = options.seed.unwrap_or(0xD0D6E);
        let arena = Arena::new(800.0, 600.0);

        log::info!("Dodge Arena (native, headless) - {} preset", options.preset.as_str());
        let mut session = Session::new(config, arena, seed)?;
        let mut frontend = Headless::new(600);

        for t in 0..options.max_ticks.unwrap_or(DEFAULT_MAX_TICKS) {
            let steering = steer(session.state(), session.config());
            let input = TickInput {
                pointer: steering.pointer,
                keys: steering.keys,
                ..TickInput::new(arena, t as f64 * FRAME_MS)
            };
            if session.frame(&input, &mut frontend) == FrameStatus::Halt {
                break;
            }
        }

        println!("{}", serde_json::to_string_pretty(&session.summary())?);
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> impl Iterator<Item = String> {
            list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
        }

        #[test]
        fn test_parse_options() {
            let options = parse(args(&["cfg.json", "--seed", "7", "--preset", "hard"])).unwrap();
            assert_eq!(options.config_path.as_deref(), Some("cfg.json"));
            assert_eq!(options.seed, Some(7));
            assert_eq!(options.preset, DifficultyPreset::Frantic);
            assert!(parse(args(&["--seed"])).is_err());
            assert!(parse(args(&["--bogus"])).is_err());
        }

        #[test]
        fn test_headless_run_completes() {
            assert!(run(args(&["--max-ticks", "120", "--seed", "1"])).is_ok());
        }
    }
}
