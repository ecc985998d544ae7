//! Asteroid Field entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, KeyboardEvent};

    use asteroid_field::platform::web::AnimationFrameTicks;
    use asteroid_field::platform::{InputState, TickSource};
    use asteroid_field::renderer::canvas::CanvasSurface;
    use asteroid_field::renderer::render;
    use asteroid_field::sim::{GameEvent, GameState, autopilot, tick};
    use asteroid_field::{Settings, Tuning};

    /// HUD elements; any of them may be missing from the page
    struct Hud {
        score: Option<Element>,
        lives: Option<Element>,
    }

    impl Hud {
        fn find() -> Self {
            let document = web_sys::window().and_then(|w| w.document());
            let get = |id: &str| document.as_ref().and_then(|d| d.get_element_by_id(id));
            Self {
                score: get("score"),
                lives: get("lives"),
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        surface: CanvasSurface,
        input: InputState,
        settings: Settings,
        hud: Hud,
        /// Autopilot drives the ship instead of the keyboard
        demo: bool,
    }

    impl Game {
        /// One frame: read the surface size, update, then draw
        fn frame(&mut self, dt: f32) {
            let field = self.surface.playfield();
            let input = if self.demo {
                autopilot(&self.state)
            } else {
                self.input.snapshot(&self.settings.bindings)
            };

            tick(&mut self.state, &input, field, dt);
            self.handle_events();

            let commands = render(&self.state, field, &self.settings);
            self.surface.draw(&commands);
            self.update_hud();
        }

        fn handle_events(&self) {
            for event in &self.state.events {
                match *event {
                    GameEvent::LifeLost { remaining } => {
                        log::debug!("Life lost, {} remaining", remaining);
                    }
                    GameEvent::GameOver { score } => {
                        log::info!("Final score {} (seed {})", score, self.state.seed);
                    }
                    _ => {}
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            if let Some(el) = &self.hud.score {
                el.set_text_content(Some(&self.state.score().to_string()));
            }
            if let Some(el) = &self.hud.lives {
                el.set_text_content(Some(&self.state.lives().to_string()));
            }
        }

        fn restart(&mut self) {
            let field = self.surface.playfield();
            self.state.restart(field);
            self.input.release_all();
        }
    }

    /// Optional `<script id="tuning" type="application/json">` override
    fn load_tuning() -> Tuning {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("tuning"))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from page");
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning document, using defaults: {}", e);
                    Tuning::default()
                }
            },
            None => Tuning::default(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }
        log::info!("Asteroid Field starting...");

        let surface = match CanvasSurface::from_element_id("game") {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Canvas setup failed: {:?}", e);
                return;
            }
        };

        let tuning = load_tuning();
        let max_frame_ms = tuning.max_frame_ms();
        let seed = js_sys::Date::now() as u64;
        let field = surface.playfield();

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, tuning, field),
            surface,
            input: InputState::new(),
            settings: Settings::load(),
            hud: Hud::find(),
            demo: false,
        }));

        setup_keyboard(game.clone());
        setup_blur(game.clone());
        setup_restart_button(game.clone());

        let mut ticks = AnimationFrameTicks::new(max_frame_ms);
        ticks.on_tick(Box::new(move |dt| game.borrow_mut().frame(dt)));
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                match code.as_str() {
                    "KeyP" => {
                        g.demo = !g.demo;
                        g.input.release_all();
                        log::info!("Demo mode: {}", g.demo);
                    }
                    "KeyH" => {
                        g.settings.palette = g.settings.palette.toggled();
                        g.settings.save();
                        log::info!("Palette: {}", g.settings.palette.as_str());
                    }
                    _ => {
                        let Game { input, settings, .. } = &mut *g;
                        if input.handle_key(&settings.bindings, &code, true).is_some() {
                            event.prevent_default();
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Game { input, settings, .. } = &mut *g;
                input.handle_key(&settings.bindings, &event.code(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keys released while the window is unfocused never arrive; drop them all
    fn setup_blur(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            game.borrow_mut().input.release_all();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #restart button; restart unavailable");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Field (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    let tuning = headless::load_tuning(std::env::args().nth(1).as_deref());
    let seed = std::env::var("ASTEROID_FIELD_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);

    let summary = headless::run(tuning, seed);
    println!(
        "Seed {}: score {}, lives {}, {} frames{}",
        seed,
        summary.score,
        summary.lives,
        summary.frames,
        if summary.game_over { " (game over)" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use asteroid_field::consts::HEADLESS_FRAME_MS;
    use asteroid_field::platform::{ManualTicks, TickSource};
    use asteroid_field::sim::{GameEvent, GameState, Playfield, autopilot, tick};
    use asteroid_field::Tuning;

    const FIELD: Playfield = Playfield::new(800.0, 600.0);
    /// One simulated minute at 60 Hz
    const MAX_FRAMES: u32 = 60 * 60;

    pub struct Summary {
        pub score: u64,
        pub lives: u32,
        pub frames: u32,
        pub game_over: bool,
    }

    pub fn load_tuning(path: Option<&str>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}, using defaults: {}", path, e);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}, using defaults: {}", path, e);
                Tuning::default()
            }
        }
    }

    /// Play one autopilot session on a fixed 800x600 field
    pub fn run(tuning: Tuning, seed: u64) -> Summary {
        let mut ticks = ManualTicks::new(tuning.max_frame_ms());
        let state = Rc::new(RefCell::new(GameState::new(seed, tuning, FIELD)));

        let frame_state = Rc::clone(&state);
        ticks.on_tick(Box::new(move |dt| {
            let mut s = frame_state.borrow_mut();
            let input = autopilot(&s);
            tick(&mut s, &input, FIELD, dt);
            for event in &s.events {
                match event {
                    GameEvent::Fired => {}
                    other => log::debug!("frame {}: {:?}", s.time_ticks, other),
                }
            }
        }));

        let mut frames = 0;
        while frames < MAX_FRAMES && !state.borrow().is_game_over() {
            ticks.advance(HEADLESS_FRAME_MS);
            frames += 1;
        }

        let s = state.borrow();

        Summary {
            score: s.score(),
            lives: s.lives(),
            frames,
            game_over: s.is_game_over(),
        }
    }
}
