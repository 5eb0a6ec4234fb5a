//! Space Escape entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use glam::Vec2;
    use space_escape::consts::*;
    use space_escape::highscores::EXPORT_FILENAME;
    use space_escape::platform;
    use space_escape::renderer::{CanvasRenderer, build_scene};
    use space_escape::sim::{
        FixedStep, GameEvent, GamePhase, GameState, TextEdit, TickInput, tick,
    };
    use space_escape::{Leaderboard, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        clock: FixedStep,
        last_time: f64,
        /// Pending input, filled by event handlers between frames
        input: TickInput,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            for _ in 0..self.clock.advance(dt) {
                tick(&mut self.state, &self.input);

                // Clear one-shot inputs after processing
                self.input.clear_one_shots();
            }
        }

        /// React to what happened during the ticks
        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::GameOver { score, rank } => {
                        log::info!("Final score {} (rank {:?})", score, rank);
                        self.state.leaderboard.save();
                        if self.settings.export_on_game_over {
                            self.export_leaderboard();
                        }
                    }
                    GameEvent::LevelUp { level } => log::debug!("Level up -> {}", level),
                    GameEvent::RunStarted { name } => log::debug!("Pilot {} launched", name),
                    GameEvent::EnemyDestroyed { .. } => {}
                }
            }
        }

        fn export_leaderboard(&self) {
            if let Some(text) = self.state.leaderboard.export_text() {
                if let Err(e) = platform::download_text(EXPORT_FILENAME, &text) {
                    log::warn!("Leaderboard export failed: {:?}", e);
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            let scene = build_scene(&self.state, &self.settings);
            if let Err(e) = self.renderer.draw(&scene) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Match the canvas to the window and tell the sim
        fn resize(&mut self, window: &Window) {
            let (w, h) = viewport_size(window);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.input.viewport = Some(Vec2::new(w, h));
        }
    }

    fn viewport_size(window: &Window) -> (f32, f32) {
        let dim = |v: Result<JsValue, JsValue>, fallback: f32| {
            v.ok().and_then(|v| v.as_f64()).map(|v| v as f32).unwrap_or(fallback)
        };
        (
            dim(window.inner_width(), DEFAULT_WIDTH),
            dim(window.inner_height(), DEFAULT_HEIGHT),
        )
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Space Escape starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // No drawing surface, no game
        let Some(canvas) = document
            .query_selector("canvas")?
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element found, not starting");
            return Ok(());
        };
        let renderer = match CanvasRenderer::new(&canvas) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Canvas 2D unavailable, not starting: {:?}", e);
                return Ok(());
            }
        };

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed).with_leaderboard(Leaderboard::load());
        state.max_particles = settings.max_particles();

        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            settings,
            renderer,
            canvas,
            clock: FixedStep::default(),
            last_time: 0.0,
            input: TickInput::default(),
        }));
        game.borrow_mut().resize(&window);

        setup_input_handlers(&window, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Space Escape running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Mouse move - aim
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                game.borrow_mut().input.pointer = Some(pos);
            });
            window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse down - fire while held, universal click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.pointer =
                    Some(Vec2::new(event.client_x() as f32, event.client_y() as f32));
                g.input.click = true;
                g.input.pointer_down = true;
            });
            window.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_down = false;
            });
            window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let naming = g.state.phase == GamePhase::NameEntry;
                let key = event.key();
                match key.as_str() {
                    "ArrowUp" => g.input.force_level_up = true, // Debug: skip to next level
                    "Enter" => g.input.confirm = true,
                    "Escape" => g.input.cancel = true,
                    "Backspace" if naming => {
                        event.prevent_default();
                        g.input.text_edits.push(TextEdit::Backspace);
                    }
                    _ if naming => {
                        let mut chars = key.chars();
                        if let (Some(c), None) = (chars.next(), chars.next()) {
                            g.input.text_edits.push(TextEdit::Insert(c));
                        }
                    }
                    "i" | "I" => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(window) = web_sys::window() {
                    game.borrow_mut().resize(&window);
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.handle_events();
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Ten simulated minutes at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
const DEMO_TICKS: u64 = 10 * 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use space_escape::renderer::build_scene;
    use space_escape::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use space_escape::{Leaderboard, Settings};

    env_logger::init();
    log::info!("Space Escape (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    let settings = Settings::load();
    let mut state = GameState::new(seed).with_leaderboard(Leaderboard::load());
    state.max_particles = settings.max_particles();
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut kills = 0;
    for _ in 0..DEMO_TICKS {
        tick(&mut state, &input);
        for event in state.drain_events() {
            match event {
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::GameOver { .. } => state.leaderboard.save(),
                other => log::debug!("{:?}", other),
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let frame = build_scene(&state, &settings);
    log::info!(
        "Stopped after {} ticks: phase {:?}, {} kills, last frame {} draw commands",
        state.time_ticks,
        state.phase,
        kills,
        frame.len()
    );

    match state.leaderboard.export_text() {
        Some(text) => print!("{}", text),
        None => println!(
            "Autopilot survived the demo: score {} at level {}",
            state.score, state.level
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
