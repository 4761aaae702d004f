//! Brick Breaker entry point
//!
//! Web: wires the canvas, DOM and input listeners to a `Game` and runs it from
//! `requestAnimationFrame`. Native: plays a seeded headless session with a
//! paddle that follows the ball and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use brick_breaker::platform::web::WebPlatform;
    use brick_breaker::sim::TickInput;
    use brick_breaker::{Game, Settings, Tuning};

    /// Game plus the input gathered between frames
    struct Session {
        game: Game<WebPlatform>,
        input: TickInput,
    }

    impl Session {
        fn frame(&mut self, now_ms: f64) -> bool {
            self.input.now_ms = now_ms;
            let running = self.game.frame(&self.input);

            // One-shot inputs
            self.input.pause = false;
            self.input.pointer_x = None;
            running
        }
    }

    type Shared = Rc<RefCell<Session>>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let platform = WebPlatform::new(&canvas, document.clone())?;
        let game = Game::new(seed, Tuning::default(), Settings::load(), platform);
        log::info!("Game initialized with seed: {}", seed);

        let session = Rc::new(RefCell::new(Session {
            game,
            input: TickInput::default(),
        }));

        setup_keyboard(session.clone())?;
        setup_pointer(&canvas, session.clone())?;
        setup_start_button(session)?;

        Ok(())
    }

    fn setup_keyboard(session: Shared) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut s = session.borrow_mut();
                match event.key().as_str() {
                    "Right" | "ArrowRight" => s.input.right = true,
                    "Left" | "ArrowLeft" => s.input.left = true,
                    "p" | "P" | "Escape" => s.input.pause = true,
                    "m" | "M" => {
                        s.game.toggle_mute();
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut s = session.borrow_mut();
                match event.key().as_str() {
                    "Right" | "ArrowRight" => s.input.right = false,
                    "Left" | "ArrowLeft" => s.input.left = false,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Pointer x mapped from client space into field space
    fn setup_pointer(canvas: &HtmlCanvasElement, session: Shared) -> Result<(), JsValue> {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            if rect.width() <= 0.0 {
                return;
            }
            let scale = canvas_clone.width() as f64 / rect.width();
            let x = (event.client_x() as f64 - rect.left()) * scale;
            session.borrow_mut().input.pointer_x = Some(x as f32);
        });
        web_sys::window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_start_button(session: Shared) -> Result<(), JsValue> {
        let document = web_sys::window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?;
        let Some(button) = document.get_element_by_id("startButton") else {
            log::warn!("No start button, starting immediately");
            start(session);
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                if let Some(overlay) = document
                    .get_element_by_id("startOverlay")
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    let _ = overlay.style().set_property("display", "none");
                }
            }
            start(session.clone());
        });
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn start(session: Shared) {
        let now = now_ms();
        if session.borrow_mut().game.start(now) {
            request_animation_frame(session);
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn request_animation_frame(session: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(session, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(session: Shared, time: f64) {
        let running = session.borrow_mut().frame(time);
        if running {
            request_animation_frame(session);
            return;
        }

        // Terminal state: a fresh session needs a reload
        log::info!("Session over, reloading");
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: `brick-breaker [seed] [tuning.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::highscores::FileStore;
    use brick_breaker::platform::RecordingPlatform;
    use brick_breaker::sim::{GamePhase, TickInput};
    use brick_breaker::{Game, Settings, Tuning};

    /// Nominal display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten minutes of play
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Brick Breaker (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x00C0_FFEE);

    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Bad tuning file {}: {}, using defaults", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Failed to read tuning file {}: {}, using defaults", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let store = FileStore::default_location().unwrap_or_else(|| {
        log::warn!("No user data directory, keeping high score in the working directory");
        FileStore::new("highscore.json")
    });
    log::info!("High score file: {:?}", store.path());

    let mut game = Game::new(seed, tuning, Settings::load(), RecordingPlatform::with_store(store));
    let mut now_ms = 0.0;
    game.start(now_ms);

    let mut frames = 0;
    while frames < MAX_FRAMES {
        now_ms += FRAME_MS;
        frames += 1;
        let input = TickInput {
            pointer_x: Some(game.state().ball.pos.x),
            now_ms,
            ..Default::default()
        };
        if !game.frame(&input) {
            break;
        }
    }

    let state = game.state();
    let outcome = match state.phase {
        GamePhase::Victory => "victory",
        GamePhase::GameOver => "game over",
        _ => "time limit",
    };
    log::info!(
        "Finished after {} frames: {} (score {}, level {}, lives {}, high score {})",
        frames,
        outcome,
        state.score,
        state.level,
        state.lives,
        game.high_score()
    );
    println!(
        "seed {}: {} with score {} on level {} ({} cues played)",
        seed,
        outcome,
        state.score,
        state.level,
        game.platform().cues.len()
    );
}
