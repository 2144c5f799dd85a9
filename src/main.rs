//! Catch Ball entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement,
        HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use catch_ball::assets::BallImages;
    use catch_ball::audio::AudioPlayer;
    use catch_ball::consts::*;
    use catch_ball::render::Renderer;
    use catch_ball::sim::{FrameInput, GamePhase};
    use catch_ball::{Leaderboard, Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: FrameInput,
        renderer: Renderer,
        images: BallImages,
        audio: AudioPlayer,
        rng: Pcg32,
        // Track phase to update the DOM only on transitions
        last_phase: GamePhase,
    }

    impl Game {
        fn new(renderer: Renderer, seed: u64) -> Self {
            let settings = Settings::load();
            Self {
                session: Session::new(Leaderboard::load()),
                input: FrameInput::default(),
                renderer,
                images: BallImages::load(),
                audio: AudioPlayer::new(&settings, seed),
                rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9),
                last_phase: GamePhase::NameEntry,
            }
        }

        /// One animation frame: step, react to events, draw, sync the DOM
        fn frame(&mut self) {
            let events = self.session.frame(&self.input, js_sys::Date::now());

            if events.scored {
                self.audio.play_bounce();
            }
            if events.game_over {
                self.audio.play_game_over();
            }

            let image = self.images.for_score(self.session.state.score);
            self.renderer.draw(&self.session.state, image.as_ref());

            self.update_views();
        }

        /// Sync score readout and phase-dependent panels
        fn update_views(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.session.state.score.to_string()));
            }

            let phase = self.session.phase();
            if phase == self.last_phase {
                return;
            }

            set_visible(&document, "name-entry", phase == GamePhase::NameEntry);
            set_visible(&document, "game-over", phase == GamePhase::GameOver);

            match phase {
                GamePhase::NameEntry => {
                    render_leaderboard(&document, &self.session.leaderboard);
                }
                GamePhase::GameOver => {
                    if let Some(el) = document.get_element_by_id("final-score") {
                        el.set_text_content(Some(&self.session.state.score.to_string()));
                    }
                    if let Some(el) = document.get_element_by_id("final-name") {
                        el.set_text_content(Some(self.session.player_name()));
                    }
                    self.show_game_over_face(&document);
                }
                GamePhase::Playing => {}
            }

            self.last_phase = phase;
        }

        /// Put a random ball image on the game-over screen, or hide the
        /// slot when nothing loaded
        fn show_game_over_face(&mut self, document: &Document) {
            let Some(el) = document.get_element_by_id("face") else {
                return;
            };
            match self.images.random(&mut self.rng) {
                Some(img) => {
                    let _ = el.set_attribute("class", "");
                    if let Some(face) = el.dyn_ref::<HtmlImageElement>() {
                        face.set_src(&img.src());
                    }
                }
                None => {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// Toggle a panel by id using the shared `hidden` class
    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Rebuild the top-10 list shown on the name-entry screen
    fn render_leaderboard(document: &Document, board: &Leaderboard) {
        let Some(list) = document.get_element_by_id("leaderboard") else {
            return;
        };
        list.set_inner_html("");

        for (i, entry) in board.entries.iter().enumerate() {
            let Ok(row) = document.create_element("div") else {
                continue;
            };
            let _ = row.set_attribute("class", "leaderboard-row");
            row.set_text_content(Some(&format!(
                "{}. {}: {}",
                i + 1,
                entry.name,
                entry.score
            )));
            let _ = list.append_child(&row);
        }

        set_visible(document, "leaderboard", !board.is_empty());
    }

    /// Read the name field and try to start a run
    fn try_start(game: &Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(input) = document
            .get_element_by_id("player-name")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        if game.borrow_mut().session.submit_name(&input.value()) {
            set_visible(&document, "name-entry", false);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Catch Ball starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(Renderer::new(ctx), seed)));

        render_leaderboard(&document, &game.borrow().session.leaderboard);

        setup_input_handlers(&canvas, game.clone());
        setup_name_entry(game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);

        log::info!("Catch Ball running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard: discrete left/right drive
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move: absolute x in canvas space; an active mouse clears
        // any stale touch position
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let rect = canvas_clone.get_bounding_client_rect();
                let scale_x = canvas_clone.width() as f32 / rect.width() as f32;
                g.input.pointer_x = (event.client_x() as f32 - rect.left() as f32) * scale_x;
                g.input.touch_x = None;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start/move: absolute x, wins over the pointer while set
        for event_name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let rect = canvas_clone.get_bounding_client_rect();
                    let scale_x = canvas_clone.width() as f32 / rect.width() as f32;
                    g.input.touch_x =
                        Some((touch.client_x() as f32 - rect.left() as f32) * scale_x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_name_entry(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                try_start(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Enter in the name field starts too
        if let Some(input) = document.get_element_by_id("player-name") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    try_start(&game);
                }
            });
            let _ =
                input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.reset();
                log::info!("Back to name entry");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.frame();
        }

        request_animation_frame(game);
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
    log::info!("Catch Ball (native) starting...");
    log::info!("Run with `trunk serve` for the web version");

    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Autoplay smoke run: the paddle chases the ball until the run ends or
/// the frame cap is reached (perfect tracking never loses).
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use catch_ball::sim::{FrameInput, GamePhase};
    use catch_ball::{Leaderboard, Session};

    const FRAME_CAP: u32 = 20_000;

    let mut session = Session::new(Leaderboard::new());
    assert!(session.submit_name("autoplay"));

    let mut frames = 0u32;
    while session.phase() == GamePhase::Playing && frames < FRAME_CAP {
        let input = FrameInput {
            pointer_x: session.state.ball.pos.x,
            ..FrameInput::default()
        };
        session.frame(&input, frames as f64);
        frames += 1;
    }

    println!(
        "demo: {} catches in {} frames ({:?})",
        session.state.score,
        frames,
        session.phase()
    );
}
