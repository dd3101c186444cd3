//! Dot Rush entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use dot_rush::GameConfig;
    use dot_rush::renderer::CanvasSurface;
    use dot_rush::sim::{Stage, Vector};

    /// Game instance holding all state
    struct Game {
        stage: Stage,
        surface: CanvasSurface,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dot Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let body = document.body().expect("no body");

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .expect("failed to create canvas")
            .dyn_into()
            .expect("not a canvas");
        body.append_child(&canvas).expect("failed to attach canvas");

        let surface = CanvasSurface::new(canvas.clone()).expect("no 2d context");

        let seed = js_sys::Date::now() as u64;
        let config = GameConfig::load();
        let game = Rc::new(RefCell::new(Game {
            stage: Stage::new(config, seed),
            surface,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());

        // Start frame loop
        request_animation_frame(game);

        log::info!("Dot Rush running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down: click economy and hit tests
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vector::new(event.page_x() as f32, event.page_y() as f32);
                game.borrow_mut().stage.pointer_down(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move: remembered for fleeing dots
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vector::new(event.page_x() as f32, event.page_y() as f32);
                game.borrow_mut().stage.pointer_move(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("window gone, stopping frame loop");
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
            let Game { stage, surface } = &mut *g;
            stage.tick(time, surface);
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
    log::info!("Dot Rush (native) starting...");
    log::info!("Native mode plays a headless demo - run with `trunk serve` for the web version");

    run_headless(DEMO_SEED);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
const DEMO_SEED: u64 = 42;

/// Play the seeded headless demo and print the final frame's texts
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seed: u64) {
    use dot_rush::GameConfig;
    use dot_rush::demo;
    use dot_rush::renderer::RecordingSurface;

    let mut surface = RecordingSurface::new(1280.0, 720.0);
    demo::run_headless(GameConfig::load(), seed, &mut surface);

    for text in surface.texts() {
        println!("{}", text);
    }
}
