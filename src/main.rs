//! Bouncing Balls entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_demo {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, PointerEvent};

    use bouncing_balls::renderer::canvas::CanvasPainter;
    use bouncing_balls::sim::{DemoState, FrameClock, PressOutcome, tick};

    /// Demo instance holding all state
    struct Demo {
        state: DemoState,
        painter: CanvasPainter,
        clock: FrameClock,
    }

    impl Demo {
        fn frame(&mut self, time: f64) {
            let dt = self.clock.frame_at(time);
            tick(&mut self.state, dt);
            if let Err(e) = self.painter.paint(&self.state.draw_list()) {
                log::warn!("Paint error: {:?}", e);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Bouncing Balls starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = match document.get_element_by_id("canvas") {
            Some(el) => el.dyn_into()?,
            None => {
                let el: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
                document.body().ok_or("no body")?.append_child(&el)?;
                el
            }
        };

        let seed = js_sys::Date::now() as u64;
        let state = DemoState::new(seed);
        let painter = CanvasPainter::new(
            &canvas,
            state.config.canvas.width,
            state.config.canvas.height,
            state.config.canvas.color,
        )?;
        log::info!("Demo initialized with seed: {}", seed);

        let demo = Rc::new(RefCell::new(Demo {
            state,
            painter,
            clock: FrameClock::new(),
        }));

        setup_pointer_handler(&canvas, demo.clone());
        request_animation_frame(demo);
        Ok(())
    }

    fn setup_pointer_handler(canvas: &HtmlCanvasElement, demo: Rc<RefCell<Demo>>) {
        let target = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            // Map client coordinates to canvas pixels (the element may be CSS-scaled)
            let rect = target.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            let x = (event.client_x() as f64 - rect.left()) * target.width() as f64 / rect.width();
            let y = (event.client_y() as f64 - rect.top()) * target.height() as f64 / rect.height();

            let mut d = demo.borrow_mut();
            if let Some(PressOutcome::NothingToRemove) =
                d.state.pointer_down(glam::Vec2::new(x as f32, y as f32))
            {
                log::info!("Nothing left to remove");
            }
        });
        let _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(demo: Rc<RefCell<Demo>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(demo, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(demo: Rc<RefCell<Demo>>, time: f64) {
        demo.borrow_mut().frame(time);
        request_animation_frame(demo);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_demo::run()
}

/// Headless run: start the balls, exercise the buttons, print a snapshot
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use bouncing_balls::sim::{ButtonKind, DemoState, run_for};

    env_logger::init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)?
            .as_millis() as u64,
    };
    log::info!("Bouncing Balls (headless) starting with seed {}", seed);

    let mut state = DemoState::new(seed);
    state.press(ButtonKind::Toggle);
    run_for(&mut state, 300);

    for _ in 0..3 {
        state.press(ButtonKind::Remove);
    }
    state.press(ButtonKind::Add);
    let destroyed = run_for(&mut state, 120)
        .iter()
        .filter(|r| r.destroyed.is_some())
        .count();
    log::info!(
        "{} balls active, {} fading, {} destroyed",
        state.population.active_len(),
        state.population.pending_len(),
        destroyed
    );

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
