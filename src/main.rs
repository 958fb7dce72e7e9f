//! Flappy Magic entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_magic::consts::{REFERENCE_FRAME_MS, WING_FLAP_MS};
    use flappy_magic::persistence::LocalStorageStore;
    use flappy_magic::platform::{self, FrameLoop};
    use flappy_magic::renderer::RenderState;
    use flappy_magic::sim::{GameEvent, GamePhase, Playfield, SeededGaps};
    use flappy_magic::{Session, Tuning};

    /// Element holding optional JSON tuning overrides
    const TUNING_ELEMENT_ID: &str = "flappy-tuning";

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore, SeededGaps>,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        last_time: f64,
        /// Remaining wing squash time after a flap
        wing_ms: f32,
    }

    impl Game {
        /// One animation frame. Returns whether another frame is wanted.
        fn frame(&mut self, time: f64) -> bool {
            let elapsed = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                REFERENCE_FRAME_MS as f64
            };
            self.last_time = time;

            let running = self.session.tick(elapsed);
            self.wing_ms = (self.wing_ms - elapsed as f32).max(0.0);
            self.handle_events();
            self.render();
            self.update_hud();

            if !running {
                self.last_time = 0.0;
            }
            running
        }

        fn handle_events(&mut self) {
            for event in self.session.drain_events() {
                match event {
                    GameEvent::Flapped => self.wing_ms = WING_FLAP_MS,
                    GameEvent::Crashed(_) => flash_hit(),
                    _ => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let wing_squash = self.wing_ms / WING_FLAP_MS;
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.session.state(), wing_squash) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let playfield = render_state.playfield;
                        render_state.resize(w, h, playfield);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD and overlay screens in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.session.state();

            set_text(&document, "hud-score", &state.score.to_string());
            set_text(&document, "hud-best", &state.display_best().to_string());
            set_text(
                &document,
                "flap-hint",
                platform::flap_hint(platform::viewport_width()),
            );

            set_visible(&document, "start-screen", state.phase == GamePhase::Idle);
            set_visible(&document, "hud", state.phase == GamePhase::Running);
            set_visible(&document, "autopilot-badge", self.session.autopilot);

            let ended = state.phase == GamePhase::Ended;
            set_visible(&document, "game-over", ended);
            if ended {
                set_text(&document, "final-score", &state.score.to_string());
                set_text(&document, "final-best", &state.display_best().to_string());
            }
        }

        /// Refit to the viewport; only the width reaches the simulation
        fn resize(&mut self) {
            let viewport = platform::viewport_playfield();
            self.session.resize(viewport.width);
            let playfield = self.session.state().playfield;
            let (width, height) = fit_canvas(&self.canvas, &playfield);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height, playfield);
            }
            log::debug!("Resized to {}x{}", playfield.width, playfield.height);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    /// Presses on overlay buttons belong to their click handlers
    fn from_button(event: &web_sys::Event) -> bool {
        event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest("button").ok().flatten())
            .is_some()
    }

    /// Restart the CSS flash animation on the overlay
    fn flash_hit() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("hit-flash") {
            let classes = el.class_list();
            let _ = classes.remove_1("active");
            // Forces a reflow so the animation restarts
            let _ = el.client_width();
            let _ = classes.add_1("active");
        }
    }

    /// Size the canvas to the playfield in CSS pixels and its backing store
    /// in device pixels. Returns the backing size.
    fn fit_canvas(canvas: &HtmlCanvasElement, playfield: &Playfield) -> (u32, u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let _ = canvas.set_attribute(
            "style",
            &format!(
                "width: {}px; height: {}px",
                playfield.width, playfield.height
            ),
        );
        let width = (playfield.width as f64 * dpr).round() as u32;
        let height = (playfield.height as f64 * dpr).round() as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    fn load_tuning(document: &Document) -> Tuning {
        let Some(text) = document
            .get_element_by_id(TUNING_ELEMENT_ID)
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&text) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Tuning::default()
            }
        }
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        playfield: Playfield,
    ) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| log::error!("Failed to create surface: {}", e))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::error!("Failed to get adapter: {}", e))
            .ok()?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, playfield)
            .await
            .map_err(|e| log::error!("Failed to create device: {}", e))
            .ok()
    }

    /// Redraw and schedule frames after a discrete input
    fn after_input(game: &Rc<RefCell<Game>>, frames: &FrameLoop) {
        let mut g = game.borrow_mut();
        g.handle_events();
        if g.session.is_running() {
            frames.arm();
        } else {
            g.render();
        }
        g.update_hud();
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Flappy Magic starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let tuning = load_tuning(&document);
        let playfield = platform::viewport_playfield();
        let (width, height) = fit_canvas(&canvas, &playfield);

        let seed = platform::now_ms() as u64;
        let session = Session::new(
            tuning,
            playfield,
            LocalStorageStore::default(),
            SeededGaps::new(seed),
        );
        log::info!(
            "Game initialized with seed {} on a {}x{} playfield (best {})",
            seed,
            playfield.width,
            playfield.height,
            session.best().value()
        );

        let render_state = init_renderer(&canvas, width, height, playfield).await;
        if render_state.is_none() {
            log::warn!("Running without a renderer");
        }

        let game = Rc::new(RefCell::new(Game {
            session,
            render_state,
            canvas: canvas.clone(),
            last_time: 0.0,
            wing_ms: 0.0,
        }));

        let frames = {
            let game = game.clone();
            Rc::new(FrameLoop::new(move |time| game.borrow_mut().frame(time)))
        };

        // Pointer input covers the whole stage so taps on the overlays count
        let stage = document
            .get_element_by_id("stage")
            .unwrap_or_else(|| canvas.clone().into());
        setup_input_handlers(&stage, game.clone(), frames.clone());
        setup_buttons(&document, game.clone(), frames.clone());
        setup_resize(game.clone());
        setup_visibility(&document, game.clone(), frames);

        // Idle screen: one static frame until the first input
        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
        }

        log::info!("Flappy Magic ready!");
    }

    fn setup_input_handlers(
        stage: &web_sys::Element,
        game: Rc<RefCell<Game>>,
        frames: Rc<FrameLoop>,
    ) {
        // Keyboard
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let frames = frames.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        game.borrow_mut().session.flap();
                    }
                    "KeyI" => {
                        let mut g = game.borrow_mut();
                        g.session.autopilot = !g.session.autopilot;
                        log::info!("Autopilot: {}", g.session.autopilot);
                    }
                    _ => return,
                }
                after_input(&game, &frames);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch; preventing the default also suppresses the emulated mousedown
        {
            let game = game.clone();
            let frames = frames.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if from_button(&event) {
                    return;
                }
                event.prevent_default();
                game.borrow_mut().session.flap();
                after_input(&game, &frames);
            });
            let _ = stage
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if from_button(&event) {
                    return;
                }
                game.borrow_mut().session.flap();
                after_input(&game, &frames);
            });
            let _ = stage
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>, frames: Rc<FrameLoop>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let frames = frames.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.start();
                after_input(&game, &frames);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.restart();
                log::info!("Game restarted");
                after_input(&game, &frames);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.resize();
            if !g.session.is_running() {
                g.render();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Stop scheduling frames while the tab is hidden
    fn setup_visibility(document: &Document, game: Rc<RefCell<Game>>, frames: Rc<FrameLoop>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                if frames.is_armed() {
                    frames.cancel();
                    log::info!("Frame loop paused (tab hidden)");
                }
            } else {
                let mut g = game.borrow_mut();
                if g.session.is_running() {
                    g.last_time = 0.0;
                    frames.arm();
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Magic (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| flappy_magic::platform::now_ms() as u64);
    headless_demo(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Let the autopilot play one run at a steady 60 Hz and report the result
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(seed: u64) {
    use flappy_magic::consts::REFERENCE_FRAME_MS;
    use flappy_magic::persistence::MemoryStore;
    use flappy_magic::platform::viewport_playfield;
    use flappy_magic::sim::{GameEvent, SeededGaps};
    use flappy_magic::{Session, Tuning};

    const MAX_FRAMES: u32 = 60 * 60 * 5;

    let mut session = Session::new(
        Tuning::default(),
        viewport_playfield(),
        MemoryStore::new(),
        SeededGaps::new(seed),
    );
    session.autopilot = true;
    session.start();

    let mut frames = 0;
    while frames < MAX_FRAMES {
        let running = session.tick(REFERENCE_FRAME_MS as f64);
        frames += 1;
        for event in session.drain_events() {
            match event {
                GameEvent::Scored { score } => log::debug!("Frame {}: score {}", frames, score),
                GameEvent::Crashed(kind) => log::info!("Frame {}: crashed ({:?})", frames, kind),
                _ => {}
            }
        }
        if !running {
            break;
        }
    }

    let state = session.state();
    println!(
        "seed {}: score {} after {} frames ({:?}), best {}",
        seed,
        state.score,
        frames,
        state.phase,
        state.display_best()
    );
}
