//! Spring Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PageTransitionEvent, Window};

    use spring_runner::platform::AnimationLoop;
    use spring_runner::renderer::{Palette, RenderState, scene};
    use spring_runner::sim::{Level, Status};
    use spring_runner::{Action, FrameDriver, HudSnapshot, Settings, Toggle};

    thread_local! {
        /// The running frame loop; dropping it stops the game
        static FRAME_LOOP: RefCell<Option<AnimationLoop>> = const { RefCell::new(None) };
    }

    struct Game {
        driver: FrameDriver,
        render_state: Option<RenderState>,
        settings: Settings,
        palette: Palette,
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        shown_best: Option<f32>,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            Self {
                driver: FrameDriver::new(Level::standard()),
                render_state: None,
                palette: Palette::for_settings(&settings),
                settings,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                shown_best: None,
            }
        }

        /// Step the driver and track FPS. Returns the HUD snapshot on change.
        fn update(&mut self, time: f64) -> Option<HudSnapshot> {
            let hud = self.driver.frame(time);

            // FPS over a rolling 60-frame window
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            hud
        }

        fn render(&mut self) {
            let (Some(render_state), Some(state)) =
                (self.render_state.as_mut(), self.driver.state())
            else {
                return;
            };

            let vertices = scene::build(state, &self.palette);
            match render_state.render(&vertices, self.palette.background) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    log::warn!("Surface lost, reconfiguring");
                    let (w, h) = render_state.size;
                    let view = render_state.view;
                    render_state.resize(w, h, view);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn update_hud(&mut self, hud: &HudSnapshot) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(&document, "#hud-time .hud-value", &hud.time_text());
            set_text(
                &document,
                "#hud-coins .hud-value",
                &format!("{}/{}", hud.coins, hud.total_coins),
            );

            let (class, message) = match hud.status {
                Status::InProgress => ("hidden", ""),
                Status::Won => ("", "You made it!"),
                Status::Lost => ("", "Game over"),
            };
            if let Some(el) = document.get_element_by_id("status-overlay") {
                let _ = el.set_attribute("class", class);
            }
            set_text(&document, "#status-overlay .message", message);

            let best = self.driver.best_time();
            if self.settings.show_best_time && best.get() != self.shown_best {
                set_text(&document, "#hud-best .hud-value", &best.display());
                self.shown_best = best.get();
            }
        }

        /// Flip a display preference, apply it and persist it
        fn apply_toggle(&mut self, toggle: Toggle) {
            let on = self.settings.toggle(toggle);
            log::info!("{:?} {}", toggle, if on { "on" } else { "off" });

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            match toggle {
                Toggle::Fps => set_visible(&document, "hud-fps", on),
                Toggle::BestTime => {
                    set_visible(&document, "hud-best", on);
                    if on {
                        let best = self.driver.best_time();
                        set_text(&document, "#hud-best .hud-value", &best.display());
                        self.shown_best = best.get();
                    }
                }
                Toggle::HighContrast => self.palette = Palette::for_settings(&self.settings),
            }
            self.settings.save();
        }

        fn update_fps_hud(&self) {
            if !self.settings.show_fps {
                return;
            }
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_text(&document, "#hud-fps .hud-value", &self.fps.to_string());
            }
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "hud-item" } else { "hud-item hidden" });
        }
    }

    fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&format!("{context}: {e}"))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Spring Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Physical pixels for the surface, CSS pixels for the camera
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let view = Vec2::new(client_w as f32, client_h as f32);

        let settings = Settings::load();
        set_visible(&document, "hud-fps", settings.show_fps);
        set_visible(&document, "hud-best", settings.show_best_time);

        let game = Rc::new(RefCell::new(Game::new(settings)));
        game.borrow_mut().driver.set_viewport(view.x, view.y);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_error("Failed to create surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_error("Failed to get adapter", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, view)
            .await
            .map_err(|e| js_error("Failed to create device", e))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_keyboard(&window, game.clone())?;
        setup_restart_button(&document, game.clone())?;
        setup_teardown(&window, game.clone())?;

        start_frame_loop(game)?;

        log::info!("Spring Runner running!");
        Ok(())
    }

    fn start_frame_loop(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let frame_loop = AnimationLoop::start(move |time| {
            let mut g = game.borrow_mut();
            if let Some(hud) = g.update(time) {
                g.update_hud(&hud);
            }
            g.update_fps_hud();
            g.render();
        })?;
        FRAME_LOOP.with(|slot| *slot.borrow_mut() = Some(frame_loop));
        Ok(())
    }

    fn setup_keyboard(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(toggle) = Toggle::from_key_code(&event.code()) {
                    if !event.repeat() {
                        game.borrow_mut().apply_toggle(toggle);
                    }
                    return;
                }
                let Some(action) = Action::from_key_code(&event.code()) else {
                    return;
                };
                event.prevent_default();
                // Holding R must not reset every repeat
                if action == Action::Reset && event.repeat() {
                    return;
                }
                game.borrow_mut().driver.key_down(action);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = Action::from_key_code(&event.code()) {
                    game.borrow_mut().driver.key_up(action);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key-ups are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().driver.input_mut().release_all();
                log::info!("Window blurred, keys released");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().driver.reset();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_teardown(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                // Drop the loop first so no frame runs against a torn-down driver
                FRAME_LOOP.with(|slot| slot.borrow_mut().take());
                game.borrow_mut().driver.teardown();
            });
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Restored from the back/forward cache: start a fresh run
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            let running = FRAME_LOOP.with(|slot| slot.borrow().is_some());
            if !event.persisted() || running {
                return;
            }
            game.borrow_mut().driver.reset();
            match start_frame_loop(game.clone()) {
                Ok(()) => log::info!("Page restored, run restarted"),
                Err(e) => log::error!("Could not restart frame loop: {:?}", e),
            }
        });
        window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use spring_runner::FrameDriver;
    use spring_runner::sim::Level;

    env_logger::init();
    log::info!("Spring Runner (native) starting headless autopilot sessions");

    let mut driver = FrameDriver::new(Level::standard());
    let mut clock_ms = 0.0;
    for seed in 1..=headless::SESSIONS {
        headless::run_session(&mut driver, seed, &mut clock_ms);
    }

    log::info!("Best time this session: {}", driver.best_time().display());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use spring_runner::FrameDriver;
    use spring_runner::autopilot::Autopilot;
    use spring_runner::consts::TIME_BUDGET;
    use spring_runner::sim::Status;

    pub const SESSIONS: u64 = 5;
    /// 60 Hz display
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Play one run to completion with a seeded autopilot
    pub fn run_session(driver: &mut FrameDriver, seed: u64, clock_ms: &mut f64) {
        driver.reset();
        let mut pilot = Autopilot::new(seed);
        // A few spare frames past the budget so the timeout always lands
        let max_frames = (TIME_BUDGET as f64 * 60.0) as u32 + 60;

        for _ in 0..max_frames {
            match driver.state_and_input() {
                (Some(state), input) if state.status == Status::InProgress => {
                    pilot.drive(state, input)
                }
                _ => break,
            }
            driver.frame(*clock_ms);
            *clock_ms += FRAME_MS;
        }

        let Some(hud) = driver.latest_snapshot() else {
            log::warn!("Session {} produced no snapshot", seed);
            return;
        };
        log::info!(
            "Session {}: {} with {}/{} coins, {} left",
            seed,
            hud.status.as_str(),
            hud.coins,
            hud.total_coins,
            hud.time_text()
        );
        match serde_json::to_string(&hud) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Could not serialize snapshot: {}", e),
        }
    }
}
