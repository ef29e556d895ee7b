//! Naval Strike entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build drives the simulation from requestAnimationFrame; the
//! native build plays one headless autopilot match and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use glam::Vec2;
    use naval_strike::audio::{AudioManager, SoundEffect};
    use naval_strike::consts::*;
    use naval_strike::hud::{HudSnapshot, kill_caption};
    use naval_strike::renderer::{RenderState, build_frame};
    use naval_strike::sim::{Field, Session, SessionPhase, TickInput, tick};
    use naval_strike::{QualityPreset, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        audio: AudioManager,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Last HUD written to the DOM, to skip redundant writes
        last_hud: Option<HudSnapshot>,
        /// Newest kill caption not yet shown
        kill_feed: Option<String>,
    }

    impl Game {
        fn new(session: Session, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                session,
                settings,
                audio,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                last_hud: None,
                kill_feed: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.session, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.fire = None;
                self.input.toggle_scene = false;
            }
            if substeps == MAX_SUBSTEPS {
                // Drop the backlog rather than spiral
                self.accumulator = 0.0;
            }

            for event in self.session.drain_events() {
                if let Some(effect) = SoundEffect::from_event(&event) {
                    self.audio.play(effect);
                }
                if let Some(caption) = kill_caption(&event) {
                    self.kill_feed = Some(caption);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let vertices = build_frame(&self.session, &self.settings, time / 1000.0);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let field = render_state.field;
                        render_state.resize(w, h, field);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            if let Some(caption) = self.kill_feed.take() {
                set_text(document, "killFeed", &caption);
            }

            let hud = HudSnapshot::from_session(&self.session);
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            set_text(document, "score", &hud.score.to_string());
            set_text(document, "timer", &hud.timer_text());
            set_text(document, "combo", hud.combo_text().as_deref().unwrap_or(""));
            set_text(document, "reloadText", hud.reload_label);
            set_text(document, "sceneToggle", hud.scene_button_text());

            if let Some(bar) = document
                .get_element_by_id("reloadBar")
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
            {
                let _ = bar
                    .style()
                    .set_property("width", &format!("{}%", hud.reload_percent));
            }

            // Show/hide game over
            set_hidden(document, "gameOverScreen", hud.phase != SessionPhase::Ended);
            if let Some(stats) = hud.final_stats {
                if let Some(el) = document
                    .query_selector("#finalScore span")
                    .ok()
                    .flatten()
                {
                    el.set_text_content(Some(&stats.score.to_string()));
                }
                set_text(document, "totalKills", &stats.kills.to_string());
                set_text(document, "maxCombo", &stats.max_combo.to_string());
                set_text(document, "accuracy", &stats.accuracy.to_string());
            }

            self.last_hud = Some(hud);
        }

        /// Canvas changed size: new field bounds for both sim and renderer
        fn resize(&mut self, canvas: &HtmlCanvasElement, dpr: f64) {
            let (field, width, height) = measure(canvas, dpr);
            canvas.set_width(width);
            canvas.set_height(height);
            self.session.resize(field);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height, field);
            }
            log::debug!("Resized to {}x{} ({}x{} px)", field.width, field.height, width, height);
        }

        fn start(&mut self) {
            self.audio.resume();
            self.session.start();
            self.reset_loop();
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.audio.resume();
            self.session.restart(seed);
            self.reset_loop();
            // Blank out the previous match's caption
            self.kill_feed = Some(String::new());
            log::info!("Game restarted with seed: {}", self.session.seed());
        }

        fn reset_loop(&mut self) {
            self.accumulator = 0.0;
            let autopilot = self.input.autopilot;
            self.input = TickInput {
                autopilot,
                ..Default::default()
            };
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    /// CSS-pixel field plus physical backing size for a canvas
    fn measure(canvas: &HtmlCanvasElement, dpr: f64) -> (Field, u32, u32) {
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let field = Field::new(client_w as f32, client_h as f32);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        (field, width, height)
    }

    /// Tuning from the page's `<script id="tuning">` block, if any
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning ({}), using defaults", e);
                Tuning::default()
            }
        }
    }

    fn is_mobile() -> bool {
        web_sys::window()
            .and_then(|w| w.navigator().user_agent().ok())
            .map(|ua| {
                let ua = ua.to_lowercase();
                ["android", "iphone", "ipad", "ipod", "mobile"]
                    .iter()
                    .any(|needle| ua.contains(needle))
            })
            .unwrap_or(false)
    }

    /// Pointer position relative to the canvas, in CSS pixels
    fn touch_point(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(Vec2::new(
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    pub async fn run() -> Result<(), String> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| e.to_string())?;

        log::info!("Naval Strike starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "gameCanvas is not a canvas")?;

        let dpr = window.device_pixel_ratio();
        let (field, width, height) = measure(&canvas, dpr);
        canvas.set_width(width);
        canvas.set_height(height);

        let mut settings = Settings::load();
        if is_mobile() && settings.quality != QualityPreset::Low {
            log::info!("Mobile device detected, using Low quality");
            settings.apply_preset(QualityPreset::Low);
        }
        let mut tuning = load_tuning(&document);
        settings.apply_to(&mut tuning);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(tuning, field, seed).map_err(|e| e.to_string())?;
        log::info!("Game initialized with seed: {}", session.seed());
        let game = Rc::new(RefCell::new(Game::new(session, settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| format!("Failed to create surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("Failed to get adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, field)
            .await
            .map_err(|e| format!("Failed to create device: {e}"))?;
        game.borrow_mut().render_state = Some(render_state);

        // Hide loading indicator
        set_hidden(&document, "loadingIndicator", true);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_resize(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Naval Strike running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click - fire at the cursor
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.fire = Some(Vec2::new(event.offset_x() as f32, event.offset_y() as f32));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - fire at the touch point
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(point) = touch_point(&canvas_clone, &event) {
                    game.borrow_mut().input.fire = Some(point);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // No context menu over the playfield
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else { return };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "a" | "A" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    "m" | "M" => {
                        g.settings.muted = !g.settings.muted;
                        let settings = g.settings.clone();
                        g.audio.apply_settings(&settings);
                        settings.save();
                    }
                    "Tab" => {
                        event.prevent_default();
                        g.input.toggle_scene = true;
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start();
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    set_hidden(&document, "startScreen", true);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("sceneToggle") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.toggle_scene = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            game.borrow_mut().resize(&canvas, dpr);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
            g.render(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Naval Strike failed to start: {}", e);
        web_sys::console::error_1(&e.into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use naval_strike::consts::SIM_DT;
    use naval_strike::hud::{HudSnapshot, kill_caption};
    use naval_strike::sim::{Field, Session, SessionPhase, TickInput, tick};
    use naval_strike::{QualityPreset, Settings, Tuning};

    env_logger::init();
    log::info!("Naval Strike (native) starting...");
    log::info!("Native mode plays a headless autopilot match - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => 42,
    };
    let mut tuning = match args.next() {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::default(),
    };
    let mut settings = Settings::load();
    if let Some(name) = args.next() {
        let preset = QualityPreset::parse(&name).ok_or("quality must be low, medium or high")?;
        settings.apply_preset(preset);
    }
    settings.apply_to(&mut tuning);
    log::info!("Quality: {}", settings.quality.as_str());

    let mut session = Session::new(tuning, Field::default(), seed)?;
    log::info!("Match seed: {}", session.seed());
    session.start();

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    while session.phase() == SessionPhase::Playing {
        tick(&mut session, &input, SIM_DT);
        for caption in session.drain_events().iter().filter_map(kill_caption) {
            log::debug!("{}", caption);
        }
    }

    let hud = HudSnapshot::from_session(&session);
    for line in hud.summary_lines().into_iter().flatten() {
        log::info!("{}", line);
    }
    let stats = session.final_stats().ok_or("match did not finish")?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
