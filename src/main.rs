//! Flag Rally entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Document, HtmlCanvasElement, KeyboardEvent, Request, RequestInit, RequestMode, Response,
    };

    use flag_rally::advice::{self, AdviceError, AdviceTicket};
    use flag_rally::platform::{FrameClock, Key};
    use flag_rally::renderer::RenderState;
    use flag_rally::sim::Viewport;
    use flag_rally::ui::Hud;
    use flag_rally::{Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        clock: FrameClock,
        viewport: Viewport,
        /// Pending requestAnimationFrame id; `None` while the loop is stopped
        raf_handle: Option<i32>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        last_hud: Option<Hud>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, viewport: Viewport) -> Self {
            Self {
                session: Session::with_settings(seed, settings),
                render_state: None,
                clock: FrameClock::new(),
                viewport,
                raf_handle: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_hud: None,
            }
        }

        fn update(&mut self, time: f64) {
            let dt = self.clock.delta_secs(time);
            self.session.update(dt);

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&mut self) {
            let frame = self.session.frame(self.viewport);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&frame) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Copy HUD values into the DOM, touching only what changed
        fn update_hud(&mut self, document: &Document) {
            let hud = self.session.hud();
            let last = self.last_hud.take();
            let changed = |f: fn(&Hud) -> String| match &last {
                Some(prev) => f(prev) != f(&hud),
                None => true,
            };

            let fields: [(&str, fn(&Hud) -> String); 7] = [
                ("hud-score", |h| h.score.to_string()),
                ("hud-level", |h| h.level.to_string()),
                ("hud-fuel", |h| h.fuel_text()),
                ("hud-flags", |h| h.flags_text()),
                ("hud-best", |h| h.best_score.to_string()),
                ("hud-pickups", |h| h.pickups_text()),
                ("advice-text", |h| h.advice.clone()),
            ];
            for (id, text) in fields {
                if changed(text) {
                    set_text(document, id, &text(&hud));
                }
            }

            if changed(|h| h.fuel_low().to_string()) {
                if let Some(el) = document.get_element_by_id("hud-fuel") {
                    let class = if hud.fuel_low() { "low" } else { "" };
                    let _ = el.set_attribute("class", class);
                }
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.session.settings().show_fps {
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            let banner_changed = last.as_ref().map(|prev| prev.banner) != Some(hud.banner);
            if banner_changed {
                if let Some(el) = document.get_element_by_id("banner") {
                    match hud.banner {
                        Some(banner) => {
                            set_text(document, "banner-title", banner.headline());
                            set_text(document, "banner-detail", &banner.detail());
                            let _ = el.set_attribute("class", "");
                        }
                        None => {
                            let _ = el.set_attribute("class", "hidden");
                        }
                    }
                }
            }

            self.last_hud = Some(hud);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn js_error(e: JsValue) -> AdviceError {
        AdviceError::Network(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
    }

    /// POST the level prompt and read back `{ "text": ... }`
    async fn fetch_advice(url: &str, level: u32) -> Result<String, AdviceError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&advice::request_body(level)));

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        let window = web_sys::window().ok_or_else(|| AdviceError::Network("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        if !response.ok() {
            return Err(AdviceError::Status(response.status()));
        }

        let body = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .ok_or_else(|| AdviceError::Malformed("response body is not text".into()))?;
        advice::parse_response(&body)
    }

    /// Fulfil queued advisory tickets without blocking the frame
    fn dispatch_advice(game: &Rc<RefCell<Game>>) {
        let (tickets, url): (Vec<AdviceTicket>, Option<String>) = {
            let mut g = game.borrow_mut();
            let tickets = g.session.take_advice_requests();
            if !g.session.settings().advice_enabled {
                return;
            }
            (tickets, g.session.settings().advice_url().map(str::to_string))
        };

        for ticket in tickets {
            match url.clone() {
                Some(url) => {
                    let game = game.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        let result = fetch_advice(&url, ticket.level()).await;
                        game.borrow_mut().session.deliver_advice(ticket, result);
                    });
                }
                None => {
                    let tip = advice::offline_tip(ticket.level());
                    game.borrow_mut().session.deliver_advice(ticket, Ok(tip));
                }
            }
        }
    }

    /// Logical (CSS) and physical canvas sizes
    fn canvas_sizes(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (Viewport, u32, u32) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        (Viewport::new(client_w as f32, client_h as f32), width, height)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Flag Rally starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (viewport, width, height) = canvas_sizes(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings, viewport)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (viewport.width, viewport.height),
        )
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_keyboard(&window, game.clone());
        setup_resize(&window, canvas, game.clone());
        setup_visibility(&document, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Flag Rally running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.session.key_down(key);
                    if g.session.take_settings_changed() {
                        g.session.settings().save();
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_code(&event.code()) {
                game.borrow_mut().session.key_up(key);
            }
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (viewport, width, height) = canvas_sizes(&window, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            g.viewport = viewport;
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height, (viewport.width, viewport.height));
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Hidden tab stops the loop (keys released, in-flight advice dropped);
    /// visible again resumes it
    fn setup_visibility(document: &Document, game: Rc<RefCell<Game>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                stop_loop(&game);
            } else {
                {
                    let mut g = game.borrow_mut();
                    if g.raf_handle.is_some() {
                        return;
                    }
                    g.session.resume();
                }
                request_animation_frame(game.clone());
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn stop_loop(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        if let Some(handle) = g.raf_handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
        g.session.stop();
        g.clock.reset();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let game_for_frame = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game_for_frame, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => game.borrow_mut().raf_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.raf_handle = None;
            if !g.session.is_running() {
                return;
            }
            g.update(time);
        }

        dispatch_advice(&game);

        {
            let mut g = game.borrow_mut();
            g.render();
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
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flag Rally (native) starting...");
    log::info!("Native mode runs a scripted headless demo - build for wasm32 to play");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2024);
    let settings = match args.next() {
        Some(arg) => match flag_rally::QualityPreset::parse(&arg) {
            Some(preset) => flag_rally::Settings::from_preset(preset),
            None => {
                log::warn!("Unknown quality preset {:?}, using saved settings", arg);
                flag_rally::Settings::load()
            }
        },
        None => flag_rally::Settings::load(),
    };
    run_headless_demo(seed, settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a session with a fixed key script for up to a minute of game time
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo(seed: u64, settings: flag_rally::Settings) {
    use flag_rally::advice::offline_tip;
    use flag_rally::consts::{SIM_DT, SIM_HZ};
    use flag_rally::platform::Key;
    use flag_rally::sim::Viewport;
    use flag_rally::Session;

    const SCRIPT: [Key; 4] = [Key::Right, Key::Down, Key::Left, Key::Up];
    const LEG_TICKS: u32 = 90;

    let mut session = Session::with_settings(seed, settings);
    session.key_down(Key::Restart);
    session.key_up(Key::Restart);

    let mut held = SCRIPT[0];
    session.key_down(held);

    for frame in 0..60 * SIM_HZ {
        if frame % LEG_TICKS == 0 {
            let next = SCRIPT[(frame / LEG_TICKS) as usize % SCRIPT.len()];
            session.key_up(held);
            session.key_down(next);
            held = next;
        }
        if frame % (3 * SIM_HZ) == 0 {
            session.key_down(Key::Smoke);
        } else {
            session.key_up(Key::Smoke);
        }

        session.update(SIM_DT);

        for ticket in session.take_advice_requests() {
            session.deliver_advice(ticket, Ok(offline_tip(ticket.level())));
            log::info!("Advice: {}", session.advice_text());
        }

        if frame % SIM_HZ == 0 {
            let drawn = session.frame(Viewport::default());
            log::debug!(
                "t={}s: {} vertices, {} tiles",
                frame / SIM_HZ,
                drawn.vertices.len(),
                drawn.tiles_drawn
            );
        }

        if session.state().is_game_over() {
            break;
        }
    }
    session.stop();

    let hud = session.hud();
    println!("Seed:   {}", seed);
    println!("Level:  {}", hud.level);
    println!("Flags:  {}", hud.flags_text());
    println!("Fuel:   {}", hud.fuel_text());
    println!("Score:  {}", hud.score);
    println!("Pickups: {} fuel, {} smoke", hud.fuel_pickups, hud.smoke_pickups);
    if let Some(banner) = hud.banner {
        println!("{}: {}", banner.headline(), banner.detail());
    }
}
