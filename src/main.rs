//! Launch Sim entry point
//!
//! Web: mounts the game view (canvas, input listeners, animation-frame loop).
//! Native: runs a headless scripted session and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, KeyboardEvent,
        PageTransitionEvent, TouchEvent,
    };

    use launch_sim::GameConfig;
    use launch_sim::platform::{FrameClock, TickPacing};
    use launch_sim::render::{Frame, Hud, RenderSink, camera_zoom, world_to_screen};
    use launch_sim::sim::{InputController, InputEvent, Key, Phase, Simulation};

    /// Draws frames onto a 2D canvas with simple shapes
    struct CanvasSink {
        ctx: CanvasRenderingContext2d,
        size: (f64, f64),
        zoom: f64,
    }

    impl CanvasSink {
        fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
            let window = web_sys::window()?;
            let dpr = window.device_pixel_ratio();
            let client_w = canvas.client_width() as f64;
            let client_h = canvas.client_height() as f64;
            canvas.set_width((client_w * dpr) as u32);
            canvas.set_height((client_h * dpr) as u32);

            let ctx = canvas
                .get_context("2d")
                .ok()??
                .dyn_into::<CanvasRenderingContext2d>()
                .ok()?;
            Some(Self {
                ctx,
                size: (client_w * dpr, client_h * dpr),
                zoom: camera_zoom(client_w) * dpr,
            })
        }

        fn circle(&self, center: (f64, f64), radius: f64) {
            self.ctx.begin_path();
            let _ = self.ctx.arc(center.0, center.1, radius, 0.0, TAU);
            self.ctx.fill();
        }
    }

    impl RenderSink for CanvasSink {
        fn draw(&mut self, frame: &Frame) {
            let ctx = &self.ctx;
            ctx.set_global_alpha(1.0);
            ctx.set_fill_style_str("black");
            ctx.fill_rect(0.0, 0.0, self.size.0, self.size.1);

            // Stars: deeper ones are dimmer
            ctx.set_fill_style_str("white");
            for star in &frame.stars {
                ctx.set_global_alpha(1.0 + star.z as f64 / 10.0);
                let p = world_to_screen(star.truncate(), self.zoom, self.size);
                self.circle(p, (0.01 * self.zoom).max(1.0));
            }
            ctx.set_global_alpha(1.0);

            // Asteroids: tumbling pentagons
            ctx.set_fill_style_str("#8a7f74");
            let r = 0.3 * self.zoom;
            for hazard in &frame.hazards {
                let (x, y) = world_to_screen(hazard.pos, self.zoom, self.size);
                ctx.save();
                let _ = ctx.translate(x, y);
                let _ = ctx.rotate((hazard.rotation.x + hazard.rotation.y) as f64);
                ctx.begin_path();
                for i in 0..5 {
                    let a = i as f64 * TAU / 5.0;
                    let k = if i % 2 == 0 { 1.0 } else { 0.8 };
                    if i == 0 {
                        ctx.move_to(a.cos() * r * k, a.sin() * r * k);
                    } else {
                        ctx.line_to(a.cos() * r * k, a.sin() * r * k);
                    }
                }
                ctx.close_path();
                ctx.fill();
                ctx.restore();
            }

            // Coins: spin shows as horizontal squash
            ctx.set_fill_style_str("deepskyblue");
            let r = 0.25 * self.zoom;
            for coin in &frame.collectibles {
                let (x, y) = world_to_screen(coin.pos, self.zoom, self.size);
                let rx = (r * (coin.rotation as f64).cos().abs()).max(1.0);
                ctx.begin_path();
                let _ = ctx.ellipse(x, y, rx, r, 0.0, 0.0, TAU);
                ctx.fill();
            }

            // Craft
            if let Some(pos) = frame.player {
                let (x, y) = world_to_screen(pos, self.zoom, self.size);
                let s = 0.25 * self.zoom;
                ctx.set_fill_style_str("cyan");
                ctx.begin_path();
                ctx.move_to(x, y - s);
                ctx.line_to(x - s * 0.7, y + s);
                ctx.line_to(x + s * 0.7, y + s);
                ctx.close_path();
                ctx.fill();
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        input: InputController,
        clock: FrameClock,
        sink: Option<CanvasSink>,
        /// Pending animation frame request
        frame_handle: Option<i32>,
        /// Cleared on unmount; the loop stops at the next frame
        alive: bool,
    }

    impl Game {
        fn new(config: &GameConfig) -> Self {
            Self {
                sim: Simulation::new(config),
                input: InputController::new(config),
                clock: FrameClock::new(TickPacing::from_config(config)),
                sink: None,
                frame_handle: None,
                alive: true,
            }
        }

        fn start_if_idle(&mut self) {
            if self.sim.phase() == Phase::Idle {
                self.sim.start();
            }
        }

        /// Held keys carry over into the new run
        fn restart(&mut self) {
            self.sim.restart();
            self.clock.reset();
        }

        /// Run the ticks this frame is owed
        fn update(&mut self, time: f64) {
            let ticks = self.clock.ticks_for_frame(time);
            for _ in 0..ticks {
                let report = self.sim.tick(&self.input);
                if report.hit {
                    break;
                }
            }
        }

        fn render(&mut self) -> Frame {
            let frame = Frame::capture(&self.sim);
            if let Some(ref mut sink) = self.sink {
                sink.draw(&frame);
            }
            frame
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, hud: &Hud) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&hud.score_text));
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                let class = if hud.show_game_over { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("game-over-title") {
                el.set_text_content(Some(hud.game_over_title));
            }
            if let Some(el) = document.get_element_by_id("game-over-score") {
                el.set_text_content(Some(&hud.game_over_score));
            }
        }
    }

    /// A registered DOM listener, kept so it can be removed on unmount
    struct Listener {
        target: EventTarget,
        name: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    }

    /// A mounted game view and everything it registered
    struct GameView {
        game: Rc<RefCell<Game>>,
        listeners: Vec<Listener>,
    }

    impl GameView {
        fn listen(
            &mut self,
            target: &EventTarget,
            name: &'static str,
            handler: impl FnMut(Event) + 'static,
        ) {
            let closure = Closure::<dyn FnMut(Event)>::new(handler);
            match target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
                Ok(()) => self.listeners.push(Listener {
                    target: target.clone(),
                    name,
                    closure,
                }),
                Err(e) => log::warn!("Could not listen for {}: {:?}", name, e),
            }
        }

        /// Stop the loop, then unregister input
        fn unmount(self) {
            {
                let mut g = self.game.borrow_mut();
                g.alive = false;
                if let Some(id) = g.frame_handle.take() {
                    if let Some(window) = web_sys::window() {
                        let _ = window.cancel_animation_frame(id);
                    }
                }
            }

            let count = self.listeners.len();
            for listener in self.listeners {
                let _ = listener.target.remove_event_listener_with_callback(
                    listener.name,
                    listener.closure.as_ref().unchecked_ref(),
                );
            }
            log::info!("Game view unmounted ({} listeners removed)", count);
        }
    }

    thread_local! {
        static VIEW: RefCell<Option<GameView>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Launch Sim starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };

        mount(&window);
        setup_page_lifecycle(&window);

        log::info!("Launch Sim running!");
    }

    /// Build a fresh game view and start its loop
    fn mount(window: &web_sys::Window) {
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let mut config = GameConfig::load();
        if config.seed.is_none() {
            config.seed = Some(js_sys::Date::now() as u64);
        }
        let game = Rc::new(RefCell::new(Game::new(&config)));
        log::info!("Game initialized with seed: {:?}", config.seed);

        match document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            Some(canvas) => game.borrow_mut().sink = CanvasSink::new(&canvas),
            None => log::warn!("No #canvas element; running without a renderer"),
        }

        let mut view = GameView {
            game: game.clone(),
            listeners: Vec::new(),
        };
        setup_keyboard(&mut view, window);
        if config.enable_touch {
            setup_touch(&mut view, window);
        }
        setup_restart_button(&mut view, &document);

        VIEW.with(|slot| {
            if let Some(previous) = slot.borrow_mut().replace(view) {
                previous.unmount();
            }
        });

        request_animation_frame(game);
    }

    /// Unmount on page hide and remount after a back-forward cache restore.
    /// Registered once per page and never removed: the handlers must
    /// outlive the views they tear down.
    fn setup_page_lifecycle(window: &web_sys::Window) {
        let hide = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            unmount();
        });
        let _ = window.add_event_listener_with_callback("pagehide", hide.as_ref().unchecked_ref());
        hide.forget();

        let show = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            let restored = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(|e| e.persisted());
            let mounted = VIEW.with(|slot| slot.borrow().is_some());
            if !restored || mounted {
                return;
            }
            log::info!("Page restored from cache, remounting");
            if let Some(window) = web_sys::window() {
                mount(&window);
            }
        });
        let _ = window.add_event_listener_with_callback("pageshow", show.as_ref().unchecked_ref());
        show.forget();
    }

    pub fn unmount() {
        if let Some(view) = VIEW.with(|slot| slot.borrow_mut().take()) {
            view.unmount();
        }
    }

    fn setup_keyboard(view: &mut GameView, window: &web_sys::Window) {
        {
            let game = view.game.clone();
            view.listen(window, "keydown", move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Some(key) = Key::from_code(&event.key()) else {
                    return;
                };
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.start_if_idle();
                g.input.handle(InputEvent::KeyDown(key));
            });
        }
        {
            let game = view.game.clone();
            view.listen(window, "keyup", move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if let Some(key) = Key::from_code(&event.key()) {
                    game.borrow_mut().input.handle(InputEvent::KeyUp(key));
                }
            });
        }
    }

    fn setup_touch(view: &mut GameView, window: &web_sys::Window) {
        fn first_touch_x(event: &Event) -> Option<f32> {
            let event = event.dyn_ref::<TouchEvent>()?;
            event.touches().get(0).map(|t| t.client_x() as f32)
        }

        {
            let game = view.game.clone();
            view.listen(window, "touchstart", move |event: Event| {
                if let Some(x) = first_touch_x(&event) {
                    let mut g = game.borrow_mut();
                    g.start_if_idle();
                    g.input.handle(InputEvent::TouchStart { x });
                }
            });
        }
        {
            let game = view.game.clone();
            view.listen(window, "touchmove", move |event: Event| {
                if let Some(x) = first_touch_x(&event) {
                    game.borrow_mut().input.handle(InputEvent::TouchMove { x });
                }
            });
        }
        {
            let game = view.game.clone();
            view.listen(window, "touchend", move |_event: Event| {
                game.borrow_mut().input.handle(InputEvent::TouchEnd);
            });
        }
    }

    fn setup_restart_button(view: &mut GameView, document: &web_sys::Document) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = view.game.clone();
            view.listen(&btn, "click", move |_event: Event| {
                game.borrow_mut().restart();
            });
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => handle.borrow_mut().frame_handle = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame_handle = None;
            if !g.alive {
                return;
            }

            g.update(time);
            let frame = g.render();
            g.update_hud(&frame.hud());
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Tear down the game view (for hosts that remove the page section)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = unmountLaunchSim)]
pub fn unmount_launch_sim() {
    wasm_game::unmount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Launch Sim (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(rand::random::<u64>);
    let config = launch_sim::GameConfig::load().with_seed(seed);
    log::info!("Seed: {}", seed);

    let (ticks, score) = run_headless(&config, 20_000);
    println!("Session over after {} ticks, score {}", ticks, score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Weave across the field until a hazard lands or `max_ticks` pass
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(config: &launch_sim::GameConfig, max_ticks: u64) -> (u64, u32) {
    use launch_sim::sim::{InputController, Key, Simulation};

    let mut sim = Simulation::new(config);
    let mut input = InputController::new(config);
    sim.start();

    let mut heading = Key::Right;
    input.key_down(heading);
    for tick in 1..=max_ticks {
        let report = sim.tick(&input);
        for slot in &report.collected {
            log::debug!("Tick {}: collected slot {} (score {})", tick, slot, sim.score());
        }
        if report.hit {
            return (tick, sim.score());
        }

        // Turn around at the walls
        let x = sim.player().position().map_or(0.0, |p| p.x);
        if x.abs() >= config.x_limit {
            input.key_up(heading);
            heading = if heading == Key::Right {
                Key::Left
            } else {
                Key::Right
            };
            input.key_down(heading);
        }
    }
    (max_ticks, sim.score())
}
