//! Flapwing entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use flapwing::Settings;
    use flapwing::audio::{AudioManager, SoundEffect};
    use flapwing::consts::*;
    use flapwing::renderer::{RenderState, build_scene};
    use flapwing::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_music_volume(settings.music_volume);
            audio.set_muted(settings.muted);

            Self {
                state: GameState::new(seed),
                render_state: None,
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                let events = tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot input after processing
                self.input.activate = false;

                for event in &events {
                    match event {
                        GameEvent::Flapped => self.audio.play(SoundEffect::Flap),
                        GameEvent::Scored => self.audio.play(SoundEffect::Score),
                        GameEvent::GameOver => {
                            log::info!("Game over - final score {}", self.state.score);
                            self.audio.play(SoundEffect::GameOver);
                        }
                    }
                }
            }

            self.audio.schedule_music();
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            // Update score
            if let Some(el) = document
                .query_selector("#hud-score .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            // Show/hide start prompt
            if let Some(el) = document.get_element_by_id("start-prompt") {
                if self.state.phase == GamePhase::NotStarted {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Show/hide game over overlay
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::Over {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// First user gesture: unlock audio and kick off music if enabled
        fn on_gesture(&mut self) {
            self.audio.resume();
            if self.settings.music_enabled && !self.audio.music_playing() {
                self.audio.toggle_music();
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flapwing starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input handlers and audio buttons
        setup_input_handlers(&canvas, game.clone());
        setup_audio_buttons(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Flapwing running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click - activate (start/flap/reset depending on phase)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.activate = true;
                g.on_gesture();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.activate = true;
                g.on_gesture();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                match event.key().as_str() {
                    " " | "Enter" | "ArrowUp" => {
                        event.prevent_default();
                        let mut g = game.borrow_mut();
                        g.input.activate = true;
                        g.on_gesture();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_audio_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Mute toggle
        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let game = game.clone();
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                let muted = !g.audio.is_muted();
                g.audio.set_muted(muted);
                g.settings.muted = muted;
                g.settings.save();
                btn_clone.set_text_content(Some(if muted { "Unmute" } else { "Mute" }));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Music toggle
        if let Some(btn) = document.get_element_by_id("music-btn") {
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let playing = g.audio.toggle_music();
                g.settings.music_enabled = playing;
                g.settings.save();
                btn_clone.set_text_content(Some(if playing { "Music: On" } else { "Music: Off" }));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
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
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flapwing::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Flapwing (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Headless smoke run: flap on a fixed cadence until the run ends
    let mut state = GameState::new(42);
    tick(&mut state, &TickInput { activate: true });

    let mut ticks = 0u32;
    while state.phase == GamePhase::Running && ticks < 10_000 {
        let activate = ticks % 32 == 0;
        tick(&mut state, &TickInput { activate });
        ticks += 1;
    }

    println!(
        "Smoke run finished after {} ticks with score {}",
        ticks, state.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
