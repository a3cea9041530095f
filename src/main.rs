//! Tap Flap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent, TouchEvent};

    use glam::Vec2;
    use tap_flap::leaderboard::web::{HttpFriendSource, ImageAvatarLoader};
    use tap_flap::leaderboard::{self, LeaderboardPanel};
    use tap_flap::persistence::LocalStorageStore;
    use tap_flap::platform::web as platform;
    use tap_flap::renderer::{CanvasRenderer, ImageStore};
    use tap_flap::sim::{Command, PROFILES};
    use tap_flap::{GameLoop, Settings};

    /// Everything the page keeps alive between callbacks
    struct Game {
        game: GameLoop,
        renderer: CanvasRenderer,
        panel: LeaderboardPanel,
        panel_renderer: CanvasRenderer,
        friends: HttpFriendSource,
        avatars: ImageAvatarLoader,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let cmds = self.game.frame(time);
            if self.panel.pump(&mut self.friends, &mut self.avatars) {
                self.redraw_panel();
            }
            self.renderer
                .render(&cmds, Some(self.panel_renderer.canvas()));
        }

        /// Redraw the leaderboard surface; the game canvas only composites it
        fn redraw_panel(&mut self) {
            let (w, h) = self.panel.surface_size();
            let canvas = self.panel_renderer.canvas();
            if canvas.width() != w || canvas.height() != h {
                self.panel_renderer
                    .resize(self.panel.size.x, self.panel.size.y, self.panel.pixel_ratio);
            }
            self.panel_renderer.render(&self.panel.draw(), None);
        }

        fn resize(&mut self) {
            let viewport = platform::viewport(self.renderer.canvas());
            self.renderer
                .resize(viewport.width, viewport.height, viewport.pixel_ratio);
            self.game.resize(viewport);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tap Flap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas = platform::game_canvas(&document, "canvas").expect("no canvas");
        let panel_canvas = platform::offscreen_canvas(&document).expect("no offscreen canvas");
        let images: ImageStore = Rc::new(RefCell::new(HashMap::new()));

        let viewport = platform::viewport(&canvas);
        let mut renderer =
            CanvasRenderer::new(canvas.clone(), images.clone()).expect("no 2d context");
        renderer.resize(viewport.width, viewport.height, viewport.pixel_ratio);
        let panel_renderer =
            CanvasRenderer::new(panel_canvas, images.clone()).expect("no 2d context");

        let settings = Settings::load();
        let friends = HttpFriendSource::new(settings.leaderboard_url.clone());
        let seed = js_sys::Date::now() as u64;
        let (sender, inbox) = leaderboard::channel();

        let mut game = GameLoop::new(seed, viewport, settings).with_leaderboard(sender);
        match LocalStorageStore::open() {
            Some(store) => game = game.with_store(Box::new(store)),
            None => log::warn!("LocalStorage unavailable, best score will not be saved"),
        }

        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            game,
            renderer,
            panel: LeaderboardPanel::new(inbox),
            panel_renderer,
            friends,
            avatars: ImageAvatarLoader::new(images),
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Tap Flap running!");
    }

    /// Map a client-space point to logical playfield coordinates
    fn to_playfield(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            client_x as f32 - rect.left() as f32,
            client_y as f32 - rect.top() as f32,
        )
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down (mouse, pen and touch)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let pos = to_playfield(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().game.pointer_down(Some(pos));
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start: suppress scroll/zoom, the pointer handler does the work
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let command = match event.key().as_str() {
                    " " | "Enter" | "ArrowUp" => Some(Command::Flap),
                    key => key
                        .parse::<usize>()
                        .ok()
                        .filter(|d| (1..=PROFILES.len()).contains(d))
                        .map(|d| Command::SelectDifficulty(d - 1)),
                };
                if let Some(command) = command {
                    event.prevent_default();
                    game.borrow_mut().game.command(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
        game.borrow_mut().frame(time);
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
    log::info!("Tap Flap (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    for (index, profile) in tap_flap::sim::PROFILES.iter().enumerate() {
        let score = autopilot::run(index, 42 + index as u64);
        println!("{:>6}: scored {}", profile.label, score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session that plays itself at a fixed 60 Hz
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use tap_flap::leaderboard::{self, LeaderboardPanel, NoAvatars, StaticFriendSource};
    use tap_flap::persistence::MemoryStore;
    use tap_flap::platform::Viewport;
    use tap_flap::sim::{Command, GamePhase, GameState};
    use tap_flap::{GameLoop, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after two minutes of play
    const MAX_FRAMES: u32 = 60 * 120;

    const FRIENDS: &str = r#"[
        {"nickname": "ada", "avatarUrl": "", "KVDataList": [{"key": "bestScore", "value": "12"}]},
        {"nickname": "lin", "KVDataList": [{"key": "bestScore", "value": "31"}]},
        {"nickname": "kim", "KVDataList": []}
    ]"#;

    /// Play one run on the given difficulty and return the final score
    pub fn run(difficulty: usize, seed: u64) -> u32 {
        let settings = Settings {
            difficulty,
            ..Settings::default()
        };
        let (sender, inbox) = leaderboard::channel();
        let mut game = GameLoop::new(seed, Viewport::default(), settings)
            .with_store(Box::new(MemoryStore::new()))
            .with_leaderboard(sender);
        let mut panel = LeaderboardPanel::new(inbox);
        let mut friends = StaticFriendSource {
            records: leaderboard::decode_records(FRIENDS).unwrap_or_default(),
        };

        let mut t = 0.0;
        game.frame(t);
        game.command(Command::Flap);
        for _ in 0..MAX_FRAMES {
            if wants_flap(&game.state) {
                game.command(Command::Flap);
            }
            t += FRAME_MS;
            game.frame(t);
            if game.state.phase == GamePhase::GameOver {
                break;
            }
        }

        panel.pump(&mut friends, &mut NoAvatars);
        for (rank, entry) in panel.ranking().iter().enumerate() {
            log::info!("#{} {} {}", rank + 1, entry.nickname, entry.score);
        }
        game.state.score
    }

    /// Flap when falling below the centre of the next gap
    fn wants_flap(state: &GameState) -> bool {
        let actor = &state.actor;
        let target = state
            .obstacles
            .iter()
            .find(|o| o.trailing_edge() >= actor.pos.x - actor.radius)
            .map(|o| o.gap_top + state.profile.gap_height * 0.5)
            .unwrap_or(state.playfield.y * 0.5);
        actor.velocity > 0.0 && actor.pos.y > target
    }
}
