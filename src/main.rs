//! Polygon Eater entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    use polygon_eater::platform::web::BrowserScheduler;
    use polygon_eater::platform::drive;
    use polygon_eater::sim::{Direction, GameSession, InputState, PlayArea};
    use polygon_eater::GameConfig;

    // Presentation hooks provided by the page
    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = window, js_name = renderSnapshot)]
        fn render_snapshot(json: &str);

        #[wasm_bindgen(js_namespace = window, js_name = showGameOver)]
        fn show_game_over(json: &str);
    }

    /// Play area from the `#light-area` element, if present
    fn read_play_area(document: &web_sys::Document) -> Option<PlayArea> {
        let rect = document.get_element_by_id("light-area")?.get_bounding_client_rect();
        Some(PlayArea::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }

    /// Apply a key change; returns false for keys the game ignores
    fn set_key(keys: &mut Direction, key: &str, down: bool) -> bool {
        match key {
            "w" | "ArrowUp" => keys.up = down,
            "s" | "ArrowDown" => keys.down = down,
            "a" | "ArrowLeft" => keys.left = down,
            "d" | "ArrowRight" => keys.right = down,
            _ => return false,
        }
        true
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Polygon Eater starting...");

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let config = match read_play_area(&document) {
            Some(area) => GameConfig::with_play_area(area),
            None => GameConfig::default(),
        };
        let seed = js_sys::Date::now() as u64;
        let session = match GameSession::new(config, seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Bad play area ({}), using defaults", e);
                GameSession::with_seed(seed)
            }
        };
        let session = Rc::new(RefCell::new(session));

        session.borrow_mut().on_game_over(|snapshot| match snapshot.to_json() {
            Ok(json) => show_game_over(&json),
            Err(e) => log::error!("Failed to encode final snapshot: {}", e),
        });

        setup_input_handlers(session.clone());
        setup_retry_button(session.clone());

        let mut scheduler = BrowserScheduler::new();
        let _tasks = drive(session, &mut scheduler, |snapshot| match snapshot.to_json() {
            Ok(json) => render_snapshot(&json),
            Err(e) => log::warn!("Failed to encode snapshot: {}", e),
        });
        // Tasks live for the page's lifetime
        std::mem::forget(scheduler);

        log::info!("Polygon Eater running!");
    }

    fn setup_input_handlers(session: Rc<RefCell<GameSession>>) {
        let window = web_sys::window().unwrap();
        let input = Rc::new(RefCell::new(InputState::new()));

        for (event, down) in [("keydown", true), ("keyup", false)] {
            let session = session.clone();
            let input = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut input = input.borrow_mut();
                if set_key(input.keys_mut(), &event.key(), down) {
                    session.borrow_mut().set_player_intent(input.intent());
                }
            });
            let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut session = session.borrow_mut();
            if session.is_over() {
                return;
            }
            let mut input = input.borrow_mut();
            input.pointer_moved(glam::Vec2::new(event.client_x() as f32, event.client_y() as f32));
            session.set_player_intent(input.intent());
        });
        let _ = window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_retry_button(session: Rc<RefCell<GameSession>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("retry") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                session.borrow_mut().reset_with_seed(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
    log::info!("Polygon Eater (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the wasm build to play");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(headless::clock_seed);
    let seconds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);

    let config = match headless::load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    match polygon_eater::GameSession::new(config, seed) {
        Ok(mut session) => headless::run(&mut session, seconds),
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(2);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use polygon_eater::GameConfig;
    use polygon_eater::sim::{Direction, GameSession, PlayerIntent, Snapshot};

    /// Environment variable naming a JSON config file
    const CONFIG_ENV: &str = "POLYGON_EATER_CONFIG";
    const FRAME_DT: f32 = 1.0 / 60.0;

    pub fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn load_config() -> Result<GameConfig, String> {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            return Ok(GameConfig::default());
        };
        let json = std::fs::read_to_string(&path)
            .map_err(|e| format!("Cannot read config {}: {}", path, e))?;
        GameConfig::from_json(&json).map_err(|e| format!("Bad config {}: {}", path, e))
    }

    /// Rendered frames in `seconds` of autopilot play
    pub fn frame_budget(seconds: u32) -> u32 {
        seconds.saturating_mul(60)
    }

    /// Flee the nearest threat, otherwise chase the nearest meal
    fn autopilot(snapshot: &Snapshot) -> PlayerIntent {
        let Some(player) = &snapshot.player else {
            return PlayerIntent::Idle;
        };
        let me = player.position + player.dims / 2.0;
        let nearest = |edible: bool| {
            snapshot
                .enemies
                .iter()
                .filter(|e| (e.sides != 0 && e.sides <= player.sides) == edible)
                .map(|e| e.position + e.dims / 2.0)
                .min_by(|a, b| a.distance(me).total_cmp(&b.distance(me)))
        };

        let heading = match (nearest(false), nearest(true)) {
            (Some(threat), _) if threat.distance(me) < 150.0 => me - threat,
            (_, Some(meal)) => meal - me,
            _ => Vec2::ZERO,
        };
        PlayerIntent::Steer(Direction {
            up: heading.y < -1.0,
            down: heading.y > 1.0,
            left: heading.x < -1.0,
            right: heading.x > 1.0,
        })
    }

    pub fn run(session: &mut GameSession, seconds: u32) {
        session.on_game_over(|snapshot| match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to encode final snapshot: {}", e),
        });

        let frames = frame_budget(seconds);
        for frame in 0..frames {
            let intent = autopilot(&session.snapshot());
            session.set_player_intent(intent);
            session.advance(FRAME_DT);

            if session.is_over() {
                break;
            }
            if frame % 600 == 0 {
                let s = session.snapshot().session;
                log::info!(
                    "t={}s score={} level={} sides={}",
                    s.elapsed_time,
                    s.score,
                    s.level,
                    s.player_sides
                );
            }
        }

        if !session.is_over() {
            let s = session.snapshot().session;
            println!(
                "Survived {}s: score {}, eaten {}, sides {}",
                s.elapsed_time, s.score, s.eaten_count, s.player_sides
            );
        }
    }

}
