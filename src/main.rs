//! Paddle Duel entry point
//!
//! On the web the page drives `WebSession` (see `platform::web`). Natively
//! this runs a headless match: a scripted player presses keys through the
//! same input latch a browser would feed, against the AI opponent.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use paddle_duel::platform::{InputLatch, KeyCode};
    use paddle_duel::sim::{GameEvent, InputMode, RoundState, Side, Viewport};
    use paddle_duel::{Session, Settings};

    /// Simulated frame length (60 Hz host)
    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Stop after this many frames even if nobody reaches the target
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    const TARGET_SCORE: u32 = 5;

    fn load_settings() -> Settings {
        let Some(path) = std::env::args().nth(1) else {
            return Settings::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Settings::load_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                Settings::default()
            }
        }
    }

    /// Hold the arrow that moves the player paddle toward the ball
    fn steer(latch: &mut InputLatch, session: &Session) {
        let state = session.state();
        let gap = state.ball.pos.y - state.player.y;
        let dead_zone = state.layout.paddle_speed;
        let (up, down) = (gap < -dead_zone, gap > dead_zone);
        for (key, want) in [(KeyCode::ArrowUp, up), (KeyCode::ArrowDown, down)] {
            match (want, latch.is_held(key)) {
                (true, false) => latch.key_down(key),
                (false, true) => latch.key_up(key),
                _ => {}
            }
        }
    }

    pub fn run() {
        let settings = load_settings();
        let mut session = Session::new(
            &settings,
            Viewport::new(1280.0, 720.0),
            InputMode::Desktop,
            |s| log::info!("Ready, AI difficulty {:.1}", s.ai_difficulty()),
        );
        let mut latch = InputLatch::new();
        let mut rallies = 0u32;

        for frame in 0..MAX_FRAMES {
            if session.state().round == RoundState::Waiting {
                latch.key_up(KeyCode::Space);
                latch.key_down(KeyCode::Space);
            }
            steer(&mut latch, &session);

            let input = latch.take();
            for event in session.frame(FRAME_MS, &input) {
                match event {
                    GameEvent::PaddleHit { .. } => rallies += 1,
                    GameEvent::Scored { side } => log::info!("Frame {}: {:?} scores", frame, side),
                    _ => {}
                }
            }

            let score = session.state().score;
            if score.get(Side::Player) >= TARGET_SCORE || score.get(Side::Opponent) >= TARGET_SCORE
            {
                break;
            }
        }

        let state = session.state();
        println!(
            "Final score: player {} - {} AI ({} paddle hits over {} ticks in play)",
            state.score.player, state.score.opponent, rallies, state.time_ticks
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Paddle Duel (native) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
