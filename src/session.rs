//! Host-facing game session
//!
//! Wraps `GameState` with what a host needs: a readiness callback, frame and
//! resize entry points, and the tunable control surface that external UI
//! (buttons, sliders) drives.

use crate::hud::HudLayout;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, InputMode, TickInput, Viewport, tick};

/// Seed used when neither the settings nor the host supply one
const FALLBACK_SEED: u64 = 0x5eed_0f_d0e1;

pub struct Session {
    state: GameState,
}

impl Session {
    /// Build a fully initialized session and report it ready.
    ///
    /// `on_ready` runs exactly once, before this returns.
    pub fn new<F>(settings: &Settings, viewport: Viewport, mode: InputMode, on_ready: F) -> Self
    where
        F: FnOnce(&Session),
    {
        let mode = settings.mode_or(mode);
        let seed = settings.seed.unwrap_or(FALLBACK_SEED);
        let session = Self {
            state: GameState::new(viewport, mode, settings.tunables(), seed),
        };
        log::info!(
            "Session ready: {}x{} {:?}, seed {}",
            session.state.layout.width(),
            session.state.layout.height(),
            mode,
            seed
        );
        on_ready(&session);
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run one tick for a host frame of `dt_ms` milliseconds
    pub fn frame(&mut self, dt_ms: f32, input: &TickInput) -> &[GameEvent] {
        tick(&mut self.state, input, dt_ms / 1000.0);
        &self.state.events
    }

    /// Host viewport changed; interrupts any round in progress
    pub fn resize(&mut self, width: f32, height: f32) -> &[GameEvent] {
        self.state.resize(Viewport::new(width, height));
        &self.state.events
    }

    pub fn hud(&self) -> HudLayout {
        HudLayout::compute(&self.state)
    }

    pub fn reset_scores(&mut self) {
        self.state.reset_scores();
    }

    // Control surface

    pub fn ball_speed(&self) -> f32 {
        self.state.tunables.ball_speed()
    }

    pub fn set_ball_speed(&mut self, speed: f32) {
        self.state.tunables.set_ball_speed(speed);
    }

    pub fn increase_ball_speed(&mut self, amount: Option<f32>) {
        self.state.tunables.increase_ball_speed(amount);
    }

    pub fn decrease_ball_speed(&mut self, amount: Option<f32>) {
        self.state.tunables.decrease_ball_speed(amount);
    }

    pub fn ai_difficulty(&self) -> f32 {
        self.state.tunables.ai_difficulty()
    }

    pub fn set_ai_difficulty(&mut self, difficulty: f32) {
        self.state.tunables.set_ai_difficulty(difficulty);
    }

    pub fn increase_ai_difficulty(&mut self, amount: Option<f32>) {
        self.state.tunables.increase_ai_difficulty(amount);
    }

    pub fn decrease_ai_difficulty(&mut self, amount: Option<f32>) {
        self.state.tunables.decrease_ai_difficulty(amount);
    }

    pub fn touch_sensitivity(&self) -> f32 {
        self.state.tunables.touch_sensitivity()
    }

    pub fn set_touch_sensitivity(&mut self, sensitivity: f32) {
        self.state.tunables.set_touch_sensitivity(sensitivity);
    }

    pub fn increase_touch_sensitivity(&mut self, amount: Option<f32>) {
        self.state.tunables.increase_touch_sensitivity(amount);
    }

    pub fn decrease_touch_sensitivity(&mut self, amount: Option<f32>) {
        self.state.tunables.decrease_touch_sensitivity(amount);
    }
}
