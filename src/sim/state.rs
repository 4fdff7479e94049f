//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`. It is built in one
//! step from a `Viewport`, so no field is ever observably unset.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::{InputMode, TouchTracker};
use super::layout::{Layout, Viewport};
use crate::consts::*;

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundState {
    /// Ball parked at center, waiting for the start input
    #[default]
    Waiting,
    /// Ball in flight
    Playing,
}

/// Which paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, human controlled
    Player,
    /// Right paddle, AI controlled
    Opponent,
}

impl Side {
    /// Horizontal direction a ball leaves this paddle in
    pub fn outward_direction(self) -> f32 {
        match self {
            Side::Player => 1.0,
            Side::Opponent => -1.0,
        }
    }
}

/// Something the host may want to react to (prompt visibility, HUD, sound)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    WallBounce,
    PaddleHit { side: Side },
    Scored { side: Side },
    /// A resize reset a round that was in progress
    RoundInterrupted,
    BallSpeedChanged(f32),
    AiDifficultyChanged(f32),
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

/// A paddle; `x` is fixed per side, only `y` moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub half_width: f32,
    pub half_height: f32,
}

impl Paddle {
    /// Paddle centered vertically at its side's inset
    pub fn centered(side: Side, layout: &Layout) -> Self {
        let half_width = layout.paddle_half_width();
        let x = match side {
            Side::Player => half_width,
            Side::Opponent => layout.width() - half_width,
        };
        Self {
            side,
            x,
            y: layout.viewport.center_y(),
            half_width,
            half_height: layout.paddle_half_height(),
        }
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player = self.player.saturating_add(1),
            Side::Opponent => self.opponent = self.opponent.saturating_add(1),
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }
}

/// Runtime-adjustable parameters. Every write saturates into range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tunables {
    ball_speed: f32,
    ai_difficulty: f32,
    touch_sensitivity: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            ball_speed: BALL_SPEED_DEFAULT,
            ai_difficulty: AI_DIFFICULTY_DEFAULT,
            touch_sensitivity: TOUCH_SENSITIVITY_DEFAULT,
        }
    }
}

/// Clamp `value` into `[min, max]`; NaN keeps `current`
#[inline]
fn saturate(current: f32, value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        log::warn!("Ignoring NaN tunable write");
        return current;
    }
    value.clamp(min, max)
}

impl Tunables {
    pub fn new(ball_speed: f32, ai_difficulty: f32, touch_sensitivity: f32) -> Self {
        let mut tunables = Self::default();
        tunables.set_ball_speed(ball_speed);
        tunables.set_ai_difficulty(ai_difficulty);
        tunables.set_touch_sensitivity(touch_sensitivity);
        tunables
    }

    pub fn ball_speed(&self) -> f32 {
        self.ball_speed
    }

    pub fn set_ball_speed(&mut self, speed: f32) {
        self.ball_speed = saturate(self.ball_speed, speed, BALL_SPEED_MIN, BALL_SPEED_MAX);
    }

    pub fn increase_ball_speed(&mut self, amount: Option<f32>) {
        self.set_ball_speed(self.ball_speed + amount.unwrap_or(BALL_SPEED_STEP));
    }

    pub fn decrease_ball_speed(&mut self, amount: Option<f32>) {
        self.set_ball_speed(self.ball_speed - amount.unwrap_or(BALL_SPEED_STEP));
    }

    pub fn ai_difficulty(&self) -> f32 {
        self.ai_difficulty
    }

    pub fn set_ai_difficulty(&mut self, difficulty: f32) {
        self.ai_difficulty = saturate(
            self.ai_difficulty,
            difficulty,
            AI_DIFFICULTY_MIN,
            AI_DIFFICULTY_MAX,
        );
    }

    pub fn increase_ai_difficulty(&mut self, amount: Option<f32>) {
        self.set_ai_difficulty(self.ai_difficulty + amount.unwrap_or(AI_DIFFICULTY_STEP));
    }

    pub fn decrease_ai_difficulty(&mut self, amount: Option<f32>) {
        self.set_ai_difficulty(self.ai_difficulty - amount.unwrap_or(AI_DIFFICULTY_STEP));
    }

    pub fn touch_sensitivity(&self) -> f32 {
        self.touch_sensitivity
    }

    pub fn set_touch_sensitivity(&mut self, sensitivity: f32) {
        self.touch_sensitivity = saturate(
            self.touch_sensitivity,
            sensitivity,
            TOUCH_SENSITIVITY_MIN,
            TOUCH_SENSITIVITY_MAX,
        );
    }

    pub fn increase_touch_sensitivity(&mut self, amount: Option<f32>) {
        self.set_touch_sensitivity(
            self.touch_sensitivity + amount.unwrap_or(TOUCH_SENSITIVITY_STEP),
        );
    }

    pub fn decrease_touch_sensitivity(&mut self, amount: Option<f32>) {
        self.set_touch_sensitivity(
            self.touch_sensitivity - amount.unwrap_or(TOUCH_SENSITIVITY_STEP),
        );
    }
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Drives AI mistakes, AI prediction noise and serve direction
    pub rng: Pcg32,
    pub layout: Layout,
    pub mode: InputMode,
    pub round: RoundState,
    pub ball: Ball,
    pub player: Paddle,
    pub opponent: Paddle,
    pub score: Score,
    pub tunables: Tunables,
    pub touch: TouchTracker,
    /// Events raised by the most recent tick or resize
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Ticks that ran physics (Playing only)
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(viewport: Viewport, mode: InputMode, tunables: Tunables, seed: u64) -> Self {
        let layout = Layout::from_viewport(viewport);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            layout,
            mode,
            round: RoundState::Waiting,
            ball: Ball {
                pos: Vec2::new(layout.viewport.center_x(), layout.viewport.center_y()),
                vel: Vec2::ZERO,
                radius: layout.ball_radius,
            },
            player: Paddle::centered(Side::Player, &layout),
            opponent: Paddle::centered(Side::Opponent, &layout),
            score: Score::default(),
            tunables,
            touch: TouchTracker::default(),
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Ball to center, paddles to vertical center at their insets, ball stopped
    pub fn recenter(&mut self) {
        let layout = self.layout;
        self.ball = Ball {
            pos: Vec2::new(layout.viewport.center_x(), layout.viewport.center_y()),
            vel: Vec2::ZERO,
            radius: layout.ball_radius,
        };
        self.player = Paddle::centered(Side::Player, &layout);
        self.opponent = Paddle::centered(Side::Opponent, &layout);
    }

    /// Recompute geometry for a new viewport. An active round is abandoned.
    pub fn resize(&mut self, viewport: Viewport) {
        self.layout = Layout::from_viewport(viewport);
        self.recenter();
        self.events.clear();
        if self.round == RoundState::Playing {
            self.round = RoundState::Waiting;
            self.events.push(GameEvent::RoundInterrupted);
            log::info!("Round interrupted by resize");
        }
        log::info!(
            "Resized to {}x{}",
            self.layout.width(),
            self.layout.height()
        );
    }

    /// Explicit new match; scores never reset on their own
    pub fn reset_scores(&mut self) {
        self.score = Score::default();
    }
}
