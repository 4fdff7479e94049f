//! Player input handling
//!
//! Keyboard arrows move the player paddle at a fixed speed on desktop. On
//! mobile the paddle follows finger movement relative to the last touch
//! position, scaled by the touch sensitivity tunable.

use serde::{Deserialize, Serialize};

use super::layout::Layout;
use super::state::Paddle;
use crate::consts::MOBILE_MAX_WIDTH;

/// User agent fragments that mark a touch device
const MOBILE_AGENTS: [&str; 8] = [
    "Android",
    "webOS",
    "iPhone",
    "iPad",
    "iPod",
    "BlackBerry",
    "IEMobile",
    "Opera Mini",
];

/// Which control scheme the session uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMode {
    /// Arrow keys move the paddle, pointer events are ignored
    #[default]
    Desktop,
    /// Pointer events move the paddle, arrow keys are ignored
    Mobile,
}

impl InputMode {
    /// Classify a session from the browser user agent and display width
    pub fn detect(user_agent: &str, display_width: f32) -> Self {
        let agent = user_agent.to_lowercase();
        let touch_agent = MOBILE_AGENTS
            .iter()
            .any(|needle| agent.contains(&needle.to_lowercase()));
        if touch_agent || display_width <= MOBILE_MAX_WIDTH {
            InputMode::Mobile
        } else {
            InputMode::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == InputMode::Mobile
    }
}

/// Pointer event in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
}

/// Relative touch tracking state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchTracker {
    pub last_y: f32,
}

impl TouchTracker {
    /// Remember where the finger went down
    pub fn latch(&mut self, y: f32) {
        self.last_y = y;
    }

    /// Move the paddle by the finger's travel since the last event
    pub fn drag(&mut self, paddle: &mut Paddle, layout: &Layout, y: f32, sensitivity: f32) {
        let movement = (y - self.last_y) * sensitivity;
        paddle.y = layout.clamp_paddle_y(paddle.y + movement);
        self.last_y = y;
    }
}

/// Held-arrow movement. Up wins when both are held.
pub fn apply_keyboard_movement(paddle: &mut Paddle, layout: &Layout, up: bool, down: bool) {
    let step = if up {
        -layout.paddle_speed
    } else if down {
        layout.paddle_speed
    } else {
        return;
    };
    paddle.y = layout.clamp_paddle_y(paddle.y + step);
}

/// Replay this tick's pointer events in arrival order
pub fn apply_pointer_events(
    tracker: &mut TouchTracker,
    paddle: &mut Paddle,
    layout: &Layout,
    events: &[PointerEvent],
    sensitivity: f32,
) {
    for event in events {
        match *event {
            PointerEvent::Down { y, .. } => tracker.latch(y),
            PointerEvent::Move { y, .. } => tracker.drag(paddle, layout, y, sensitivity),
        }
    }
}
