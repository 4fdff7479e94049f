//! Paddle Duel - a two-paddle ball game against an adaptive AI
//!
//! Core modules:
//! - `sim`: Simulation core (layout, physics, AI, round state machine)
//! - `session`: Host-facing wrapper with the tunable control surface
//! - `platform`: Input latching and the browser host adapter
//! - `hud`: Text layout handed to the rendering collaborator
//! - `settings`: Initial tunables and input mode

pub mod hud;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Frame time used when the host reports a zero or garbage delta
    pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;

    /// Ball speed tunable (pixels per second before frame scaling)
    pub const BALL_SPEED_MIN: f32 = 50.0;
    pub const BALL_SPEED_MAX: f32 = 1000.0;
    pub const BALL_SPEED_DEFAULT: f32 = 300.0;
    pub const BALL_SPEED_STEP: f32 = 50.0;

    /// AI difficulty tunable (0 = hopeless, 1 = perfect; both ends excluded)
    pub const AI_DIFFICULTY_MIN: f32 = 0.1;
    pub const AI_DIFFICULTY_MAX: f32 = 0.9;
    pub const AI_DIFFICULTY_DEFAULT: f32 = 0.3;
    pub const AI_DIFFICULTY_STEP: f32 = 0.1;

    /// Touch sensitivity tunable (finger delta multiplier)
    pub const TOUCH_SENSITIVITY_MIN: f32 = 0.1;
    pub const TOUCH_SENSITIVITY_MAX: f32 = 5.0;
    pub const TOUCH_SENSITIVITY_DEFAULT: f32 = 1.5;
    pub const TOUCH_SENSITIVITY_STEP: f32 = 0.1;

    /// Layout ratios against the viewport
    pub const PADDLE_HEIGHT_RATIO: f32 = 0.25;
    pub const PADDLE_WIDTH_RATIO: f32 = 0.008;
    pub const PADDLE_WIDTH_MIN: f32 = 8.0;
    pub const BALL_RADIUS_RATIO: f32 = 0.015;
    pub const BALL_RADIUS_MIN: f32 = 10.0;
    pub const PADDLE_SPEED_RATIO: f32 = 0.008;

    /// Viewports at or below this width count as mobile
    pub const MOBILE_MAX_WIDTH: f32 = 768.0;
}

/// Replace a zero, negative or non-finite host frame delta (seconds).
/// Real deltas pass through unchanged, however long.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        consts::NOMINAL_FRAME_DT
    } else {
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.016), 0.016);
        assert_eq!(sanitize_dt(0.5), 0.5);
        assert_eq!(sanitize_dt(0.0), consts::NOMINAL_FRAME_DT);
        assert_eq!(sanitize_dt(-1.0), consts::NOMINAL_FRAME_DT);
        assert_eq!(sanitize_dt(f32::NAN), consts::NOMINAL_FRAME_DT);
        assert_eq!(sanitize_dt(f32::INFINITY), consts::NOMINAL_FRAME_DT);
    }
}
