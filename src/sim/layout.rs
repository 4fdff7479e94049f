//! Viewport-derived geometry
//!
//! Every size and speed in the simulation scales with the viewport. The
//! derived values always travel together in one `Layout` so a resize can
//! never leave half of them stale.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Host viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Floor degenerate sizes to 1px so the derived geometry stays finite
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
        let fixed = Self::new(fix(self.width), fix(self.height));
        if fixed != self {
            log::warn!(
                "Degenerate viewport {}x{}, using {}x{}",
                self.width,
                self.height,
                fixed.width,
                fixed.height
            );
        }
        fixed
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}

/// Geometric constants derived from the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub viewport: Viewport,
    pub paddle_height: f32,
    pub paddle_width: f32,
    pub ball_radius: f32,
    /// Paddle travel per tick (keyboard and AI base speed)
    pub paddle_speed: f32,
}

impl Layout {
    pub fn from_viewport(viewport: Viewport) -> Self {
        let viewport = viewport.sanitized();
        let Viewport { width, height } = viewport;
        Self {
            viewport,
            paddle_height: height * PADDLE_HEIGHT_RATIO,
            paddle_width: (width * PADDLE_WIDTH_RATIO).max(PADDLE_WIDTH_MIN),
            ball_radius: (width.min(height) * BALL_RADIUS_RATIO).max(BALL_RADIUS_MIN),
            paddle_speed: height * PADDLE_SPEED_RATIO,
        }
    }

    pub fn width(&self) -> f32 {
        self.viewport.width
    }

    pub fn height(&self) -> f32 {
        self.viewport.height
    }

    pub fn paddle_half_height(&self) -> f32 {
        self.paddle_height / 2.0
    }

    pub fn paddle_half_width(&self) -> f32 {
        self.paddle_width / 2.0
    }

    /// Lowest and highest legal paddle center
    pub fn paddle_bounds(&self) -> (f32, f32) {
        let half = self.paddle_half_height();
        (half, (self.height() - half).max(half))
    }

    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        let (min, max) = self.paddle_bounds();
        y.clamp(min, max)
    }

    /// Lowest and highest legal ball center while in play
    pub fn ball_bounds(&self) -> (f32, f32) {
        let r = self.ball_radius;
        (r, (self.height() - r).max(r))
    }
}
