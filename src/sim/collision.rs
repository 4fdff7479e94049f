//! Collision detection and response
//!
//! Everything is axis-aligned: the ball is treated as its enclosing square
//! when tested against paddles. A paddle hit rewrites the velocity but never
//! the position.

use glam::Vec2;

use super::layout::Layout;
use super::state::{Ball, Paddle};

/// Angle factor at the very tip of a paddle
const MAX_ANGLE_FACTOR: f32 = 0.5;

/// Bounce off the top/bottom wall.
///
/// Returns true when a bounce happened. `vy` flips sign with the same
/// magnitude and the ball is clamped back inside the field.
pub fn resolve_wall(ball: &mut Ball, layout: &Layout) -> bool {
    let (min, max) = layout.ball_bounds();
    if ball.pos.y <= min || ball.pos.y >= max {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = ball.pos.y.clamp(min, max);
        true
    } else {
        false
    }
}

/// Strict AABB overlap between the ball's square and the paddle rectangle
pub fn overlaps(ball: &Ball, paddle: &Paddle) -> bool {
    let r = ball.radius;
    ball.pos.x - r < paddle.x + paddle.half_width
        && ball.pos.x + r > paddle.x - paddle.half_width
        && ball.pos.y - r < paddle.y + paddle.half_height
        && ball.pos.y + r > paddle.y - paddle.half_height
}

/// Vertical deflection for a hit: 0 at the paddle center, +/-0.5 at the tips
pub fn angle_factor(ball_y: f32, paddle: &Paddle) -> f32 {
    (ball_y - paddle.y) / paddle.half_height * MAX_ANGLE_FACTOR
}

/// Velocity after striking `paddle`.
///
/// `speed` is `ball_speed * dt`: a per-tick displacement, so the resulting
/// pace follows the frame rate of the tick that registered the hit.
pub fn paddle_bounce(ball: &Ball, paddle: &Paddle, speed: f32) -> Vec2 {
    let direction = paddle.side.outward_direction();
    Vec2::new(speed * direction, speed * angle_factor(ball.pos.y, paddle))
}
