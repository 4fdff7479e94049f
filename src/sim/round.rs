//! Round lifecycle: serving and scoring

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, RoundState, Side};

/// Largest serve angle factor either side of horizontal
pub const SERVE_ANGLE_SPREAD: f32 = 0.25;

/// Waiting -> Playing. No-op while a round is already running.
pub fn start_round(state: &mut GameState, dt: f32) -> bool {
    if state.round != RoundState::Waiting {
        return false;
    }
    state.round = RoundState::Playing;
    reset_ball(state, dt);
    state.events.push(GameEvent::RoundStarted);
    log::info!(
        "Round started (score {}-{})",
        state.score.player,
        state.score.opponent
    );
    true
}

/// Center the ball and serve it toward a random side at a random shallow angle
pub fn reset_ball(state: &mut GameState, dt: f32) {
    let center = Vec2::new(
        state.layout.viewport.center_x(),
        state.layout.viewport.center_y(),
    );
    let angle = state.rng.random_range(-SERVE_ANGLE_SPREAD..SERVE_ANGLE_SPREAD);
    let direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let speed = state.tunables.ball_speed() * dt;

    state.ball.pos = center;
    state.ball.vel = Vec2::new(speed * direction, speed * angle);
}

/// Side that just scored, if the ball left the field
pub fn scoring_side(state: &GameState) -> Option<Side> {
    let r = state.ball.radius;
    if state.ball.pos.x < -r {
        Some(Side::Opponent)
    } else if state.ball.pos.x > state.layout.width() + r {
        Some(Side::Player)
    } else {
        None
    }
}

/// Playing -> Waiting when a point is scored
pub fn check_scoring(state: &mut GameState) -> Option<Side> {
    let side = scoring_side(state)?;
    state.score.award(side);
    state.round = RoundState::Waiting;
    state.recenter();
    state.events.push(GameEvent::Scored { side });
    log::info!(
        "{:?} scored ({}-{})",
        side,
        state.score.player,
        state.score.opponent
    );
    Some(side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::InputMode;
    use crate::sim::layout::Viewport;
    use crate::sim::state::Tunables;

    fn state(seed: u64) -> GameState {
        GameState::new(
            Viewport::new(800.0, 600.0),
            InputMode::Desktop,
            Tunables::default(),
            seed,
        )
    }

    #[test]
    fn test_start_round_serves() {
        let mut s = state(1);
        assert!(start_round(&mut s, 0.02));
        assert_eq!(s.round, RoundState::Playing);
        assert_eq!(s.events, vec![GameEvent::RoundStarted]);
        // 300 px/s over a 20ms frame
        assert!((s.ball.vel.x.abs() - 6.0).abs() < 1e-4);
        assert!(!start_round(&mut s, 0.02));
    }

    #[test]
    fn test_serve_distribution() {
        let mut s = state(99);
        let dt = 1.0 / 60.0;
        let speed = s.tunables.ball_speed() * dt;
        let (mut left, mut right) = (0, 0);
        for _ in 0..400 {
            reset_ball(&mut s, dt);
            assert_eq!(s.ball.pos, Vec2::new(400.0, 300.0));
            assert!((s.ball.vel.x.abs() - speed).abs() < 1e-5);
            let angle = s.ball.vel.y / speed;
            assert!((-SERVE_ANGLE_SPREAD..=SERVE_ANGLE_SPREAD).contains(&angle));
            if s.ball.vel.x > 0.0 {
                right += 1;
            } else {
                left += 1;
            }
        }
        assert!(left > 120 && right > 120);
    }

    #[test]
    fn test_player_scores_off_right_edge() {
        let mut s = state(5);
        start_round(&mut s, 0.016);
        s.events.clear();
        s.ball.pos.x = 800.0 + s.ball.radius + 1.0;
        s.player.y = 100.0;
        s.opponent.y = 500.0;

        assert_eq!(check_scoring(&mut s), Some(Side::Player));
        assert_eq!(s.round, RoundState::Waiting);
        assert_eq!(s.score.player, 1);
        assert_eq!(s.score.opponent, 0);
        assert_eq!(s.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(s.ball.vel, Vec2::ZERO);
        assert_eq!(s.player.y, 300.0);
        assert_eq!(s.opponent.y, 300.0);
        assert_eq!(s.events, vec![GameEvent::Scored { side: Side::Player }]);
    }

    #[test]
    fn test_opponent_scores_off_left_edge() {
        let mut s = state(5);
        start_round(&mut s, 0.016);
        s.ball.pos.x = -s.ball.radius - 0.5;
        assert_eq!(check_scoring(&mut s), Some(Side::Opponent));
        assert_eq!(s.score.opponent, 1);
    }

    #[test]
    fn test_ball_on_edge_is_not_a_point() {
        let mut s = state(5);
        start_round(&mut s, 0.016);
        s.ball.pos.x = -s.ball.radius;
        assert_eq!(check_scoring(&mut s), None);
        assert_eq!(s.round, RoundState::Playing);
    }
}
