//! Per-frame simulation tick
//!
//! Core game loop step. One host frame runs exactly one tick.

use super::ai::{self, AiInput};
use super::collision::{overlaps, paddle_bounce, resolve_wall};
use super::input::{PointerEvent, apply_keyboard_movement, apply_pointer_events};
use super::round::{check_scoring, start_round};
use super::state::{GameEvent, GameState, RoundState, Side};

/// Input commands for a single tick
///
/// Edge fields are true only on the tick the key went down. Held fields
/// reflect the key state at the time the snapshot was taken.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Start the round (space)
    pub start: bool,
    /// Raise / lower ball speed by one step (+ / -)
    pub speed_up: bool,
    pub speed_down: bool,
    /// Raise / lower AI difficulty by one step (E / Q)
    pub difficulty_up: bool,
    pub difficulty_down: bool,
    /// Arrow keys held
    pub up_held: bool,
    pub down_held: bool,
    /// Pointer events since the previous tick, oldest first
    pub pointer: Vec<PointerEvent>,
}

impl TickInput {
    fn first_pointer_down(&self) -> Option<usize> {
        self.pointer
            .iter()
            .position(|e| matches!(e, PointerEvent::Down { .. }))
    }
}

/// Advance the game state by one frame.
///
/// `dt` is the frame's elapsed time in seconds. It only scales the serve and
/// paddle-hit velocities; the ball then moves that far every tick until the
/// next hit.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = crate::sanitize_dt(dt);
    state.events.clear();

    // Edge-triggered controls work in both states
    let mobile = state.mode.is_mobile();
    let was_waiting = state.round == RoundState::Waiting;
    let first_down = input.first_pointer_down();
    if input.start || (mobile && first_down.is_some()) {
        start_round(state, dt);
    }
    apply_tuning(state, input);

    if state.round == RoundState::Waiting {
        return;
    }

    state.time_ticks += 1;
    let layout = state.layout;

    // Player paddle
    if mobile {
        // Moves that arrived before the round started belong to Waiting
        let pointer: &[PointerEvent] = match (was_waiting, first_down) {
            (false, _) => &input.pointer[..],
            (true, Some(i)) => &input.pointer[i..],
            (true, None) => &[],
        };
        let sensitivity = state.tunables.touch_sensitivity();
        apply_pointer_events(
            &mut state.touch,
            &mut state.player,
            &layout,
            pointer,
            sensitivity,
        );
    } else {
        apply_keyboard_movement(&mut state.player, &layout, input.up_held, input.down_held);
    }

    // Opponent paddle
    let ai_input = AiInput {
        ball_y: state.ball.pos.y,
        ball_vx: state.ball.vel.x,
        paddle_y: state.opponent.y,
        difficulty: state.tunables.ai_difficulty(),
        paddle_speed: layout.paddle_speed,
        bounds: layout.paddle_bounds(),
    };
    if let Some(y) = ai::step(&mut state.rng, &ai_input) {
        state.opponent.y = y;
    }

    // Ball
    state.ball.pos += state.ball.vel;
    if resolve_wall(&mut state.ball, &layout) {
        state.events.push(GameEvent::WallBounce);
    }

    // Player paddle is checked first; only one hit per tick
    let speed = state.tunables.ball_speed() * dt;
    for side in [Side::Player, Side::Opponent] {
        let paddle = *state.paddle(side);
        if overlaps(&state.ball, &paddle) {
            state.ball.vel = paddle_bounce(&state.ball, &paddle, speed);
            state.events.push(GameEvent::PaddleHit { side });
            break;
        }
    }

    check_scoring(state);
}

/// Apply +/- and Q/E steps
fn apply_tuning(state: &mut GameState, input: &TickInput) {
    let tunables = &mut state.tunables;
    if input.speed_up {
        tunables.increase_ball_speed(None);
    }
    if input.speed_down {
        tunables.decrease_ball_speed(None);
    }
    if input.speed_up || input.speed_down {
        let speed = tunables.ball_speed();
        log::debug!("Ball speed: {}", speed);
        state.events.push(GameEvent::BallSpeedChanged(speed));
    }

    if input.difficulty_up {
        tunables.increase_ai_difficulty(None);
    }
    if input.difficulty_down {
        tunables.decrease_ai_difficulty(None);
    }
    if input.difficulty_up || input.difficulty_down {
        let difficulty = tunables.ai_difficulty();
        log::debug!("AI difficulty: {:.1}", difficulty);
        state.events.push(GameEvent::AiDifficultyChanged(difficulty));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::InputMode;
    use crate::sim::layout::Viewport;
    use crate::sim::state::Tunables;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn state(mode: InputMode) -> GameState {
        GameState::new(Viewport::new(800.0, 600.0), mode, Tunables::default(), 12345)
    }

    fn start() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_waiting_to_playing() {
        let mut s = state(InputMode::Desktop);

        // Tick without start - should stay in Waiting
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.round, RoundState::Waiting);
        assert_eq!(s.ball.vel, Vec2::ZERO);
        assert_eq!(s.time_ticks, 0);

        tick(&mut s, &start(), DT);
        assert_eq!(s.round, RoundState::Playing);
        assert!(s.events.contains(&GameEvent::RoundStarted));
        assert_ne!(s.ball.vel, Vec2::ZERO);
        assert_eq!(s.time_ticks, 1);
    }

    #[test]
    fn test_waiting_ignores_movement() {
        let mut s = state(InputMode::Desktop);
        let input = TickInput {
            up_held: true,
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert_eq!(s.player.y, 300.0);
    }

    #[test]
    fn test_tuning_works_while_waiting() {
        let mut s = state(InputMode::Desktop);
        let input = TickInput {
            speed_up: true,
            difficulty_down: true,
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert_eq!(s.tunables.ball_speed(), 350.0);
        assert!((s.tunables.ai_difficulty() - 0.2).abs() < 1e-6);
        assert_eq!(s.events.len(), 2);
        assert_eq!(s.round, RoundState::Waiting);
    }

    #[test]
    fn test_player_scores_in_one_tick() {
        let mut s = state(InputMode::Desktop);
        tick(&mut s, &start(), DT);
        s.ball.pos = Vec2::new(800.0 + s.ball.radius + 1.0, 300.0);
        s.ball.vel = Vec2::new(1.0, 0.0);

        tick(&mut s, &TickInput::default(), DT);

        assert_eq!(s.round, RoundState::Waiting);
        assert_eq!(s.score.player, 1);
        assert_eq!(s.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(s.ball.vel, Vec2::ZERO);
        assert_eq!(s.player.y, 300.0);
        assert_eq!(s.opponent.y, 300.0);
    }

    #[test]
    fn test_player_paddle_hit() {
        let mut s = state(InputMode::Desktop);
        tick(&mut s, &start(), DT);
        // Ball about to reach the player paddle center, moving left
        s.ball.pos = Vec2::new(s.player.x + 15.0, s.player.y);
        s.ball.vel = Vec2::new(-5.0, 0.0);

        tick(&mut s, &TickInput::default(), DT);

        assert!(s.events.contains(&GameEvent::PaddleHit { side: Side::Player }));
        let speed = 300.0 * DT;
        assert!((s.ball.vel.x - speed).abs() < 1e-4);
        assert!(s.ball.vel.y.abs() < 1e-4);
    }

    #[test]
    fn test_player_checked_before_opponent() {
        // Narrow field where the ball touches both paddles at once
        let mut s = GameState::new(
            Viewport::new(30.0, 600.0),
            InputMode::Desktop,
            Tunables::default(),
            1,
        );
        tick(&mut s, &start(), DT);
        s.ball.pos = Vec2::new(15.0, 300.0);
        s.ball.vel = Vec2::ZERO;
        s.opponent.y = 300.0;

        tick(&mut s, &TickInput::default(), DT);

        let hits: Vec<_> = s
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::PaddleHit { .. }))
            .collect();
        assert_eq!(hits, vec![&GameEvent::PaddleHit { side: Side::Player }]);
        assert!(s.ball.vel.x > 0.0);
    }

    #[test]
    fn test_keyboard_disabled_on_mobile() {
        let mut s = state(InputMode::Mobile);
        tick(&mut s, &start(), DT);
        let input = TickInput {
            down_held: true,
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert_eq!(s.player.y, 300.0);
    }

    #[test]
    fn test_touch_starts_and_drags() {
        let mut s = state(InputMode::Mobile);
        let input = TickInput {
            pointer: vec![
                PointerEvent::Down { x: 50.0, y: 200.0 },
                PointerEvent::Move { x: 50.0, y: 220.0 },
            ],
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert_eq!(s.round, RoundState::Playing);
        // 20px * 1.5 sensitivity
        assert_eq!(s.player.y, 330.0);
    }

    #[test]
    fn test_moves_before_touch_start_are_ignored() {
        let mut s = state(InputMode::Mobile);
        let input = TickInput {
            pointer: vec![
                PointerEvent::Move { x: 50.0, y: 250.0 },
                PointerEvent::Down { x: 50.0, y: 250.0 },
            ],
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert_eq!(s.round, RoundState::Playing);
        assert_eq!(s.player.y, 300.0);
        assert_eq!(s.touch.last_y, 250.0);

        // Later moves drag relative to the latched touch
        let input = TickInput {
            pointer: vec![PointerEvent::Move { x: 50.0, y: 260.0 }],
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert_eq!(s.player.y, 315.0);
    }

    #[test]
    fn test_space_start_on_mobile_drops_waiting_moves() {
        let mut s = state(InputMode::Mobile);
        let input = TickInput {
            start: true,
            pointer: vec![PointerEvent::Move { x: 50.0, y: 500.0 }],
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert_eq!(s.round, RoundState::Playing);
        assert_eq!(s.player.y, 300.0);
    }

    #[test]
    fn test_serve_speed_uses_full_frame_time() {
        let mut s = state(InputMode::Desktop);
        tick(&mut s, &start(), 0.25);
        // 300 px/s over a 250ms frame, no cap on long frames
        assert!((s.ball.vel.x.abs() - 75.0).abs() < 1e-3);
    }

    #[test]
    fn test_pointer_ignored_on_desktop() {
        let mut s = state(InputMode::Desktop);
        let input = TickInput {
            pointer: vec![PointerEvent::Down { x: 50.0, y: 200.0 }],
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert_eq!(s.round, RoundState::Waiting);
    }

    #[test]
    fn test_ball_stays_in_field_while_playing() {
        let mut s = state(InputMode::Desktop);
        tick(&mut s, &start(), DT);
        let (min, max) = s.layout.ball_bounds();
        let (pmin, pmax) = s.layout.paddle_bounds();
        for i in 0..5000 {
            let input = TickInput {
                start: true,
                up_held: i % 200 < 100,
                down_held: i % 200 >= 100,
                ..Default::default()
            };
            tick(&mut s, &input, DT);
            if s.round == RoundState::Playing {
                assert!(s.ball.pos.y >= min && s.ball.pos.y <= max);
                assert_ne!(s.ball.vel, Vec2::ZERO);
            } else {
                assert_eq!(s.ball.vel, Vec2::ZERO);
            }
            assert!(s.player.y >= pmin && s.player.y <= pmax);
            assert!(s.opponent.y >= pmin && s.opponent.y <= pmax);
        }
        assert!(s.score.player + s.score.opponent > 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut a = state(InputMode::Desktop);
        let mut b = state(InputMode::Desktop);
        let inputs = [
            start(),
            TickInput {
                up_held: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                difficulty_up: true,
                ..Default::default()
            },
        ];
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input, DT);
                tick(&mut b, input, DT);
            }
        }
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.opponent, b.opponent);
        assert_eq!(a.score, b.score);
    }
}
