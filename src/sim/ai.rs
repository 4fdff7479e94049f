//! Opponent paddle AI
//!
//! A single difficulty knob in [0.1, 0.9] shapes everything: base tracking
//! speed, how often the AI fumbles, how lazily it drifts while the ball is
//! heading away, how noisy its aim is, and how wide its dead zone is.

use rand::Rng;

/// Everything the AI looks at for one decision
#[derive(Debug, Clone, Copy)]
pub struct AiInput {
    pub ball_y: f32,
    pub ball_vx: f32,
    pub paddle_y: f32,
    pub difficulty: f32,
    pub paddle_speed: f32,
    /// Legal paddle center range
    pub bounds: (f32, f32),
}

/// Kind of fumble rolled for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mistake {
    /// Moves the wrong way at half speed
    Reverse,
    Freeze,
    Sluggish,
}

/// Base tracking speed before mistakes and damping
pub fn base_speed(paddle_speed: f32, difficulty: f32) -> f32 {
    paddle_speed * (0.4 + difficulty * 0.4)
}

pub fn mistake_chance(difficulty: f32) -> f32 {
    (1.0 - difficulty) * 0.3
}

pub fn dead_zone(difficulty: f32) -> f32 {
    10.0 + (1.0 - difficulty) * 20.0
}

pub fn prediction_error(difficulty: f32) -> f32 {
    (1.0 - difficulty) * 60.0
}

/// Multiplier applied while the ball travels away from the AI
pub fn retreat_damping(difficulty: f32) -> f32 {
    0.2 + difficulty * 0.3
}

impl Mistake {
    fn from_roll(roll: f32) -> Self {
        if roll < 0.4 {
            Mistake::Reverse
        } else if roll < 0.7 {
            Mistake::Freeze
        } else {
            Mistake::Sluggish
        }
    }

    fn apply(self, speed: f32) -> f32 {
        match self {
            Mistake::Reverse => -speed * 0.5,
            Mistake::Freeze => 0.0,
            Mistake::Sluggish => speed * 0.2,
        }
    }
}

/// Roll a mistake, if any, for this tick
fn roll_mistake<R: Rng>(rng: &mut R, difficulty: f32) -> Option<Mistake> {
    let roll: f32 = rng.random();
    if roll < mistake_chance(difficulty) {
        Some(Mistake::from_roll(rng.random()))
    } else {
        None
    }
}

/// Decide the opponent's new paddle center for this tick.
///
/// Returns `None` when the target sits inside the dead zone. The draw order is
/// fixed (mistake roll, optional mistake kind, aim noise) so a seeded RNG
/// replays exactly.
pub fn step<R: Rng>(rng: &mut R, input: &AiInput) -> Option<f32> {
    let d = input.difficulty;
    let mut speed = base_speed(input.paddle_speed, d);

    if let Some(mistake) = roll_mistake(rng, d) {
        speed = mistake.apply(speed);
    }

    if input.ball_vx <= 0.0 {
        speed *= retreat_damping(d);
    }

    let noise: f32 = rng.random::<f32>() - 0.5;
    let target_y = input.ball_y + noise * prediction_error(d);

    let zone = dead_zone(d);
    let delta = if target_y < input.paddle_y - zone {
        -speed
    } else if target_y > input.paddle_y + zone {
        speed
    } else {
        return None;
    };

    let (min, max) = input.bounds;
    Some((input.paddle_y + delta).clamp(min, max))
}
