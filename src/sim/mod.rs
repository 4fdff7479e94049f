//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - One tick per host frame, never re-entered
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod input;
pub mod layout;
pub mod round;
pub mod state;
pub mod tick;

pub use input::{InputMode, PointerEvent, TouchTracker};
pub use layout::{Layout, Viewport};
pub use round::{check_scoring, reset_ball, start_round};
pub use state::{Ball, GameEvent, GameState, Paddle, RoundState, Score, Side, Tunables};
pub use tick::{TickInput, tick};
