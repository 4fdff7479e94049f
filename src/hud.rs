//! HUD text layout
//!
//! Computes what text the renderer should draw and where. Sizes scale with
//! the viewport width and have a floor so they stay readable on phones.

use serde::Serialize;

use crate::sim::{GameState, InputMode, RoundState};

/// Difficulty bucket shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DifficultyLabel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLabel {
    pub fn from_difficulty(difficulty: f32) -> Self {
        if difficulty < 0.3 {
            DifficultyLabel::Easy
        } else if difficulty < 0.6 {
            DifficultyLabel::Medium
        } else {
            DifficultyLabel::Hard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLabel::Easy => "Easy",
            DifficultyLabel::Medium => "Medium",
            DifficultyLabel::Hard => "Hard",
        }
    }
}

/// One centered text item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub visible: bool,
}

/// Every text item on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudLayout {
    pub player_score: HudText,
    pub opponent_score: HudText,
    /// "Press to start" prompt, shown only between rounds
    pub instruction: HudText,
    pub speed: HudText,
    pub difficulty: HudText,
}

fn item(text: String, x: f32, y: f32, font_size: f32) -> HudText {
    HudText {
        text,
        x,
        y,
        font_size,
        visible: true,
    }
}

impl HudLayout {
    pub fn compute(state: &GameState) -> Self {
        let w = state.layout.width();
        let h = state.layout.height();
        let desktop = state.mode == InputMode::Desktop;

        let score_size = (w * 0.04).max(32.0);
        let instruction_size = (w * 0.02).max(16.0);
        let info_size = (w * 0.015).max(14.0);

        let instruction_text = match state.mode {
            InputMode::Desktop => "Press SPACE to start",
            InputMode::Mobile => "Tap the screen to start",
        };
        let mut instruction = item(instruction_text.to_string(), w * 0.5, h * 0.4, instruction_size);
        instruction.visible = state.round == RoundState::Waiting;

        let mut speed = format!("Speed: {}", state.tunables.ball_speed());
        let label = DifficultyLabel::from_difficulty(state.tunables.ai_difficulty());
        let mut difficulty = format!("AI difficulty: {}", label.as_str());
        if desktop {
            speed.push_str(" (+/- to change)");
            difficulty.push_str(" (Q/E to change)");
        }

        Self {
            player_score: item(state.score.player.to_string(), w * 0.25, h * 0.1, score_size),
            opponent_score: item(state.score.opponent.to_string(), w * 0.75, h * 0.1, score_size),
            instruction,
            speed: item(speed, w * 0.5, h * 0.9, info_size),
            difficulty: item(difficulty, w * 0.5, h * 0.85, info_size),
        }
    }
}
