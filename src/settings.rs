//! Session settings
//!
//! Initial tunables, control scheme and RNG seed. Read once at startup and
//! never written back: nothing survives the session.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{InputMode, Tunables};

/// Startup configuration for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ball speed (pixels per second, scaled by frame time)
    pub ball_speed: f32,
    /// AI difficulty, 0.1 (easy) to 0.9 (hard)
    pub ai_difficulty: f32,
    /// Finger travel multiplier on touch devices
    pub touch_sensitivity: f32,
    /// Control scheme; `None` lets the host detect it
    pub mode: Option<InputMode>,
    /// RNG seed; `None` lets the host pick one
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_speed: BALL_SPEED_DEFAULT,
            ai_difficulty: AI_DIFFICULTY_DEFAULT,
            touch_sensitivity: TOUCH_SENSITIVITY_DEFAULT,
            mode: None,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse settings, falling back to defaults on malformed input
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Starting tunables, clamped into their ranges
    pub fn tunables(&self) -> Tunables {
        Tunables::new(self.ball_speed, self.ai_difficulty, self.touch_sensitivity)
    }

    /// Configured mode, or `detected` when unset
    pub fn mode_or(&self, detected: InputMode) -> InputMode {
        self.mode.unwrap_or(detected)
    }
}
