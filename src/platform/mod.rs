//! Platform abstraction layer
//!
//! Hosts push raw key and pointer events as they arrive; the latch turns
//! them into one `TickInput` per frame:
//! - Discrete commands fire once per press (key repeat is swallowed)
//! - Arrow keys report their held state at snapshot time
//! - Pointer events are queued in arrival order

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::{PointerEvent, TickInput};

/// Keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    Space,
    Plus,
    Minus,
    E,
    Q,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "Up" => Some(KeyCode::ArrowUp),
            "ArrowDown" | "Down" => Some(KeyCode::ArrowDown),
            " " | "Spacebar" => Some(KeyCode::Space),
            "+" | "=" => Some(KeyCode::Plus),
            "-" | "_" => Some(KeyCode::Minus),
            "e" | "E" => Some(KeyCode::E),
            "q" | "Q" => Some(KeyCode::Q),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

const KEY_COUNT: usize = 7;

/// Accumulates host input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    held: [bool; KEY_COUNT],
    pressed: [bool; KEY_COUNT],
    pointer: Vec<PointerEvent>,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: KeyCode) {
        let i = key.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.held[key.index()] = false;
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.pointer.push(PointerEvent::Down { x, y });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer.push(PointerEvent::Move { x, y });
    }

    /// Drop held keys (window lost focus, keyup will never arrive)
    pub fn release_all(&mut self) {
        self.held = [false; KEY_COUNT];
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held[key.index()]
    }

    /// Build this frame's input and clear the one-shot state
    pub fn take(&mut self) -> TickInput {
        let pressed = std::mem::take(&mut self.pressed);
        let was = |key: KeyCode| pressed[key.index()];
        TickInput {
            start: was(KeyCode::Space),
            speed_up: was(KeyCode::Plus),
            speed_down: was(KeyCode::Minus),
            difficulty_up: was(KeyCode::E),
            difficulty_down: was(KeyCode::Q),
            up_held: self.is_held(KeyCode::ArrowUp),
            down_held: self.is_held(KeyCode::ArrowDown),
            pointer: std::mem::take(&mut self.pointer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyCode::from_key(" "), Some(KeyCode::Space));
        assert_eq!(KeyCode::from_key("="), Some(KeyCode::Plus));
        assert_eq!(KeyCode::from_key("E"), Some(KeyCode::E));
        assert_eq!(KeyCode::from_key("ArrowDown"), Some(KeyCode::ArrowDown));
        assert_eq!(KeyCode::from_key("x"), None);
    }

    #[test]
    fn test_press_is_edge_triggered() {
        let mut latch = InputLatch::new();
        latch.key_down(KeyCode::Space);
        // Auto-repeat while held
        latch.key_down(KeyCode::Space);
        assert!(latch.take().start);
        latch.key_down(KeyCode::Space);
        assert!(!latch.take().start);

        latch.key_up(KeyCode::Space);
        latch.key_down(KeyCode::Space);
        assert!(latch.take().start);
    }

    #[test]
    fn test_tap_between_ticks_still_counts() {
        let mut latch = InputLatch::new();
        latch.key_down(KeyCode::E);
        latch.key_up(KeyCode::E);
        let input = latch.take();
        assert!(input.difficulty_up);
        assert!(!latch.is_held(KeyCode::E));
    }

    #[test]
    fn test_held_arrows_persist() {
        let mut latch = InputLatch::new();
        latch.key_down(KeyCode::ArrowUp);
        assert!(latch.take().up_held);
        assert!(latch.take().up_held);
        latch.release_all();
        assert!(!latch.take().up_held);
    }

    #[test]
    fn test_pointer_queue_drains() {
        let mut latch = InputLatch::new();
        latch.pointer_down(1.0, 2.0);
        latch.pointer_move(1.0, 5.0);
        let input = latch.take();
        assert_eq!(
            input.pointer,
            vec![
                PointerEvent::Down { x: 1.0, y: 2.0 },
                PointerEvent::Move { x: 1.0, y: 5.0 }
            ]
        );
        assert!(latch.take().pointer.is_empty());
    }
}
