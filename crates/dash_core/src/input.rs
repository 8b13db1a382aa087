//! Keyboard state tracking with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` returns true every frame the key
//!   is physically down.
//!
//! - **Edge-triggered (just_pressed / just_released):** These are true only during
//!   the frame the transition happened. They are cleared by `end_frame()`, which
//!   the main loop calls only after at least one fixed simulation step has consumed
//!   them. This prevents a jump from being silently lost on a frame that has zero
//!   simulation steps (when the accumulator hasn't built up enough time).
//!
//! OS key-repeat arrives as repeated presses of a held key; those never
//! produce a second `just_pressed`.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Escape,
    F3,
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        assert!(input.is_held(Key::Space));
        assert!(input.is_just_pressed(Key::Space));
    }

    #[test]
    fn test_key_up_clears_held_sets_just_released() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        input.key_up(Key::Space);
        assert!(!input.is_held(Key::Space));
        assert!(input.is_just_released(Key::Space));
    }

    #[test]
    fn test_held_key_does_not_retrigger_after_end_frame() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        input.end_frame();
        // OS key-repeat delivers another press while the key is still down.
        input.key_down(Key::Space);
        assert!(input.is_held(Key::Space));
        assert!(!input.is_just_pressed(Key::Space));
    }

    #[test]
    fn test_release_and_press_again_retriggers() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        input.end_frame();
        input.key_up(Key::Space);
        input.end_frame();
        input.key_down(Key::Space);
        assert!(input.is_just_pressed(Key::Space));
    }

    #[test]
    fn test_key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        // key_up without a prior key_down: held.remove returns false,
        // so just_released should NOT be set.
        input.key_up(Key::Escape);
        assert!(!input.is_just_released(Key::Escape));
        assert!(!input.is_held(Key::Escape));
    }

    #[test]
    fn test_end_frame_clears_transient_state() {
        let mut input = InputState::new();
        input.key_down(Key::F3);
        input.key_down(Key::Space);
        input.end_frame();
        assert!(!input.is_just_pressed(Key::F3));
        assert!(!input.is_just_pressed(Key::Space));
        // Held state should persist across frames.
        assert!(input.is_held(Key::F3));
        assert!(input.is_held(Key::Space));
    }

    #[test]
    fn test_multiple_keys_independent() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        input.key_down(Key::F3);
        input.key_up(Key::Space);
        assert!(!input.is_held(Key::Space));
        assert!(input.is_just_released(Key::Space));
        assert!(input.is_held(Key::F3));
        assert!(!input.is_just_released(Key::F3));
    }

    #[test]
    fn test_default_state_is_empty() {
        let input = InputState::default();
        assert!(!input.is_held(Key::Space));
        assert!(!input.is_just_pressed(Key::Space));
        assert!(!input.is_just_released(Key::Space));
    }
}
