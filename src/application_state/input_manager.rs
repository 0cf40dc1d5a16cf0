//! # Input Manager
//!
//! This module handles input processing for the application, including:
//! - Keyboard input state tracking
//! - Mouse input state tracking
//! - Input state management between frames

use std::collections::{HashMap, HashSet};

use super::input_state::{KeyCode, MouseButton, MouseInput, ProcessedInputState, RawInputState};

/// Manages the state of all input devices and processes input events.
///
/// This struct maintains the current state of keyboard and mouse inputs.
/// Events are fed in as they arrive; once per frame the states are turned into a
/// [`ProcessedInputState`] with press/hold/release transitions.
#[derive(Debug, Clone)]
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,
    /// Keys that went down at least once during the current frame
    pub key_presses: HashSet<KeyCode>,

    /// Current state of mouse inputs
    pub mouse_inputs: MouseInput,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a new InputManager with default state.
    ///
    /// Initializes all tracked keyboard keys and mouse buttons to 'released' state.
    pub fn new() -> Self {
        let keyboard_inputs_old: HashMap<KeyCode, bool> =
            KeyCode::ALL.iter().map(|key| (*key, false)).collect();
        let keyboard_inputs_new = keyboard_inputs_old.clone();

        let mouse_button_inputs_old: HashMap<MouseButton, bool> = MouseButton::ALL
            .iter()
            .map(|button| (*button, false))
            .collect();
        let mouse_button_inputs_new = mouse_button_inputs_old.clone();

        let mouse_inputs = MouseInput {
            mouse_button_inputs_old,
            mouse_button_inputs_new,
            mouse_button_presses: HashSet::new(),
            mouse_delta: None,
        };

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            key_presses: HashSet::new(),
            mouse_inputs,
        }
    }

    /// Updates the old state with the current state to prepare for the next frame.
    ///
    /// This should be called at the end of each frame to ensure that the "old" state
    /// is properly updated for the next frame's comparisons.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }

        for (button, new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            if let Some(old_state) = self.mouse_inputs.mouse_button_inputs_old.get_mut(button) {
                *old_state = *new_state;
            }
        }
    }

    /// Records a key going down or up.
    ///
    /// A key that goes down during a frame reads as pressed for that frame, even if it is
    /// released again before the frame is processed.
    ///
    /// # Arguments
    /// * `key` - The key that changed
    /// * `pressed` - Whether the key is now down
    pub fn intake_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            if pressed && !*key_state {
                self.key_presses.insert(key);
            }
            *key_state = pressed;
        }
    }

    /// Records a mouse button going down or up, remembering presses like
    /// [`InputManager::intake_key`].
    pub fn intake_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if let Some(button_state) = self.mouse_inputs.mouse_button_inputs_new.get_mut(&button) {
            if pressed && !*button_state {
                self.mouse_inputs.mouse_button_presses.insert(button);
            }
            *button_state = pressed;
        }
    }

    /// Adds mouse movement to the delta of the current frame.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) delta of mouse movement since the last event
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (x, y) = self.mouse_inputs.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_inputs.mouse_delta = Some((x + delta.0, y + delta.1));
    }

    /// Creates a processed input state from the current raw boolean states.
    ///
    /// This translates the raw boolean states into RawInputState enum values
    /// that represent the state transitions (pressed, held, released, not pressed).
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                let state = if self.key_presses.contains(key) {
                    RawInputState::Pressed
                } else {
                    RawInputState::from_raw_states(old_state, new_state)
                };
                (*key, state)
            })
            .collect();

        let mouse_button_states = self
            .mouse_inputs
            .mouse_button_inputs_new
            .iter()
            .map(|(button, &new_state)| {
                let old_state = self
                    .mouse_inputs
                    .mouse_button_inputs_old
                    .get(button)
                    .copied()
                    .unwrap_or(false);
                let state = if self.mouse_inputs.mouse_button_presses.contains(button) {
                    RawInputState::Pressed
                } else {
                    RawInputState::from_raw_states(old_state, new_state)
                };
                (*button, state)
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: self.mouse_inputs.mouse_delta,
        }
    }

    /// Returns the processed input state and resets internal state for the next frame.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.reset_inputs();
        processed_input
    }

    /// Ends the frame: current states become the previous ones, and recorded presses and
    /// mouse motion are cleared.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.key_presses.clear();
        self.mouse_inputs.mouse_button_presses.clear();
        self.mouse_inputs.mouse_delta = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_goes_through_press_hold_release() {
        let mut manager = InputManager::new();
        manager.intake_key(KeyCode::KeyW, true);
        let first = manager.get_and_reset_processed_input();
        assert_eq!(first.get_key_state(KeyCode::KeyW), RawInputState::Pressed);

        let second = manager.get_and_reset_processed_input();
        assert_eq!(second.get_key_state(KeyCode::KeyW), RawInputState::Held);

        manager.intake_key(KeyCode::KeyW, false);
        let third = manager.get_and_reset_processed_input();
        assert_eq!(third.get_key_state(KeyCode::KeyW), RawInputState::Released);

        let fourth = manager.get_and_reset_processed_input();
        assert_eq!(fourth.get_key_state(KeyCode::KeyW), RawInputState::NotPressed);
    }

    #[test]
    fn tap_within_one_frame_reads_as_one_press() {
        let mut manager = InputManager::new();
        manager.intake_mouse_button(MouseButton::Left, true);
        manager.intake_mouse_button(MouseButton::Left, false);
        let state = manager.get_and_reset_processed_input();
        assert_eq!(
            state.get_mouse_button_state(MouseButton::Left),
            RawInputState::Pressed
        );
        let next = manager.get_and_reset_processed_input();
        assert_eq!(
            next.get_mouse_button_state(MouseButton::Left),
            RawInputState::NotPressed
        );

        manager.intake_key(KeyCode::Digit3, true);
        manager.intake_key(KeyCode::Digit3, false);
        let state = manager.get_and_reset_processed_input();
        assert!(state.get_key_state(KeyCode::Digit3).is_just_pressed());
    }

    #[test]
    fn release_and_press_again_within_a_frame_is_a_new_press() {
        let mut manager = InputManager::new();
        manager.intake_mouse_button(MouseButton::Right, true);
        manager.get_and_reset_processed_input();
        manager.intake_mouse_button(MouseButton::Right, false);
        manager.intake_mouse_button(MouseButton::Right, true);
        let state = manager.get_and_reset_processed_input();
        assert_eq!(
            state.get_mouse_button_state(MouseButton::Right),
            RawInputState::Pressed
        );
    }

    #[test]
    fn mouse_motion_accumulates_until_reset() {
        let mut manager = InputManager::new();
        manager.intake_mouse_motion((3.0, -1.0));
        manager.intake_mouse_motion((2.0, 4.0));
        let state = manager.get_and_reset_processed_input();
        assert_eq!(state.get_mouse_delta(), Some((5.0, 3.0)));
        assert_eq!(manager.get_and_reset_processed_input().get_mouse_delta(), None);
    }
}
