//! # Input Manager
//!
//! This module handles input processing for the application, including:
//! - Keyboard input state tracking
//! - Mouse button and click tracking
//! - Pointer motion accumulation and capture
//! - Per-tick snapshots of the latched input

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{MouseInput, ProcessedInputState, RawInputState};

const KEY_CODES: [KeyCode; 9] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::Space,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

const MOUSE_BUTTONS: [MouseButton; 5] = [
    MouseButton::Left,
    MouseButton::Right,
    MouseButton::Middle,
    MouseButton::Forward,
    MouseButton::Back,
];

/// Manages the state of all input devices and processes input events.
///
/// Input is latched between ticks. Held keys persist until released; pointer
/// motion and clicks accumulate until the next snapshot consumes them.
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,

    /// Current state of mouse inputs
    pub mouse_inputs: MouseInput,

    /// Whether the pointer is locked to the view
    pointer_captured: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a new InputManager with default state.
    ///
    /// Initializes all tracked keys and buttons to 'released' with the pointer
    /// uncaptured.
    pub fn new() -> Self {
        let keyboard_inputs_old: HashMap<_, _> = KEY_CODES.iter().map(|&k| (k, false)).collect();
        let keyboard_inputs_new = keyboard_inputs_old.clone();

        let mouse_button_inputs_old: HashMap<_, _> =
            MOUSE_BUTTONS.iter().map(|&b| (b, false)).collect();
        let mouse_button_inputs_new = mouse_button_inputs_old.clone();

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_inputs: MouseInput {
                mouse_button_inputs_old,
                mouse_button_inputs_new,
                clicks: Vec::new(),
                mouse_delta: None,
            },
            pointer_captured: false,
        }
    }

    /// Updates the old state with the current state to prepare for the next frame.
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

    /// Processes a window event and updates internal input state.
    ///
    /// Keyboard and mouse button events are latched. Losing focus releases every
    /// key and the pointer so nothing stays stuck.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => {
                self.intake_key(*key, *state == ElementState::Pressed);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                self.intake_mouse_button(*button, *state == ElementState::Pressed);
            }
            WindowEvent::Focused(false) => {
                self.release_all();
            }
            _ => {}
        }
    }

    /// Latches a key transition. Untracked keys are ignored.
    pub fn intake_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            *key_state = pressed;
        }
    }

    /// Latches a button transition; a press is also recorded as a click.
    pub fn intake_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if let Some(button_state) = self.mouse_inputs.mouse_button_inputs_new.get_mut(&button) {
            *button_state = pressed;
        }
        if pressed {
            self.mouse_inputs.clicks.push(button);
        }
    }

    /// Adds pointer movement to the delta accumulated since the last snapshot.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) delta of mouse movement since the last event
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (dx, dy) = self.mouse_inputs.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_inputs.mouse_delta = Some((dx + delta.0, dy + delta.1));
    }

    pub fn set_pointer_captured(&mut self, captured: bool) {
        if self.pointer_captured != captured {
            log::debug!("Pointer capture {}", if captured { "granted" } else { "released" });
        }
        self.pointer_captured = captured;
    }

    pub fn is_pointer_captured(&self) -> bool {
        self.pointer_captured
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
                (*key, RawInputState::from_raw_states(old_state, new_state))
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
                (*button, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: self.mouse_inputs.mouse_delta,
            clicks: self.mouse_inputs.clicks.clone(),
            pointer_captured: self.pointer_captured,
        }
    }

    /// Returns the processed input state and resets the per-frame latches.
    ///
    /// This should be called once per tick so that each click and each unit of
    /// pointer movement is consumed exactly once.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.reset_inputs();
        processed_input
    }

    /// Advances key history and clears pointer motion and clicks.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();

        self.mouse_inputs.mouse_delta = None;
        self.mouse_inputs.clicks.clear();
    }

    /// Releases every key and button and the pointer capture.
    pub fn release_all(&mut self) {
        self.keyboard_inputs_new.values_mut().for_each(|pressed| *pressed = false);
        self.mouse_inputs
            .mouse_button_inputs_new
            .values_mut()
            .for_each(|pressed| *pressed = false);
        self.set_pointer_captured(false);
    }
}
