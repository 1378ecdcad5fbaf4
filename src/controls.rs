//! Keyboard bindings
//!
//! Key codes follow the DOM `KeyboardEvent.code` names. Movement keys are
//! held flags; restart and camera toggle are one-shot events consumed by
//! the next tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::{MoveInput, TickInput};

/// Something a key can do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Restart,
    ToggleCamera,
}

/// Key code to action table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    pub bindings: Vec<(String, Action)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = [
            ("KeyW", Action::Forward),
            ("KeyS", Action::Back),
            ("KeyA", Action::Left),
            ("KeyD", Action::Right),
            ("Space", Action::Jump),
            ("KeyR", Action::Restart),
            ("KeyC", Action::ToggleCamera),
        ];
        Self {
            bindings: bindings
                .into_iter()
                .map(|(code, action)| (code.to_string(), action))
                .collect(),
        }
    }
}

impl KeyBindings {
    pub fn action_for(&self, code: &str) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == code)
            .map(|(_, action)| *action)
    }
}

/// Accumulated keyboard state between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub held: MoveInput,
    restart: bool,
    toggle_camera: bool,
}

impl InputState {
    /// Returns true if the key was bound (the caller should swallow it)
    pub fn key_down(&mut self, bindings: &KeyBindings, code: &str) -> bool {
        let Some(action) = bindings.action_for(code) else {
            return false;
        };
        match action {
            Action::Restart => self.restart = true,
            Action::ToggleCamera => self.toggle_camera = true,
            held => self.set_held(held, true),
        }
        true
    }

    pub fn key_up(&mut self, bindings: &KeyBindings, code: &str) -> bool {
        match bindings.action_for(code) {
            Some(action) => {
                self.set_held(action, false);
                true
            }
            None => false,
        }
    }

    fn set_held(&mut self, action: Action, down: bool) {
        match action {
            Action::Forward => self.held.forward = down,
            Action::Back => self.held.back = down,
            Action::Left => self.held.left = down,
            Action::Right => self.held.right = down,
            Action::Jump => self.held.jump = down,
            Action::Restart | Action::ToggleCamera => {}
        }
    }

    /// Release everything (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.held = MoveInput::default();
    }

    /// Build this tick's input and clear the one-shot events
    pub fn take_tick_input(&mut self, camera_forward: Vec3) -> TickInput {
        let input = TickInput {
            movement: self.held,
            camera_forward,
            restart: self.restart,
            toggle_camera: self.toggle_camera,
        };
        self.restart = false;
        self.toggle_camera = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for("KeyW"), Some(Action::Forward));
        assert_eq!(keys.action_for("Space"), Some(Action::Jump));
        assert_eq!(keys.action_for("KeyC"), Some(Action::ToggleCamera));
        assert_eq!(keys.action_for("KeyQ"), None);
    }

    #[test]
    fn test_held_keys() {
        let keys = KeyBindings::default();
        let mut input = InputState::default();
        assert!(input.key_down(&keys, "KeyW"));
        assert!(input.key_down(&keys, "KeyA"));
        assert!(!input.key_down(&keys, "Escape"));
        let tick = input.take_tick_input(Vec3::NEG_Z);
        assert!(tick.movement.forward && tick.movement.left);

        input.key_up(&keys, "KeyW");
        let tick = input.take_tick_input(Vec3::NEG_Z);
        assert!(!tick.movement.forward && tick.movement.left);

        input.release_all();
        assert_eq!(input.take_tick_input(Vec3::NEG_Z).movement, MoveInput::default());
    }

    #[test]
    fn test_one_shot_events_consumed_once() {
        let keys = KeyBindings::default();
        let mut input = InputState::default();
        input.key_down(&keys, "KeyR");
        input.key_down(&keys, "KeyC");
        let first = input.take_tick_input(Vec3::NEG_Z);
        assert!(first.restart && first.toggle_camera);
        let second = input.take_tick_input(Vec3::NEG_Z);
        assert!(!second.restart && !second.toggle_camera);
        // Releasing a one-shot key does not touch held flags
        input.key_up(&keys, "KeyR");
        assert_eq!(input.held, MoveInput::default());
    }
}
