//! Keyboard input
//!
//! Listeners record which key codes are held; the frame loop reads a
//! [`TickInput`] snapshot and never waits for input.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Logical actions the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
}

/// Key codes (`KeyboardEvent.code`) bound to each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub fire: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["ArrowLeft".into(), "KeyA".into()],
            move_right: vec!["ArrowRight".into(), "KeyD".into()],
            fire: vec!["Space".into()],
        }
    }
}

impl KeyBindings {
    /// Action bound to a key code, if any
    pub fn action_for(&self, code: &str) -> Option<Action> {
        let bound = |keys: &[String]| keys.iter().any(|k| k == code);
        if bound(&self.move_left) {
            Some(Action::MoveLeft)
        } else if bound(&self.move_right) {
            Some(Action::MoveRight)
        } else if bound(&self.fire) {
            Some(Action::Fire)
        } else {
            None
        }
    }

    fn keys(&self, action: Action) -> &[String] {
        match action {
            Action::MoveLeft => &self.move_left,
            Action::MoveRight => &self.move_right,
            Action::Fire => &self.fire,
        }
    }
}

/// Set of currently held key codes
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Returns the bound action so the host can
    /// suppress the browser default (scrolling on Space).
    pub fn handle_key(
        &mut self,
        bindings: &KeyBindings,
        code: &str,
        pressed: bool,
    ) -> Option<Action> {
        if pressed {
            self.held.insert(code.to_owned());
        } else {
            self.held.remove(code);
        }
        bindings.action_for(code)
    }

    /// Drop every held key (window lost focus)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Whether any key bound to `action` is held
    pub fn is_held(&self, bindings: &KeyBindings, action: Action) -> bool {
        bindings.keys(action).iter().any(|k| self.held.contains(k))
    }

    /// Snapshot for this frame
    pub fn snapshot(&self, bindings: &KeyBindings) -> TickInput {
        TickInput {
            move_left: self.is_held(bindings, Action::MoveLeft),
            move_right: self.is_held(bindings, Action::MoveRight),
            fire: self.is_held(bindings, Action::Fire),
        }
    }
}
