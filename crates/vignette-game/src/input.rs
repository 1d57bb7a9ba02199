//! Input system with action-based mapping
//!
//! Raw winit key and mouse events are translated into a small set of
//! actions. Movement letters are matched on the logical character the
//! keyboard produced, so the alternate layout binds `, a o e` the way the
//! user sees them; arrows, Space and Enter are matched on the physical key.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{Key, KeyCode, PhysicalKey};

use crate::player::DirectionInput;

/// Actions the vignette understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// `w` / `,` / up arrow
    MoveUp,
    /// `s` / `o` / down arrow
    MoveDown,
    /// `a` / left arrow
    MoveLeft,
    /// `d` / `e` / right arrow
    MoveRight,
    /// Space
    Interact,
    /// Left mouse button or Enter: skip or advance dialogue
    Advance,
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// The four direction flags for the body
    pub fn direction(&self) -> DirectionInput {
        DirectionInput {
            up: self.is_held(InputAction::MoveUp),
            down: self.is_held(InputAction::MoveDown),
            left: self.is_held(InputAction::MoveLeft),
            right: self.is_held(InputAction::MoveRight),
        }
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
    }

    fn apply(&mut self, action: InputAction, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.held.contains(&action) {
                    self.just_pressed.insert(action);
                }
                self.held.insert(action);
            }
            ElementState::Released => {
                self.held.remove(&action);
            }
        }
    }
}

/// Something that can be bound to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    /// Logical character produced by the keyboard layout (lowercase)
    Char(char),
    /// Physical key
    Key(KeyCode),
    /// Mouse button (0 = left, 1 = right, 2 = middle)
    Mouse(u32),
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<char> for InputBinding {
    fn from(c: char) -> Self {
        Self::Char(c.to_ascii_lowercase())
    }
}

/// Maps inputs to actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<InputBinding, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::for_layout(false)
    }
}

impl InputBindings {
    /// Bindings without any entries
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Standard (`w a s d`) or alternate (`, a o e`) layout bindings
    pub fn for_layout(alternate: bool) -> Self {
        let mut bindings = Self::empty();

        let letters = if alternate {
            [',', 'a', 'o', 'e']
        } else {
            ['w', 'a', 's', 'd']
        };
        let moves = [
            InputAction::MoveUp,
            InputAction::MoveLeft,
            InputAction::MoveDown,
            InputAction::MoveRight,
        ];
        for (letter, action) in letters.into_iter().zip(moves) {
            bindings.bind(letter, action);
        }

        bindings.bind(KeyCode::ArrowUp, InputAction::MoveUp);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveDown);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Space, InputAction::Interact);
        bindings.bind(KeyCode::Enter, InputAction::Advance);
        bindings.bind(InputBinding::Mouse(0), InputAction::Advance);

        bindings
    }

    pub fn bind(&mut self, binding: impl Into<InputBinding>, action: InputAction) {
        self.bindings.insert(binding.into(), action);
    }

    /// Get the action for a binding, if any
    pub fn get_action(&self, binding: &InputBinding) -> Option<InputAction> {
        self.bindings.get(binding).copied()
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug, Default)]
pub struct InputHandler {
    pub state: InputState,
    pub bindings: InputBindings,
}

impl InputHandler {
    pub fn new(bindings: InputBindings) -> Self {
        Self {
            state: InputState::new(),
            bindings,
        }
    }

    /// Handle a keyboard event. The logical key is tried first, then the
    /// physical key.
    pub fn handle_key(&mut self, physical_key: PhysicalKey, logical_key: &Key, state: ElementState) {
        let from_char = match logical_key {
            Key::Character(text) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => self.bindings.get_action(&InputBinding::from(c)),
                    _ => None,
                }
            }
            _ => None,
        };
        let action = from_char.or_else(|| match physical_key {
            PhysicalKey::Code(code) => self.bindings.get_action(&InputBinding::Key(code)),
            PhysicalKey::Unidentified(_) => None,
        });

        if let Some(action) = action {
            self.state.apply(action, state);
        }
    }

    /// Handle a mouse button event
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let button_id = match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(id) => id as u32,
        };

        if let Some(action) = self.bindings.get_action(&InputBinding::Mouse(button_id)) {
            self.state.apply(action, state);
        }
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.state.clear_frame();
    }
}
