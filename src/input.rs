//! Keyboard and pointer input.
//!
//! Keys are mapped to [`Action`]s through [`KeyBindings`]. Movement actions edit the
//! controlled character's velocity additively: a press adds the action's axis, the matching
//! release subtracts it again. Opposite keys held together therefore cancel out.

use std::collections::HashMap;

use cgmath::{Vector2, Vector3};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::camera::Projection;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    MoveRight,
    MoveLeft,
}

impl Action {
    /// Unit velocity change of a movement action.
    pub fn axis(self) -> Option<Vector3<f32>> {
        match self {
            Action::MoveUp => Some(Vector3::new(0.0, 1.0, 0.0)),
            Action::MoveDown => Some(Vector3::new(0.0, -1.0, 0.0)),
            Action::MoveRight => Some(Vector3::new(1.0, 0.0, 0.0)),
            Action::MoveLeft => Some(Vector3::new(-1.0, 0.0, 0.0)),
            Action::Quit => None,
        }
    }
}

/// Velocity after a key press (`pressed == true`) or release of `action`.
pub fn apply_key(velocity: Vector3<f32>, action: Action, pressed: bool) -> Vector3<f32> {
    match action.axis() {
        Some(axis) if pressed => velocity + axis,
        Some(axis) => velocity - axis,
        None => velocity,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Action>,
}

impl KeyBindings {
    /// No keys bound.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing an earlier binding of the same key.
    pub fn bind(mut self, key: KeyCode, action: Action) -> Self {
        self.bindings.insert(key, action);
        self
    }

    pub fn resolve(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// Action and press state of a keyboard event.
    ///
    /// OS key repeats are dropped so that holding a key adds its axis only once.
    pub fn resolve_event(&self, event: &KeyEvent) -> Option<(Action, bool)> {
        if event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        self.resolve(code)
            .map(|action| (action, event.state == ElementState::Pressed))
    }
}

impl Default for KeyBindings {
    /// Escape quits, WASD moves.
    fn default() -> Self {
        Self::new()
            .bind(KeyCode::Escape, Action::Quit)
            .bind(KeyCode::KeyW, Action::MoveUp)
            .bind(KeyCode::KeyS, Action::MoveDown)
            .bind(KeyCode::KeyD, Action::MoveRight)
            .bind(KeyCode::KeyA, Action::MoveLeft)
    }
}

/// Convert a cursor position (origin top-left, y down) to world space (origin bottom-left,
/// y up), rescaling from the window size to the projection size.
pub fn screen_to_world(
    position: PhysicalPosition<f64>,
    window: PhysicalSize<u32>,
    projection: &Projection,
) -> Vector2<f32> {
    let width = window.width.max(1) as f64;
    let height = window.height.max(1) as f64;
    Vector2::new(
        (position.x / width) as f32 * projection.width,
        (1.0 - position.y / height) as f32 * projection.height,
    )
}
