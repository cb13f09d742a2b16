//! Movement intent components.
//!
//! Intents carry the raw per-frame input: two movement axes and edge-aware
//! action buttons. Player input, AI or network code fills them in; the
//! controller systems only ever read intents.

use bevy::prelude::*;

/// A digital action with press/hold/release edges.
///
/// Feed it the current button state once per frame with [`ActionInput::update`].
/// `pressed` is true only on the frame the button goes down, `released` only on
/// the frame it comes up, `held` every frame it is down. Edges are cleared at
/// the end of each frame by the controller.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionInput {
    held: bool,
    pressed: bool,
    released: bool,
}

impl ActionInput {
    /// Update with the current button state, deriving edges from the last one.
    pub fn update(&mut self, down: bool) {
        self.pressed = down && !self.held;
        self.released = !down && self.held;
        self.held = down;
    }

    /// True only on the frame the button went down.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// True every frame the button is down.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// True only on the frame the button came up.
    #[inline]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Drop one-shot edges, keeping the held state.
    pub fn clear_edges(&mut self) {
        self.pressed = false;
        self.released = false;
    }
}

/// Per-frame movement input.
///
/// # Example
///
/// ```rust
/// use slope_character_controller::prelude::*;
///
/// let mut intent = MovementIntent::new();
/// intent.set_axes(0.0, 1.0);
/// intent.sprint.update(true);
///
/// assert!(intent.is_moving());
/// assert!(intent.sprint.is_pressed());
/// assert!(intent.sprint.is_held());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Strafe axis (-1.0 = left, 1.0 = right).
    pub horizontal: f32,
    /// Forward axis (-1.0 = back, 1.0 = forward).
    pub vertical: f32,
    pub jump: ActionInput,
    pub sprint: ActionInput,
    pub crouch: ActionInput,
}

impl MovementIntent {
    /// Create a new empty movement intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both axes, clamped to [-1, 1].
    pub fn set_axes(&mut self, horizontal: f32, vertical: f32) {
        self.horizontal = horizontal.clamp(-1.0, 1.0);
        self.vertical = vertical.clamp(-1.0, 1.0);
    }

    /// Axes as `(strafe, forward)`.
    #[inline]
    pub fn axes(&self) -> Vec2 {
        Vec2::new(self.horizontal, self.vertical)
    }

    /// Check if there is active axis input.
    pub fn is_moving(&self) -> bool {
        self.horizontal.abs() > 0.001 || self.vertical.abs() > 0.001
    }

    /// Zero both axes.
    pub fn clear_axes(&mut self) {
        self.horizontal = 0.0;
        self.vertical = 0.0;
    }

    /// Drop one-shot edges on every action.
    pub fn clear_edges(&mut self) {
        self.jump.clear_edges();
        self.sprint.clear_edges();
        self.crouch.clear_edges();
    }
}

/// Keyboard bindings for a player-driven character.
///
/// Entities carrying this component get their [`MovementIntent`] sampled from
/// `ButtonInput<KeyCode>` every frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub sprint: KeyCode,
    pub crouch: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            sprint: KeyCode::ShiftLeft,
            crouch: KeyCode::ControlLeft,
        }
    }
}

impl KeyBindings {
    /// Raw axis from a positive and a negative key: -1, 0 or 1.
    pub fn axis(keys: &ButtonInput<KeyCode>, positive: KeyCode, negative: KeyCode) -> f32 {
        let value = |key| if keys.pressed(key) { 1.0 } else { 0.0 };
        value(positive) - value(negative)
    }

    /// Write the current keyboard state into an intent.
    pub fn sample(&self, keys: &ButtonInput<KeyCode>, intent: &mut MovementIntent) {
        intent.set_axes(
            Self::axis(keys, self.right, self.left),
            Self::axis(keys, self.forward, self.back),
        );
        intent.jump.update(keys.pressed(self.jump));
        intent.sprint.update(keys.pressed(self.sprint));
        intent.crouch.update(keys.pressed(self.crouch));
    }
}
