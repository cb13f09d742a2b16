//! Crouch toggling.
//!
//! Crouching shrinks the body vertically on press and restores the original
//! scale on release. The press is ignored while airborne; the release always
//! restores, whatever the state.

use crate::intent::ActionInput;
use crate::state::MovementState;

/// A crouch scale change for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrouchTransition {
    /// Shrink to the crouch scale and push down.
    Enter,
    /// Restore the starting scale.
    Exit,
}

/// Decide the crouch transition from the crouch action and the last movement state.
pub fn crouch_transition(crouch: &ActionInput, state: MovementState) -> Option<CrouchTransition> {
    if crouch.is_pressed() && state != MovementState::Airborne {
        Some(CrouchTransition::Enter)
    } else if crouch.is_released() {
        Some(CrouchTransition::Exit)
    } else {
        None
    }
}
