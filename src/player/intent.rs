//! # Intent Module
//!
//! The per-tick input surface of the player simulation. An external
//! input collaborator maps raw device events (keys, touch joystick,
//! pointer lock) onto these boolean intents and look deltas; the core
//! never parses device events itself.

/// Per-tick movement and look intents.
///
/// All booleans describe "the player wants this during the current
/// tick"; the simulation scales them by elapsed time. `rotate_view`
/// carries raw look deltas (pointer movement), which are applied
/// directly without time scaling.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Intent {
    /// Walk along the facing direction.
    pub move_forward: bool,
    /// Walk against the facing direction.
    pub move_backward: bool,
    /// Strafe left.
    pub move_left: bool,
    /// Strafe right.
    pub move_right: bool,
    /// Jump; only honored when gravity is on and the body is grounded.
    pub jump: bool,
    /// Rise; only honored when gravity is off.
    pub move_up: bool,
    /// Sink; only honored when gravity is off.
    pub move_down: bool,
    /// Turn left at the configured turn speed.
    pub turn_left: bool,
    /// Turn right at the configured turn speed.
    pub turn_right: bool,
    /// Tilt the view up at the configured turn speed.
    pub look_up: bool,
    /// Tilt the view down at the configured turn speed.
    pub look_down: bool,
    /// Raw look delta `(dx, dy)` in device units; 100 device units turn
    /// one radian.
    pub rotate_view: Option<(f64, f64)>,
}

impl Intent {
    /// An intent with nothing pressed; the body still falls under
    /// gravity.
    pub fn idle() -> Self {
        Intent::default()
    }
}
