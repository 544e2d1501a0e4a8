//! Pointer drag to turntable yaw.
//!
//! One small state record per session: whether a drag is active and where
//! the pointer was last seen. Horizontal movement maps linearly to yaw; no
//! momentum, no damping, and the accumulated angle is never wrapped.

/// Radians of yaw per pixel of horizontal drag.
pub const ROTATION_SPEED: f32 = 0.01;

#[derive(Debug, Default, Clone, Copy)]
pub struct DragState {
    active: bool,
    last_x: f32,
    last_y: f32,
}

impl DragState {
    /// Begins a drag at the given pointer position.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.active = true;
        self.last_x = x;
        self.last_y = y;
    }

    /// Feeds a pointer position; returns the yaw delta to apply, if any.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Option<f32> {
        if !self.active {
            return None;
        }
        let delta_x = x - self.last_x;
        self.last_x = x;
        self.last_y = y;
        Some(delta_x * ROTATION_SPEED)
    }

    /// Ends the drag. Pointer-leave behaves identically.
    pub fn pointer_up(&mut self) {
        self.active = false;
    }
}
