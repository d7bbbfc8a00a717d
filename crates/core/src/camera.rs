//! Camera rig and orthographic projection.
//!
//! The camera looks down the fixed isometric direction `-(1, 1, 1)`. Only its
//! height changes during play: it climbs toward the stack top at the same
//! rate the moving layer slides, and never overshoots.

use glam::Vec3;
use serde::Serialize;

/// Eye offset from the look-at target.
pub const VIEW_OFFSET: Vec3 = Vec3::new(4.0, 4.0, 4.0);

/// Orthographic view volume bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrthoProjection {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl OrthoProjection {
    /// Bounds for a viewport of `width` x `height`.
    ///
    /// `left/right = ±frustum * aspect / 2`, `top/bottom = ±frustum / 2`.
    /// A zero height is treated as one so the aspect stays finite.
    pub fn from_viewport(frustum_size: f32, width: u32, height: u32) -> Self {
        let aspect = width as f32 / height.max(1) as f32;
        let half_w = frustum_size * aspect / 2.0;
        let half_h = frustum_size / 2.0;
        Self {
            left: -half_w,
            right: half_w,
            top: half_h,
            bottom: -half_h,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Map view-space x/y into normalized device coordinates (`[-1, 1]`).
    pub fn to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        let nx = (x - self.left) / self.width() * 2.0 - 1.0;
        let ny = (y - self.bottom) / self.height() * 2.0 - 1.0;
        (nx, ny)
    }
}

impl Default for OrthoProjection {
    fn default() -> Self {
        Self::from_viewport(crate::types::FRUSTUM_SIZE, 1, 1)
    }
}

/// Camera position tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    eye: Vec3,
}

impl CameraRig {
    /// Camera at its initial isometric pose, `offset` above the ground.
    pub fn new(offset: f32) -> Self {
        Self {
            eye: Vec3::new(VIEW_OFFSET.x, offset, VIEW_OFFSET.z),
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.eye - VIEW_OFFSET
    }

    pub fn height(&self) -> f32 {
        self.eye.y
    }

    /// Move up by at most `step` toward `target_y`. Returns true if it moved.
    pub fn climb_toward(&mut self, target_y: f32, step: f32) -> bool {
        if self.eye.y >= target_y {
            return false;
        }
        self.eye.y = (self.eye.y + step.max(0.0)).min(target_y);
        true
    }
}
