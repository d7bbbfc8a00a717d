//! Collaborator boundary.
//!
//! The controller never renders and never simulates. It talks to a scene
//! surface and a rigid-body world through these two narrow traits and keeps
//! only the opaque handles they hand back.

use glam::Vec3;

use crate::camera::OrthoProjection;
use crate::types::{BoxShape, Pose};

/// Opaque handle to a visual owned by a [`SceneSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u32);

/// Opaque handle to a body owned by a [`RigidBodyWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

/// Scene/render surface: owns visual lifetime and frame presentation.
///
/// Presenting a frame is the host's business; the controller only keeps the
/// scene graph in sync.
pub trait SceneSurface {
    /// Add a box visual tinted with `hue` (degrees).
    fn add_visual(&mut self, shape: BoxShape, pose: Pose, hue: f32) -> VisualHandle;

    fn set_pose(&mut self, handle: VisualHandle, pose: Pose);

    fn set_shape(&mut self, handle: VisualHandle, shape: BoxShape);

    fn remove_visual(&mut self, handle: VisualHandle);

    /// Place the camera at `eye`, looking at `target`.
    fn set_camera(&mut self, eye: Vec3, target: Vec3);

    /// Apply a new projection and output size after a viewport change.
    fn set_projection(&mut self, projection: OrthoProjection, width: u32, height: u32);
}

/// Rigid-body world: owns fragment fall simulation.
pub trait RigidBodyWorld {
    /// Add a box body. `mass == 0.0` makes it immovable.
    fn add_body(&mut self, shape: BoxShape, mass: f32, pose: Pose) -> BodyHandle;

    fn replace_shape(&mut self, handle: BodyHandle, shape: BoxShape);

    /// Teleport a body (used for the immovable moving layer).
    fn set_body_pose(&mut self, handle: BodyHandle, pose: Pose);

    fn remove_body(&mut self, handle: BodyHandle);

    /// Advance the simulation by a fixed step.
    fn step(&mut self, dt: f32);

    /// Current simulated pose, `None` for unknown handles.
    fn pose(&self, handle: BodyHandle) -> Option<Pose>;
}
