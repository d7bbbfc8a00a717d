//! Headless collaborators.
//!
//! Record-only stand-ins for the scene surface and the rigid-body world, so a
//! session can run without a terminal or a physics engine (tests, benches,
//! replay tooling). The world does not simulate anything: bodies stay where
//! they were put unless a caller moves them with [`HeadlessWorld::nudge`].

use glam::Vec3;

use crate::camera::OrthoProjection;
use crate::collab::{BodyHandle, RigidBodyWorld, SceneSurface, VisualHandle};
use crate::types::{BoxShape, Pose};

#[derive(Debug, Clone, PartialEq)]
pub struct VisualRecord {
    pub shape: BoxShape,
    pub pose: Pose,
    pub hue: f32,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessScene {
    visuals: Vec<Option<VisualRecord>>,
    eye: Vec3,
    target: Vec3,
    projection: OrthoProjection,
    size: (u32, u32),
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visual(&self, handle: VisualHandle) -> Option<&VisualRecord> {
        self.visuals.get(handle.0 as usize).and_then(|v| v.as_ref())
    }

    /// Number of live visuals.
    pub fn live(&self) -> usize {
        self.visuals.iter().filter(|v| v.is_some()).count()
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn projection(&self) -> OrthoProjection {
        self.projection
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl SceneSurface for HeadlessScene {
    fn add_visual(&mut self, shape: BoxShape, pose: Pose, hue: f32) -> VisualHandle {
        self.visuals.push(Some(VisualRecord { shape, pose, hue }));
        VisualHandle((self.visuals.len() - 1) as u32)
    }

    fn set_pose(&mut self, handle: VisualHandle, pose: Pose) {
        if let Some(Some(v)) = self.visuals.get_mut(handle.0 as usize) {
            v.pose = pose;
        }
    }

    fn set_shape(&mut self, handle: VisualHandle, shape: BoxShape) {
        if let Some(Some(v)) = self.visuals.get_mut(handle.0 as usize) {
            v.shape = shape;
        }
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        if let Some(slot) = self.visuals.get_mut(handle.0 as usize) {
            *slot = None;
        }
    }

    fn set_camera(&mut self, eye: Vec3, target: Vec3) {
        self.eye = eye;
        self.target = target;
    }

    fn set_projection(&mut self, projection: OrthoProjection, width: u32, height: u32) {
        self.projection = projection;
        self.size = (width, height);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyRecord {
    pub shape: BoxShape,
    pub mass: f32,
    pub pose: Pose,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessWorld {
    bodies: Vec<Option<BodyRecord>>,
    steps: u64,
    simulated: f32,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&BodyRecord> {
        self.bodies.get(handle.0 as usize).and_then(|b| b.as_ref())
    }

    /// Number of live bodies.
    pub fn live(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_some()).count()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Total simulated time.
    pub fn simulated(&self) -> f32 {
        self.simulated
    }

    /// Move a body as if the simulation had.
    pub fn nudge(&mut self, handle: BodyHandle, pose: Pose) {
        if let Some(Some(b)) = self.bodies.get_mut(handle.0 as usize) {
            b.pose = pose;
        }
    }
}

impl RigidBodyWorld for HeadlessWorld {
    fn add_body(&mut self, shape: BoxShape, mass: f32, pose: Pose) -> BodyHandle {
        self.bodies.push(Some(BodyRecord { shape, mass, pose }));
        BodyHandle((self.bodies.len() - 1) as u32)
    }

    fn replace_shape(&mut self, handle: BodyHandle, shape: BoxShape) {
        if let Some(Some(b)) = self.bodies.get_mut(handle.0 as usize) {
            b.shape = shape;
        }
    }

    fn set_body_pose(&mut self, handle: BodyHandle, pose: Pose) {
        self.nudge(handle, pose);
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        if let Some(slot) = self.bodies.get_mut(handle.0 as usize) {
            *slot = None;
        }
    }

    fn step(&mut self, dt: f32) {
        self.steps += 1;
        self.simulated += dt;
    }

    fn pose(&self, handle: BodyHandle) -> Option<Pose> {
        self.body(handle).map(|b| b.pose)
    }
}
