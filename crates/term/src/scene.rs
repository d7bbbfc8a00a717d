//! TermScene: the terminal's scene graph.
//!
//! Stores box visuals, the camera and the projection the controller pushes
//! through [`SceneSurface`]. Drawing happens in [`crate::view`].

use glam::{Mat4, Vec3};

use crate::core::{OrthoProjection, SceneSurface, VisualHandle};
use crate::types::{BoxShape, Pose, FRUSTUM_SIZE};

/// One box in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub shape: BoxShape,
    pub pose: Pose,
    pub hue: f32,
}

#[derive(Debug, Clone)]
pub struct TermScene {
    slots: Vec<Option<Visual>>,
    free: Vec<u32>,
    eye: Vec3,
    target: Vec3,
    projection: OrthoProjection,
}

impl Default for TermScene {
    fn default() -> Self {
        Self::new()
    }
}

impl TermScene {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            eye: Vec3::new(4.0, 4.0, 4.0),
            target: Vec3::ZERO,
            projection: OrthoProjection::from_viewport(FRUSTUM_SIZE, 1, 1),
        }
    }

    pub fn visual(&self, handle: VisualHandle) -> Option<&Visual> {
        self.slots.get(handle.0 as usize).and_then(|v| v.as_ref())
    }

    /// Live visuals in insertion order.
    pub fn visuals(&self) -> impl Iterator<Item = &Visual> {
        self.slots.iter().filter_map(|v| v.as_ref())
    }

    pub fn len(&self) -> usize {
        self.visuals().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn projection(&self) -> OrthoProjection {
        self.projection
    }

    /// World-to-view transform for the current camera.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }
}

impl SceneSurface for TermScene {
    fn add_visual(&mut self, shape: BoxShape, pose: Pose, hue: f32) -> VisualHandle {
        let visual = Some(Visual { shape, pose, hue });
        if let Some(id) = self.free.pop() {
            self.slots[id as usize] = visual;
            return VisualHandle(id);
        }
        self.slots.push(visual);
        VisualHandle((self.slots.len() - 1) as u32)
    }

    fn set_pose(&mut self, handle: VisualHandle, pose: Pose) {
        if let Some(Some(v)) = self.slots.get_mut(handle.0 as usize) {
            v.pose = pose;
        }
    }

    fn set_shape(&mut self, handle: VisualHandle, shape: BoxShape) {
        if let Some(Some(v)) = self.slots.get_mut(handle.0 as usize) {
            v.shape = shape;
        }
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0 as usize) {
            if slot.take().is_some() {
                self.free.push(handle.0);
            }
        }
    }

    fn set_camera(&mut self, eye: Vec3, target: Vec3) {
        self.eye = eye;
        self.target = target;
    }

    fn set_projection(&mut self, projection: OrthoProjection, _width: u32, _height: u32) {
        // The view maps NDC onto whatever framebuffer it is handed.
        self.projection = projection;
    }
}
