//! Layer and fragment records.

use glam::Vec3;

use crate::collab::{BodyHandle, VisualHandle};
use crate::types::{Axis, BoxShape, Extent, Pose};

/// Where a layer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerState {
    /// Immobile foundation, never trimmed.
    Base,
    /// The top layer, sliding along its axis.
    Moving,
    /// Cut and frozen.
    Placed,
}

/// A block in the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub index: usize,
    pub position: Vec3,
    pub extent: Extent,
    pub axis: Axis,
    pub state: LayerState,
    pub visual: VisualHandle,
    pub body: BodyHandle,
}

impl Layer {
    pub fn pose(&self) -> Pose {
        Pose::at(self.position)
    }

    pub fn shape(&self, height: f32) -> BoxShape {
        self.extent.to_box(height)
    }

    pub fn is_moving(&self) -> bool {
        self.state == LayerState::Moving
    }
}

/// A trimmed-off overhang, simulated until it is pruned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub pose: Pose,
    pub extent: Extent,
    /// Axis of the cut that produced it.
    pub cut_axis: Axis,
    pub visual: VisualHandle,
    pub body: BodyHandle,
}
