//! Core types module - shared data structures and constants
//!
//! Pure data shared by the controller, the collaborators and the terminal
//! front end. Nothing in here talks to a renderer or a physics engine.
//!
//! # World Units
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ORIGINAL_BOX_SIZE` | 3.0 | Base layer width and depth |
//! | `BOX_HEIGHT` | 1.0 | Height of every layer and fragment |
//! | `SPAWN_OFFSET` | 10.0 | Distance from the stack where a moving layer starts |
//! | `DEFAULT_SPEED` | 5.0 | Moving layer speed in units per second |
//! | `PER_FRAME_STEP` | 0.15 | Per-frame increment for fixed-step motion |
//! | `PHYSICS_STEP` | 1/60 | Fixed rigid-body step per presented frame |
//! | `CAMERA_OFFSET` | 4.0 | Camera height above the second-highest layer |
//! | `FRUSTUM_SIZE` | 10.0 | Vertical extent of the orthographic view |
//!
//! # Examples
//!
//! ```
//! use stacker_types::{Axis, Extent};
//!
//! let extent = Extent::new(3.0, 3.0).with_along(Axis::X, 2.6);
//! assert_eq!(extent.along(Axis::X), 2.6);
//! assert_eq!(extent.along(Axis::Z), 3.0);
//!
//! assert_eq!(Axis::X.other(), Axis::Z);
//! ```

use glam::{Quat, Vec3};
use serde::Serialize;

/// Base layer width and depth.
pub const ORIGINAL_BOX_SIZE: f32 = 3.0;

/// Height of every layer and fragment.
pub const BOX_HEIGHT: f32 = 1.0;

/// Off-stack start coordinate (negated) for a freshly spawned moving layer.
pub const SPAWN_OFFSET: f32 = 10.0;

/// Moving layer speed in units per second (real-time motion).
pub const DEFAULT_SPEED: f32 = 5.0;

/// Moving layer increment per presented frame (fixed-step motion).
pub const PER_FRAME_STEP: f32 = 0.15;

/// Fixed rigid-body simulation step, advanced once per presented frame.
pub const PHYSICS_STEP: f32 = 1.0 / 60.0;

/// Camera height above `BOX_HEIGHT * (layers - 2)`.
pub const CAMERA_OFFSET: f32 = 4.0;

/// Vertical extent of the orthographic view volume.
pub const FRUSTUM_SIZE: f32 = 10.0;

/// Slack past a full miss before the drift check ends the game.
pub const DRIFT_TOLERANCE: f32 = 1.0;

/// Mass given to every overhang fragment.
pub const FRAGMENT_MASS: f32 = 5.0;

/// Gravity along y for the rigid-body world.
pub const GRAVITY: f32 = -10.0;

/// Fragments this far below the base layer are pruned.
pub const PRUNE_DEPTH: f32 = 40.0;

/// Hue of the base layer in degrees.
pub const BASE_HUE: f32 = 30.0;

/// Hue increment per layer in degrees.
pub const HUE_STEP: f32 = 4.0;

/// Presentation frame interval in milliseconds (~60 FPS).
pub const FRAME_MS: u32 = 16;

/// Minimum gap between two accepted activations (ms).
pub const ACTIVATE_DEBOUNCE_MS: u32 = 80;

/// Hue for the layer at `index`, wrapped to `[0, 360)`.
pub fn layer_hue(index: usize) -> f32 {
    (BASE_HUE + index as f32 * HUE_STEP).rem_euclid(360.0)
}

/// Horizontal axis a layer slides along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// The perpendicular horizontal axis.
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Read this axis' component from a world vector.
    pub fn of(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.z,
        }
    }

    /// Write this axis' component into a world vector.
    pub fn set(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Z => v.z = value,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Z => "z",
        }
    }
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NotStarted => "notStarted",
            Phase::Running => "running",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Horizontal footprint of a layer: width along x, depth along z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub width: f32,
    pub depth: f32,
}

impl Extent {
    pub const fn new(width: f32, depth: f32) -> Self {
        Self { width, depth }
    }

    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Z => self.depth,
        }
    }

    /// Copy with the size along `axis` replaced.
    pub fn with_along(self, axis: Axis, size: f32) -> Self {
        match axis {
            Axis::X => Self { width: size, ..self },
            Axis::Z => Self { depth: size, ..self },
        }
    }

    /// Full box shape for a layer of the given height.
    pub fn to_box(self, height: f32) -> BoxShape {
        BoxShape::new(self.width, height, self.depth)
    }
}

/// Axis-aligned box described by its full side lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxShape {
    pub size: Vec3,
}

impl BoxShape {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            size: Vec3::new(width, height, depth),
        }
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size * 0.5
    }
}

/// Position and orientation of a box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Host-level actions.
///
/// `Activate` is the only gameplay input; `Restart` rebuilds the session
/// from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackAction {
    Activate,
    Restart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_alternates() {
        assert_eq!(Axis::X.other(), Axis::Z);
        assert_eq!(Axis::Z.other(), Axis::X);
        assert_eq!(Axis::X.other().other(), Axis::X);
    }

    #[test]
    fn axis_reads_and_writes_components() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::X.of(v), 1.0);
        assert_eq!(Axis::Z.of(v), 3.0);

        Axis::Z.set(&mut v, -10.0);
        assert_eq!(v, Vec3::new(1.0, 2.0, -10.0));
    }

    #[test]
    fn extent_along_axis() {
        let e = Extent::new(2.0, 3.0);
        assert_eq!(e.along(Axis::X), 2.0);
        assert_eq!(e.along(Axis::Z), 3.0);
        assert_eq!(e.with_along(Axis::Z, 1.5), Extent::new(2.0, 1.5));
    }

    #[test]
    fn box_shape_half_extents() {
        let shape = Extent::new(3.0, 2.0).to_box(BOX_HEIGHT);
        assert_eq!(shape.half_extents(), Vec3::new(1.5, 0.5, 1.0));
    }

    #[test]
    fn layer_hue_steps_and_wraps() {
        assert_eq!(layer_hue(0), 30.0);
        assert_eq!(layer_hue(1), 34.0);
        assert_eq!(layer_hue(90), 30.0);
    }

    #[test]
    fn phase_defaults_to_not_started() {
        assert_eq!(Phase::default(), Phase::NotStarted);
        assert_eq!(Phase::GameOver.as_str(), "gameOver");
    }
}
