//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the stack controller and nothing that draws pixels or
//! integrates forces. Rendering and rigid-body simulation are collaborators
//! reached through [`SceneSurface`] and [`RigidBodyWorld`], which makes the
//! controller:
//!
//! - **Deterministic**: the same inputs and frame deltas give the same stack
//! - **Testable**: [`headless`] collaborators stand in for a renderer and a physics engine
//! - **Portable**: the same session runs in a terminal, headless, or behind any other surface
//!
//! # Module Structure
//!
//! - [`session`]: the stack controller (`start`, `tick`, `place`, `resize`)
//! - [`cut`]: the overlap / overhang / game-over decision
//! - [`camera`]: camera climb and orthographic projection bounds
//! - [`collab`]: collaborator traits and opaque handles
//! - [`config`]: tunables with environment overrides
//! - [`snapshot`]: read-only status surface and transition events
//! - [`headless`]: record-only collaborators
//!
//! # Game Rules
//!
//! - A 3x3 base sits at the origin; the first moving layer slides along x from -10
//! - Activating drops the moving layer: the part overlapping the layer below stays,
//!   the rest falls off as a simulated fragment
//! - The next layer slides along the other axis, carrying the trimmed size
//! - A drop with no overlap ends the game; so does sliding past any possible overlap
//!
//! # Example
//!
//! ```
//! use stacker_core::headless::{HeadlessScene, HeadlessWorld};
//! use stacker_core::{PlaceOutcome, StackSession, StackerConfig};
//!
//! let mut session = StackSession::new(
//!     StackerConfig::default(),
//!     HeadlessScene::new(),
//!     HeadlessWorld::new(),
//! );
//! session.start();
//!
//! // Two seconds at 5 units/s brings the layer from x = -10 to x = 0.
//! session.tick(2.0);
//! assert!(matches!(session.place(), PlaceOutcome::Placed(_)));
//! assert_eq!(session.score(), 1);
//! ```

pub mod camera;
pub mod collab;
pub mod config;
pub mod cut;
pub mod headless;
pub mod layer;
pub mod session;
pub mod snapshot;

pub use stacker_types as types;

// Re-export commonly used types for convenience
pub use camera::{CameraRig, OrthoProjection};
pub use collab::{BodyHandle, RigidBodyWorld, SceneSurface, VisualHandle};
pub use config::{ConfigError, MotionMode, StackerConfig};
pub use cut::{resolve, resolve_along, Cut, CutOutcome};
pub use layer::{Fragment, Layer, LayerState};
pub use session::{Activation, PlaceOutcome, StackSession, TickOutcome};
pub use snapshot::{GameOverReason, SessionEvent, StatusSnapshot};
