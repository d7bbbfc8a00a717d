//! Terminal rendering for the stacker.
//!
//! The scene is kept in a [`TermScene`] (which the controller drives through
//! `SceneSurface`), rasterized by [`StackView`] into a [`FrameBuffer`] and
//! flushed to the terminal as diffs by [`TerminalRenderer`].
//!
//! Terminal cells are roughly twice as tall as wide, so the projection is
//! computed for a logical surface of `cols x rows * 2`.

pub mod fb;
pub mod renderer;
pub mod scene;
pub mod view;

pub use stacker_core as core;
pub use stacker_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use scene::{TermScene, Visual};
pub use view::{StackView, Viewport};
