//! TUI Stacker (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_stacker::{core, physics, term, input, types}`
//! so the binary, integration tests and benches share one import path.

pub use stacker_core as core;
pub use stacker_input as input;
pub use stacker_physics as physics;
pub use stacker_term as term;
pub use stacker_types as types;
