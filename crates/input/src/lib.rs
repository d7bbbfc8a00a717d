//! Terminal input for the stacker.
//!
//! Maps `crossterm` key and mouse events into [`crate::types::StackAction`]
//! and debounces activations so a held key or a double click cannot drop two
//! blocks in one frame.

pub mod handler;
pub mod map;

pub use stacker_types as types;

pub use handler::InputHandler;
pub use map::{handle_event, handle_key_event, should_quit};
