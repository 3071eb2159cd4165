//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. Which
//! actions are legal in which lifecycle is decided by the core, so this layer
//! forwards every mapped key unconditionally.

pub mod map;

pub use tetrion_types as types;

pub use map::{handle_key_event, should_quit};
