//! Tetrion: a falling-block puzzle engine (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tetrion::{core,engine,input,types}` and ships the
//! terminal front end as the `tetrion` binary.

pub use tetrion_core as core;
pub use tetrion_engine as engine;
pub use tetrion_input as input;
pub use tetrion_types as types;
