//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the falling-block rules and nothing else: no timers, no
//! I/O, no terminal. Every transition is a bounded synchronous computation on
//! plain values.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shapes, their colors, and the clockwise rotation function
//! - [`board`]: 10x20 grid with collision test, merge, and line clear
//! - [`rng`]: memoryless uniform piece spawner over a seeded LCG
//! - [`game_state`]: the controller state machine (`GameState::step`)
//! - [`snapshot`]: the read-only projection handed to renderers
//!
//! # Game Rules
//!
//! The rules are deliberately plain:
//!
//! - **Randomizer**: each piece is an independent 1/7 pick, repeats allowed
//! - **Rotation**: clockwise only, in place, no wall kicks
//! - **Gravity**: one row per tick; a blocked tick locks the piece
//! - **Scoring**: 100 per cleared row (flat) plus 2 per row hard-dropped
//! - **Game over**: the next piece does not fit at the spawn position
//!
//! # Example
//!
//! ```
//! use tetrion_core::GameState;
//! use tetrion_types::{GameAction, Lifecycle};
//!
//! let game = GameState::new(12345)
//!     .step(GameAction::MoveRight)
//!     .step(GameAction::Rotate)
//!     .step(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop from the spawn row awards points
//! assert_eq!(game.lifecycle(), Lifecycle::Active);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use tetrion_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows, Position};
pub use game_state::{transition, GameState, LockEvent, SPAWN_POSITION};
pub use pieces::{get_shape, rotate_piece, Piece, Shape, CATALOG};
pub use rng::{PieceSpawner, SimpleRng};
pub use snapshot::{GameSnapshot, NextPreview};
