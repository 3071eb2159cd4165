//! Runtime for the falling-block engine.
//!
//! `tetrion-core` decides what the next state is; this crate decides when.
//! It owns the pieces around the pure rules:
//!
//! - [`timer`]: the cancellable gravity timer (a tokio interval task)
//! - [`session`]: serializes timer ticks and player actions into the
//!   controller and publishes snapshots on a `watch` channel
//! - [`journal`]: optional JSONL event log written by a background task
//! - [`config`]: settings read from `TETRION_*` environment variables
//!
//! # Concurrency
//!
//! There is exactly one mutator: the session task. Ticks and actions are
//! queued on channels and applied one at a time, so no two transitions ever
//! overlap. The timer runs only while the game is Active; pausing or losing
//! stops it and discards ticks it had already queued.
//!
//! # Example
//!
//! ```no_run
//! use tetrion_engine::{spawn_session, EngineConfig};
//! use tetrion_types::GameAction;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let session = spawn_session(&EngineConfig::from_env()).await;
//! let mut snapshots = session.snapshots();
//!
//! session.send(GameAction::HardDrop).await?;
//! snapshots.changed().await?;
//! println!("score {}", snapshots.borrow().score);
//!
//! let final_state = session.shutdown().await?;
//! println!("final score {}", final_state.score());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod journal;
pub mod session;
pub mod timer;

pub use tetrion_core as core;
pub use tetrion_types as types;

pub use config::EngineConfig;
pub use journal::{Journal, JournalRecord};
pub use session::{spawn_session, spawn_with_state, GameSession, SessionEvent, SessionHandle};
pub use timer::TickTimer;
