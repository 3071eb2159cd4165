//! Game session: the single place authoritative state lives.
//!
//! Input events and timer ticks arrive on two channels and are applied one at
//! a time. After each transition the session
//!
//! 1. journals what changed,
//! 2. reconciles the timer with the lifecycle (running only while Active),
//! 3. publishes a fresh [`GameSnapshot`] on a `watch` channel.

use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::EngineConfig;
use crate::core::{GameSnapshot, GameState};
use crate::journal::{Journal, JournalRecord};
use crate::timer::TickTimer;
use crate::types::{GameAction, Lifecycle};

/// Capacity of the input event queue.
pub const EVENT_QUEUE: usize = 64;

/// Capacity of the tick queue; ticks beyond this wait on the timer side.
const TICK_QUEUE: usize = 4;

/// Event delivered to a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Action(GameAction),
    Quit,
}

pub struct GameSession {
    state: GameState,
    timer: TickTimer,
    tick_tx: mpsc::Sender<GameAction>,
    tick_rx: mpsc::Receiver<GameAction>,
    snapshots: watch::Sender<GameSnapshot>,
    journal: Option<Journal>,
}

impl GameSession {
    pub fn new(
        state: GameState,
        tick_interval: Duration,
        snapshots: watch::Sender<GameSnapshot>,
        journal: Option<Journal>,
    ) -> Self {
        let (tick_tx, tick_rx) = mpsc::channel(TICK_QUEUE);
        Self {
            state,
            timer: TickTimer::new(tick_interval),
            tick_tx,
            tick_rx,
            snapshots,
            journal,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Apply one action. Must be called from within a tokio runtime.
    pub fn handle(&mut self, action: GameAction) {
        let before = self.state;
        self.state = before.step(action);
        if self.state == before {
            return;
        }

        self.journal_transition(&before, action);

        if action == GameAction::Restart {
            // A new game gets a full first interval.
            self.stop_timer();
        }
        self.sync_timer();
        self.publish();
    }

    fn journal_transition(&self, before: &GameState, action: GameAction) {
        let Some(journal) = &self.journal else {
            return;
        };
        let after = &self.state;

        if action == GameAction::Restart {
            journal.record(JournalRecord::Restart {
                seed: after.seed(),
                final_score: before.score(),
            });
            return;
        }

        if after.pieces_locked() != before.pieces_locked() {
            if let Some(event) = after.last_event() {
                journal.record(JournalRecord::Lock {
                    action: action.as_str(),
                    piece: before.active().kind.as_str(),
                    lines_cleared: event.lines_cleared,
                    drop_bonus: event.drop_bonus,
                    line_score: event.line_score,
                    points: event.total_score(),
                    score: after.score(),
                    topped_out: event.topped_out,
                });
            }
        }

        if after.lifecycle() != before.lifecycle() {
            journal.record(JournalRecord::Lifecycle {
                action: action.as_str(),
                from: before.lifecycle().as_str(),
                to: after.lifecycle().as_str(),
                score: after.score(),
            });
        }
    }

    fn sync_timer(&mut self) {
        match self.state.lifecycle() {
            Lifecycle::Active => self.timer.start(self.tick_tx.clone()),
            Lifecycle::Paused | Lifecycle::GameOver => self.stop_timer(),
        }
    }

    /// Stop the timer and drop ticks it already queued.
    ///
    /// `abort` is not synchronous on a multi-thread runtime, so the old task
    /// may still complete one send. Replacing the channel sends it nowhere.
    fn stop_timer(&mut self) {
        self.timer.stop();
        let (tick_tx, tick_rx) = mpsc::channel(TICK_QUEUE);
        self.tick_tx = tick_tx;
        self.tick_rx = tick_rx;
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.snapshot());
    }

    /// Drive the session until `Quit` arrives or every event sender is gone.
    /// Returns the final state.
    pub async fn run(mut self, mut events: mpsc::Receiver<SessionEvent>) -> GameState {
        if let Some(journal) = &self.journal {
            journal.record(JournalRecord::Start {
                seed: self.state.seed(),
                tick_ms: self.timer.period().as_millis() as u32,
            });
        }
        self.sync_timer();
        self.publish();

        loop {
            let next = tokio::select! {
                event = events.recv() => match event {
                    Some(SessionEvent::Action(action)) => Some(action),
                    Some(SessionEvent::Quit) | None => None,
                },
                Some(tick) = self.tick_rx.recv() => Some(tick),
            };
            let Some(action) = next else {
                break;
            };
            self.handle(action);
        }

        self.stop_timer();
        if let Some(journal) = self.journal.take() {
            journal.close().await;
        }
        self.state
    }
}

/// Handle to a session running on its own task.
pub struct SessionHandle {
    events: mpsc::Sender<SessionEvent>,
    snapshots: watch::Receiver<GameSnapshot>,
    join: JoinHandle<GameState>,
}

impl SessionHandle {
    /// Queue a player action.
    pub async fn send(&self, action: GameAction) -> Result<()> {
        self.events
            .send(SessionEvent::Action(action))
            .await
            .map_err(|_| anyhow!("session closed"))
    }

    /// Queue a player action without waiting; fails if the queue is full or closed.
    pub fn try_send(&self, action: GameAction) -> Result<()> {
        self.events
            .try_send(SessionEvent::Action(action))
            .map_err(|e| anyhow!("session event dropped: {}", e))
    }

    /// Receiver for the latest snapshot. Clone it to watch from several places.
    pub fn snapshots(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Ask the session to stop and wait for its final state.
    pub async fn shutdown(self) -> Result<GameState> {
        // If the session already ended the send fails; the join below still
        // returns its final state.
        let _ = self.events.send(SessionEvent::Quit).await;
        self.join
            .await
            .map_err(|e| anyhow!("session task failed: {}", e))
    }
}

/// Start a session for `config` on the current tokio runtime.
///
/// A journal that cannot be opened is reported on stderr and skipped.
pub async fn spawn_session(config: &EngineConfig) -> SessionHandle {
    let journal = match &config.log_path {
        Some(path) => match Journal::open(path).await {
            Ok(journal) => Some(journal),
            Err(e) => {
                eprintln!("[Journal] disabled: {:#}", e);
                None
            }
        },
        None => None,
    };

    spawn_with_state(GameState::new(config.seed), config.tick_interval(), journal)
}

/// Start a session from an explicit initial state.
pub fn spawn_with_state(
    state: GameState,
    tick_interval: Duration,
    journal: Option<Journal>,
) -> SessionHandle {
    let (snap_tx, snap_rx) = watch::channel(state.snapshot());
    let (ev_tx, ev_rx) = mpsc::channel(EVENT_QUEUE);
    let session = GameSession::new(state, tick_interval, snap_tx, journal);
    let join = tokio::spawn(session.run(ev_rx));

    SessionHandle {
        events: ev_tx,
        snapshots: snap_rx,
        join,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Piece, PieceSpawner, Position};
    use crate::types::{Color, PieceKind, BOARD_WIDTH, SPAWN_X};
    use tokio::time;

    fn blocked_spawn_state() -> GameState {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            if x != SPAWN_X {
                board.set(x, 0, Color::new(3));
            }
        }
        GameState::from_parts(
            board,
            Piece::new(PieceKind::O),
            Piece::new(PieceKind::O),
            Position::new(0, 18),
            PieceSpawner::new(1),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_follows_lifecycle() {
        let (snap_tx, _snap_rx) = watch::channel(GameSnapshot::default());
        let mut session =
            GameSession::new(GameState::new(5), Duration::from_millis(1000), snap_tx, None);
        session.sync_timer();
        assert!(session.timer_running());

        session.handle(GameAction::TogglePause);
        assert_eq!(session.state().lifecycle(), Lifecycle::Paused);
        assert!(!session.timer_running());

        session.handle(GameAction::TogglePause);
        assert!(session.timer_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_stops_timer() {
        let (snap_tx, snap_rx) = watch::channel(GameSnapshot::default());
        let mut session =
            GameSession::new(blocked_spawn_state(), Duration::from_millis(1000), snap_tx, None);
        session.sync_timer();

        session.handle(GameAction::Tick);
        assert_eq!(session.state().lifecycle(), Lifecycle::GameOver);
        assert!(!session.timer_running());
        assert!(snap_rx.borrow().game_over());

        session.handle(GameAction::Restart);
        assert_eq!(session.state().lifecycle(), Lifecycle::Active);
        assert!(session.timer_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_discards_ticks_from_old_timer() {
        let (snap_tx, _snap_rx) = watch::channel(GameSnapshot::default());
        let mut session =
            GameSession::new(GameState::new(5), Duration::from_millis(1000), snap_tx, None);
        session.sync_timer();
        let old_timer_tx = session.tick_tx.clone();

        session.handle(GameAction::Restart);
        assert!(session.timer_running());

        // A send that races the abort lands on a closed channel.
        assert!(old_timer_tx.try_send(GameAction::Tick).is_err());
        assert!(session.tick_rx.try_recv().is_err());
        assert_eq!(session.state().position(), crate::core::SPAWN_POSITION);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_closes_tick_channel() {
        let (snap_tx, _snap_rx) = watch::channel(GameSnapshot::default());
        let mut session =
            GameSession::new(GameState::new(5), Duration::from_millis(1000), snap_tx, None);
        session.sync_timer();
        let old_timer_tx = session.tick_tx.clone();

        session.handle(GameAction::TogglePause);
        assert!(old_timer_tx.try_send(GameAction::Tick).is_err());

        session.handle(GameAction::TogglePause);
        assert!(session.timer_running());
        assert!(session.tick_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_noop_action_does_not_publish() {
        let (snap_tx, mut snap_rx) = watch::channel(GameSnapshot::default());
        let mut session = GameSession::new(
            blocked_spawn_state(),
            Duration::from_millis(1000),
            snap_tx,
            None,
        );
        snap_rx.mark_unchanged();

        // Against the left wall already.
        session.handle(GameAction::MoveLeft);
        assert!(!snap_rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_drive_gravity() {
        let handle = spawn_with_state(GameState::new(77), Duration::from_millis(1000), None);

        time::sleep(Duration::from_millis(3500)).await;

        let state = handle.shutdown().await.unwrap();
        assert_eq!(state.position().y, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_suspends_ticks() {
        let handle = spawn_with_state(GameState::new(77), Duration::from_millis(1000), None);

        handle.send(GameAction::TogglePause).await.unwrap();
        time::sleep(Duration::from_millis(5000)).await;
        assert!(handle.snapshots().borrow().paused());

        handle.send(GameAction::TogglePause).await.unwrap();
        time::sleep(Duration::from_millis(1500)).await;

        let state = handle.shutdown().await.unwrap();
        assert_eq!(state.lifecycle(), Lifecycle::Active);
        assert_eq!(state.position().y, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hard_drop_publishes_snapshot() {
        let handle = spawn_with_state(GameState::new(77), Duration::from_millis(1000), None);
        let mut snapshots = handle.snapshots();
        snapshots.mark_unchanged();

        handle.send(GameAction::HardDrop).await.unwrap();
        snapshots.changed().await.unwrap();
        assert!(snapshots.borrow().score > 0);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_try_send_then_shutdown() {
        let handle = spawn_with_state(GameState::new(3), Duration::from_millis(1000), None);
        handle.try_send(GameAction::MoveRight).unwrap();
        let state = handle.shutdown().await.unwrap();
        assert_eq!(state.position(), Position::new(5, 0));
    }
}
