//! Cancellable periodic tick source.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::types::GameAction;

/// Sends `GameAction::Tick` on a channel once per period while running.
///
/// The first tick arrives one full period after [`TickTimer::start`].
/// [`TickTimer::stop`] aborts the task, so no tick is sent after it returns.
#[derive(Debug)]
pub struct TickTimer {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start ticking into `tx`. No-op if already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, tx: mpsc::Sender<GameAction>) {
        if self.is_running() {
            return;
        }
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(GameAction::Tick).await.is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
