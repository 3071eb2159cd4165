//! JSONL event journal.
//!
//! Records are handed to a background task over an unbounded channel and
//! appended to a file, one JSON object per line. The game never waits on the
//! journal; if a write fails the journal reports it once on stderr and stops.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One journal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalRecord {
    /// A session began.
    Start { seed: u32, tick_ms: u32 },
    /// A piece locked. `action` is what locked it (tick, soft or hard drop);
    /// `points` is what this lock added to `score`.
    Lock {
        action: &'static str,
        piece: &'static str,
        lines_cleared: u32,
        drop_bonus: u32,
        line_score: u32,
        points: u32,
        score: u32,
        topped_out: bool,
    },
    /// The lifecycle changed for a reason other than restart.
    Lifecycle {
        action: &'static str,
        from: &'static str,
        to: &'static str,
        score: u32,
    },
    /// The game was restarted; `final_score` is the score that was discarded.
    Restart { seed: u32, final_score: u32 },
}

#[derive(Serialize)]
struct JournalLine<'a> {
    seq: u64,
    #[serde(flatten)]
    record: &'a JournalRecord,
}

/// Handle to a running journal writer.
#[derive(Debug)]
pub struct Journal {
    tx: mpsc::UnboundedSender<JournalRecord>,
    task: JoinHandle<()>,
}

impl Journal {
    /// Open (or create) `path` for appending and start the writer task.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("open journal {}", path.display()))?;

        let (tx, mut rx) = mpsc::unbounded_channel::<JournalRecord>();
        let task = tokio::spawn(async move {
            let mut buf: Vec<u8> = Vec::with_capacity(256);
            let mut seq: u64 = 0;

            while let Some(record) = rx.recv().await {
                seq += 1;
                buf.clear();
                if serde_json::to_writer(&mut buf, &JournalLine { seq, record: &record }).is_err()
                {
                    continue;
                }
                buf.push(b'\n');
                if let Err(e) = file.write_all(&buf).await {
                    eprintln!("[Journal] write failed, journal disabled: {}", e);
                    return;
                }
            }

            if let Err(e) = file.flush().await {
                eprintln!("[Journal] flush failed: {}", e);
            }
        });

        Ok(Self { tx, task })
    }

    /// Queue a record. Never blocks; dropped silently once the writer stopped.
    pub fn record(&self, record: JournalRecord) {
        let _ = self.tx.send(record);
    }

    /// Flush everything queued so far and stop the writer.
    pub async fn close(self) {
        drop(self.tx);
        let _ = self.task.await;
    }
}
