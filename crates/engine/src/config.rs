//! Engine configuration.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::DEFAULT_TICK_MS;

/// Runtime configuration for a game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Gravity interval in milliseconds
    pub tick_ms: u32,
    /// Spawner seed
    pub seed: u32,
    /// Where to append the JSONL journal; `None` disables it
    pub log_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            seed: 1,
            log_path: None,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    ///
    /// - `TETRION_TICK_MS`: gravity interval (default 1000)
    /// - `TETRION_SEED`: spawner seed (default: derived from the clock)
    /// - `TETRION_LOG_PATH`: JSONL journal path (unset or blank: no journal)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tick_ms = lookup("TETRION_TICK_MS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_TICK_MS);

        let seed = lookup("TETRION_SEED")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or_else(clock_seed);

        let log_path = lookup("TETRION_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            tick_ms,
            seed,
            log_path,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms as u64)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
