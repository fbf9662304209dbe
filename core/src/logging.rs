// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging setup and correlation IDs for navigation sessions

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Calling this again after a
/// subscriber is installed is not an error; the first one stays.
pub fn init_logging(default_filter: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("Logging already initialized");
    }
    Ok(())
}

/// Ties the log lines of one navigator (and the game it shows) together
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CorrelationId {
    /// Unique per navigator
    pub session_id: String,
    /// Event name of the loaded record, if any
    pub game_id: Option<String>,
}

impl CorrelationId {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().simple().to_string(),
            game_id: None,
        }
    }

    /// Add game context
    pub fn with_game(mut self, game_id: String) -> Self {
        self.game_id = Some(game_id);
        self
    }

    /// Span carrying the IDs as fields
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!(
            "conhex",
            session = %self.session_id,
            game = self.game_id.as_deref().unwrap_or("-")
        )
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Logs the duration of an operation when dropped
pub struct PerfTimer {
    start: Instant,
    operation: String,
}

impl PerfTimer {
    pub fn new(operation: &str) -> Self {
        tracing::debug!("Starting {}", operation);
        Self {
            start: Instant::now(),
            operation: operation.to_string(),
        }
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        tracing::debug!(
            duration_ms = self.start.elapsed().as_millis() as u64,
            operation = %self.operation,
            "Completed {}",
            self.operation
        );
    }
}
