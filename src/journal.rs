//! Dispatch journal
//!
//! Appends one JSON line per CLI dispatch to `journal.log` in the state
//! directory. Disabled unless `journal.enabled` is set.

use crate::config::{Config, ConfigManager};
use crate::keys::{Action, Timestamp};
use chrono::Utc;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// File-based journal that appends JSON lines
pub struct Journal {
    enabled: bool,
    path: PathBuf,
}

impl Journal {
    /// Create a journal from config
    pub fn new(config: &Config) -> Self {
        Self {
            enabled: config.journal.enabled,
            path: ConfigManager::journal_path(config),
        }
    }

    /// Record a dispatched action and the key time it produced
    pub async fn record(&self, action: &Action, key_time: Timestamp) {
        let data = serde_json::json!({
            "key": action.key(),
            "key_time": key_time,
        });
        self.log(action.kind(), &data).await;
    }

    /// Log an event as a JSON line
    ///
    /// IO failures are logged and dropped; the dispatch has already been
    /// persisted by the time we get here.
    pub async fn log(&self, event: &str, data: &serde_json::Value) {
        if !self.enabled {
            return;
        }

        let entry = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "event": event,
            "data": data,
        });

        let mut line = match serde_json::to_string(&entry) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize journal entry: {}", e);
                return;
            }
        };
        line.push('\n');

        if let Err(e) = self.append(&line).await {
            warn!("Failed to write journal {}: {}", self.path.display(), e);
        }
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
