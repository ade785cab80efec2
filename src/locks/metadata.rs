//! Who holds the project state lock, and since when.

use crate::error::{Result, TempddError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of `.tempdd/locks/state.lock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockMetadata {
    /// `user@host` of the holding process.
    pub owner: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,

    pub created_at: DateTime<Utc>,

    /// The tempdd command that took the lock, e.g. `ai prd build` or `init`.
    pub command: String,
}

impl LockMetadata {
    /// Metadata for `command` running in this process, timestamped now.
    pub fn new(command: &str) -> Self {
        Self {
            owner: owner(),
            pid: Some(std::process::id()),
            created_at: Utc::now(),
            command: command.to_string(),
        }
    }

    /// Read the holder recorded in an existing lock file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TempddError::UserError(format!(
                "failed to read state lock '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            TempddError::UserError(format!(
                "state lock '{}' is not valid lock metadata: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TempddError::UserError(format!("failed to serialize lock metadata: {}", e))
        })
    }

    /// How long the lock has been held.
    pub fn held_for(&self) -> Duration {
        Utc::now().signed_duration_since(self.created_at)
    }

    /// [`held_for`](Self::held_for) as `3m`, `2h 5m` or `1d 4h`.
    pub fn held_for_display(&self) -> String {
        let held = self.held_for();
        let (days, hours, minutes) = (held.num_days(), held.num_hours(), held.num_minutes());

        match (days, hours) {
            (d, h) if d > 0 => format!("{}d {}h", d, h % 24),
            (_, h) if h > 0 => format!("{}h {}m", h, minutes % 60),
            _ => format!("{}m", minutes),
        }
    }
}

impl std::fmt::Display for LockMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`tempdd {}` by {}", self.command, self.owner)?;
        if let Some(pid) = self.pid {
            write!(f, " (pid {})", pid)?;
        }
        write!(f, ", held for {}", self.held_for_display())
    }
}

fn owner() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
