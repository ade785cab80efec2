//! On-disk project state (`.tempdd/state.json`).

use crate::error::{Result, TempddError};
use crate::fs::atomic_write_file;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current state file format version.
pub const STATE_VERSION: u32 = 1;

/// Serialized project state.
///
/// Using BTreeMap so the file is written in a stable key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectState {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Workflow selected at `tempdd init` (directory name or "default").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,

    /// Committed stage outputs: symbol name to value.
    #[serde(default)]
    pub symbols: BTreeMap<String, String>,

    /// When the state was last written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_version() -> u32 {
    STATE_VERSION
}

impl Default for ProjectState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            workflow: None,
            symbols: BTreeMap::new(),
            updated_at: None,
        }
    }
}

/// Reads and writes the state file at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state. A missing file reads as an empty state.
    pub fn read(&self) -> Result<ProjectState> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ProjectState::default());
            }
            Err(e) => {
                return Err(TempddError::UserError(format!(
                    "failed to read project state '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let state: ProjectState = serde_json::from_str(&content).map_err(|e| {
            TempddError::UserError(format!(
                "project state '{}' is corrupted: {}\n\n\
                 Fix or delete the file, then re-run the stages you need.",
                self.path.display(),
                e
            ))
        })?;

        if state.version > STATE_VERSION {
            return Err(TempddError::UserError(format!(
                "project state '{}' has version {}, but this tempdd only understands version {}",
                self.path.display(),
                state.version,
                STATE_VERSION
            )));
        }

        Ok(state)
    }

    /// Atomically write the state.
    pub fn write(&self, state: &ProjectState) -> Result<()> {
        let mut json = serde_json::to_string_pretty(state).map_err(|e| {
            TempddError::UserError(format!("failed to serialize project state: {}", e))
        })?;
        json.push('\n');
        atomic_write_file(&self.path, &json)
    }
}
