//! Release of the state lock.

use crate::error::{Result, TempddError};
use std::fs;
use std::path::{Path, PathBuf};

/// Proof that this process holds the state lock.
///
/// Dropping the guard deletes the lock file; a failed delete is logged, and
/// the next command will report the lock as held until the file is removed.
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
    released: bool,
}

impl LockGuard {
    pub(super) fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the lock file now, reporting a failure instead of logging it.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        fs::remove_file(&self.path).map_err(|e| {
            TempddError::LockError(format!(
                "failed to remove state lock '{}': {}\n\
                 Delete it by hand before running another tempdd command.",
                self.path.display(),
                e
            ))
        })
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove state lock; delete it by hand"
            );
        }
    }
}
