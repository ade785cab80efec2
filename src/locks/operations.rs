//! Lock acquisition and inspection.

use super::guard::LockGuard;
use super::metadata::LockMetadata;
use crate::context::ProjectContext;
use crate::error::{Result, TempddError};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Create `lock_path` exclusively and write `metadata` into it.
///
/// Fails with `LockError` (exit code 4) if the file already exists.
fn acquire_lock(lock_path: &Path, metadata: &LockMetadata) -> Result<LockGuard> {
    if let Some(parent) = lock_path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            TempddError::UserError(format!(
                "failed to create locks directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(lock_path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                let holder = match LockMetadata::from_file(lock_path) {
                    Ok(meta) => format!(" ({})", meta),
                    Err(_) => String::new(),
                };
                TempddError::LockError(format!(
                    "project state is locked by another tempdd process{}\n\
                     Lock: {}\n\n\
                     If no other tempdd command is running, delete the lock file and retry.",
                    holder,
                    lock_path.display()
                ))
            } else {
                TempddError::LockError(format!(
                    "failed to acquire lock '{}': {}",
                    lock_path.display(),
                    e
                ))
            }
        })?;

    let json = metadata.to_json()?;
    file.write_all(json.as_bytes()).map_err(|e| {
        let _ = fs::remove_file(lock_path);
        TempddError::LockError(format!("failed to write lock metadata: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(lock_path);
        TempddError::LockError(format!("failed to sync lock file: {}", e))
    })?;

    tracing::debug!(path = %lock_path.display(), command = %metadata.command, "acquired state lock");
    Ok(LockGuard::new(lock_path.to_path_buf()))
}

/// Acquire the project state lock.
///
/// Hold the returned guard for as long as the symbol table may be written.
pub fn acquire_state_lock(ctx: &ProjectContext, command: &str) -> Result<LockGuard> {
    let metadata = LockMetadata::new(command);
    acquire_lock(&ctx.state_lock_path(), &metadata)
}

/// Metadata of the current state lock holder, if the lock is held.
pub fn read_state_lock(ctx: &ProjectContext) -> Result<Option<LockMetadata>> {
    let path = ctx.state_lock_path();
    if !path.exists() {
        return Ok(None);
    }
    LockMetadata::from_file(&path).map(Some)
}
