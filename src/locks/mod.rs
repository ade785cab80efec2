//! Single-writer lock for the project state.
//!
//! Every command that may commit a symbol holds `.tempdd/locks/state.lock`
//! from before it reads the state file until after it has flushed it.
//!
//! # Lock Files
//!
//! The lock file is created with **create_new** semantics (exclusive create),
//! so only one process can hold it at a time. A second invocation fails
//! immediately with a `LockError`; there is no waiting or retry.
//!
//! # Lock Metadata
//!
//! The lock file contains JSON metadata:
//! - `owner`: who holds the lock (e.g., `user@HOST`)
//! - `pid`: the process ID (optional)
//! - `created_at`: RFC3339 timestamp
//! - `action`: the command being resolved (e.g. `ai prd build`)
//!
//! # RAII Guards
//!
//! The lock is released when its guard is dropped. If deletion fails during
//! drop, a warning is logged but the program does not crash.

mod guard;
mod metadata;
mod operations;


pub use guard::LockGuard;
pub use metadata::LockMetadata;
pub use operations::{acquire_state_lock, read_state_lock};
