//! Filesystem utilities for tempdd.
//!
//! Atomic writes keep the project state file and materialized documents from
//! ever being observed half-written.

pub mod atomic;

pub use atomic::{atomic_write, atomic_write_file};
