//! Command implementations for tempdd.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod ai;
mod help;
mod init;
mod status;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init(args) => init::cmd_init(args),
        Command::Ai(args) => ai::cmd_ai(args),
        Command::Help => help::cmd_help(),
        Command::Status => status::cmd_status(),
    }
}
