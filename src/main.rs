//! tempdd: Template-driven development workflows for AI agents.
//!
//! This is the main entry point for the `tempdd` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod graph;
pub mod locks;
pub mod logging;
pub mod render;
pub mod resolver;
pub mod symbols;
pub mod template;

#[cfg(test)]
mod test_support;

use cli::Cli;
use config::{LoggingLevel, WorkflowDefinition};
use context::ProjectContext;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    logging::init_logging(project_logging_level());

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            tracing::debug!(exit_code = err.exit_code(), "command failed");

            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Logging level from the enclosing project's workflow definition, if any.
///
/// Failures here are ignored; the command itself reports them.
fn project_logging_level() -> LoggingLevel {
    ProjectContext::discover()
        .ok()
        .and_then(|ctx| WorkflowDefinition::load(ctx.config_path()).ok())
        .map(|definition| definition.logging_level)
        .unwrap_or_default()
}
