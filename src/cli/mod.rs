//! CLI argument parsing for tempdd.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// tempdd: Template-driven development workflows for AI agents.
///
/// A project declares an ordered list of stages (e.g. prd -> arch -> tasks),
/// each backed by a template. `tempdd ai "<stage> <action>"` turns one stage
/// action into an instruction for an AI agent, filling in the paths of
/// documents produced by earlier stages.
#[derive(Parser, Debug)]
#[command(name = "tempdd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for tempdd.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a tempdd project in the current directory.
    ///
    /// Copies a workflow definition and its templates into `.tempdd/workflow/`,
    /// validates the stage graph, and creates an empty project state.
    Init(InitArgs),

    /// Generate the AI instruction for a stage action.
    ///
    /// Prints the instruction on stdout and records the stage's output
    /// document so later stages can reference it.
    Ai(AiArgs),

    /// Show the workflow's stages, language and usage notes.
    Help,

    /// Show each stage, its output and any missing prerequisites.
    Status,
}

/// Arguments for the `init` command.
#[derive(Parser, Debug, Default)]
pub struct InitArgs {
    /// Directory containing a workflow `config.yaml` and its templates.
    /// Defaults to the built-in workflow.
    #[arg(short, long)]
    pub workflow: Option<PathBuf>,

    /// Language for conversation and documents (e.g. en, zh-TW, ja).
    #[arg(short, long)]
    pub language: Option<String>,

    /// Install the `tempdd-go` command for an AI tool.
    #[arg(short, long, value_enum)]
    pub tool: Option<Tool>,

    /// Overwrite existing workflow and integration files.
    #[arg(short, long)]
    pub force: bool,
}

/// AI tools `init` can install a `tempdd-go` command for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tool {
    /// Claude Code (`.claude/commands/`)
    Claude,
    /// Gemini CLI (`.gemini/commands/`)
    Gemini,
    /// Cursor (`.cursor/commands/`)
    Cursor,
    /// GitHub Copilot (`.github/prompts/`)
    Copilot,
}

/// Arguments for the `ai` command.
#[derive(Parser, Debug)]
pub struct AiArgs {
    /// The command, e.g. "prd build". May also be given as two arguments.
    #[arg(required = true, num_args = 1..)]
    pub command: Vec<String>,
}

impl AiArgs {
    /// The command words joined back into one string.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_init_defaults() {
        let cli = Cli::try_parse_from(["tempdd", "init"]).unwrap();
        if let Command::Init(args) = cli.command {
            assert!(args.workflow.is_none());
            assert!(args.language.is_none());
            assert!(args.tool.is_none());
            assert!(!args.force);
        } else {
            panic!("Expected Init command");
        }
    }

    #[test]
    fn parse_init_full() {
        let cli = Cli::try_parse_from([
            "tempdd",
            "init",
            "--workflow",
            "flows/research",
            "--language",
            "zh-TW",
            "--tool",
            "gemini",
            "--force",
        ])
        .unwrap();
        if let Command::Init(args) = cli.command {
            assert_eq!(args.workflow, Some(PathBuf::from("flows/research")));
            assert_eq!(args.language.as_deref(), Some("zh-TW"));
            assert_eq!(args.tool, Some(Tool::Gemini));
            assert!(args.force);
        } else {
            panic!("Expected Init command");
        }
    }

    #[test]
    fn parse_init_rejects_unknown_tool() {
        assert!(Cli::try_parse_from(["tempdd", "init", "--tool", "vim"]).is_err());
    }

    #[test]
    fn parse_ai_quoted() {
        let cli = Cli::try_parse_from(["tempdd", "ai", "prd build"]).unwrap();
        if let Command::Ai(args) = cli.command {
            assert_eq!(args.command_line(), "prd build");
        } else {
            panic!("Expected Ai command");
        }
    }

    #[test]
    fn parse_ai_split() {
        let cli = Cli::try_parse_from(["tempdd", "ai", "arch", "run"]).unwrap();
        if let Command::Ai(args) = cli.command {
            assert_eq!(args.command_line(), "arch run");
        } else {
            panic!("Expected Ai command");
        }
    }

    #[test]
    fn parse_ai_requires_command() {
        assert!(Cli::try_parse_from(["tempdd", "ai"]).is_err());
    }

    #[test]
    fn parse_help_and_status() {
        let cli = Cli::try_parse_from(["tempdd", "help"]).unwrap();
        assert!(matches!(cli.command, Command::Help));

        let cli = Cli::try_parse_from(["tempdd", "status"]).unwrap();
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn parse_unknown_command_fails() {
        assert!(Cli::try_parse_from(["tempdd", "deploy"]).is_err());
    }
}
