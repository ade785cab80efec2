//! Agent tool integrations: a `tempdd-go` command per tool that runs
//! `tempdd ai` and follows the printed instruction.

use super::scaffolding::write_file;
use crate::cli::Tool;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Where and what to install for one tool.
#[derive(Debug, Clone, Copy)]
pub(super) struct Integration {
    /// Display name of the tool.
    pub name: &'static str,

    /// Command file path, relative to the project root.
    pub relative_path: &'static str,

    pub content: &'static str,

    /// How to start using the command once installed.
    pub usage: &'static str,
}

impl Integration {
    pub fn for_tool(tool: Tool) -> Self {
        match tool {
            Tool::Claude => Self {
                name: "Claude Code",
                relative_path: ".claude/commands/tempdd-go.md",
                content: include_str!("../../../integrations/claude/tempdd-go.md"),
                usage: "Run `claude`, then use `/tempdd-go help` to learn the workflow.",
            },
            Tool::Gemini => Self {
                name: "Gemini CLI",
                relative_path: ".gemini/commands/tempdd-go.toml",
                content: include_str!("../../../integrations/gemini/tempdd-go.toml"),
                usage: "Run `gemini`, then use `/tempdd-go help` to learn the workflow.",
            },
            Tool::Cursor => Self {
                name: "Cursor",
                relative_path: ".cursor/commands/tempdd-go.md",
                content: include_str!("../../../integrations/cursor/tempdd-go.md"),
                usage: "Run `cursor .`, then use `/tempdd-go help` to learn the workflow.",
            },
            Tool::Copilot => Self {
                name: "GitHub Copilot",
                relative_path: ".github/prompts/tempdd-go.prompt.md",
                content: include_str!("../../../integrations/copilot/tempdd-go.prompt.md"),
                usage: "In Copilot Chat, use `#tempdd-go help` to learn the workflow.",
            },
        }
    }

    pub fn path(&self, root: &Path) -> PathBuf {
        root.join(self.relative_path)
    }
}

/// Write `tool`'s command file under `root`, keeping an existing one unless
/// `force` is set.
///
/// Returns the path and whether it was written.
pub(super) fn install_integration(root: &Path, tool: Tool, force: bool) -> Result<(PathBuf, bool)> {
    let integration = Integration::for_tool(tool);
    let path = integration.path(root);

    let written = write_file(&path, integration.content, force)?;
    if written {
        tracing::info!(tool = integration.name, path = %path.display(), "installed integration");
    } else {
        tracing::info!(tool = integration.name, "integration already exists; keeping it");
    }

    Ok((path, written))
}
