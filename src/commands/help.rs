//! Implementation of the `tempdd help` command.

use crate::config::WorkflowDefinition;
use crate::context::require_initialized_project;
use crate::error::Result;
use crate::render::global_directives;

/// Execute the `tempdd help` command.
pub fn cmd_help() -> Result<()> {
    let ctx = require_initialized_project()?;
    let definition = WorkflowDefinition::load(ctx.config_path())?;

    print!("{}", help_text(&definition));
    Ok(())
}

/// The help page for a workflow: the global rules, language, stage list and
/// the workflow's own usage notes.
pub(crate) fn help_text(definition: &WorkflowDefinition) -> String {
    let mut out = String::new();
    out.push_str(&global_directives(&definition.language));
    out.push_str("\n\n== TempDD Workflow ==\n\n");
    if let Some(description) = &definition.description {
        out.push_str(description.trim());
        out.push_str("\n\n");
    }
    out.push_str(&format!("**Language:** {}\n", definition.language));
    out.push_str(&format!(
        "**Available Stages:** {}\n",
        definition.stages.join(", ")
    ));
    out.push_str("\n**How to run this workflow?**\n");
    match &definition.help {
        Some(help) => {
            out.push_str(help.trim_end());
            out.push('\n');
        }
        None => out.push_str("Run `tempdd ai \"<stage> <action>\"` for each stage in order.\n"),
    }
    out
}
