//! Validation of a workflow before anything is written to the project.

use super::source::WorkflowSource;
use crate::config::WorkflowDefinition;
use crate::error::{Result, TempddError};
use crate::graph::StageGraph;
use crate::template::Template;
use std::path::PathBuf;

/// Parse the definition, apply the language override, build the stage graph
/// and parse every template.
///
/// Returns the definition that will be installed.
pub(super) fn validate_source(
    source: &WorkflowSource,
    language: Option<&str>,
) -> Result<WorkflowDefinition> {
    let mut definition = WorkflowDefinition::from_yaml(&source.config)?;

    if let Some(language) = language {
        definition.language = language.trim().to_string();
        definition.validate()?;
    }

    let graph = StageGraph::build(&definition)?;

    for stage in graph.stages() {
        let Some((_, content)) = source
            .templates
            .iter()
            .find(|(path, _)| *path == stage.template_path)
        else {
            return Err(TempddError::TemplateNotFound(PathBuf::from(
                &stage.template_path,
            )));
        };

        let template = Template::parse(content).map_err(|message| TempddError::TemplateParse {
            path: PathBuf::from(&stage.template_path),
            message,
        })?;

        if template.actions.is_empty() {
            tracing::warn!(
                stage = %stage.name,
                template = %stage.template_path,
                "template declares no actions; every command for this stage will fail"
            );
        }
    }

    Ok(definition)
}
