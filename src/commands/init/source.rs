//! Workflow sources for `tempdd init`: the built-in workflow or a directory.

use crate::context::WORKFLOW_CONFIG;
use crate::config::WorkflowDefinition;
use crate::error::{Result, TempddError};
use std::path::{Component, Path};

/// Name recorded in the project state for the built-in workflow.
pub(super) const BUILTIN_NAME: &str = "default";

const BUILTIN_CONFIG: &str = include_str!("../../../workflows/default/config.yaml");

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "templates/prd.md",
        include_str!("../../../workflows/default/templates/prd.md"),
    ),
    (
        "templates/arch.md",
        include_str!("../../../workflows/default/templates/arch.md"),
    ),
    (
        "templates/research.md",
        include_str!("../../../workflows/default/templates/research.md"),
    ),
    (
        "templates/blueprint.md",
        include_str!("../../../workflows/default/templates/blueprint.md"),
    ),
    (
        "templates/tasks.md",
        include_str!("../../../workflows/default/templates/tasks.md"),
    ),
];

/// A workflow definition plus the templates it references, in memory.
#[derive(Debug, Clone)]
pub(super) struct WorkflowSource {
    /// Recorded as `workflow` in the project state.
    pub name: String,

    /// Raw `config.yaml` content.
    pub config: String,

    /// `(path relative to the workflow directory, content)` pairs.
    pub templates: Vec<(String, String)>,
}

impl WorkflowSource {
    /// The workflow shipped with tempdd.
    pub fn builtin() -> Self {
        Self {
            name: BUILTIN_NAME.to_string(),
            config: BUILTIN_CONFIG.to_string(),
            templates: BUILTIN_TEMPLATES
                .iter()
                .map(|(path, content)| (path.to_string(), content.to_string()))
                .collect(),
        }
    }

    /// Read a workflow from `dir`: its `config.yaml` and every template the
    /// listed stages reference.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(WORKFLOW_CONFIG);
        let config = std::fs::read_to_string(&config_path).map_err(|e| {
            TempddError::UserError(format!(
                "failed to read workflow definition '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let definition = WorkflowDefinition::from_yaml(&config)?;

        let mut templates: Vec<(String, String)> = Vec::new();
        for stage in &definition.stages {
            let Some(stage_def) = definition.define.get(stage) else {
                // Reported by graph validation.
                continue;
            };
            let declared = &stage_def.template;
            if templates.iter().any(|(path, _)| path == declared) {
                continue;
            }
            check_template_path(stage, declared)?;

            let path = dir.join(declared);
            let content = std::fs::read_to_string(&path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TempddError::TemplateNotFound(path.clone())
                } else {
                    TempddError::UserError(format!(
                        "failed to read template '{}': {}",
                        path.display(),
                        e
                    ))
                }
            })?;
            templates.push((declared.clone(), content));
        }

        let name = dir
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .unwrap_or_else(|| dir.display().to_string());

        Ok(Self {
            name,
            config,
            templates,
        })
    }
}

/// Templates are copied into the project, so they must live inside the
/// workflow directory.
fn check_template_path(stage: &str, declared: &str) -> Result<()> {
    let path = Path::new(declared);
    let escapes = path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir));

    if escapes {
        return Err(TempddError::UserError(format!(
            "template '{}' of stage '{}' must be a relative path inside the workflow directory",
            declared, stage
        )));
    }

    Ok(())
}
