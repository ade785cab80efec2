//! Writing the workflow, state file and docs directory for `tempdd init`.

use super::source::WorkflowSource;
use crate::config::WorkflowDefinition;
use crate::context::ProjectContext;
use crate::error::{Result, TempddError};
use crate::fs::atomic_write_file;
use crate::symbols::StateStore;
use std::fs;
use std::path::{Path, PathBuf};

/// Files written or kept by one scaffolding pass.
#[derive(Debug, Default)]
pub(super) struct ScaffoldReport {
    pub written: Vec<PathBuf>,
    pub kept: Vec<PathBuf>,
}

impl ScaffoldReport {
    pub fn record(&mut self, path: PathBuf, written: bool) {
        if written {
            self.written.push(path);
        } else {
            self.kept.push(path);
        }
    }
}

/// Install the workflow definition and templates under `.tempdd/workflow/`.
///
/// Existing files are kept unless `force` is set. When the language was
/// overridden the definition is re-serialized; otherwise the source text is
/// copied as-is.
pub(super) fn install_workflow(
    ctx: &ProjectContext,
    source: &WorkflowSource,
    definition: &WorkflowDefinition,
    language_overridden: bool,
    force: bool,
) -> Result<ScaffoldReport> {
    let mut report = ScaffoldReport::default();

    create_dir(&ctx.workflow_dir)?;

    let config = if language_overridden {
        definition.to_yaml()?
    } else {
        source.config.clone()
    };
    let config_path = ctx.config_path();
    let written = write_file(&config_path, &config, force)?;
    report.record(config_path, written);

    for (declared, content) in &source.templates {
        let path = ctx.template_path(declared);
        let written = write_file(&path, content, force)?;
        report.record(path, written);
    }

    Ok(report)
}

/// Record the workflow selection in the state file, keeping committed
/// symbols. An existing selection is only replaced with `force`.
///
/// Returns the recorded selection.
pub(super) fn write_state(ctx: &ProjectContext, workflow: &str, force: bool) -> Result<String> {
    let store = StateStore::new(ctx.state_path());
    let mut state = store.read()?;

    match &state.workflow {
        Some(existing) if !force => Ok(existing.clone()),
        _ => {
            state.workflow = Some(workflow.to_string());
            store.write(&state)?;
            Ok(workflow.to_string())
        }
    }
}

/// Create the docs directory and the locks directory.
pub(super) fn create_project_dirs(ctx: &ProjectContext, docs_dir: &str) -> Result<PathBuf> {
    create_dir(&ctx.locks_dir)?;
    let docs_root = ctx.docs_root(docs_dir);
    create_dir(&docs_root)?;
    Ok(docs_root)
}

/// Write `content` to `path` unless it exists and `force` is unset.
/// Returns whether the file was written.
pub(super) fn write_file(path: &Path, content: &str, force: bool) -> Result<bool> {
    if path.exists() && !force {
        tracing::debug!(path = %path.display(), "keeping existing file");
        return Ok(false);
    }

    atomic_write_file(path, content)?;
    Ok(true)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        TempddError::UserError(format!(
            "failed to create directory '{}': {}",
            path.display(),
            e
        ))
    })
}
