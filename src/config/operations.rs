//! Workflow definition loading, validation, and serialization.

use super::model::WorkflowDefinition;
use crate::error::{ConfigError, Result, TempddError};
use regex::Regex;
use std::path::{Component, Path};
use std::sync::LazyLock;

/// Stage names become document file names, so they are restricted to
/// letters, digits, `_` and `-`, starting with a letter, digit or `_`.
static STAGE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_-]*$").expect("Invalid stage name regex")
});

impl WorkflowDefinition {
    /// Load a workflow definition from a YAML file.
    ///
    /// A missing file is reported as `MissingProjectState`, since every
    /// initialized project has one.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TempddError::MissingProjectState(format!(
                    "workflow definition not found: {}\n\n\
                     Run `tempdd init` to set up the project workflow.",
                    path.display()
                ))
            } else {
                TempddError::UserError(format!(
                    "failed to read workflow definition '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a workflow definition from a YAML string and validate its values.
    ///
    /// Structural checks over the stage graph (symbol references, duplicate
    /// outputs) happen in [`crate::graph::StageGraph::build`].
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let definition: WorkflowDefinition = serde_yaml::from_str(yaml).map_err(|e| {
            ConfigError::Invalid(format!("failed to parse workflow YAML: {}", e))
        })?;

        definition.validate()?;
        Ok(definition)
    }

    /// Serialize the definition to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            TempddError::UserError(format!("failed to serialize workflow definition: {}", e))
        })
    }

    /// Validate setting values.
    ///
    /// Validation rules:
    /// - `language` must be non-empty
    /// - `docs_dir` must be a non-empty relative path that stays inside the project
    /// - stage names are made of letters, digits, `_` and `-`, so
    ///   `<docs_dir>/<stage>.md` stays inside the document root
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.language.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "language must not be empty".to_string(),
            ));
        }

        let docs_dir = Path::new(&self.docs_dir);
        if self.docs_dir.trim().is_empty()
            || docs_dir.is_absolute()
            || docs_dir
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ConfigError::Invalid(format!(
                "docs_dir must be a relative path inside the project (found '{}')",
                self.docs_dir
            )));
        }

        for name in self.stages.iter().chain(self.define.keys()) {
            if !STAGE_NAME_REGEX.is_match(name) {
                return Err(ConfigError::Invalid(format!(
                    "invalid stage name '{}' (use letters, digits, '_' and '-')",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Whether `action` writes the template body to the target document.
    pub fn materializes(&self, action: &str) -> bool {
        self.materialize_actions.iter().any(|a| a == action)
    }
}
