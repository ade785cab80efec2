//! WorkflowDefinition struct and its defaults.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A workflow definition, as stored in `.tempdd/workflow/config.yaml`.
///
/// Unknown top-level fields are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowDefinition {
    // =========================================================================
    // Global settings
    // =========================================================================
    /// Short description shown when choosing a workflow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Language code the agent must converse and write documents in.
    #[serde(default = "default_language")]
    pub language: String,

    /// Diagnostic log verbosity.
    pub logging_level: LoggingLevel,

    /// Directory (relative to the project root) receiving stage documents.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    /// Actions that write the template body to the target document when it
    /// does not exist yet.
    #[serde(default = "default_materialize_actions")]
    pub materialize_actions: Vec<String>,

    /// Free-form usage notes shown by `tempdd help`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    // =========================================================================
    // Stages
    // =========================================================================
    /// Stage names in declaration order.
    pub stages: Vec<String>,

    /// Stage name to stage definition.
    pub define: BTreeMap<String, StageDefinition>,
}

impl Default for WorkflowDefinition {
    fn default() -> Self {
        Self {
            description: None,
            language: default_language(),
            logging_level: LoggingLevel::default(),
            docs_dir: default_docs_dir(),
            materialize_actions: default_materialize_actions(),
            help: None,
            stages: Vec::new(),
            define: BTreeMap::new(),
        }
    }
}
