//! Stage templates.
//!
//! A template is a markdown document with an optional YAML frontmatter
//! header declaring the stage's actions:
//!
//! ```text
//! ---
//! build:
//!   prompt: |
//!     Fill in {{TARGET_DOCUMENT}} using {{PATH_PRD}}.
//! run:
//!   prompt: |
//!     Implement what {{TARGET_DOCUMENT}} describes.
//! ---
//!
//! # Architecture
//! <!-- fill-in markers for the agent -->
//! ```
//!
//! The body (everything after the closing `---` line) is kept byte-for-byte
//! and is never interpreted here.

mod parser;

#[cfg(test)]
mod tests;

use crate::error::{Result, TempddError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One named action in a template header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Raw instruction text, possibly containing `{{SYMBOL}}` markers.
    pub prompt: String,

    /// Optional one-line summary shown in listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Any fields not explicitly defined above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A parsed template file.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Action name to action definition.
    pub actions: BTreeMap<String, ActionSpec>,

    /// Document body following the header.
    pub body: String,
}

impl Template {
    /// Load and parse a template from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TempddError::TemplateNotFound(path.to_path_buf())
            } else {
                TempddError::TemplateParse {
                    path: path.to_path_buf(),
                    message: format!("failed to read file: {}", e),
                }
            }
        })?;

        Self::parse(&content).map_err(|message| TempddError::TemplateParse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse template content.
    ///
    /// Errors are plain messages; [`Template::load`] attaches the path.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let Some((header, body_start)) = parser::split_frontmatter(content)? else {
            return Ok(Self {
                actions: BTreeMap::new(),
                body: content.to_string(),
            });
        };

        Ok(Self {
            actions: parser::parse_actions(header)?,
            body: content[body_start..].to_string(),
        })
    }

    /// Instruction text of `action`.
    ///
    /// `stage` is only used for the error message.
    pub fn action(&self, stage: &str, action: &str) -> Result<&str> {
        self.actions
            .get(action)
            .map(|spec| spec.prompt.as_str())
            .ok_or_else(|| TempddError::UnknownAction {
                stage: stage.to_string(),
                action: action.to_string(),
                available: if self.actions.is_empty() {
                    "(none)".to_string()
                } else {
                    self.action_names().join(", ")
                },
            })
    }

    /// Action names in sorted order.
    pub fn action_names(&self) -> Vec<&str> {
        self.actions.keys().map(String::as_str).collect()
    }
}
