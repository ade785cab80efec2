//! Workflow definition model for tempdd.
//!
//! This module defines the struct that represents `.tempdd/workflow/config.yaml`:
//! the ordered stage list, each stage's template and symbol bindings, and the
//! global settings (language, logging level, document directory).
//! Unknown fields are ignored, and optional settings have defaults.

mod model;
mod operations;
pub mod types;


pub use model::WorkflowDefinition;
pub use types::{LoggingLevel, StageDefinition};
