//! Error types for the tempdd CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tempdd operations.
///
/// Each variant maps to a specific exit code via [`TempddError::exit_code`].
#[derive(Error, Debug)]
pub enum TempddError {
    /// The workflow definition is malformed. Detected at load time.
    #[error("invalid workflow definition: {0}")]
    Config(#[from] ConfigError),

    /// A stage's template file does not exist.
    #[error("template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// A template file exists but its header could not be parsed.
    #[error("failed to parse template '{}': {message}", path.display())]
    TemplateParse { path: PathBuf, message: String },

    /// The command references a stage the workflow does not declare.
    #[error("unknown stage '{stage}'. Available stages: {available}")]
    UnknownStage { stage: String, available: String },

    /// The command references an action the stage's template does not define.
    #[error("unknown action '{action}' for stage '{stage}'. Available actions: {available}")]
    UnknownAction {
        stage: String,
        action: String,
        available: String,
    },

    /// The command string is malformed.
    #[error("{0}")]
    Parse(String),

    /// No initialized project was found from the current directory.
    #[error("{0}")]
    MissingProjectState(String),

    /// Invalid arguments, invalid state, or I/O failures.
    #[error("{0}")]
    UserError(String),

    /// The project state lock is held by another invocation.
    #[error("Lock acquisition failed: {0}")]
    LockError(String),
}

/// Ways a workflow definition can be invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Generic structural problem (YAML syntax, empty names, bad values).
    #[error("{0}")]
    Invalid(String),

    /// A stage is listed in `stages` but has no entry under `define`.
    #[error("stage '{0}' is listed in `stages` but has no `define` entry")]
    UndefinedStage(String),

    /// A stage is listed more than once in `stages`.
    #[error("stage '{0}' is listed more than once in `stages`")]
    DuplicateStage(String),

    /// Two stages declare the same output symbol.
    #[error("output symbol '{symbol}' is produced by both '{first}' and '{second}'")]
    DuplicateOutputSymbol {
        symbol: String,
        first: String,
        second: String,
    },

    /// A stage consumes a symbol that no earlier stage produces.
    #[error(
        "stage '{stage}' consumes '{symbol}', which is not produced by any earlier stage (forward or cyclic reference)"
    )]
    CyclicOrForwardReference { stage: String, symbol: String },

    /// A stage declares a built-in symbol as an input or output.
    #[error("stage '{stage}' uses reserved symbol '{symbol}' (reserved: {builtins})")]
    ReservedSymbol {
        stage: String,
        symbol: String,
        builtins: String,
    },
}

impl TempddError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TempddError::Config(_)
            | TempddError::TemplateNotFound(_)
            | TempddError::TemplateParse { .. } => exit_codes::CONFIG_ERROR,
            TempddError::UnknownStage { .. }
            | TempddError::UnknownAction { .. }
            | TempddError::Parse(_)
            | TempddError::MissingProjectState(_)
            | TempddError::UserError(_) => exit_codes::USER_ERROR,
            TempddError::LockError(_) => exit_codes::LOCK_FAILURE,
        }
    }
}

/// Result type alias for tempdd operations.
pub type Result<T> = std::result::Result<T, TempddError>;
