//! Configuration types and defaults for the workflow definition.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Verbosity of diagnostic logging, as written in `logging_level`.
///
/// Accepts the names `debug`, `info`, `warning` (or `warn`), `error`, and
/// `critical`, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LoggingLevel {
    Debug,
    Info,
    #[default]
    Warning,
    Error,
    Critical,
}

impl LoggingLevel {
    /// Parse a level name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warning" | "warn" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// The equivalent `tracing` filter directive.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            // tracing has no level above error
            Self::Error | Self::Critical => "error",
        }
    }
}

impl fmt::Display for LoggingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        };
        f.write_str(name)
    }
}

impl TryFrom<String> for LoggingLevel {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, String> {
        Self::from_str(&value).ok_or_else(|| {
            format!(
                "unknown logging_level '{}' (expected debug, info, warning, error, or critical)",
                value
            )
        })
    }
}

impl From<LoggingLevel> for String {
    fn from(level: LoggingLevel) -> Self {
        level.to_string()
    }
}

/// Definition of one stage under `define`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageDefinition {
    /// Template path, relative to the workflow directory.
    pub template: String,

    /// Symbols this stage consumes, in declaration order.
    ///
    /// May be omitted or written as `null`.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub input_symbols: Vec<String>,

    /// Symbol this stage produces, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_symbol: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// Default value functions for serde
pub(crate) fn default_language() -> String {
    "en".to_string()
}
pub(crate) fn default_docs_dir() -> String {
    "docs-for-works".to_string()
}
pub(crate) fn default_materialize_actions() -> Vec<String> {
    vec!["build".to_string()]
}
