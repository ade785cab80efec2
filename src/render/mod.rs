//! Instruction rendering.
//!
//! Rendering is a pure function of `(action body, bindings, directives)`:
//! markers are substituted in one left-to-right pass, the directives block is
//! prepended, and the whole is wrapped in sentinel lines the agent can find.

mod directives;


pub use directives::global_directives;

use crate::symbols::Binding;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// First line of every instruction.
pub const INSTRUCTION_START: &str = "[AI_INSTRUCTION_START]";

/// Last line of every instruction.
pub const INSTRUCTION_END: &str = "[AI_INSTRUCTION_END]";

/// Separates the directives block from the action body.
pub const SECTION_SEPARATOR: &str = "===";

/// `{{NAME}}`, tolerating whitespace inside the braces.
static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([^{}\s]+)\s*\}\}").expect("Invalid marker regex")
});

/// Symbol values available to one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: BTreeMap<String, Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, binding: Binding) {
        self.entries.insert(name.into(), binding);
    }

    pub fn resolved(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name, Binding::Resolved(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.entries.get(name)
    }
}

/// Result of a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The complete instruction, sentinels included.
    pub instruction: String,

    /// Marker names left verbatim, deduplicated, in first-seen order.
    pub unresolved: Vec<String>,
}

/// Substitute markers in `action_body` and wrap the result.
///
/// Markers whose name is unbound or bound to [`Binding::Unresolved`] are left
/// exactly as written and reported in [`Rendered::unresolved`].
pub fn render(action_body: &str, bindings: &Bindings, directives: &str) -> Rendered {
    let (body, unresolved) = substitute(action_body, bindings);

    for name in &unresolved {
        tracing::warn!(symbol = %name, "template variable '{{{{{}}}}}' was not replaced: no value committed yet", name);
    }

    let mut instruction = String::with_capacity(
        INSTRUCTION_START.len() + directives.len() + body.len() + INSTRUCTION_END.len() + 16,
    );
    instruction.push_str(INSTRUCTION_START);
    instruction.push('\n');
    instruction.push_str(directives.trim_end());
    instruction.push_str("\n\n");
    instruction.push_str(SECTION_SEPARATOR);
    instruction.push_str("\n\n");
    instruction.push_str(body.trim_end());
    instruction.push('\n');
    instruction.push_str(INSTRUCTION_END);

    Rendered {
        instruction,
        unresolved,
    }
}

/// Replace bound markers in `text` without wrapping it.
///
/// Single pass; substituted values are never rescanned for markers. Returns
/// the names of markers left verbatim.
pub fn substitute(text: &str, bindings: &Bindings) -> (String, Vec<String>) {
    let mut unresolved: Vec<String> = Vec::new();

    let body = MARKER_REGEX.replace_all(text, |caps: &Captures| {
        let name = &caps[1];
        match bindings.get(name) {
            Some(Binding::Resolved(value)) => value.clone(),
            _ => {
                if !unresolved.iter().any(|n| n == name) {
                    unresolved.push(name.to_string());
                }
                caps[0].to_string()
            }
        }
    });

    (body.into_owned(), unresolved)
}
