//! Prerequisite checks against the symbol table.

use super::{StageGraph, StageSpec};
use crate::symbols::SymbolTable;

/// Outcome of a prerequisite check for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prerequisites {
    /// Whether every input symbol has a committed value.
    pub satisfied: bool,

    /// Input symbols with no committed value, in declaration order.
    pub missing: Vec<String>,
}

impl StageGraph {
    /// Report which of `spec`'s inputs are not yet committed.
    ///
    /// Depends only on `spec` and the table contents.
    pub fn check_prerequisites(&self, spec: &StageSpec, symbols: &SymbolTable) -> Prerequisites {
        let missing: Vec<String> = spec
            .input_symbols
            .iter()
            .filter(|symbol| !symbols.get(symbol).is_resolved())
            .cloned()
            .collect();

        Prerequisites {
            satisfied: missing.is_empty(),
            missing,
        }
    }

    /// Stages producing the missing symbols, for hints such as
    /// "run `prd build` first".
    pub fn missing_producers(&self, prerequisites: &Prerequisites) -> Vec<&StageSpec> {
        prerequisites
            .missing
            .iter()
            .filter_map(|symbol| self.producer_of(symbol))
            .collect()
    }
}
