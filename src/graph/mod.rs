//! Stage graph: the validated, ordered set of workflow stages.
//!
//! The graph is built once from a [`WorkflowDefinition`] and never changes
//! during a run. Construction checks every symbol reference:
//!
//! - each stage listed in `stages` has a `define` entry and is listed once
//! - no two stages produce the same output symbol
//! - every input symbol is produced by a stage strictly earlier in
//!   declaration order (so forward, self, and cyclic references are rejected)
//! - built-in symbols (`TARGET_DOCUMENT`, `LANGUAGE`, `STAGE`, `ACTION`) are
//!   never declared as an input or an output
//!
//! Construction is all-or-nothing: on error no graph exists.

mod prerequisites;


pub use prerequisites::Prerequisites;

use crate::config::WorkflowDefinition;
use crate::error::{ConfigError, Result, TempddError};
use crate::symbols::{BUILTIN_SYMBOLS, is_builtin};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// Valid symbol names: an identifier made of ASCII letters, digits and `_`.
static SYMBOL_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid symbol name regex"));

/// One stage of the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    pub name: String,

    /// Template path as declared (relative to the workflow directory).
    pub template_path: String,

    /// Consumed symbols, in declaration order.
    pub input_symbols: Vec<String>,

    /// Produced symbol, if any.
    pub output_symbol: Option<String>,
}

/// Validated stage graph.
#[derive(Debug, Clone)]
pub struct StageGraph {
    /// Stages in declaration order.
    stages: Vec<StageSpec>,

    /// Stage name to position in `stages`.
    index: HashMap<String, usize>,

    /// Output symbol to producing stage position.
    producers: HashMap<String, usize>,

    /// Producer position to consumer positions.
    consumers: Vec<BTreeSet<usize>>,
}

impl StageGraph {
    /// Build and validate the graph.
    pub fn build(definition: &WorkflowDefinition) -> std::result::Result<Self, ConfigError> {
        let mut stages: Vec<StageSpec> = Vec::with_capacity(definition.stages.len());
        let mut index = HashMap::new();
        let mut producers: HashMap<String, usize> = HashMap::new();
        let mut consumers: Vec<BTreeSet<usize>> = Vec::with_capacity(definition.stages.len());

        for name in &definition.stages {
            if index.contains_key(name) {
                return Err(ConfigError::DuplicateStage(name.clone()));
            }

            let stage_def = definition
                .define
                .get(name)
                .ok_or_else(|| ConfigError::UndefinedStage(name.clone()))?;

            if stage_def.template.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "stage '{}' has no template",
                    name
                )));
            }

            let position = stages.len();
            consumers.push(BTreeSet::new());

            let mut inputs: Vec<String> = Vec::with_capacity(stage_def.input_symbols.len());
            for symbol in &stage_def.input_symbols {
                check_symbol_name(name, symbol)?;

                // Producers only holds earlier stages at this point.
                let producer = producers.get(symbol).copied().ok_or_else(|| {
                    ConfigError::CyclicOrForwardReference {
                        stage: name.clone(),
                        symbol: symbol.clone(),
                    }
                })?;
                consumers[producer].insert(position);

                if !inputs.contains(symbol) {
                    inputs.push(symbol.clone());
                }
            }

            if let Some(symbol) = &stage_def.output_symbol {
                check_symbol_name(name, symbol)?;

                if let Some(&first) = producers.get(symbol) {
                    return Err(ConfigError::DuplicateOutputSymbol {
                        symbol: symbol.clone(),
                        first: stages[first].name.clone(),
                        second: name.clone(),
                    });
                }
                producers.insert(symbol.clone(), position);
            }

            index.insert(name.clone(), position);
            stages.push(StageSpec {
                name: name.clone(),
                template_path: stage_def.template.clone(),
                input_symbols: inputs,
                output_symbol: stage_def.output_symbol.clone(),
            });
        }

        for name in definition.define.keys() {
            if !index.contains_key(name) {
                tracing::warn!(stage = %name, "stage is defined but not listed in `stages`; ignoring it");
            }
        }

        Ok(Self {
            stages,
            index,
            producers,
            consumers,
        })
    }

    /// Look up a stage by name.
    pub fn resolve_stage(&self, name: &str) -> Result<&StageSpec> {
        self.index
            .get(name)
            .map(|&i| &self.stages[i])
            .ok_or_else(|| TempddError::UnknownStage {
                stage: name.to_string(),
                available: self.stage_names().join(", "),
            })
    }

    /// Stages in declaration order.
    pub fn stages(&self) -> impl Iterator<Item = &StageSpec> {
        self.stages.iter()
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The stage producing `symbol`, if any.
    pub fn producer_of(&self, symbol: &str) -> Option<&StageSpec> {
        self.producers.get(symbol).map(|&i| &self.stages[i])
    }

    /// Every stage that transitively consumes `stage`'s output, in
    /// declaration order.
    pub fn dependents(&self, stage: &str) -> Vec<&StageSpec> {
        let Some(&start) = self.index.get(stage) else {
            return Vec::new();
        };

        let mut seen = BTreeSet::new();
        let mut pending = vec![start];
        while let Some(current) = pending.pop() {
            for &next in &self.consumers[current] {
                if seen.insert(next) {
                    pending.push(next);
                }
            }
        }

        // BTreeSet of positions iterates in declaration order.
        seen.into_iter().map(|i| &self.stages[i]).collect()
    }
}

fn check_symbol_name(stage: &str, symbol: &str) -> std::result::Result<(), ConfigError> {
    if !SYMBOL_NAME_REGEX.is_match(symbol) {
        return Err(ConfigError::Invalid(format!(
            "stage '{}' references invalid symbol name '{}' (use letters, digits and '_')",
            stage, symbol
        )));
    }

    if is_builtin(symbol) {
        return Err(ConfigError::ReservedSymbol {
            stage: stage.to_string(),
            symbol: symbol.to_string(),
            builtins: BUILTIN_SYMBOLS.join(", "),
        });
    }

    Ok(())
}
