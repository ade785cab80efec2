//! Command resolution: from `"<stage> <action>"` to an instruction.
//!
//! Resolution steps, in order:
//!
//! 1. Parse the command into a stage and an action
//! 2. Look up the stage in the [`StageGraph`]
//! 3. Load the stage template and look up the action
//! 4. Bind the stage's input symbols plus the built-in symbols
//!    (`TARGET_DOCUMENT`, `LANGUAGE`, `STAGE`, `ACTION`)
//! 5. Render the instruction
//! 6. Materialize the target document if the action asks for it
//! 7. Commit the stage's output symbol
//!
//! Any failure leaves the symbol table untouched. A document materialized in
//! step 6 stays on disk if step 7 fails.

mod command;


pub use command::Command;

use crate::config::WorkflowDefinition;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::fs::atomic_write_file;
use crate::graph::{StageGraph, StageSpec};
use crate::locks;
use crate::render::{self, Bindings};
use crate::symbols::{ACTION, LANGUAGE, STAGE, StateStore, SymbolTable, TARGET_DOCUMENT};
use crate::template::Template;
use std::path::{Path, PathBuf};

/// Everything produced by one successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Rendered instruction, sentinels included.
    pub instruction: String,

    pub stage: String,
    pub action: String,

    /// The stage's output path (`TARGET_DOCUMENT`).
    pub target_document: PathBuf,

    /// Whether this resolution wrote the template body to `target_document`.
    pub materialized: bool,

    /// `(symbol, value)` committed to the symbol table, if the stage has an
    /// output symbol.
    pub committed: Option<(String, String)>,

    /// Markers left verbatim in the instruction.
    pub unresolved: Vec<String>,

    /// Input symbols with no committed value at resolution time.
    pub missing: Vec<String>,

    /// Downstream stages whose outputs were committed before this run and may
    /// now be stale.
    pub stale_dependents: Vec<String>,

    /// Template body, unmodified.
    pub body: String,
}

/// Resolves commands against one loaded workflow.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    ctx: ProjectContext,
    definition: WorkflowDefinition,
    graph: StageGraph,
}

impl CommandResolver {
    /// Build a resolver, validating the workflow's stage graph.
    pub fn new(ctx: ProjectContext, definition: WorkflowDefinition) -> Result<Self> {
        let graph = StageGraph::build(&definition)?;
        Ok(Self {
            ctx,
            definition,
            graph,
        })
    }

    /// Load the project's workflow definition and build a resolver for it.
    pub fn load(ctx: ProjectContext) -> Result<Self> {
        let definition = WorkflowDefinition::load(ctx.config_path())?;
        Self::new(ctx, definition)
    }

    pub fn context(&self) -> &ProjectContext {
        &self.ctx
    }

    pub fn definition(&self) -> &WorkflowDefinition {
        &self.definition
    }

    pub fn graph(&self) -> &StageGraph {
        &self.graph
    }

    /// Output path of `stage`: `<root>/<docs_dir>/<stage>.md`.
    pub fn target_document(&self, stage: &str) -> PathBuf {
        self.ctx
            .docs_root(&self.definition.docs_dir)
            .join(format!("{}.md", stage))
    }

    /// Resolve `command` against the persisted project state.
    ///
    /// Holds the state lock from reading the symbol table until the output
    /// symbol has been flushed.
    pub fn run(&self, command: &str) -> Result<Resolution> {
        let _lock = locks::acquire_state_lock(&self.ctx, &format!("ai {}", command.trim()))?;
        let mut symbols = SymbolTable::open(StateStore::new(self.ctx.state_path()))?;
        self.resolve(command, &mut symbols)
    }

    /// Resolve `command`, committing the stage's output symbol on success.
    pub fn resolve(&self, command: &str, symbols: &mut SymbolTable) -> Result<Resolution> {
        let command = Command::parse(command)?;
        let spec = self.graph.resolve_stage(&command.stage)?;

        let template = Template::load(self.ctx.template_path(&spec.template_path))?;
        let action_body = template.action(&spec.name, &command.action)?;

        let prerequisites = self.graph.check_prerequisites(spec, symbols);
        if !prerequisites.satisfied {
            let producers: Vec<&str> = self
                .graph
                .missing_producers(&prerequisites)
                .into_iter()
                .map(|s| s.name.as_str())
                .collect();
            tracing::warn!(
                stage = %spec.name,
                missing = %prerequisites.missing.join(", "),
                run_first = %producers.join(", "),
                "stage prerequisites are not satisfied"
            );
        }

        let target_document = self.target_document(&spec.name);
        let target = target_document.to_string_lossy().to_string();
        let bindings = self.bindings(spec, &command, &target, symbols);

        let directives = render::global_directives(&self.definition.language);
        let rendered = render::render(action_body, &bindings, &directives);

        let materialized = self.materialize(&command, &template, &bindings, &target_document)?;

        let stale_dependents = self.committed_dependents(spec, symbols);
        let committed = match &spec.output_symbol {
            Some(symbol) => {
                if let Err(e) = symbols.set(symbol.clone(), target.clone()) {
                    if materialized {
                        tracing::warn!(
                            path = %target_document.display(),
                            symbol = %symbol,
                            "output was not committed; the materialized document was left in place"
                        );
                    }
                    return Err(e);
                }
                tracing::info!(symbol = %symbol, value = %target, "committed stage output");
                Some((symbol.clone(), target))
            }
            None => None,
        };

        if !stale_dependents.is_empty() {
            tracing::warn!(
                stage = %spec.name,
                dependents = %stale_dependents.join(", "),
                "downstream stages were produced from an earlier version of this stage's output; re-run them if needed"
            );
        }

        Ok(Resolution {
            instruction: rendered.instruction,
            stage: command.stage,
            action: command.action,
            target_document,
            materialized,
            committed,
            unresolved: rendered.unresolved,
            missing: prerequisites.missing,
            stale_dependents,
            body: template.body,
        })
    }

    /// Declared inputs plus the built-ins. The graph guarantees the two never
    /// share a name.
    fn bindings(
        &self,
        spec: &StageSpec,
        command: &Command,
        target: &str,
        symbols: &SymbolTable,
    ) -> Bindings {
        let mut bindings = Bindings::new();
        for symbol in &spec.input_symbols {
            bindings.insert(symbol.clone(), symbols.get(symbol));
        }
        bindings.resolved(TARGET_DOCUMENT, target);
        bindings.resolved(LANGUAGE, self.definition.language.clone());
        bindings.resolved(STAGE, command.stage.clone());
        bindings.resolved(ACTION, command.action.clone());
        bindings
    }

    /// Write the template body to the target document when the action is a
    /// materializing one and the document does not exist yet.
    fn materialize(
        &self,
        command: &Command,
        template: &Template,
        bindings: &Bindings,
        target_document: &Path,
    ) -> Result<bool> {
        if !self.definition.materializes(&command.action) {
            return Ok(false);
        }

        if target_document.exists() {
            tracing::debug!(
                path = %target_document.display(),
                "target document exists; keeping its content"
            );
            return Ok(false);
        }

        let (content, _) = render::substitute(&template.body, bindings);
        atomic_write_file(target_document, &content)?;

        tracing::info!(path = %target_document.display(), "materialized target document");
        Ok(true)
    }

    /// Transitive dependents of `spec` whose output symbol is committed.
    fn committed_dependents(&self, spec: &StageSpec, symbols: &SymbolTable) -> Vec<String> {
        self.graph
            .dependents(&spec.name)
            .into_iter()
            .filter(|dependent| {
                dependent
                    .output_symbol
                    .as_deref()
                    .is_some_and(|symbol| symbols.contains(symbol))
            })
            .map(|dependent| dependent.name.clone())
            .collect()
    }
}
