//! Implementation of the `tempdd status` command.
//!
//! Lists every stage in declaration order with its output symbol, the
//! committed value, and any inputs that are still missing.

use crate::context::require_initialized_project;
use crate::error::Result;
use crate::locks;
use crate::resolver::CommandResolver;
use crate::symbols::{StateStore, SymbolTable};
use std::fmt::Write;

/// Execute the `tempdd status` command.
pub fn cmd_status() -> Result<()> {
    let ctx = require_initialized_project()?;
    let resolver = CommandResolver::load(ctx)?;
    let symbols = SymbolTable::open(StateStore::new(resolver.context().state_path()))?;

    print!("{}", status_text(&resolver, &symbols));

    if let Some(holder) = locks::read_state_lock(resolver.context())? {
        println!();
        println!("Project state is locked: {}", holder);
    }

    Ok(())
}

/// Status table for every stage.
pub(crate) fn status_text(resolver: &CommandResolver, symbols: &SymbolTable) -> String {
    let graph = resolver.graph();
    let width = graph
        .stages()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0)
        .max("Stage".len());

    let mut out = String::new();
    let _ = writeln!(out, "Workflow Status");
    let _ = writeln!(out, "===============");
    if let Some(workflow) = symbols.workflow() {
        let _ = writeln!(out, "Workflow: {}", workflow);
    }
    let _ = writeln!(out);

    for stage in graph.stages() {
        let output = match &stage.output_symbol {
            Some(symbol) => match symbols.get(symbol).value() {
                Some(value) => format!("{} = {}", symbol, value),
                None => format!("{} (not produced)", symbol),
            },
            None => "(no output symbol)".to_string(),
        };
        let _ = writeln!(out, "  {:width$}  {}", stage.name, output, width = width);

        let prerequisites = graph.check_prerequisites(stage, symbols);
        if !prerequisites.satisfied {
            let _ = writeln!(
                out,
                "  {:width$}  missing: {}",
                "",
                prerequisites.missing.join(", "),
                width = width
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_project;

    #[test]
    fn test_status_text_tracks_progress() {
        let (_temp_dir, ctx) = create_test_project();
        let resolver = CommandResolver::load(ctx).unwrap();
        let mut symbols = SymbolTable::in_memory();

        let before = status_text(&resolver, &symbols);
        assert!(before.contains("PATH_PRD (not produced)"));
        assert!(before.contains("missing: PATH_PRD, PATH_ARCH"));
        assert!(before.contains("(no output symbol)"));

        resolver.resolve("prd build", &mut symbols).unwrap();
        let after = status_text(&resolver, &symbols);
        let prd = resolver.target_document("prd");
        assert!(after.contains(&format!("PATH_PRD = {}", prd.display())));
        assert!(after.contains("missing: PATH_ARCH"));
        assert!(!after.contains("missing: PATH_PRD"));
    }
}
