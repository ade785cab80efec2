//! Implementation of the `tempdd init` command.
//!
//! # What `tempdd init` does
//!
//! 1. Reads the workflow (built-in, or `--workflow <dir>`)
//! 2. Validates it completely before touching the project: definition,
//!    stage graph, and every template
//! 3. Copies `config.yaml` and the templates into `.tempdd/workflow/`
//! 4. Records the workflow selection in `.tempdd/state.json`
//! 5. Creates the docs directory and `.tempdd/locks/`
//! 6. With `--tool`, installs the `tempdd-go` command for that AI tool
//!
//! The command is **idempotent**: existing workflow files, integration files
//! and committed symbols are kept. `--force` overwrites the workflow and
//! integration files but still keeps committed symbols.

mod integration;
mod scaffolding;
mod source;
mod validation;


use crate::cli::{InitArgs, Tool};
use crate::config::WorkflowDefinition;
use crate::context::ProjectContext;
use crate::error::{Result, TempddError};
use crate::graph::StageGraph;
use crate::locks;
use std::path::{Path, PathBuf};

use integration::{Integration, install_integration};
use scaffolding::*;
use source::WorkflowSource;
use validation::validate_source;

/// Outcome of initializing a project.
#[derive(Debug)]
pub(crate) struct InitReport {
    pub workflow: String,
    pub language: String,
    pub stages: Vec<String>,
    pub docs_root: PathBuf,
    pub tool: Option<Tool>,
    pub written: Vec<PathBuf>,
    pub kept: Vec<PathBuf>,
}

/// Execute the `tempdd init` command in the current directory.
pub fn cmd_init(args: InitArgs) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| {
        TempddError::UserError(format!("failed to get current working directory: {}", e))
    })?;

    let report = init_project(&cwd, &args)?;

    println!("Initialized tempdd project in {}", cwd.display());
    println!();
    println!("Workflow: {}", report.workflow);
    println!("Language: {}", report.language);
    println!("Stages:   {}", report.stages.join(" -> "));
    println!("Docs:     {}", report.docs_root.display());
    if !report.written.is_empty() {
        println!();
        println!("Wrote:");
        for path in &report.written {
            println!("  {}", display_relative(path, &cwd));
        }
    }
    if !report.kept.is_empty() {
        println!();
        println!("Kept existing (use --force to overwrite):");
        for path in &report.kept {
            println!("  {}", display_relative(path, &cwd));
        }
    }
    match report.tool.map(Integration::for_tool) {
        Some(integration) => {
            println!();
            println!("Next steps ({}):", integration.name);
            println!("  {}", integration.usage);
        }
        None => {
            if let Some(first) = report.stages.first() {
                println!();
                println!("Start with `tempdd ai \"{} build\"`.", first);
            }
        }
    }

    Ok(())
}

/// Initialize a project rooted at `root`.
pub(crate) fn init_project(root: &Path, args: &InitArgs) -> Result<InitReport> {
    let source = match &args.workflow {
        Some(dir) => WorkflowSource::from_dir(dir)?,
        None => WorkflowSource::builtin(),
    };
    let language = args.language.as_deref().filter(|l| !l.trim().is_empty());
    let definition = validate_source(&source, language)?;

    let ctx = ProjectContext::at(root);
    create_project_dirs(&ctx, &definition.docs_dir)?;
    let _lock = locks::acquire_state_lock(&ctx, "init")?;

    let mut scaffold =
        install_workflow(&ctx, &source, &definition, language.is_some(), args.force)?;
    let config_kept = scaffold.kept.contains(&ctx.config_path());
    if config_kept && language.is_some() {
        tracing::warn!("existing workflow definition kept; --language has no effect without --force");
    }

    // The installed definition may predate this run; it is what later
    // commands will use, so validate and report it.
    let installed = WorkflowDefinition::load(ctx.config_path())?;
    StageGraph::build(&installed)?;
    if config_kept {
        create_project_dirs(&ctx, &installed.docs_dir)?;
    }

    if let Some(tool) = args.tool {
        let (path, written) = install_integration(root, tool, args.force)?;
        scaffold.record(path, written);
    }

    let workflow = write_state(&ctx, &source.name, args.force)?;

    tracing::info!(
        workflow = %workflow,
        written = scaffold.written.len(),
        kept = scaffold.kept.len(),
        "initialized project"
    );

    Ok(InitReport {
        workflow,
        language: installed.language,
        stages: installed.stages,
        docs_root: ctx.docs_root(&installed.docs_dir),
        tool: args.tool,
        written: scaffold.written,
        kept: scaffold.kept,
    })
}

fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
