use crate::context::ProjectContext;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

pub(crate) const TEST_WORKFLOW: &str = r#"
language: en
stages: [prd, arch, tasks]
define:
  prd:
    template: templates/prd.md
    output_symbol: PATH_PRD
  arch:
    template: templates/arch.md
    input_symbols: [PATH_PRD]
    output_symbol: PATH_ARCH
  tasks:
    template: templates/tasks.md
    input_symbols: [PATH_PRD, PATH_ARCH]
help: |
  Start with `prd build`.
"#;

pub(crate) const PRD_TEMPLATE: &str = r#"---
build:
  prompt: |
    Interview the user and fill in {{TARGET_DOCUMENT}}.
run:
  prompt: |
    Review {{TARGET_DOCUMENT}} for gaps.
---
# PRD ({{LANGUAGE}})

## Problem
"#;

pub(crate) const ARCH_TEMPLATE: &str = r#"---
build:
  prompt: |
    Read {{PATH_PRD}} and write the architecture into {{TARGET_DOCUMENT}}.
---
# Architecture

Based on: {{PATH_PRD}}
"#;

pub(crate) const TASKS_TEMPLATE: &str = r#"---
build:
  prompt: |
    Split {{PATH_ARCH}} into tasks in {{TARGET_DOCUMENT}}.
run:
  prompt: |
    Implement the tasks listed in {{TARGET_DOCUMENT}}.
---
# Tasks
"#;

/// Create an initialized project with a three-stage workflow
/// (`prd` -> `arch` -> `tasks`) and no committed symbols.
pub(crate) fn create_test_project() -> (TempDir, ProjectContext) {
    let temp_dir = TempDir::new().unwrap();
    let ctx = ProjectContext::at(temp_dir.path());

    let templates = ctx.templates_dir();
    std::fs::create_dir_all(&templates).unwrap();
    std::fs::write(ctx.config_path(), TEST_WORKFLOW).unwrap();
    std::fs::write(templates.join("prd.md"), PRD_TEMPLATE).unwrap();
    std::fs::write(templates.join("arch.md"), ARCH_TEMPLATE).unwrap();
    std::fs::write(templates.join("tasks.md"), TASKS_TEMPLATE).unwrap();

    (temp_dir, ctx)
}
