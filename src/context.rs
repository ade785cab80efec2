//! Project context resolution for tempdd.
//!
//! Finds the project root from any working directory (the nearest ancestor
//! containing a `.tempdd/` directory) and resolves the canonical paths of the
//! workflow definition, templates, state file, and locks.
//!
//! Layout of an initialized project:
//!
//! ```text
//! {root}/
//!   .tempdd/
//!     workflow/config.yaml     workflow definition
//!     workflow/templates/*.md  stage templates
//!     state.json               persisted symbol table
//!     locks/                   single-writer lock (untracked)
//!   docs-for-works/            generated documents (configurable)
//! ```

use crate::error::{Result, TempddError};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the per-project state directory.
pub const PROJECT_DIR: &str = ".tempdd";

/// Name of the workflow directory inside the state directory.
pub const WORKFLOW_DIR: &str = "workflow";

/// File name of the workflow definition.
pub const WORKFLOW_CONFIG: &str = "config.yaml";

/// File name of the persisted symbol table.
pub const STATE_FILE: &str = "state.json";

/// Resolved paths for a tempdd project. All paths are absolute.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Directory that contains `.tempdd/`.
    pub root: PathBuf,

    /// `{root}/.tempdd`.
    pub project_dir: PathBuf,

    /// `{root}/.tempdd/workflow`.
    pub workflow_dir: PathBuf,

    /// `{root}/.tempdd/locks`.
    pub locks_dir: PathBuf,
}

impl ProjectContext {
    /// Build the context for a project rooted at `root` without checking
    /// that it exists. Used by `init` and by tests.
    pub fn at<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let project_dir = root.join(PROJECT_DIR);
        let workflow_dir = project_dir.join(WORKFLOW_DIR);
        let locks_dir = project_dir.join("locks");

        Self {
            root,
            project_dir,
            workflow_dir,
            locks_dir,
        }
    }

    /// Discover the project from the current working directory.
    pub fn discover() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            TempddError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::discover_from(&cwd)
    }

    /// Discover the project by walking up from `start`.
    ///
    /// Returns `MissingProjectState` when no ancestor contains `.tempdd/`.
    pub fn discover_from<P: AsRef<Path>>(start: P) -> Result<Self> {
        let start = start.as_ref();

        for dir in start.ancestors() {
            if dir.join(PROJECT_DIR).is_dir() {
                return Ok(Self::at(dir));
            }
        }

        Err(TempddError::MissingProjectState(format!(
            "no tempdd project found in '{}' or any parent directory.\n\n\
             Run `tempdd init` to initialize a project here.",
            start.display()
        )))
    }

    /// Ensure the workflow definition is in place.
    pub fn ensure_initialized(&self) -> Result<()> {
        if !self.config_path().is_file() {
            return Err(TempddError::MissingProjectState(format!(
                "workflow definition not found.\n\
                 Expected: {}\n\n\
                 Run `tempdd init` to set up the project workflow.",
                self.config_path().display()
            )));
        }

        Ok(())
    }

    /// Path to the workflow definition.
    pub fn config_path(&self) -> PathBuf {
        self.workflow_dir.join(WORKFLOW_CONFIG)
    }

    /// Path to the templates directory.
    pub fn templates_dir(&self) -> PathBuf {
        self.workflow_dir.join("templates")
    }

    /// Path to the persisted symbol table.
    pub fn state_path(&self) -> PathBuf {
        self.project_dir.join(STATE_FILE)
    }

    /// Path to the single-writer state lock.
    pub fn state_lock_path(&self) -> PathBuf {
        self.locks_dir.join("state.lock")
    }

    /// Resolve a template path declared in the workflow definition.
    ///
    /// Relative paths are relative to the workflow directory.
    pub fn template_path(&self, declared: &str) -> PathBuf {
        let declared = Path::new(declared);
        if declared.is_absolute() {
            declared.to_path_buf()
        } else {
            self.workflow_dir.join(declared)
        }
    }

    /// Document root for generated stage documents.
    pub fn docs_root(&self, docs_dir: &str) -> PathBuf {
        self.root.join(docs_dir)
    }
}

/// Discover the project and ensure it has a workflow definition.
///
/// Use this in every command except `init`.
pub fn require_initialized_project() -> Result<ProjectContext> {
    let ctx = ProjectContext::discover()?;
    ctx.ensure_initialized()?;
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_from_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(PROJECT_DIR)).unwrap();

        let ctx = ProjectContext::discover_from(temp_dir.path()).unwrap();

        assert_eq!(ctx.root, temp_dir.path());
        assert!(ctx.project_dir.ends_with(".tempdd"));
        assert!(ctx.workflow_dir.ends_with("workflow"));
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(PROJECT_DIR)).unwrap();
        let nested = temp_dir.path().join("src").join("nested");
        fs::create_dir_all(&nested).unwrap();

        let ctx = ProjectContext::discover_from(&nested).unwrap();

        assert_eq!(ctx.root, temp_dir.path());
    }

    #[test]
    fn test_discover_outside_project_fails() {
        let temp_dir = TempDir::new().unwrap();

        let err = ProjectContext::discover_from(temp_dir.path()).unwrap_err();

        assert!(matches!(err, TempddError::MissingProjectState(_)));
        assert!(err.to_string().contains("tempdd init"));
    }

    #[test]
    fn test_ensure_initialized_requires_config() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        fs::create_dir_all(&ctx.workflow_dir).unwrap();

        assert!(matches!(
            ctx.ensure_initialized(),
            Err(TempddError::MissingProjectState(_))
        ));

        fs::write(ctx.config_path(), "stages: []\n").unwrap();
        assert!(ctx.ensure_initialized().is_ok());
    }

    #[test]
    fn test_paths() {
        let ctx = ProjectContext::at("/work/project");

        assert_eq!(
            ctx.config_path(),
            Path::new("/work/project/.tempdd/workflow/config.yaml")
        );
        assert_eq!(ctx.state_path(), Path::new("/work/project/.tempdd/state.json"));
        assert!(ctx.state_lock_path().ends_with("locks/state.lock"));
        assert_eq!(
            ctx.template_path("templates/prd.md"),
            Path::new("/work/project/.tempdd/workflow/templates/prd.md")
        );
        assert_eq!(
            ctx.docs_root("docs-for-works"),
            Path::new("/work/project/docs-for-works")
        );
    }
}
