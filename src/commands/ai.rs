//! Implementation of the `tempdd ai` command.

use crate::cli::AiArgs;
use crate::context::require_initialized_project;
use crate::error::Result;
use crate::resolver::CommandResolver;

/// Execute the `tempdd ai "<stage> <action>"` command.
///
/// Prints only the instruction on stdout; warnings (unresolved symbols,
/// missing prerequisites, stale downstream stages) go to the log on stderr.
pub fn cmd_ai(args: AiArgs) -> Result<()> {
    let ctx = require_initialized_project()?;
    let resolver = CommandResolver::load(ctx)?;

    let resolution = resolver.run(&args.command_line())?;

    println!("{}", resolution.instruction);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TempddError;
    use crate::symbols::{StateStore, SymbolTable};
    use crate::test_support::{DirGuard, create_test_project};
    use serial_test::serial;

    fn ai(words: &[&str]) -> AiArgs {
        AiArgs {
            command: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    #[serial]
    fn test_cmd_ai_commits_from_subdirectory() {
        let (temp_dir, ctx) = create_test_project();
        let nested = temp_dir.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();
        let _guard = DirGuard::new(&nested);

        cmd_ai(ai(&["prd", "build"])).unwrap();

        let symbols = SymbolTable::open(StateStore::new(ctx.state_path())).unwrap();
        assert!(symbols.contains("PATH_PRD"));
    }

    #[test]
    #[serial]
    fn test_cmd_ai_outside_project() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path());

        let err = cmd_ai(ai(&["prd build"])).unwrap_err();
        assert!(matches!(err, TempddError::MissingProjectState(_)));
        assert!(err.to_string().contains("tempdd init"));
    }
}
