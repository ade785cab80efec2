//! Parsing of `"<stage> <action>"` command strings.

use crate::error::{Result, TempddError};
use std::fmt;

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub stage: String,
    pub action: String,
}

impl Command {
    /// Split `input` on whitespace into exactly a stage and an action.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split_whitespace();

        match (parts.next(), parts.next(), parts.next()) {
            (Some(stage), Some(action), None) => Ok(Self {
                stage: stage.to_string(),
                action: action.to_string(),
            }),
            _ => Err(TempddError::Parse(format!(
                "invalid command format. Expected '<stage> <action>', got: '{}'\n\
                 Examples: 'prd build', 'arch run'",
                input
            ))),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stage, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_tokens() {
        let cmd = Command::parse("prd build").unwrap();
        assert_eq!(cmd.stage, "prd");
        assert_eq!(cmd.action, "build");
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let cmd = Command::parse("  arch \t run \n").unwrap();
        assert_eq!(cmd.to_string(), "arch run");
    }

    #[test]
    fn test_parse_rejects_wrong_token_counts() {
        for input in ["", "   ", "prd", "prd build now"] {
            let err = Command::parse(input).unwrap_err();
            assert!(matches!(err, TempddError::Parse(_)), "input: {:?}", input);
        }
    }

    #[test]
    fn test_parse_error_shows_examples() {
        let err = Command::parse("prd").unwrap_err();
        assert!(err.to_string().contains("'prd build'"));
        assert!(err.to_string().contains("got: 'prd'"));
    }
}
