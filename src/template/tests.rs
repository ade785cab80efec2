//! Tests for template parsing and loading.

use super::*;
use tempfile::TempDir;

const PRD_TEMPLATE: &str = r#"---
build:
  prompt: |
    Write the PRD into {{TARGET_DOCUMENT}}.
run:
  prompt: Review {{TARGET_DOCUMENT}}.
  description: final review
---

# Product Requirements

<!-- Describe the problem -->
"#;

#[test]
fn test_parse_actions_and_body() {
    let template = Template::parse(PRD_TEMPLATE).unwrap();

    assert_eq!(template.action_names(), vec!["build", "run"]);
    assert_eq!(
        template.action("prd", "build").unwrap(),
        "Write the PRD into {{TARGET_DOCUMENT}}.\n"
    );
    assert_eq!(
        template.actions["run"].description.as_deref(),
        Some("final review")
    );
    assert_eq!(
        template.body,
        "\n# Product Requirements\n\n<!-- Describe the problem -->\n"
    );
}

#[test]
fn test_body_is_preserved_with_crlf() {
    let content = "---\r\nbuild:\r\n  prompt: go\r\n---\r\nline one\r\nline two\r\n";
    let template = Template::parse(content).unwrap();

    assert_eq!(template.action("prd", "build").unwrap(), "go");
    assert_eq!(template.body, "line one\r\nline two\r\n");
}

#[test]
fn test_no_frontmatter_means_no_actions() {
    let content = "# Just a document\n\nNo header here.\n";
    let template = Template::parse(content).unwrap();

    assert!(template.actions.is_empty());
    assert_eq!(template.body, content);
}

#[test]
fn test_empty_frontmatter() {
    let template = Template::parse("---\n---\nbody\n").unwrap();

    assert!(template.actions.is_empty());
    assert_eq!(template.body, "body\n");
}

#[test]
fn test_body_may_be_empty() {
    let template = Template::parse("---\nbuild:\n  prompt: x\n---").unwrap();

    assert_eq!(template.action_names(), vec!["build"]);
    assert!(template.body.is_empty());
}

#[test]
fn test_horizontal_rule_in_body_is_kept() {
    let content = "---\nbuild:\n  prompt: x\n---\nabove\n---\nbelow\n";
    let template = Template::parse(content).unwrap();

    assert_eq!(template.body, "above\n---\nbelow\n");
}

#[test]
fn test_unterminated_frontmatter_is_an_error() {
    let err = Template::parse("---\nbuild:\n  prompt: x\n").unwrap_err();
    assert!(err.contains("closing '---'"));
}

#[test]
fn test_non_mapping_frontmatter_is_an_error() {
    assert!(Template::parse("---\n- build\n- run\n---\n").is_err());
}

#[test]
fn test_action_without_prompt_is_an_error() {
    assert!(Template::parse("---\nbuild:\n  description: x\n---\n").is_err());
}

#[test]
fn test_unknown_action_lists_available() {
    let template = Template::parse(PRD_TEMPLATE).unwrap();

    let err = template.action("prd", "deploy").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown action 'deploy' for stage 'prd'. Available actions: build, run"
    );
}

#[test]
fn test_unknown_action_without_header() {
    let template = Template::parse("plain body").unwrap();

    let err = template.action("prd", "build").unwrap_err();
    assert!(matches!(err, TempddError::UnknownAction { .. }));
    assert!(err.to_string().contains("(none)"));
}

#[test]
fn test_load_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("prd.md");
    std::fs::write(&path, PRD_TEMPLATE).unwrap();

    let template = Template::load(&path).unwrap();
    assert_eq!(template.action_names(), vec!["build", "run"]);
}

#[test]
fn test_load_missing_template() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.md");

    let err = Template::load(&path).unwrap_err();
    assert!(matches!(err, TempddError::TemplateNotFound(p) if p == path));
}

#[test]
fn test_load_malformed_template_names_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.md");
    std::fs::write(&path, "---\nbuild: [unclosed\n---\n").unwrap();

    let err = Template::load(&path).unwrap_err();
    assert!(matches!(err, TempddError::TemplateParse { .. }));
    assert!(err.to_string().contains("broken.md"));
}
