//! Frontmatter splitting and header parsing.

use super::ActionSpec;
use std::collections::BTreeMap;

const DELIMITER: &str = "---";

/// Split `content` into its header text and the byte offset where the body
/// starts.
///
/// Returns `Ok(None)` when the first line is not `---`. Both LF and CRLF line
/// endings are accepted; the offset points into the original content so the
/// body keeps its line endings.
pub(super) fn split_frontmatter(content: &str) -> Result<Option<(&str, usize)>, String> {
    let mut lines = LineOffsets::new(content);

    match lines.next() {
        Some((_, _, line)) if line == DELIMITER => {}
        _ => return Ok(None),
    }

    let header_start = lines.offset();
    for (start, end, line) in lines {
        if line == DELIMITER {
            return Ok(Some((&content[header_start..start], end)));
        }
    }

    Err("frontmatter is missing its closing '---' line".to_string())
}

/// Parse the header YAML into actions.
///
/// An empty header yields no actions. Anything other than a mapping of
/// action name to `{ prompt: text }` is an error.
pub(super) fn parse_actions(header: &str) -> Result<BTreeMap<String, ActionSpec>, String> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(header).map_err(|e| format!("invalid frontmatter YAML: {}", e))?;

    if value.is_null() {
        return Ok(BTreeMap::new());
    }
    if !value.is_mapping() {
        return Err("frontmatter must be a mapping of action names to { prompt: ... }".to_string());
    }

    serde_yaml::from_value(value).map_err(|e| format!("invalid action definition: {}", e))
}

/// Iterator over lines yielding `(start, end, text)`, where `end` is the
/// offset just past the line terminator and `text` excludes it.
struct LineOffsets<'a> {
    content: &'a str,
    pos: usize,
}

impl<'a> LineOffsets<'a> {
    fn new(content: &'a str) -> Self {
        Self { content, pos: 0 }
    }

    fn offset(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for LineOffsets<'a> {
    type Item = (usize, usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.content.len() {
            return None;
        }

        let start = self.pos;
        let rest = &self.content[start..];
        let (line, end) = match rest.find('\n') {
            Some(i) => (&rest[..i], start + i + 1),
            None => (rest, self.content.len()),
        };
        self.pos = end;

        Some((start, end, line.strip_suffix('\r').unwrap_or(line)))
    }
}
