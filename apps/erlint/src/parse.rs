//! Parser for `erlc` diagnostic lines.
//!
//! Recognized shape: `<file>:<line>:[<col>:] [Warning: ]<message>`. Anything
//! else (banners, blank lines, stack traces) is ignored.

use crate::models::{Diagnostic, Severity};
use regex::Regex;
use std::sync::LazyLock;

static DIAGNOSTIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<file>.+?):(?P<line>\d+):(?:(?P<column>\d+):)?\s+(?P<warning>Warning:\s+)?(?P<message>.+)$",
    )
    .expect("DIAGNOSTIC_RE regex should compile")
});

/// Parse one output line, or `None` if it is not a diagnostic.
pub fn parse_line(line: &str) -> Option<Diagnostic> {
    let caps = DIAGNOSTIC_RE.captures(line.trim_end_matches(['\r', '\n']))?;
    let line_no = caps["line"].parse::<u32>().ok()?;
    let column = caps
        .name("column")
        .and_then(|m| m.as_str().parse::<u32>().ok());
    let severity = if caps.name("warning").is_some() {
        Severity::Warning
    } else {
        Severity::Error
    };
    Some(Diagnostic {
        file: caps["file"].to_string(),
        line: line_no,
        column,
        severity,
        message: caps["message"].trim_end().to_string(),
    })
}

/// Lazily parse compiler output, preserving emission order.
pub fn parse_output(output: &str) -> impl Iterator<Item = Diagnostic> + '_ {
    output.lines().filter_map(parse_line)
}
