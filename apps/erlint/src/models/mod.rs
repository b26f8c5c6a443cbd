//! Shared data models for compiler diagnostics and lint output.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Diagnostic severity as reported by `erlc`.
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single compiler-reported issue.
pub struct Diagnostic {
    pub file: String,
    /// 1-based.
    pub line: u32,
    /// 1-based; only newer `erlc` releases report it.
    pub column: Option<u32>,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
/// Aggregated counts used by printers and the exit code.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
}

impl Summary {
    pub fn from_diagnostics(diags: &[Diagnostic]) -> Self {
        let errors = diags
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        Self {
            errors,
            warnings: diags.len() - errors,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// Lint results container.
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
    pub summary: Summary,
    /// Compiler exit code; `None` when killed by a signal.
    pub exit_code: Option<i32>,
}

impl LintResult {
    /// The compiler failed without printing any recognizable diagnostic,
    /// e.g. `m.erl:none: no such file or directory`.
    pub fn compiler_failed(&self) -> bool {
        self.diagnostics.is_empty() && self.exit_code != Some(0)
    }
}
