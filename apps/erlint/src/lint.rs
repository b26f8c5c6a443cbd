//! Lint runner: assembles the `erlc` command for a source file, runs it,
//! and collects the parsed diagnostics into a `LintResult`.

use crate::args::build_args;
use crate::config::Effective;
use crate::error::Result;
use crate::invoke::{resolve_executable, CompilerInvocation};
use crate::models::{Diagnostic, LintResult, Summary};
use std::path::Path;
use tracing::debug;

/// Build the full compiler invocation for `source` without running it.
pub fn build_invocation(source: &Path, eff: &Effective) -> CompilerInvocation {
    let executable = resolve_executable(eff.executable.as_deref());
    let args = build_args(source, &eff.search);
    CompilerInvocation::new(executable, args, source.to_path_buf())
}

/// Lint one source file.
///
/// Diagnostics keep compiler emission order. A failing compiler exit is
/// recorded in `exit_code`; only spawn failures are returned as errors.
pub fn run_lint(source: &Path, eff: &Effective) -> Result<LintResult> {
    let invocation = build_invocation(source, eff);
    let output = invocation.run()?;
    let diagnostics: Vec<Diagnostic> = output.diagnostics().collect();
    let summary = Summary::from_diagnostics(&diagnostics);
    debug!(
        errors = summary.errors,
        warnings = summary.warnings,
        "parsed diagnostics"
    );
    Ok(LintResult {
        diagnostics,
        summary,
        exit_code: output.status.code(),
    })
}
