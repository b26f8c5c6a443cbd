//! Output rendering for lint results and assembled commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-diagnostic fields and a top-level summary.

use crate::invoke::CompilerInvocation;
use crate::models::{Diagnostic, LintResult, Severity};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Show `file` relative to `base` when it lives underneath it.
fn display_path(file: &str, base: Option<&Path>) -> String {
    let path = Path::new(file);
    match base.and_then(|b| pathdiff::diff_paths(path, b)) {
        Some(rel) if path.is_absolute() && !rel.starts_with("..") => {
            rel.to_string_lossy().to_string()
        }
        _ => file.to_string(),
    }
}

fn location(d: &Diagnostic, base: Option<&Path>) -> String {
    let file = display_path(&d.file, base);
    match d.column {
        Some(col) => format!("{}:{}:{}", file, d.line, col),
        None => format!("{}:{}", file, d.line),
    }
}

/// Render one diagnostic as a human-readable line.
pub fn format_diagnostic(d: &Diagnostic, color: bool, base: Option<&Path>) -> String {
    let (icon, sev) = match d.severity {
        Severity::Error => ("✖", "⟦error⟧"),
        Severity::Warning => ("▲", "⟦warn⟧"),
    };
    let loc = location(d, base);
    if !color {
        return format!("{} {} {} — {}", icon, sev, loc, d.message);
    }
    let (icon, sev) = match d.severity {
        Severity::Error => (icon.red().to_string(), sev.red().bold().to_string()),
        Severity::Warning => (icon.yellow().to_string(), sev.yellow().bold().to_string()),
    };
    format!("{} {} {} — {}", icon, sev, loc.bold(), d.message)
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str) {
    match output {
        "json" => println!("{}", to_pretty(&compose_lint_json(res))),
        _ => {
            let color = use_colors(output);
            let cwd = std::env::current_dir().ok();
            for d in &res.diagnostics {
                println!("{}", format_diagnostic(d, color, cwd.as_deref()));
            }
            let summary = format_summary(res);
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Summary line; a failing compiler exit with nothing parsed is reported
/// so it is not mistaken for a clean run.
pub fn format_summary(res: &LintResult) -> String {
    let mut summary = format!(
        "— Summary — errors={} warnings={}",
        res.summary.errors, res.summary.warnings
    );
    if res.compiler_failed() {
        match res.exit_code {
            Some(code) => summary.push_str(&format!(" (erlc exited with status {})", code)),
            None => summary.push_str(" (erlc terminated by signal)"),
        }
    }
    summary
}

/// Print the assembled compiler command.
pub fn print_args(inv: &CompilerInvocation, output: &str) {
    match output {
        "json" => println!("{}", to_pretty(&compose_args_json(inv))),
        _ => println!("{}", inv.to_shell_command()),
    }
}

fn to_pretty(v: &JsonVal) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

/// Compose lint JSON object (pure) for testing purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    json!({
        "diagnostics": res.diagnostics,
        "summary": res.summary,
        "exit_code": res.exit_code,
    })
}

/// Compose the JSON token array for an invocation.
pub fn compose_args_json(inv: &CompilerInvocation) -> JsonVal {
    json!(inv.tokens())
}
