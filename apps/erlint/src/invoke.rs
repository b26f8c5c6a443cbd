//! Compiler discovery and invocation.
//!
//! One request spawns one `erlc` process and blocks until it exits. A
//! non-zero exit is the normal way `erlc` reports diagnostics and is not
//! treated as a failure; only a missing or unstartable executable is.

use crate::error::{Error, Result};
use crate::models::Diagnostic;
use crate::parse::parse_output;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

pub const EXECUTABLE_NAME: &str = "erlc";

/// Known install locations, probed in order.
pub const KNOWN_LOCATIONS: &[&str] = &[
    "/usr/local/bin/erlc",
    "/opt/local/bin/erlc",
    "/opt/homebrew/bin/erlc",
    "/usr/bin/erlc",
];

/// Pick the compiler executable.
///
/// A configured path wins verbatim. Otherwise the first existing entry of
/// [`KNOWN_LOCATIONS`] is used, falling back to the bare name so `PATH`
/// lookup happens at spawn time.
pub fn resolve_executable(configured: Option<&str>) -> PathBuf {
    resolve_executable_from(configured, KNOWN_LOCATIONS)
}

fn resolve_executable_from(configured: Option<&str>, candidates: &[&str]) -> PathBuf {
    if let Some(exe) = configured.filter(|s| !s.trim().is_empty()) {
        debug!(executable = exe, "using configured compiler");
        return PathBuf::from(exe);
    }
    for cand in candidates {
        let p = Path::new(cand);
        if p.is_file() {
            debug!(executable = %p.display(), "found compiler at known location");
            return p.to_path_buf();
        }
    }
    debug!("no compiler at known locations; relying on PATH");
    PathBuf::from(EXECUTABLE_NAME)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A fully assembled compiler command line. Immutable once built.
pub struct CompilerInvocation {
    pub executable: PathBuf,
    /// Flags and directories, without the source file.
    pub args: Vec<String>,
    pub source: PathBuf,
}

impl CompilerInvocation {
    pub fn new(executable: PathBuf, args: Vec<String>, source: PathBuf) -> Self {
        Self {
            executable,
            args,
            source,
        }
    }

    /// Every token in spawn order, executable first.
    pub fn tokens(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.args.len() + 2);
        out.push(self.executable.to_string_lossy().to_string());
        out.extend(self.args.iter().cloned());
        out.push(self.source.to_string_lossy().to_string());
        out
    }

    pub fn to_shell_command(&self) -> String {
        self.tokens()
            .iter()
            .map(|t| shell_quote(t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Spawn the compiler and capture its output.
    pub fn run(&self) -> Result<CompileOutput> {
        info!(command = %self.to_shell_command(), "running compiler");
        let output = Command::new(&self.executable)
            .args(&self.args)
            .arg(&self.source)
            .output()
            .map_err(|e| spawn_error(&self.executable, e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(stderr = %stderr.trim_end(), "compiler stderr");
        }
        debug!(status = %output.status, "compiler exited");
        Ok(CompileOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            status: output.status,
        })
    }
}

fn spawn_error(executable: &Path, e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::NotFound {
        Error::ExecutableNotFound(executable.to_path_buf())
    } else {
        Error::Spawn {
            executable: executable.to_path_buf(),
            source: e,
        }
    }
}

fn shell_quote(token: &str) -> String {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_+./=:@,".contains(c));
    if plain {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

/// Captured result of one compiler run.
#[derive(Debug)]
pub struct CompileOutput {
    pub stdout: String,
    pub status: ExitStatus,
}

impl CompileOutput {
    /// Diagnostics in the order the compiler emitted them.
    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic> + '_ {
        parse_output(&self.stdout)
    }
}

/// Run `executable args... source` and return its captured output.
pub fn run(executable: &Path, args: &[String], source: &Path) -> Result<CompileOutput> {
    CompilerInvocation::new(executable.to_path_buf(), args.to_vec(), source.to_path_buf()).run()
}
