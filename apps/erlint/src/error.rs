//! Error types for configuration and compiler invocation failures.
//!
//! Missing search directories and unparseable compiler lines are not errors;
//! they are skipped where they occur. Only the cases below reach the caller.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Compiler executable not found: {0} (install erlc or pass --erlc)")]
    ExecutableNotFound(PathBuf),

    #[error("Failed to start compiler {executable}: {source}")]
    Spawn {
        executable: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config file {path} is invalid: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
