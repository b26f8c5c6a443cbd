//! Erlint core library.
//!
//! This crate exposes programmatic APIs for linting Erlang sources with the
//! external `erlc` compiler: it discovers include and code-path directories
//! around a source file, runs the compiler, and parses its diagnostics.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `resolve`: Upward file/directory lookup.
//! - `args`: Compiler argument assembly.
//! - `invoke`: Executable discovery and compiler invocation.
//! - `parse`: Diagnostic line parsing.
//! - `lint`: Ties the above together into a `LintResult`.
//! - `models`: Diagnostic and result data models.
//! - `output`: Human/JSON printers.
//! - `error`: Error types.
//! - `utils`: Supporting helpers.
pub mod args;
pub mod cli;
pub mod config;
pub mod error;
pub mod invoke;
pub mod lint;
pub mod models;
pub mod output;
pub mod parse;
pub mod resolve;
pub mod utils;
