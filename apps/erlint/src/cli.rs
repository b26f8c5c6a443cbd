//! CLI argument parsing via `clap`.

use crate::config::Overrides;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "erlint",
    version,
    about = "Lint Erlang sources with erlc",
    long_about = "Erlint — runs erlc on a single Erlang file with include and code paths discovered from the surrounding project, and reports its diagnostics.\n\nConfiguration precedence: CLI > erlint.toml > defaults.",
    after_help = "Examples:\n  erlint lint src/my_mod.erl\n  erlint lint src/my_mod.erl -D TEST --profile test --output json\n  erlint args src/my_mod.erl\n\nENVIRONMENT:\n  RUST_LOG=debug    Enable debug logging\n  NO_COLOR=1        Disable colored output",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current erlint version.")]
    Version,
    /// Compile a file with erlc and report diagnostics
    #[command(
        about = "Run erlc and report diagnostics",
        long_about = "Compile one Erlang file with erlc and print its warnings and errors. Exits 1 when any error is reported.",
        after_help = "Examples:\n  erlint lint src/my_mod.erl\n  erlint lint src/my_mod.erl --output json"
    )]
    Lint(LintArgs),
    /// Print the erlc command that lint would run
    #[command(
        about = "Print the assembled erlc command",
        long_about = "Resolve include and code paths for a file and print the erlc command line without running it.",
        after_help = "Examples:\n  erlint args src/my_mod.erl\n  erlint args src/my_mod.erl --output json"
    )]
    Args(LintArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LintArgs {
    #[arg(help = "Erlang source file to compile")]
    pub file: String,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, value_name = "PATH", help = "Path to the erlc executable")]
    pub erlc: Option<String>,
    #[arg(short = 'D', long = "define", value_name = "SYMBOL", help = "Preprocessor symbol to define (repeatable)")]
    pub define: Vec<String>,
    #[arg(short = 'I', long = "include", value_name = "DIR", help = "Extra include directory, passed verbatim (repeatable)")]
    pub include: Vec<String>,
    #[arg(long, value_name = "NAME", help = "Build profile used for _build/<profile>/lib (default: default)")]
    pub profile: Option<String>,
}

impl LintArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            executable: self.erlc.clone(),
            include_dirs: self.include.clone(),
            define_symbols: self.define.clone(),
            build_profile: self.profile.clone(),
            output: self.output.clone(),
        }
    }
}
