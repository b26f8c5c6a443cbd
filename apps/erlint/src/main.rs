//! Erlint CLI binary entry point.
//! Delegates to the library for config, argument assembly, and compiler runs.

use clap::Parser;
use erlint::cli::{Cli, Commands, LintArgs};
use erlint::config::{self, Effective};
use erlint::error::Error;
use erlint::resolve::absolutize;
use erlint::{lint, output, utils};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    // Logs go to stderr; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint(args) => {
            let (source, eff) = prepare(&args);
            if eff.config_path.is_none() && eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No erlint.toml found; using defaults."
                );
            }
            let result = match lint::run_lint(&source, &eff) {
                Ok(r) => r,
                Err(e) => fail(&e),
            };
            output::print_lint(&result, &eff.output);
            if result.summary.errors > 0 || result.compiler_failed() {
                process::exit(1);
            }
        }
        Commands::Args(args) => {
            let (source, eff) = prepare(&args);
            let invocation = lint::build_invocation(&source, &eff);
            output::print_args(&invocation, &eff.output);
        }
    }
}

/// Absolutize the source path and resolve the effective configuration,
/// exiting with status 2 on configuration errors.
fn prepare(args: &LintArgs) -> (PathBuf, Effective) {
    let source = absolutize(Path::new(&args.file));
    if !source.is_file() {
        fail(&Error::SourceNotFound(source));
    }
    match config::resolve_effective(&source, &args.overrides()) {
        Ok(eff) => (source, eff),
        Err(e) => fail(&e),
    }
}

fn fail(e: &Error) -> ! {
    eprintln!("{} {}", utils::error_prefix(), e);
    process::exit(2);
}
