// crates/spark-cli/src/main.rs - CLI Application Entry Point
//
// Entry point for the spark CLI. Parsing, logging setup and dispatch live here;
// everything spark actually does lives in spark-core and commands/*.rs.
//
// ARCHITECTURE OVERVIEW:
// ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────────┐
// │   User Input    │───▶│   CLI Parser     │───▶│  Command Handlers   │
// │ (clap commands) │    │ (main function)  │    │ (commands/*.rs)     │
// └─────────────────┘    └──────────────────┘    └─────────────────────┘
//                                 │                        │
//                                 ▼                        ▼
//                        ┌──────────────────┐    ┌─────────────────────┐
//                        │     Context      │    │  spark-core         │
//                        │ (config, prompt) │    │  (repo, git, pager) │
//                        └──────────────────┘    └─────────────────────┘
//
// EXAMPLE USAGE:
// ```bash
// spark                 # add an idea, commit and push it
// spark config          # change the idea directory or file name
// spark view            # read the idea list in a pager
// spark -vv             # same as `spark`, with debug logs on stderr
// ```

use anyhow::Result;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli; // Command-line interface definitions
mod commands; // Command implementations
mod context; // Application context passed to every command
mod services; // Terminal services (pager)

use cli::{Cli, Commands};
use context::Context;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold().for_stderr());
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr: stdout carries prompts and git output
///
/// RUST_LOG takes precedence over the -v flags when it is set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build the context once and dispatch to exactly one command
fn run(cli: Cli) -> Result<()> {
    let mut ctx = Context::new(cli.config_file)?;

    match cli.command {
        None => commands::add::handle(&mut ctx),
        Some(Commands::Config) => commands::config::handle(&mut ctx),
        Some(Commands::View) => commands::view::handle(&mut ctx),
    }
}
