use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "spark")]
#[command(about = "Adds your idea to your list and pushes it to your git")]
#[command(long_about = "
Spark is a tool to input and store your ideas.

Spark enables you to quickly write your ideas without leaving the terminal.
Each addition is automatically committed and pushed to your git repository.
Your ideas are stored in a single markdown file (README.md by default) for
easy reading.

Run without a subcommand to add an idea.")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ~/.spark.yaml)
    #[arg(long, global = true, env = "SPARK_CONFIG", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands; running with none adds a new idea
#[derive(Subcommand)]
pub enum Commands {
    /// Configure the tool
    ///
    /// Asks again for every configuration option, offering the current
    /// values as defaults, and saves them.
    Config,

    /// Print the idea list through a pager
    ///
    /// Uses SPARK_PAGER, then PAGER, then `less`.
    View,
}
