//! # Spark Core
//!
//! Library behind the `spark` command: capture an idea from the terminal,
//! append it to a markdown file, commit it and push it to git.
//!
//! ## Module Map
//!
//! - [`process`]: run external executables, typed failures
//! - [`prompt`]: one-line interactive questions
//! - [`config`]: the `~/.spark.yaml` store and first-run setup
//! - [`git`]: the git subcommands spark uses
//! - [`idea`]: idea entries and their markdown form
//! - [`repository`]: idea directory setup and appending
//! - [`publish`]: stage, commit, push, with one-time remote repair
//! - [`workflow`]: the whole add-an-idea run, end to end
//!
//! Nothing in this crate touches the real terminal or exits the process.
//! Terminal I/O and the process runner are injected. The two entry points,
//! [`resolve_settings`] and [`add_idea`], report every failure as a
//! [`SparkError`]; the building blocks underneath return their own module
//! errors.

pub mod config;
pub mod git;
pub mod idea;
pub mod process;
pub mod prompt;
pub mod publish;
pub mod repository;
pub mod workflow;

pub use config::{ConfigDefaults, ConfigStore, IdeaSettings, SparkConfig};
pub use git::GitRepository;
pub use idea::Idea;
pub use process::{CommandRunner, SystemRunner};
pub use prompt::{LinePrompt, Prompt};
pub use publish::{PublishReport, publish};
pub use repository::{IdeaRepository, SetupReport};
pub use workflow::{AddOutcome, Progress, add_idea};

use std::path::PathBuf;
use thiserror::Error;

/// Every way a spark run can fail
///
/// Only one failure is ever recovered from (a push with no remote, inside
/// [`publish`]); everything that reaches this type ends the run.
#[derive(Error, Debug)]
pub enum SparkError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Input(#[from] prompt::PromptError),

    #[error(transparent)]
    Repository(#[from] repository::RepositoryError),

    /// The idea is on disk but git could not commit or push it
    #[error("Idea saved to {} but not published", .idea_file.display())]
    Unpublished {
        idea_file: PathBuf,
        #[source]
        source: publish::PublishError,
    },
}

/// Result type for spark operations
pub type Result<T> = std::result::Result<T, SparkError>;

/// Load the configuration, fill missing fields interactively and persist them
///
/// This is first-run setup: on a fresh machine it asks for every field and
/// writes the file; once the file is complete it asks nothing and writes
/// nothing.
pub fn resolve_settings(
    store: &ConfigStore,
    defaults: &ConfigDefaults,
    prompt: &mut impl Prompt,
) -> Result<IdeaSettings> {
    let mut config = store.load()?;

    if config::ensure_complete(&mut config, defaults, prompt)? {
        store.save(&config)?;
        tracing::info!(path = %store.path().display(), "saved configuration");
    }

    Ok(config.settings()?)
}
