use anyhow::{Context as AnyhowContext, Result};
use std::io::{self, StdinLock, Stdout};
use std::path::PathBuf;

use spark_core::config::{self, ConfigDefaults, ConfigStore, IdeaSettings};
use spark_core::{LinePrompt, SystemRunner};

/// Prompt reading from the locked terminal stdin
pub type TerminalPrompt = LinePrompt<StdinLock<'static>, Stdout>;

/// Application context that gets passed to command handlers
///
/// Built once in `main` and handed to exactly one command. It replaces any
/// process-wide settings object: the config store, the defaults derived from
/// the home directory, the git runner and the one shared prompt all travel
/// through here.
pub struct Context {
    pub store: ConfigStore,
    pub defaults: ConfigDefaults,
    pub runner: SystemRunner,
    pub prompt: TerminalPrompt,
}

impl Context {
    /// Resolve the home directory and the config file location
    ///
    /// Fails before anything is read or written when there is no home
    /// directory.
    pub fn new(config_file: Option<PathBuf>) -> Result<Self> {
        let home = config::home_dir()?;
        let store = config_file
            .map(ConfigStore::new)
            .unwrap_or_else(|| ConfigStore::for_home(&home));

        Ok(Self {
            store,
            defaults: ConfigDefaults::for_home(&home),
            runner: SystemRunner,
            prompt: LinePrompt::new(io::stdin().lock(), io::stdout()),
        })
    }

    /// Settings for this run, running first-run setup if needed
    pub fn settings(&mut self) -> Result<IdeaSettings> {
        spark_core::resolve_settings(&self.store, &self.defaults, &mut self.prompt)
            .with_context(|| {
                format!(
                    "Failed to set up configuration at {}",
                    self.store.path().display()
                )
            })
    }
}
