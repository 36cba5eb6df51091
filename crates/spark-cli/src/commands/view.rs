// crates/spark-cli/src/commands/view.rs - Page through the idea file

use anyhow::{Result, bail};
use spark_core::IdeaRepository;

use crate::context::Context;
use crate::services::PagerService;

/// Pipe the idea file into the configured pager
///
/// Read-only: runs first-run setup if the config is incomplete, but never
/// creates the idea directory or file.
pub fn handle(ctx: &mut Context) -> Result<()> {
    let settings = ctx.settings()?;
    let repo = IdeaRepository::new(&settings);

    if !repo.idea_file().exists() {
        bail!(
            "No idea file at {} yet\n\nRun `spark` to add your first idea.",
            repo.idea_file().display()
        );
    }

    let file = repo.open_for_reading()?;
    PagerService::page(file)
}
