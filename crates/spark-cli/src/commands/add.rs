// crates/spark-cli/src/commands/add.rs - Add an Idea (default command)
//
// WORKFLOW:
// 1. Settings: load ~/.spark.yaml, ask for anything missing, save
// 2. Storage: make sure the idea directory, its git repo and the idea file exist
// 3. Capture: ask for title and description, append them to the idea file
// 4. Publish: git add, commit (title as message), push
//
// Steps 2-4 are spark_core::add_idea; this handler only renders its progress.
// Git output is printed as each step finishes, so a failed push still shows
// what the commit did.

use anyhow::Result;
use console::style;
use spark_core::{Progress, add_idea};

use crate::context::Context;

pub fn handle(ctx: &mut Context) -> Result<()> {
    let settings = ctx.settings()?;

    let outcome = add_idea(&settings, &ctx.runner, &mut ctx.prompt, &mut |progress| {
        match progress {
            Progress::GitOutput(output) => print!("{output}"),
            Progress::IdeaFileCreated(path) => {
                println!("{} Created idea file: {}", style("📁").dim(), path.display())
            }
        }
    })?;

    if let Some(url) = &outcome.published.remote_added {
        println!("{} Added remote origin: {url}", style("🔗").dim());
    }
    println!("{} Idea published", style("✅").green());

    Ok(())
}
