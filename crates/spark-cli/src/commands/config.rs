// crates/spark-cli/src/commands/config.rs - Reconfigure the tool
//
// Unlike first-run setup this asks for EVERY field, even ones already set.
// The current value is shown as the default, so pressing enter keeps it.

use anyhow::{Context as AnyhowContext, Result};
use console::style;
use spark_core::config;

use crate::context::Context;

pub fn handle(ctx: &mut Context) -> Result<()> {
    let mut current = ctx.store.load()?;

    config::reconfigure(&mut current, &ctx.defaults, &mut ctx.prompt)?;

    ctx.store.save(&current).with_context(|| {
        format!(
            "Failed to save configuration to {}",
            ctx.store.path().display()
        )
    })?;

    println!(
        "{} Saved configuration to {}",
        style("✅").green(),
        ctx.store.path().display()
    );
    Ok(())
}
