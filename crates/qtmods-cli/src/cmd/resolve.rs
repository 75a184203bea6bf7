//! Resolve command

use crate::Context;
use anyhow::{Context as _, Result};
use qtmods_core::enable_transitively;
use tracing::info;

/// Print the requested submodules closed under their dependencies
pub fn resolve(ctx: &Context, extra: &[String], json: bool) -> Result<()> {
    let requested = ctx.requested(extra);
    let enabled = enable_transitively(&requested, &ctx.graph)
        .context("Failed to resolve submodules")?;
    info!(
        requested = requested.len(),
        enabled = enabled.len(),
        "resolved submodules"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&enabled)?);
    } else {
        for module in &enabled {
            println!("{module}");
        }
    }
    Ok(())
}
