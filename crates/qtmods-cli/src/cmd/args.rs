//! Args command

use crate::Context;
use anyhow::{Context as _, Result};
use qtmods_core::ConfigureArgs;
use std::path::Path;

/// How the argument vector is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// A single shell-quoted line.
    Shell,
    /// One argument per line, unquoted.
    Lines,
    /// A JSON array.
    Json,
}

/// Print the configure arguments for the configured build
pub fn args(
    ctx: &Context,
    extra: &[String],
    source_root: Option<&Path>,
    prefix: Option<&Path>,
    format: Format,
) -> Result<()> {
    let mut options = ctx.config.options.clone();
    for module in extra {
        options.request_module(module.as_str());
    }

    let target = &ctx.config.target;
    let enabled = options
        .configure(target, &ctx.graph)
        .context("Failed to configure build options")?;

    let mut builder = ConfigureArgs::new(&options, target, &ctx.graph, &enabled);
    if let Some(root) = source_root.or(ctx.config.source_root.as_deref()) {
        builder = builder.source_root(root);
    }
    if let Some(prefix) = prefix.or(ctx.config.prefix.as_deref()) {
        builder = builder.prefix(prefix);
    }
    let argv = builder
        .build()
        .context("Failed to assemble configure arguments")?;

    match format {
        Format::Shell => println!("{}", shell_words::join(&argv)),
        Format::Lines => {
            for arg in &argv {
                println!("{arg}");
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&argv)?),
    }
    Ok(())
}
