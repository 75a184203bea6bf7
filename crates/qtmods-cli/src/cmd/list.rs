//! List command

use crate::Context;
use anyhow::{Context as _, Result};
use comfy_table::{Table, presets::UTF8_HORIZONTAL_ONLY};
use qtmods_schema::{Module, ModuleName};

/// List every submodule in declaration order
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let modules: Vec<&Module> = ctx.graph.iter().collect();

    if json {
        let out = serde_json::to_string_pretty(&modules).context("Failed to serialize modules")?;
        println!("{out}");
        return Ok(());
    }

    if modules.is_empty() {
        println!("  No submodules declared.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_HORIZONTAL_ONLY)
        .set_header(vec!["module", "status", "path", "depends"]);

    for module in modules {
        let name = if ctx.graph.is_base(&module.name) {
            format!("{} (base)", module.name)
        } else {
            module.name.to_string()
        };
        table.add_row(vec![
            name,
            module.status.to_string(),
            module.path.display().to_string(),
            join(&module.depends),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub(crate) fn join(names: &[ModuleName]) -> String {
    names
        .iter()
        .map(ModuleName::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
