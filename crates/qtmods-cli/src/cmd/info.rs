//! Info command

use crate::Context;
use crate::cmd::list::join;
use anyhow::{Result, bail};
use crossterm::style::Stylize;
use qtmods_core::enable_transitively;
use qtmods_schema::ModuleName;

/// Show one submodule with its direct and transitive relations
pub fn info(ctx: &Context, name: &str) -> Result<()> {
    let Some(module) = ctx.graph.get(name) else {
        bail!("Module '{name}' not found in qtmodules.conf");
    };

    let required_by: Vec<ModuleName> = ctx
        .graph
        .iter()
        .filter(|m| m.depends.iter().any(|d| d == name))
        .map(|m| m.name.clone())
        .collect();

    let lw = 12;

    println!();
    println!(
        "  {} {}",
        module.name.as_str().white().bold(),
        module.status.as_str().dark_grey()
    );
    println!();
    println!("  {:<lw$}{}", "path", module.path.display());
    if ctx.graph.is_base(name) {
        println!("  {:<lw$}always built", "base");
    }
    if !module.depends.is_empty() {
        println!("  {:<lw$}{}", "requires", join(&module.depends));
    }
    if !module.recommends.is_empty() {
        println!("  {:<lw$}{}", "recommends", join(&module.recommends));
    }
    if !required_by.is_empty() {
        println!("  {:<lw$}{}", "needed by", join(&required_by));
    }

    if !ctx.graph.is_base(name) {
        let enabled = enable_transitively([name], &ctx.graph)?;
        let pulled: Vec<ModuleName> = enabled
            .iter()
            .filter(|m| m.as_str() != name)
            .cloned()
            .collect();
        if !pulled.is_empty() {
            println!("  {:<lw$}{}", "enables", join(&pulled));
        }
    }
    println!();

    Ok(())
}
