//! Check command

use crate::Context;
use anyhow::{Result, bail};
use crossterm::style::Stylize;
use qtmods_schema::ModuleName;

/// Validate the module graph and the configured options
pub fn check(ctx: &Context) -> Result<()> {
    let graph = &ctx.graph;
    let mut problems = 0usize;

    println!();
    match &ctx.config_path {
        Some(path) => println!("  {:<8}{}", "config", path.display()),
        None => println!("  {:<8}{}", "config", "defaults".dark_grey()),
    }
    println!(
        "  {:<8}{} modules, base '{}'",
        "graph",
        graph.len(),
        graph.base()
    );
    println!();

    if !graph.contains(graph.base()) {
        println!(
            "  {} base module '{}' is not declared",
            "warn ".yellow(),
            graph.base()
        );
    }

    for edge in graph.dangling_edges() {
        problems += 1;
        println!(
            "  {} '{}' depends on unknown module '{}'",
            "error".red(),
            edge.module,
            edge.missing
        );
    }

    if let Some(cycle) = graph.find_cycle() {
        let path: Vec<&str> = cycle.iter().map(ModuleName::as_str).collect();
        println!(
            "  {} dependency cycle: {}",
            "warn ".yellow(),
            path.join(" -> ")
        );
    }

    let mut options = ctx.config.options.clone();
    match options.configure(&ctx.config.target, graph) {
        Ok(enabled) => println!(
            "  {} options valid, {} submodule(s) enabled",
            "ok   ".green(),
            enabled.len()
        ),
        Err(err) => {
            problems += 1;
            println!("  {} {err}", "error".red());
        }
    }
    println!();

    if problems > 0 {
        bail!("{problems} problem(s) found");
    }
    Ok(())
}
