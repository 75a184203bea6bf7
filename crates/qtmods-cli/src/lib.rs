//! qtmods - submodule selection for Qt builds
//!
//! Reads the submodule declarations of a Qt source tree (`qtmodules.conf`),
//! works out which submodules a build needs, and prints the matching
//! `configure` arguments.
//!
//! # Inputs
//!
//! ```text
//! qtmods.toml       # optional project configuration (target + options)
//! qtmodules.conf    # submodule declarations, gitmodules format
//! ```

#![allow(clippy::missing_errors_doc)]

pub mod cmd;
pub mod context;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use context::Context;

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(name = "qtmods")]
#[command(author, version = env!("QTMODS_VERSION"), about = "qtmods - submodule selection for Qt builds")]
pub struct Cli {
    /// Path to qtmodules.conf (overrides the configuration file)
    #[arg(long, global = true, env = "QTMODS_CONF")]
    pub conf: Option<PathBuf>,

    /// Path to qtmods.toml (default: search upwards from the working directory)
    #[arg(long, global = true, env = "QTMODS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Name of the base module
    #[arg(long, global = true)]
    pub base: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the submodules declared in qtmodules.conf
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one submodule, what it needs and what needs it
    Info {
        /// Module name
        module: String,
    },
    /// Print the submodules enabled by a request, dependencies included
    Resolve {
        /// Modules to enable in addition to those in the configuration
        modules: Vec<String>,
        /// Print JSON instead of one module per line
        #[arg(long)]
        json: bool,
    },
    /// Print the configure arguments for the configured build
    Args {
        /// Modules to enable in addition to those in the configuration
        modules: Vec<String>,
        /// Framework source tree; -skip is only emitted for modules present there
        #[arg(long)]
        source_root: Option<PathBuf>,
        /// Installation prefix
        #[arg(long)]
        prefix: Option<PathBuf>,
        /// Print one argument per line
        #[arg(long, conflicts_with = "json")]
        lines: bool,
        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Validate qtmodules.conf and the configured options
    Check,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
