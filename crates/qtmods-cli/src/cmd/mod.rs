//! Subcommand implementations.

pub mod args;
pub mod check;
pub mod completions;
pub mod info;
pub mod list;
pub mod resolve;
