//! Shared types for qtmods.
//!
//! This crate owns the data model of a framework split into submodules:
//! [`Module`] records, the immutable [`ModuleGraph`] built from them, and the
//! parser for the gitmodules-style `qtmodules.conf` file that declares them.

pub mod conf;
pub mod graph;
pub mod module;

// Re-exports
pub use conf::{ConfError, parse_graph};
pub use graph::{DanglingEdge, GraphError, ModuleGraph};
pub use module::{Module, ModuleName, ModuleStatus};

/// Identifier of the root module that is always built and never toggled.
pub const DEFAULT_BASE_MODULE: &str = "qtbase";
