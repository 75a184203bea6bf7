//! Core library for qtmods.
//!
//! - [`enabler`]: transitive closure of requested submodules.
//! - [`options`]: build options, their cascading rules and validation.
//! - [`configure`]: translation of options into `configure` arguments.
//! - [`config`] / [`source`]: loading `qtmods.toml` and `qtmodules.conf`.

pub mod config;
pub mod configure;
pub mod enabler;
pub mod error;
pub mod options;
pub mod paths;
pub mod source;
pub mod target;

pub use config::Config;
pub use configure::ConfigureArgs;
pub use enabler::{EnableError, EnablementSet, enable_transitively, enable_transitively_with};
pub use error::LoadError;
pub use options::{BuildOptions, OpenGl, OptionsError};
pub use target::{BuildType, Compiler, Os, Target};

pub use qtmods_schema as schema;
