//! Errors raised while loading input files.

use qtmods_schema::ConfError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load `qtmodules.conf` or `qtmods.toml`.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// `qtmodules.conf` is malformed.
    #[error("{}: {source}", .path.display())]
    Conf {
        /// File that was being parsed.
        path: PathBuf,
        /// What was wrong with it.
        source: ConfError,
    },

    /// `qtmods.toml` is not valid TOML or does not match the schema.
    #[error("invalid configuration in {}: {source}", .path.display())]
    Toml {
        /// File that was being parsed.
        path: PathBuf,
        /// Parser error.
        source: toml::de::Error,
    },
}
