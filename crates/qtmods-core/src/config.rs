//! Project configuration parsed from `qtmods.toml`.
//!
//! ```toml
//! modules_conf = "qt5/qtmodules.conf"
//! source_root = "qt5"
//!
//! [target]
//! os = "Linux"
//! compiler = "gcc"
//! compiler_version = "9"
//!
//! [options]
//! shared = true
//! widgets = false
//! gui = false
//! modules = ["qtsvg", "qtdeclarative"]
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use crate::error::LoadError;
use crate::options::BuildOptions;
use crate::paths::{CONFIG_FILE_NAME, MODULES_CONF_NAME, global_config_path};
use crate::target::Target;
use qtmods_schema::DEFAULT_BASE_MODULE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Name of the base module.
    pub base_module: String,
    /// Location of `qtmodules.conf`.
    pub modules_conf: Option<PathBuf>,
    /// Framework source tree, used to decide which modules need `-skip`.
    pub source_root: Option<PathBuf>,
    /// Installation prefix passed to `configure`.
    pub prefix: Option<PathBuf>,
    /// Platform being built for.
    pub target: Target,
    /// Build options, including requested submodules.
    pub options: BuildOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_module: DEFAULT_BASE_MODULE.to_string(),
            modules_conf: None,
            source_root: None,
            prefix: None,
            target: Target::default(),
            options: BuildOptions::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text without resolving paths.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is invalid or has unknown keys.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a configuration file, resolving its relative paths.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read and
    /// [`LoadError::Toml`] if it does not parse.
    pub async fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::from_toml(&content).map_err(|source| LoadError::Toml {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Find and load the configuration that applies to `start`.
    ///
    /// Looks for `qtmods.toml` in `start` and its ancestors, then falls back
    /// to the user-wide `config.toml`. Returns `None` if neither exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be loaded.
    pub async fn discover(start: &Path) -> Result<Option<(PathBuf, Self)>, LoadError> {
        let project = start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file());

        let Some(path) = project.or_else(|| global_config_path().filter(|p| p.is_file())) else {
            return Ok(None);
        };

        let config = Self::load(&path).await?;
        Ok(Some((path, config)))
    }

    /// Path of `qtmodules.conf`, defaulting to the working directory.
    pub fn modules_conf_path(&self) -> PathBuf {
        self.modules_conf
            .clone()
            .unwrap_or_else(|| PathBuf::from(MODULES_CONF_NAME))
    }

    fn resolve_paths(&mut self, dir: &Path) {
        for path in [&mut self.modules_conf, &mut self.source_root, &mut self.prefix]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OpenGl;
    use crate::target::{Compiler, Os};
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
modules_conf = "qt5/qtmodules.conf"
source_root = "qt5"
prefix = "/opt/qt"

[target]
os = "Linux"
compiler = "gcc"
compiler_version = "9"
libcxx = "libstdc++11"

[options]
GUI = false
widgets = false
opengl = "no"
modules = ["qtsvg", "qtdeclarative"]
"#;

    #[test]
    fn test_parse_sample() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert_eq!(config.base_module, "qtbase");
        assert_eq!(config.target.os, Os::Linux);
        assert_eq!(config.target.compiler, Compiler::Gcc);
        assert_eq!(
            config.target.compiler_version,
            Some(semver::Version::new(9, 0, 0))
        );
        assert!(!config.options.gui);
        assert_eq!(config.options.opengl, OpenGl::No);
        assert!(config.options.module_enabled("qtsvg"));
        assert!(config.options.shared, "unspecified options keep defaults");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::from_toml("[options]\nwith_cheese = true\n").is_err());
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
        assert_eq!(
            Config::default().modules_conf_path(),
            PathBuf::from("qtmodules.conf")
        );
    }

    #[tokio::test]
    async fn test_load_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qtmods.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::load(&path).await.unwrap();
        assert_eq!(
            config.modules_conf_path(),
            dir.path().join("qt5/qtmodules.conf")
        );
        assert_eq!(config.source_root, Some(dir.path().join("qt5")));
        assert_eq!(config.prefix, Some(PathBuf::from("/opt/qt")));
    }

    #[tokio::test]
    async fn test_discover_walks_up() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("qtmods.toml"), "[options]\nshared = false\n").unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let (found, config) = Config::discover(&nested).await.unwrap().unwrap();
        assert_eq!(found, dir.path().join("qtmods.toml"));
        assert!(!config.options.shared);
    }

    #[tokio::test]
    async fn test_invalid_toml_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qtmods.toml");
        std::fs::write(&path, "[options\n").unwrap();

        let err = Config::load(&path).await.unwrap_err();
        assert!(matches!(err, LoadError::Toml { .. }));
    }
}
