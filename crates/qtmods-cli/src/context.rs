//! Shared command context.
//!
//! Every command needs the same two inputs: the project configuration and
//! the module graph it points at. [`Context::load`] resolves both once.

use crate::Cli;
use anyhow::{Context as _, Result};
use qtmods_core::source::load_graph;
use qtmods_core::Config;
use qtmods_schema::ModuleGraph;
use std::path::PathBuf;
use tracing::debug;

/// Configuration and module graph for one invocation.
#[derive(Debug)]
pub struct Context {
    /// Effective configuration.
    pub config: Config,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Parsed `qtmodules.conf`.
    pub graph: ModuleGraph,
}

impl Context {
    /// Load the configuration and module graph selected by the global flags.
    ///
    /// # Errors
    ///
    /// Fails if an explicitly named or discovered file cannot be loaded.
    pub async fn load(cli: &Cli) -> Result<Self> {
        let (config_path, mut config) = match &cli.config {
            Some(path) => (Some(path.clone()), Config::load(path).await?),
            None => {
                let cwd = std::env::current_dir().context("Failed to read working directory")?;
                match Config::discover(&cwd).await? {
                    Some((path, config)) => (Some(path), config),
                    None => (None, Config::default()),
                }
            }
        };

        if let Some(base) = &cli.base {
            config.base_module.clone_from(base);
        }
        if let Some(conf) = &cli.conf {
            config.modules_conf = Some(conf.clone());
        }

        let conf_path = config.modules_conf_path();
        debug!(config = ?config_path, conf = %conf_path.display(), "loading inputs");
        let graph = load_graph(&conf_path, &config.base_module).await?;

        Ok(Self {
            config,
            config_path,
            graph,
        })
    }

    /// Modules requested by the configuration plus `extra`.
    pub fn requested(&self, extra: &[String]) -> Vec<String> {
        let mut requested: Vec<String> = self
            .config
            .options
            .modules
            .iter()
            .map(ToString::to_string)
            .collect();
        for module in extra {
            if !requested.contains(module) {
                requested.push(module.clone());
            }
        }
        requested
    }
}
