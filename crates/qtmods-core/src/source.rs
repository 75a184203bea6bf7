//! Loading the module graph from disk.

use crate::error::LoadError;
use qtmods_schema::{ModuleGraph, ModuleName, parse_graph};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Read and parse `qtmodules.conf` at `path`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read and
/// [`LoadError::Conf`] if it is malformed.
pub async fn load_graph(path: &Path, base: &str) -> Result<ModuleGraph, LoadError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let graph = parse_graph(&content, base).map_err(|source| LoadError::Conf {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), modules = graph.len(), "loaded module graph");
    if let Some(cycle) = graph.find_cycle() {
        let path: Vec<&str> = cycle.iter().map(ModuleName::as_str).collect();
        warn!(cycle = %path.join(" -> "), "module graph contains a dependency cycle");
    }

    Ok(graph)
}
