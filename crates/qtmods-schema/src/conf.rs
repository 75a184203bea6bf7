//! Parser for `qtmodules.conf`.
//!
//! The file uses the git-config layout of `.gitmodules`:
//!
//! ```text
//! [submodule "qtsvg"]
//!     depends = qtbase
//!     path = qtsvg
//!     status = addon
//! ```
//!
//! Keys are case-insensitive, `=` and `:` both separate a key from its value,
//! and a line indented deeper than its key continues the previous value,
//! even across blank lines.
//! Whole-line comments start with `#` or `;`.

use crate::graph::{GraphError, ModuleGraph};
use crate::module::{Module, ModuleName, ModuleStatus};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<header>.+)\]\s*$").expect("valid section regex"));

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<key>[^=:\s][^=:]*?)\s*[=:]\s*(?P<value>.*)$").expect("valid entry regex")
});

const SECTION_PREFIX: &str = "submodule ";

/// Errors produced while parsing `qtmodules.conf`.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfError {
    /// The file contains no `[submodule "..."]` sections at all.
    #[error("no submodule sections found")]
    NoSections,

    /// A section header is not of the form `submodule "NAME"`.
    #[error("line {line}: section '{header}' is not of the form submodule \"NAME\"")]
    BadSectionName {
        /// 1-based line number of the header.
        line: usize,
        /// The text between the brackets.
        header: String,
    },

    /// The same section header appears twice.
    #[error("line {line}: duplicate section '{header}'")]
    DuplicateSection {
        /// 1-based line number of the second occurrence.
        line: usize,
        /// The duplicated header text.
        header: String,
    },

    /// The same key appears twice in one section.
    #[error("line {line}: duplicate key '{key}' in submodule '{module}'")]
    DuplicateKey {
        /// 1-based line number of the second occurrence.
        line: usize,
        /// Module whose section contains the duplicate.
        module: String,
        /// The duplicated key.
        key: String,
    },

    /// A section lacks a mandatory key.
    #[error("submodule '{module}' has no '{key}' entry")]
    MissingKey {
        /// Module whose section is incomplete.
        module: String,
        /// The missing key.
        key: &'static str,
    },

    /// A line could not be understood.
    #[error("line {line}: {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// The parsed modules do not form a valid graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[derive(Debug)]
struct Section {
    module: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn require(&self, key: &'static str) -> Result<&str, ConfError> {
        self.get(key).ok_or_else(|| ConfError::MissingKey {
            module: self.module.clone(),
            key,
        })
    }

    fn list(&self, key: &str) -> Vec<ModuleName> {
        self.get(key)
            .map(|v| v.split_whitespace().map(ModuleName::new).collect())
            .unwrap_or_default()
    }
}

/// Parse `qtmodules.conf` text into a [`ModuleGraph`].
///
/// Modules whose status is `obsolete` or `ignore` are dropped. Dependency
/// edges are kept as declared, even when they point at a dropped module.
///
/// # Errors
///
/// Returns a [`ConfError`] if the text is malformed, declares no sections, or
/// a section lacks its `status` or `path` entry.
pub fn parse_graph(input: &str, base: &str) -> Result<ModuleGraph, ConfError> {
    let sections = parse_sections(input)?;
    if sections.is_empty() {
        return Err(ConfError::NoSections);
    }

    let mut modules = Vec::with_capacity(sections.len());
    for section in &sections {
        let status = ModuleStatus::parse(section.require("status")?);
        if status.is_excluded() {
            continue;
        }
        let path = PathBuf::from(section.require("path")?);
        modules.push(Module {
            name: ModuleName::new(&section.module),
            status,
            path,
            depends: section.list("depends"),
            recommends: section.list("recommends"),
        });
    }

    Ok(ModuleGraph::from_modules(base, modules)?)
}

fn parse_sections(input: &str) -> Result<Vec<Section>, ConfError> {
    let mut sections: Vec<Section> = Vec::new();
    let mut headers: Vec<String> = Vec::new();
    // Indentation of the key that an indented line would continue.
    let mut open_key: Option<usize> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let indent = raw.len() - raw.trim_start().len();

        if open_key.is_some_and(|key_indent| indent > key_indent) {
            if let Some((_, value)) = sections.last_mut().and_then(|s| s.entries.last_mut()) {
                if !value.is_empty() {
                    value.push('\n');
                }
                value.push_str(trimmed);
            }
            continue;
        }

        if let Some(caps) = SECTION_RE.captures(trimmed) {
            let header = caps["header"].to_string();
            if headers.contains(&header) {
                return Err(ConfError::DuplicateSection { line, header });
            }
            let module = module_name(&header).ok_or_else(|| ConfError::BadSectionName {
                line,
                header: header.clone(),
            })?;
            headers.push(header);
            sections.push(Section {
                module,
                entries: Vec::new(),
            });
            open_key = None;
            continue;
        }

        let Some(section) = sections.last_mut() else {
            return Err(ConfError::Syntax {
                line,
                message: "entry appears before any section header".to_string(),
            });
        };

        let Some(caps) = ENTRY_RE.captures(trimmed) else {
            return Err(ConfError::Syntax {
                line,
                message: format!("expected 'key = value', found '{trimmed}'"),
            });
        };

        let key = caps["key"].to_lowercase();
        if section.entries.iter().any(|(k, _)| *k == key) {
            return Err(ConfError::DuplicateKey {
                line,
                module: section.module.clone(),
                key,
            });
        }
        section.entries.push((key, caps["value"].trim().to_string()));
        open_key = Some(indent);
    }

    Ok(sections)
}

/// Extract `NAME` from a `submodule "NAME"` header.
fn module_name(header: &str) -> Option<String> {
    if !header.starts_with(SECTION_PREFIX) || header.matches('"').count() != 2 {
        return None;
    }
    let start = header.find('"')? + 1;
    let end = header.rfind('"')?;
    Some(header[start..end].to_string())
}
