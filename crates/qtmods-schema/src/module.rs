//! Submodule records and their identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::path::PathBuf;

/// Identifier of a submodule (e.g. `qtsvg`).
///
/// Module names are case-sensitive and stored exactly as declared in
/// `qtmodules.conf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// Create a new module name.
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Return the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for ModuleName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ModuleName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModuleName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for ModuleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ModuleName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Maintenance status declared for a submodule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModuleStatus {
    /// Part of every build of the framework.
    Essential,
    /// Optional add-on module.
    Addon,
    /// Technology preview.
    Preview,
    /// Still shipped but scheduled for removal.
    Deprecated,
    /// No longer shipped; filtered out of the graph.
    Obsolete,
    /// Explicitly ignored; filtered out of the graph.
    Ignore,
    /// Any status this crate does not know about, kept verbatim.
    Other(String),
}

impl ModuleStatus {
    /// Parse a status string as written in `qtmodules.conf`.
    pub fn parse(s: &str) -> Self {
        match s {
            "essential" => Self::Essential,
            "addon" => Self::Addon,
            "preview" => Self::Preview,
            "deprecated" => Self::Deprecated,
            "obsolete" => Self::Obsolete,
            "ignore" => Self::Ignore,
            other => Self::Other(other.to_string()),
        }
    }

    /// String form as written in `qtmodules.conf`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Essential => "essential",
            Self::Addon => "addon",
            Self::Preview => "preview",
            Self::Deprecated => "deprecated",
            Self::Obsolete => "obsolete",
            Self::Ignore => "ignore",
            Self::Other(s) => s,
        }
    }

    /// Whether modules with this status are dropped before the graph is built.
    pub fn is_excluded(&self) -> bool {
        matches!(self, Self::Obsolete | Self::Ignore)
    }
}

impl std::fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ModuleStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ModuleStatus> for String {
    fn from(status: ModuleStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A single submodule declared in `qtmodules.conf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module identifier (the quoted part of the section header).
    pub name: ModuleName,

    /// Declared maintenance status.
    pub status: ModuleStatus,

    /// Source directory, relative to the framework source root.
    pub path: PathBuf,

    /// Modules this one requires, in declaration order.
    #[serde(default)]
    pub depends: Vec<ModuleName>,

    /// Modules this one recommends. Informational only.
    #[serde(default)]
    pub recommends: Vec<ModuleName>,
}

impl Module {
    /// Create a module with no dependencies.
    pub fn new(name: &str, status: ModuleStatus, path: impl Into<PathBuf>) -> Self {
        Self {
            name: ModuleName::new(name),
            status,
            path: path.into(),
            depends: Vec::new(),
            recommends: Vec::new(),
        }
    }

    /// Builder-style helper setting the dependency list.
    pub fn with_depends<I, S>(mut self, depends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ModuleName>,
    {
        self.depends = depends.into_iter().map(Into::into).collect();
        self
    }
}
