//! Submodule enablement.
//!
//! Given the modules a user asked for, compute every module that has to be
//! built with them: the requested set closed under the `depends` relation.
//! The base module is implicit in every build and never appears in the result.

use qtmods_schema::{Module, ModuleGraph, ModuleName};
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Errors raised while enabling modules.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EnableError {
    /// A requested module, or a dependency of one, is not in the graph.
    #[error("{}", describe_unknown(.missing, .referenced_by.as_ref()))]
    UnknownModule {
        /// The name that could not be found.
        missing: ModuleName,
        /// The module whose `depends` names it, or `None` if it was requested directly.
        referenced_by: Option<ModuleName>,
    },
}

fn describe_unknown(missing: &ModuleName, referenced_by: Option<&ModuleName>) -> String {
    match referenced_by {
        Some(parent) => format!("unknown module '{missing}' (dependency of '{parent}')"),
        None => format!("unknown module '{missing}' requested"),
    }
}

/// The set of modules that will be built, base module excluded.
///
/// Besides membership, the set remembers the order in which modules were
/// first enabled. Equality only considers membership.
#[derive(Debug, Clone, Default)]
pub struct EnablementSet {
    members: BTreeSet<ModuleName>,
    order: Vec<ModuleName>,
}

impl EnablementSet {
    fn insert(&mut self, name: &ModuleName) -> bool {
        if self.members.insert(name.clone()) {
            self.order.push(name.clone());
            true
        } else {
            false
        }
    }

    /// Whether `name` is enabled.
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    /// Number of enabled modules.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether nothing is enabled.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Enabled modules in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleName> {
        self.members.iter()
    }

    /// Enabled modules in the order the traversal enabled them.
    pub fn enable_order(&self) -> &[ModuleName] {
        &self.order
    }
}

impl PartialEq for EnablementSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for EnablementSet {}

impl<'a> IntoIterator for &'a EnablementSet {
    type Item = &'a ModuleName;
    type IntoIter = std::collections::btree_set::Iter<'a, ModuleName>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl Serialize for EnablementSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.members.iter())
    }
}

/// Enable `requested` and everything it transitively depends on.
///
/// # Errors
///
/// Returns [`EnableError::UnknownModule`] if a requested module or any
/// dependency reached from it is missing from `graph`.
pub fn enable_transitively<I, S>(
    requested: I,
    graph: &ModuleGraph,
) -> Result<EnablementSet, EnableError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    enable_transitively_with(requested, graph, |_| {})
}

/// Like [`enable_transitively`], calling `on_enable` once for every module
/// as it is enabled, in depth-first pre-order.
///
/// Revisiting an enabled module is a no-op, so shared dependencies are
/// reported once and cyclic graphs still terminate.
///
/// # Errors
///
/// Returns [`EnableError::UnknownModule`] if a requested module or any
/// dependency reached from it is missing from `graph`.
pub fn enable_transitively_with<I, S, F>(
    requested: I,
    graph: &ModuleGraph,
    mut on_enable: F,
) -> Result<EnablementSet, EnableError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&Module),
{
    let mut enabled = EnablementSet::default();
    let mut visited: HashSet<&ModuleName> = HashSet::new();

    for root in requested {
        let root = ModuleName::new(root.as_ref());
        let mut stack: Vec<(Option<&ModuleName>, &ModuleName)> = vec![(None, &root)];

        while let Some((parent, name)) = stack.pop() {
            if graph.is_base(name) || visited.contains(name) {
                continue;
            }

            let module = graph.get(name).ok_or_else(|| EnableError::UnknownModule {
                missing: name.clone(),
                referenced_by: parent.cloned(),
            })?;

            visited.insert(&module.name);
            enabled.insert(&module.name);
            debug!(module = %module.name, parent = ?parent.map(ModuleName::as_str), "enabled");
            on_enable(module);

            // Reversed so the first dependency is visited first.
            for dep in module.depends.iter().rev() {
                stack.push((Some(&module.name), dep));
            }
        }
    }

    Ok(enabled)
}
