//! The immutable submodule dependency graph.

use crate::module::{Module, ModuleName};
use serde::Serialize;
use std::collections::HashMap;

/// Errors raised while assembling a [`ModuleGraph`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// Two modules were declared with the same name.
    #[error("module '{0}' is declared more than once")]
    DuplicateModule(ModuleName),
}

/// A dependency edge whose target is not part of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingEdge {
    /// The module declaring the dependency.
    pub module: ModuleName,
    /// The dependency that could not be found.
    pub missing: ModuleName,
}

/// Mapping from module name to [`Module`], plus the identity of the base module.
///
/// Modules keep their declaration order, which downstream consumers (such as
/// configure argument generation) rely on for stable output. The graph is
/// built once and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleGraph {
    base: ModuleName,
    modules: Vec<Module>,
    #[serde(skip)]
    index: HashMap<ModuleName, usize>,
}

impl ModuleGraph {
    /// Build a graph from modules in declaration order.
    ///
    /// Dependency edges are not validated here; see [`Self::dangling_edges`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateModule`] if two modules share a name.
    pub fn from_modules<I>(base: impl Into<ModuleName>, modules: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = Module>,
    {
        let mut graph = Self {
            base: base.into(),
            modules: Vec::new(),
            index: HashMap::new(),
        };

        for module in modules {
            if graph.index.contains_key(&module.name) {
                return Err(GraphError::DuplicateModule(module.name));
            }
            graph.index.insert(module.name.clone(), graph.modules.len());
            graph.modules.push(module);
        }

        Ok(graph)
    }

    /// The base module: always built, never toggled.
    pub fn base(&self) -> &ModuleName {
        &self.base
    }

    /// Whether `name` identifies the base module.
    pub fn is_base(&self, name: &str) -> bool {
        self.base == name
    }

    /// Look up a module by name.
    pub fn get(&self, name: &str) -> Option<&Module> {
        self.index.get(name).map(|&i| &self.modules[i])
    }

    /// Whether a module with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All modules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    /// Every module except the base one, i.e. the modules that can be toggled.
    pub fn toggles(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter().filter(|m| !self.is_base(&m.name))
    }

    /// Number of modules in the graph.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the graph has no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Dependency edges pointing at modules absent from the graph.
    ///
    /// This typically happens when a module depends on one whose status is
    /// `obsolete` or `ignore`.
    pub fn dangling_edges(&self) -> Vec<DanglingEdge> {
        self.modules
            .iter()
            .flat_map(|m| {
                m.depends
                    .iter()
                    .filter(|d| !self.contains(d))
                    .map(|d| DanglingEdge {
                        module: m.name.clone(),
                        missing: d.clone(),
                    })
            })
            .collect()
    }

    /// Find a dependency cycle, if any.
    ///
    /// Returns the path of the first cycle found with its starting module
    /// repeated at the end (e.g. `a -> b -> a`). Dangling edges are ignored.
    pub fn find_cycle(&self) -> Option<Vec<ModuleName>> {
        let mut state = vec![Mark::Unvisited; self.modules.len()];
        let mut stack = Vec::new();

        for i in 0..self.modules.len() {
            if state[i] != Mark::Unvisited {
                continue;
            }
            if let Some(cycle) = self.cycle_from(i, &mut state, &mut stack) {
                return Some(cycle);
            }
        }
        None
    }

    fn cycle_from(
        &self,
        i: usize,
        state: &mut [Mark],
        stack: &mut Vec<usize>,
    ) -> Option<Vec<ModuleName>> {
        state[i] = Mark::InProgress;
        stack.push(i);

        for dep in &self.modules[i].depends {
            let Some(&j) = self.index.get(dep) else {
                continue;
            };
            match state[j] {
                Mark::InProgress => {
                    let start = stack.iter().position(|&k| k == j).unwrap_or(0);
                    let mut cycle: Vec<ModuleName> = stack[start..]
                        .iter()
                        .map(|&k| self.modules[k].name.clone())
                        .collect();
                    cycle.push(self.modules[j].name.clone());
                    return Some(cycle);
                }
                Mark::Unvisited => {
                    if let Some(cycle) = self.cycle_from(j, state, stack) {
                        return Some(cycle);
                    }
                }
                Mark::Done => {}
            }
        }

        stack.pop();
        state[i] = Mark::Done;
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleStatus;

    fn module(name: &str, deps: &[&str]) -> Module {
        Module::new(name, ModuleStatus::Addon, name).with_depends(deps.iter().copied())
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let err = ModuleGraph::from_modules("qtbase", vec![module("a", &[]), module("a", &[])])
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateModule("a".into()));
    }

    #[test]
    fn test_toggles_exclude_base_and_keep_order() {
        let graph = ModuleGraph::from_modules(
            "qtbase",
            vec![module("qtsvg", &["qtbase"]), module("qtbase", &[]), module("qtxml", &[])],
        )
        .unwrap();

        let toggles: Vec<&str> = graph.toggles().map(|m| m.name.as_str()).collect();
        assert_eq!(toggles, vec!["qtsvg", "qtxml"]);
        assert!(graph.is_base("qtbase"));
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_dangling_edges() {
        let graph = ModuleGraph::from_modules(
            "qtbase",
            vec![module("qtbase", &[]), module("qtquick3d", &["qtbase", "qtgone"])],
        )
        .unwrap();

        assert_eq!(
            graph.dangling_edges(),
            vec![DanglingEdge {
                module: "qtquick3d".into(),
                missing: "qtgone".into(),
            }]
        );
    }

    #[test]
    fn test_find_cycle() {
        let graph = ModuleGraph::from_modules(
            "qtbase",
            vec![module("a", &["b"]), module("b", &["c"]), module("c", &["a"])],
        )
        .unwrap();

        let cycle = graph.find_cycle().unwrap();
        assert_eq!(cycle, vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let graph = ModuleGraph::from_modules(
            "qtbase",
            vec![
                module("a", &["c"]),
                module("b", &["c"]),
                module("c", &[]),
                module("top", &["a", "b"]),
            ],
        )
        .unwrap();

        assert!(graph.find_cycle().is_none());
    }
}
