//! Import/export graph between generated modules.
//!
//! Modules are identified by their extension-less path relative to the
//! output directory (`client`, `models/User`, `internal/class`).

use super::extensions::ImportFileExtension;
use crate::error::{ClientforgeError, Result};
use crate::ts::SourceFile;
use petgraph::algo::{kosaraju_scc, toposort};
use petgraph::graphmap::DiGraphMap;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEdge {
    pub from: String,
    pub to: String,
    /// Erased at runtime (`import type`, `export type`).
    pub type_only: bool,
}

#[derive(Debug, Default)]
pub struct ModuleGraph {
    modules: BTreeSet<String>,
    edges: Vec<ModuleEdge>,
}

/// Resolves `specifier` against the directory of `from`. Returns `None` for
/// bare package specifiers and for paths escaping the output directory.
pub fn resolve_relative(from: &str, specifier: &str) -> Option<String> {
    if !specifier.starts_with("./") && !specifier.starts_with("../") {
        return None;
    }
    let mut segments: Vec<&str> = from.split('/').collect();
    segments.pop();
    for part in specifier.split('/') {
        match part {
            "." | "" => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

impl ModuleGraph {
    /// Builds the graph from every generated source file.
    ///
    /// Relative specifiers must point to one of `files`; package imports such
    /// as the runtime are not part of the graph.
    pub fn build<'a>(
        files: impl IntoIterator<Item = (&'a str, &'a SourceFile)>,
        import_extension: ImportFileExtension,
    ) -> Result<ModuleGraph> {
        let files: Vec<(&str, &SourceFile)> = files.into_iter().collect();
        let modules: BTreeSet<String> = files.iter().map(|(name, _)| name.to_string()).collect();
        let mut edges = Vec::new();

        for (from, file) in &files {
            for reference in file.references() {
                let is_relative = reference.specifier.starts_with("./")
                    || reference.specifier.starts_with("../");
                if !is_relative {
                    continue;
                }
                let target = resolve_relative(from, import_extension.strip(reference.specifier))
                    .filter(|target| modules.contains(target))
                    .ok_or_else(|| {
                        ClientforgeError::module_graph(format!(
                            "`{}` imports `{}`, which is not a generated module",
                            from, reference.specifier
                        ))
                    })?;
                trace!(from = %from, to = %target, type_only = reference.type_only, "Module edge");
                edges.push(ModuleEdge {
                    from: from.to_string(),
                    to: target,
                    type_only: reference.type_only,
                });
            }
        }

        debug!(
            module_count = modules.len(),
            edge_count = edges.len(),
            "Module graph built"
        );
        Ok(ModuleGraph { modules, edges })
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(String::as_str)
    }

    pub fn edges(&self) -> &[ModuleEdge] {
        &self.edges
    }

    fn graph(&self, include_type_edges: bool) -> DiGraphMap<&str, ()> {
        let mut graph = DiGraphMap::new();
        for module in &self.modules {
            graph.add_node(module.as_str());
        }
        for edge in &self.edges {
            if include_type_edges || !edge.type_only {
                graph.add_edge(edge.from.as_str(), edge.to.as_str(), ());
            }
        }
        graph
    }

    /// Value imports must not form cycles; type-only imports may.
    pub fn check_value_cycles(&self) -> Result<()> {
        let graph = self.graph(false);
        for component in kosaraju_scc(&graph) {
            let self_loop = component.len() == 1 && graph.contains_edge(component[0], component[0]);
            if component.len() > 1 || self_loop {
                let mut members: Vec<&str> = component.clone();
                members.sort_unstable();
                return Err(ClientforgeError::circular_dependency(format!(
                    "runtime imports between {}",
                    members.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Modules ordered so that dependencies precede their importers.
    /// Members of a type-only cycle are ordered by name.
    pub fn emission_order(&self) -> Result<Vec<String>> {
        let graph = self.graph(true);
        let sccs = kosaraju_scc(&graph);

        let mut component_of: HashMap<&str, usize> = HashMap::new();
        for (idx, component) in sccs.iter().enumerate() {
            for &module in component {
                component_of.insert(module, idx);
            }
        }

        let mut condensation: DiGraphMap<usize, ()> = DiGraphMap::new();
        for idx in 0..sccs.len() {
            condensation.add_node(idx);
        }
        for (from, to, _) in graph.all_edges() {
            let (from_c, to_c) = (component_of[from], component_of[to]);
            if from_c != to_c {
                condensation.add_edge(from_c, to_c, ());
            }
        }

        let sorted = toposort(&condensation, None).map_err(|cycle| {
            ClientforgeError::module_graph(format!(
                "condensed module graph has a cycle through {:?}",
                sccs[cycle.node_id()]
            ))
        })?;

        let mut order = Vec::with_capacity(self.modules.len());
        // Reverse topological order puts imported modules first.
        for idx in sorted.into_iter().rev() {
            let mut members: Vec<String> = sccs[idx].iter().map(|m| m.to_string()).collect();
            members.sort();
            order.extend(members);
        }
        Ok(order)
    }
}
