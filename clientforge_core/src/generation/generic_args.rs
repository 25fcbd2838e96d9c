use crate::dmmf::{DmmfHelper, InputType, TypeLocation, TypeRef};
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;
use std::collections::HashSet;
use tracing::debug;

/// Input types that take the `$PrismaModel` generic parameter.
///
/// A type needs it when one of its fields accepts a field reference, or
/// accepts an input type that needs it. Types owned by a model (`meta.source`)
/// never do: their references are filled with the model name instead.
/// Reference cycles between input types are common (`AND`/`OR`/`NOT`), so the
/// answer is computed once over the whole reference graph instead of
/// recursively per type.
#[derive(Debug, Clone, Default)]
pub struct GenericArgsInfo {
    needs_generic: HashSet<String>,
}

impl GenericArgsInfo {
    pub fn new(dmmf: &DmmfHelper) -> Self {
        // Edges run from a referenced type to the type referencing it.
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        let mut seeds = Vec::new();

        for input_type in dmmf.all_input_types() {
            if input_type.source().is_some() {
                continue;
            }
            let name = input_type.name.as_str();
            graph.add_node(name);
            for type_ref in input_type.fields.iter().flat_map(|f| &f.input_types) {
                match type_ref.location {
                    TypeLocation::FieldRefTypes => seeds.push(name),
                    TypeLocation::InputObjectTypes => {
                        let referenced = dmmf.input_type(type_ref.namespace(), &type_ref.type_name);
                        if referenced.is_some_and(|t| t.source().is_none()) {
                            graph.add_edge(type_ref.type_name.as_str(), name, ());
                        }
                    }
                    _ => {}
                }
            }
        }

        let mut needs_generic = HashSet::new();
        let mut dfs = Dfs::empty(&graph);
        for seed in seeds {
            dfs.move_to(seed);
            while let Some(node) = dfs.next(&graph) {
                needs_generic.insert(node.to_string());
            }
        }

        debug!(
            input_type_count = graph.node_count(),
            generic_count = needs_generic.len(),
            "Resolved input types needing the model generic"
        );
        Self { needs_generic }
    }

    pub fn type_needs_generic_model_arg(&self, input_type: &InputType) -> bool {
        self.needs_generic.contains(&input_type.name)
    }

    pub fn type_ref_needs_generic_model_arg(&self, type_ref: &TypeRef) -> bool {
        match type_ref.location {
            TypeLocation::FieldRefTypes => true,
            TypeLocation::InputObjectTypes => self.needs_generic.contains(&type_ref.type_name),
            _ => false,
        }
    }
}
