use super::types::{
    DatamodelEnum, Document, FieldRefType, InputType, MODEL_NAMESPACE, Mappings, Model,
    ModelAction, ModelMapping, OutputType, PRISMA_NAMESPACE, SchemaEnum, SchemaField, TypeLocation,
    TypeRef,
};
use std::collections::HashMap;
use tracing::debug;

const ROOT_TYPES: [&str; 2] = ["Query", "Mutation"];
const NAMESPACES: [&str; 2] = [PRISMA_NAMESPACE, MODEL_NAMESPACE];

/// Read-only view over a [`Document`] with name-based indexes.
///
/// Indexes store positions into the document's vectors, so iteration order
/// always follows the document.
#[derive(Debug)]
pub struct DmmfHelper {
    document: Document,
    models: HashMap<String, usize>,
    composite_types: HashMap<String, usize>,
    datamodel_enums: HashMap<String, usize>,
    mappings: HashMap<String, usize>,
    input_types: HashMap<(String, String), usize>,
    input_types_by_name: HashMap<String, (String, usize)>,
    output_types: HashMap<(String, String), usize>,
    enum_types: HashMap<(String, String), usize>,
    root_fields: HashMap<String, (String, usize)>,
}

fn index_by<T>(items: &[T], name: impl Fn(&T) -> &str) -> HashMap<String, usize> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| (name(item).to_string(), idx))
        .collect()
}

impl DmmfHelper {
    pub fn new(document: Document) -> Self {
        let models = index_by(&document.datamodel.models, |m| &m.name);
        let composite_types = index_by(&document.datamodel.types, |m| &m.name);
        let datamodel_enums = index_by(&document.datamodel.enums, |e| &e.name);
        let mappings = index_by(&document.mappings.model_operations, |m| &m.model);

        let mut input_types = HashMap::new();
        let mut input_types_by_name = HashMap::new();
        for (namespace, types) in &document.schema.input_object_types {
            for (idx, input_type) in types.iter().enumerate() {
                input_types.insert((namespace.clone(), input_type.name.clone()), idx);
                input_types_by_name
                    .entry(input_type.name.clone())
                    .or_insert_with(|| (namespace.clone(), idx));
            }
        }

        let mut output_types = HashMap::new();
        for (namespace, types) in &document.schema.output_object_types {
            for (idx, output_type) in types.iter().enumerate() {
                output_types.insert((namespace.clone(), output_type.name.clone()), idx);
            }
        }

        let mut enum_types = HashMap::new();
        for (namespace, types) in &document.schema.enum_types {
            for (idx, enum_type) in types.iter().enumerate() {
                enum_types.insert((namespace.clone(), enum_type.name.clone()), idx);
            }
        }

        let mut root_fields = HashMap::new();
        if let Some(prisma_outputs) = document.schema.output_object_types.get(PRISMA_NAMESPACE) {
            for root in prisma_outputs
                .iter()
                .filter(|t| ROOT_TYPES.contains(&t.name.as_str()))
            {
                for (idx, field) in root.fields.iter().enumerate() {
                    root_fields.insert(field.name.clone(), (root.name.clone(), idx));
                }
            }
        }

        debug!(
            model_count = models.len(),
            input_type_count = input_types.len(),
            output_type_count = output_types.len(),
            root_field_count = root_fields.len(),
            "Indexed DMMF document"
        );

        Self {
            document,
            models,
            composite_types,
            datamodel_enums,
            mappings,
            input_types,
            input_types_by_name,
            output_types,
            enum_types,
            root_fields,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn models(&self) -> &[Model] {
        &self.document.datamodel.models
    }

    pub fn composite_types(&self) -> &[Model] {
        &self.document.datamodel.types
    }

    pub fn datamodel_enums(&self) -> &[DatamodelEnum] {
        &self.document.datamodel.enums
    }

    pub fn mappings(&self) -> &Mappings {
        &self.document.mappings
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models
            .get(name)
            .map(|&idx| &self.document.datamodel.models[idx])
    }

    pub fn composite_type(&self, name: &str) -> Option<&Model> {
        self.composite_types
            .get(name)
            .map(|&idx| &self.document.datamodel.types[idx])
    }

    /// A model or composite type by name.
    pub fn type_and_model(&self, name: &str) -> Option<&Model> {
        self.model(name).or_else(|| self.composite_type(name))
    }

    pub fn is_composite_type(&self, name: &str) -> bool {
        self.composite_types.contains_key(name)
    }

    pub fn datamodel_enum(&self, name: &str) -> Option<&DatamodelEnum> {
        self.datamodel_enums
            .get(name)
            .map(|&idx| &self.document.datamodel.enums[idx])
    }

    pub fn mapping(&self, model: &str) -> Option<&ModelMapping> {
        self.mappings
            .get(model)
            .map(|&idx| &self.document.mappings.model_operations[idx])
    }

    pub fn input_types(&self, namespace: &str) -> &[InputType] {
        self.document
            .schema
            .input_object_types
            .get(namespace)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Input types of every namespace, `prisma` first.
    pub fn all_input_types(&self) -> impl Iterator<Item = &InputType> {
        NAMESPACES
            .iter()
            .flat_map(move |namespace| self.input_types(namespace).iter())
    }

    pub fn input_type(&self, namespace: &str, name: &str) -> Option<&InputType> {
        self.input_types
            .get(&(namespace.to_string(), name.to_string()))
            .map(|&idx| &self.input_types(namespace)[idx])
    }

    /// Input type lookup that ignores namespaces.
    pub fn input_type_by_name(&self, name: &str) -> Option<&InputType> {
        self.input_types_by_name
            .get(name)
            .map(|(namespace, idx)| &self.input_types(namespace)[*idx])
    }

    pub fn output_types(&self, namespace: &str) -> &[OutputType] {
        self.document
            .schema
            .output_object_types
            .get(namespace)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn output_type(&self, namespace: &str, name: &str) -> Option<&OutputType> {
        self.output_types
            .get(&(namespace.to_string(), name.to_string()))
            .map(|&idx| &self.output_types(namespace)[idx])
    }

    /// Output type a reference points to, when it points to an object.
    pub fn resolve_output_object_type(&self, type_ref: &TypeRef) -> Option<&OutputType> {
        if type_ref.location != TypeLocation::OutputObjectTypes {
            return None;
        }
        self.output_type(type_ref.namespace(), &type_ref.type_name)
    }

    pub fn enum_types(&self, namespace: &str) -> &[SchemaEnum] {
        self.document
            .schema
            .enum_types
            .get(namespace)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_enum_in_namespace(&self, name: &str, namespace: &str) -> bool {
        self.enum_types
            .contains_key(&(namespace.to_string(), name.to_string()))
    }

    pub fn field_ref_types(&self, namespace: &str) -> &[FieldRefType] {
        self.document
            .schema
            .field_ref_types
            .get(namespace)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// A field of the `Query` or `Mutation` root types.
    pub fn root_field(&self, name: &str) -> Option<&SchemaField> {
        self.root_fields.get(name).and_then(|(root, idx)| {
            self.output_type(PRISMA_NAMESPACE, root)
                .map(|root_type| &root_type.fields[*idx])
        })
    }

    /// The root field backing `action` on `model`, when mapped.
    pub fn model_action_field(&self, model: &str, action: ModelAction) -> Option<&SchemaField> {
        self.mapping(model)
            .and_then(|mapping| mapping.field_for(action))
            .and_then(|field| self.root_field(field))
    }

    /// Whether the client exposes `action` for `model`. `count` rides on the
    /// aggregate root field when it has no mapping of its own.
    pub fn has_action(&self, model: &str, action: ModelAction) -> bool {
        let Some(mapping) = self.mapping(model) else {
            return false;
        };
        match action {
            ModelAction::Count => {
                mapping.count.is_some() || mapping.aggregate.is_some()
            }
            _ => mapping.field_for(action).is_some(),
        }
    }

    pub fn has_other_write_operation(&self, operation: &str) -> bool {
        self.document
            .mappings
            .other_operations
            .write
            .iter()
            .any(|op| op == operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dmmf::Document;

    fn blog() -> DmmfHelper {
        let json = include_str!("../../tests/fixtures/blog.dmmf.json");
        DmmfHelper::new(Document::from_json(json).unwrap())
    }

    #[test]
    fn test_lookups_by_name() {
        let helper = blog();
        assert_eq!(helper.models().len(), 2);
        assert!(helper.model("User").is_some());
        assert!(helper.model("Comment").is_none());
        assert!(helper.datamodel_enum("Role").is_some());
        assert!(helper.type_and_model("Post").is_some());
        assert!(!helper.is_composite_type("Post"));
    }

    #[test]
    fn test_input_type_lookup_across_namespaces() {
        let helper = blog();
        let unique = helper.input_type(PRISMA_NAMESPACE, "UserWhereUniqueInput").unwrap();
        assert_eq!(unique.grouping(), Some("User"));
        assert!(helper.input_type(MODEL_NAMESPACE, "UserWhereUniqueInput").is_none());
        assert!(helper.input_type_by_name("IntFilter").is_some());
        let first = helper.all_input_types().next().unwrap();
        assert_eq!(first.name, "UserWhereInput");
    }

    #[test]
    fn test_root_fields_resolve_through_mappings() {
        let helper = blog();
        let field = helper
            .model_action_field("User", ModelAction::FindMany)
            .unwrap();
        assert_eq!(field.name, "findManyUser");
        assert!(field.output_type.is_list);

        let create = helper.model_action_field("User", ModelAction::Create).unwrap();
        assert_eq!(create.name, "createOneUser");
        assert!(helper.model_action_field("Post", ModelAction::Upsert).is_none());
    }

    #[test]
    fn test_count_is_available_through_aggregate() {
        let helper = blog();
        assert!(helper.has_action("User", ModelAction::Count));
        assert!(!helper.has_action("Post", ModelAction::Count));
        assert!(!helper.has_action("Nope", ModelAction::FindMany));
    }

    #[test]
    fn test_resolve_output_object_type_ignores_scalars() {
        let helper = blog();
        let posts = helper
            .output_type(MODEL_NAMESPACE, "User")
            .and_then(|user| user.fields.iter().find(|f| f.name == "posts"))
            .unwrap();
        let resolved = helper.resolve_output_object_type(&posts.output_type).unwrap();
        assert_eq!(resolved.name, "Post");

        let id = &helper.output_type(MODEL_NAMESPACE, "User").unwrap().fields[0];
        assert!(helper.resolve_output_object_type(&id.output_type).is_none());
    }

    #[test]
    fn test_enums_and_other_operations() {
        let helper = blog();
        assert!(helper.has_enum_in_namespace("TransactionIsolationLevel", PRISMA_NAMESPACE));
        assert!(helper.has_enum_in_namespace("Role", MODEL_NAMESPACE));
        assert!(!helper.has_enum_in_namespace("Role", PRISMA_NAMESPACE));
        assert!(helper.has_other_write_operation("executeRaw"));
        assert!(!helper.has_other_write_operation("runCommandRaw"));
        assert_eq!(helper.field_ref_types(PRISMA_NAMESPACE).len(), 6);
    }
}
