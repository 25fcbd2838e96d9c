//! Serde model of the DMMF JSON document.
//!
//! Only the shape is modelled here; lookups live in [`super::DmmfHelper`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub datamodel: Datamodel,
    pub schema: Schema,
    pub mappings: Mappings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Datamodel {
    #[serde(default)]
    pub models: Vec<Model>,
    #[serde(default)]
    pub enums: Vec<DatamodelEnum>,
    /// Composite types
    #[serde(default)]
    pub types: Vec<Model>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    pub fields: Vec<Field>,
    #[serde(default)]
    pub primary_key: Option<PrimaryKey>,
    #[serde(default)]
    pub unique_fields: Vec<Vec<String>>,
    #[serde(default)]
    pub unique_indexes: Vec<UniqueIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_generated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKey {
    pub name: Option<String>,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueIndex {
    pub name: Option<String>,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Scalar,
    Object,
    Enum,
    Unsupported,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
    pub kind: FieldKind,
    pub is_list: bool,
    pub is_required: bool,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub is_id: bool,
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default)]
    pub has_default_value: bool,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub native_type: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_from_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_to_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_on_delete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_generated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_updated_at: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl Field {
    pub fn is_relation(&self) -> bool {
        self.kind == FieldKind::Object
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatamodelEnum {
    pub name: String,
    pub values: Vec<EnumValue>,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
}

/// Namespace keyed collections (`prisma` and `model`).
pub type Namespaced<T> = HashMap<String, Vec<T>>;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub input_object_types: Namespaced<InputType>,
    #[serde(default)]
    pub output_object_types: Namespaced<OutputType>,
    #[serde(default)]
    pub enum_types: Namespaced<SchemaEnum>,
    #[serde(default)]
    pub field_ref_types: Namespaced<FieldRefType>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputType {
    pub name: String,
    #[serde(default)]
    pub constraints: InputTypeConstraints,
    #[serde(default)]
    pub meta: Option<InputTypeMeta>,
    pub fields: Vec<SchemaArg>,
}

impl InputType {
    pub fn source(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.source.as_deref())
    }

    pub fn grouping(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.grouping.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputTypeConstraints {
    #[serde(default)]
    pub max_num_fields: Option<u32>,
    #[serde(default)]
    pub min_num_fields: Option<u32>,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputTypeMeta {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub grouping: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deprecation {
    pub since_version: String,
    pub reason: String,
    #[serde(default)]
    pub planned_removal_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaArg {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default)]
    pub is_required: bool,
    pub input_types: Vec<TypeRef>,
    #[serde(default)]
    pub deprecation: Option<Deprecation>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputType {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    pub name: String,
    #[serde(default)]
    pub is_nullable: bool,
    pub output_type: TypeRef,
    #[serde(default)]
    pub args: Vec<SchemaArg>,
    #[serde(default)]
    pub deprecation: Option<Deprecation>,
    #[serde(default)]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeLocation {
    Scalar,
    InputObjectTypes,
    OutputObjectTypes,
    EnumTypes,
    FieldRefTypes,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    pub location: TypeLocation,
    #[serde(default)]
    pub is_list: bool,
}

impl TypeRef {
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(PRISMA_NAMESPACE)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaEnum {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRefType {
    pub name: String,
    pub allow_types: Vec<TypeRef>,
    #[serde(default)]
    pub fields: Vec<SchemaArg>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mappings {
    #[serde(default)]
    pub model_operations: Vec<ModelMapping>,
    #[serde(default)]
    pub other_operations: OtherOperations,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherOperations {
    #[serde(default)]
    pub read: Vec<String>,
    #[serde(default)]
    pub write: Vec<String>,
}

/// Client-side operation on a model.
///
/// Variant order is the order in which delegate methods and type-map
/// operations are emitted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum ModelAction {
    FindUnique,
    FindUniqueOrThrow,
    FindFirst,
    FindFirstOrThrow,
    FindMany,
    Create,
    CreateMany,
    CreateManyAndReturn,
    Delete,
    Update,
    DeleteMany,
    UpdateMany,
    UpdateManyAndReturn,
    Upsert,
    Count,
    Aggregate,
    GroupBy,
    FindRaw,
    AggregateRaw,
}

impl ModelAction {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Actions that return a batch count instead of records.
    pub fn returns_batch_payload(&self) -> bool {
        matches!(
            self,
            ModelAction::CreateMany | ModelAction::UpdateMany | ModelAction::DeleteMany
        )
    }

    /// Actions whose result is a list of records.
    pub fn returns_list(&self) -> bool {
        matches!(
            self,
            ModelAction::FindMany
                | ModelAction::CreateManyAndReturn
                | ModelAction::UpdateManyAndReturn
        )
    }

    /// Actions whose single-record result may be `null`.
    pub fn is_nullable_result(&self) -> bool {
        matches!(self, ModelAction::FindUnique | ModelAction::FindFirst)
    }

    /// Actions whose arguments are entirely optional.
    pub fn has_optional_args(&self) -> bool {
        matches!(
            self,
            ModelAction::FindFirst
                | ModelAction::FindFirstOrThrow
                | ModelAction::FindMany
                | ModelAction::CreateMany
                | ModelAction::CreateManyAndReturn
                | ModelAction::DeleteMany
                | ModelAction::Count
                | ModelAction::FindRaw
                | ModelAction::AggregateRaw
        )
    }

    /// Actions whose arguments carry `select`/`omit`/`include`.
    pub fn has_selection(&self) -> bool {
        !matches!(
            self,
            ModelAction::CreateMany
                | ModelAction::UpdateMany
                | ModelAction::DeleteMany
                | ModelAction::Aggregate
                | ModelAction::GroupBy
                | ModelAction::Count
                | ModelAction::FindRaw
                | ModelAction::AggregateRaw
        )
    }

    /// Actions returning records created or updated in bulk, which cannot
    /// include relations beyond the ones loaded through foreign keys.
    pub fn is_and_return(&self) -> bool {
        matches!(
            self,
            ModelAction::CreateManyAndReturn | ModelAction::UpdateManyAndReturn
        )
    }
}

/// Root field names per action for one model.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMapping {
    pub model: String,
    pub plural: String,
    #[serde(default)]
    pub find_unique: Option<String>,
    #[serde(default)]
    pub find_unique_or_throw: Option<String>,
    #[serde(default)]
    pub find_first: Option<String>,
    #[serde(default)]
    pub find_first_or_throw: Option<String>,
    #[serde(default)]
    pub find_many: Option<String>,
    #[serde(default, alias = "createOne")]
    pub create: Option<String>,
    #[serde(default)]
    pub create_many: Option<String>,
    #[serde(default)]
    pub create_many_and_return: Option<String>,
    #[serde(default, alias = "deleteOne")]
    pub delete: Option<String>,
    #[serde(default, alias = "updateOne")]
    pub update: Option<String>,
    #[serde(default)]
    pub delete_many: Option<String>,
    #[serde(default)]
    pub update_many: Option<String>,
    #[serde(default)]
    pub update_many_and_return: Option<String>,
    #[serde(default, alias = "upsertOne")]
    pub upsert: Option<String>,
    #[serde(default)]
    pub aggregate: Option<String>,
    #[serde(default)]
    pub group_by: Option<String>,
    #[serde(default)]
    pub count: Option<String>,
    #[serde(default)]
    pub find_raw: Option<String>,
    #[serde(default)]
    pub aggregate_raw: Option<String>,
}

impl ModelMapping {
    /// Root field implementing `action`, if the model supports it.
    pub fn field_for(&self, action: ModelAction) -> Option<&str> {
        let field = match action {
            ModelAction::FindUnique => &self.find_unique,
            ModelAction::FindUniqueOrThrow => &self.find_unique_or_throw,
            ModelAction::FindFirst => &self.find_first,
            ModelAction::FindFirstOrThrow => &self.find_first_or_throw,
            ModelAction::FindMany => &self.find_many,
            ModelAction::Create => &self.create,
            ModelAction::CreateMany => &self.create_many,
            ModelAction::CreateManyAndReturn => &self.create_many_and_return,
            ModelAction::Delete => &self.delete,
            ModelAction::Update => &self.update,
            ModelAction::DeleteMany => &self.delete_many,
            ModelAction::UpdateMany => &self.update_many,
            ModelAction::UpdateManyAndReturn => &self.update_many_and_return,
            ModelAction::Upsert => &self.upsert,
            ModelAction::Aggregate => &self.aggregate,
            ModelAction::GroupBy => &self.group_by,
            ModelAction::Count => &self.count,
            ModelAction::FindRaw => &self.find_raw,
            ModelAction::AggregateRaw => &self.aggregate_raw,
        };
        field.as_deref()
    }
}

pub const PRISMA_NAMESPACE: &str = "prisma";
pub const MODEL_NAMESPACE: &str = "model";
