//! `const` objects plus value-union types for schema enums.

use crate::dmmf::{DatamodelEnum, SchemaEnum};
use crate::ts::{
    BasicBuilder, ConstDeclaration, DocComment, TypeDeclaration, ValueBuilder, Writer, export,
    key_of, string_value, type_of, value,
};

/// Enums whose members are the runtime null sentinels rather than strings.
const OBJECT_ENUMS: [&str; 3] = ["JsonNullValueInput", "NullableJsonNullValueInput", "JsonNullValueFilter"];

/// Enums the runtime validates at access time.
const STRICT_ENUMS: [&str; 1] = ["TransactionIsolationLevel"];

/// `export const E = {...} as const` followed by `export type E = ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDeclaration {
    name: String,
    body: ValueBuilder,
    doc: DocComment,
}

impl EnumDeclaration {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = (String, ValueBuilder)>) -> Self {
        Self {
            name: name.into(),
            body: ValueBuilder::Object(values.into_iter().collect()).as_const(),
            doc: DocComment::default(),
        }
    }

    /// String enum whose member names are their own values.
    pub fn strings<S: AsRef<str>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            name,
            values
                .into_iter()
                .map(|v| (v.as_ref().to_string(), string_value(v.as_ref()))),
        )
    }

    pub fn doc(mut self, doc: DocComment) -> Self {
        self.doc = doc;
        self
    }

    fn strict(mut self) -> Self {
        self.body = ValueBuilder::Call("runtime.makeStrictEnum".into(), vec![self.body]);
        self
    }
}

impl BasicBuilder for EnumDeclaration {
    fn write(&self, writer: &mut Writer) {
        let constant = ConstDeclaration::new(&self.name, self.body.clone()).doc(self.doc.clone());
        export(constant).write(writer);
        writer.new_line().new_line();
        let alias = TypeDeclaration::new(&self.name, type_of(&self.name).subscript(key_of(type_of(&self.name))));
        export(alias).write(writer);
    }
}

/// Enum of the `prisma` namespace (sort orders, scalar field lists, ...).
pub fn prisma_enum(schema_enum: &SchemaEnum) -> EnumDeclaration {
    let name = schema_enum.name.as_str();
    if OBJECT_ENUMS.contains(&name) {
        return EnumDeclaration::new(
            name,
            schema_enum.values.iter().map(|v| (v.clone(), value(v))),
        );
    }
    let declaration = EnumDeclaration::strings(name, &schema_enum.values);
    if STRICT_ENUMS.contains(&name) {
        declaration.strict()
    } else {
        declaration
    }
}

/// Enum declared in the datamodel.
pub fn model_enum(datamodel_enum: &DatamodelEnum) -> EnumDeclaration {
    let doc = datamodel_enum
        .documentation
        .as_deref()
        .map(DocComment::new)
        .unwrap_or_default();
    EnumDeclaration::strings(&datamodel_enum.name, datamodel_enum.values.iter().map(|v| &v.name)).doc(doc)
}

/// `ModelName` listing every model of the datamodel.
pub fn model_name_enum<S: AsRef<str>>(models: impl IntoIterator<Item = S>) -> EnumDeclaration {
    EnumDeclaration::strings("ModelName", models)
}
