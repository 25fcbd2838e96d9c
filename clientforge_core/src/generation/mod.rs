//! Declaration synthesis: DMMF nodes in, TypeScript declarations out.
//!
//! Builders in here are pure. [`files`] assembles their output into the
//! fixed set of generated modules.

pub mod aggregate;
pub mod args;
pub mod context;
pub mod delegate;
pub mod enums;
pub mod field_refs;
pub mod files;
pub mod generic_args;
pub mod input;
pub mod jsdoc;
pub mod model_file;
pub mod naming;
pub mod output;
pub mod scalars;
pub mod select;
pub mod type_map;

pub use context::{ContextSettings, GenerateContext};
pub use files::build_source_files;
pub use generic_args::GenericArgsInfo;

use crate::ts::{GenericParameter, TypeBuilder, named};

/// `ExtArgs extends runtime.Types.Extensions.InternalArgs = runtime.Types.Extensions.DefaultArgs`
pub(crate) fn ext_args_param() -> GenericParameter {
    GenericParameter::new("ExtArgs")
        .extends(named("runtime.Types.Extensions.InternalArgs"))
        .default(named("runtime.Types.Extensions.DefaultArgs"))
}

pub(crate) fn ext_args() -> TypeBuilder {
    named("ExtArgs")
}

/// `GlobalOmitOptions = {}`
pub(crate) fn global_omit_param() -> GenericParameter {
    GenericParameter::new("GlobalOmitOptions").default(crate::ts::object().into())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::dmmf::{DmmfHelper, Document, Field, InputType, Model, OutputType, SchemaField};
    use serde_json::json;

    pub fn blog_document() -> Document {
        Document::from_json(include_str!("../../tests/fixtures/blog.dmmf.json"))
            .expect("blog fixture parses")
    }

    pub fn blog_helper() -> DmmfHelper {
        DmmfHelper::new(blog_document())
    }

    /// The blog document with an `Address` composite type embedded in
    /// `User.address`.
    pub fn composite_helper() -> DmmfHelper {
        let mut document = blog_document();

        let address: Model = serde_json::from_value(json!({
            "name": "Address",
            "fields": [
                { "name": "street", "kind": "scalar", "isList": false, "isRequired": true, "type": "String" },
                { "name": "city", "kind": "scalar", "isList": false, "isRequired": false, "type": "String" }
            ]
        }))
        .expect("composite type parses");
        document.datamodel.types.push(address);

        let address_field: Field = serde_json::from_value(json!({
            "name": "address", "kind": "object", "isList": false, "isRequired": false, "type": "Address"
        }))
        .expect("composite field parses");
        let user = document
            .datamodel
            .models
            .iter_mut()
            .find(|m| m.name == "User")
            .expect("blog fixture has User");
        user.fields.push(address_field);

        let address_output: OutputType = serde_json::from_value(json!({
            "name": "Address",
            "fields": [
                { "name": "street", "outputType": { "type": "String", "location": "scalar", "isList": false } },
                { "name": "city", "isNullable": true, "outputType": { "type": "String", "location": "scalar", "isList": false } }
            ]
        }))
        .expect("composite output type parses");
        let address_output_field: SchemaField = serde_json::from_value(json!({
            "name": "address",
            "isNullable": true,
            "outputType": { "type": "Address", "namespace": "model", "location": "outputObjectTypes", "isList": false }
        }))
        .expect("composite output field parses");
        let model_outputs = document
            .schema
            .output_object_types
            .get_mut("model")
            .expect("blog fixture has model output types");
        if let Some(user_output) = model_outputs.iter_mut().find(|t| t.name == "User") {
            user_output.fields.insert(4, address_output_field);
        }
        model_outputs.push(address_output);

        let address_filter: InputType = serde_json::from_value(json!({
            "name": "AddressWhereInput",
            "meta": { "grouping": "Address" },
            "fields": [
                { "name": "street", "inputTypes": [{ "type": "String", "location": "scalar", "isList": false }] }
            ]
        }))
        .expect("composite input type parses");
        document
            .schema
            .input_object_types
            .entry("prisma".to_string())
            .or_default()
            .push(address_filter);

        DmmfHelper::new(document)
    }
}
