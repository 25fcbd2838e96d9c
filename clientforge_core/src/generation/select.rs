//! Selection shapes (`select`, `include`, `omit`) and model payloads.

use super::context::GenerateContext;
use super::naming::{
    field_args_name, get_payload_name, model_args_name, omit_name, payload_name,
    select_scalar_name, uncapitalize,
};
use super::output::model_output_property;
use super::{ext_args, ext_args_param};
use crate::dmmf::{FieldKind, Model, SchemaField, TypeLocation};
use crate::ts::{
    Export, GenericParameter, NamedType, ObjectType, Property, TypeBuilder, TypeDeclaration, export,
    generic, named, object, string_literal, string_literal_union, union,
};

/// `ExtArgs['result']['user']`
fn model_result_extensions(model: &str) -> TypeBuilder {
    ext_args()
        .subscript(string_literal("result"))
        .subscript(string_literal(uncapitalize(model)))
}

fn is_scalar_like(ctx: &GenerateContext<'_>, field: &SchemaField) -> bool {
    match field.output_type.location {
        TypeLocation::Scalar | TypeLocation::EnumTypes => true,
        TypeLocation::OutputObjectTypes => ctx.dmmf.is_composite_type(&field.output_type.type_name),
        _ => false,
    }
}

/// Fields that can be loaded through `include`: relations and `_count`.
pub fn include_fields<'f>(ctx: &GenerateContext<'_>, fields: &'f [SchemaField]) -> Vec<&'f SchemaField> {
    fields
        .iter()
        .filter(|f| {
            f.output_type.location == TypeLocation::OutputObjectTypes
                && !ctx.dmmf.is_composite_type(&f.output_type.type_name)
        })
        .collect()
}

fn selection_object<'f>(model: &str, fields: impl IntoIterator<Item = &'f SchemaField>) -> ObjectType {
    let mut body = object();
    for field in fields {
        let mut ty = named("boolean");
        if field.output_type.location == TypeLocation::OutputObjectTypes {
            let args = NamedType::new(format!("Prisma.{}", field_args_name(field, model))).arg(ext_args());
            ty = ty.or(args.into());
        }
        body.add_member(Property::new(&field.name, ty).optional());
    }
    body
}

fn with_ext_args(name: impl Into<String>, ty: impl Into<TypeBuilder>) -> Export<TypeDeclaration> {
    export(TypeDeclaration::new(name, ty).generic(ext_args_param()))
}

/// `UserSelect`, or one of its `...AndReturn` variants when `name` says so.
pub fn select_type(model: &str, name: &str, fields: &[SchemaField]) -> Export<TypeDeclaration> {
    let ty = generic(
        "runtime.Types.Extensions.GetSelect",
        [selection_object(model, fields).into(), model_result_extensions(model)],
    );
    with_ext_args(name, ty)
}

pub fn select_scalar_type(ctx: &GenerateContext<'_>, model: &str, fields: &[SchemaField]) -> Export<TypeDeclaration> {
    let scalars = fields.iter().filter(|f| is_scalar_like(ctx, f));
    export(TypeDeclaration::new(select_scalar_name(model), selection_object(model, scalars)))
}

pub fn omit_type(ctx: &GenerateContext<'_>, model: &str, fields: &[SchemaField]) -> Export<TypeDeclaration> {
    let keys = string_literal_union(
        fields
            .iter()
            .filter(|f| is_scalar_like(ctx, f))
            .map(|f| f.name.as_str()),
    );
    let mut args = vec![keys, model_result_extensions(model)];
    if ctx.is_preview_feature_on("strictUndefinedChecks") {
        args.push(named("runtime.Types.Skip"));
    }
    with_ext_args(omit_name(model), generic("runtime.Types.Extensions.GetOmit", args))
}

pub fn include_type(ctx: &GenerateContext<'_>, model: &str, name: &str, fields: &[SchemaField]) -> Export<TypeDeclaration> {
    with_ext_args(name, selection_object(model, include_fields(ctx, fields)))
}

/// `$UserPayload`: relations, scalars and composites of a model.
pub fn payload_type(ctx: &GenerateContext<'_>, model: &Model) -> Export<TypeDeclaration> {
    let is_composite = ctx.dmmf.is_composite_type(&model.name);
    let mut objects = object();
    let mut scalars = object();
    let mut composites = object();
    for field in &model.fields {
        let property = model_output_property(ctx.dmmf, field);
        match field.kind {
            FieldKind::Object if ctx.dmmf.is_composite_type(&field.field_type) => {
                composites.add_member(property);
            }
            FieldKind::Object => {
                objects.add_member(property);
            }
            FieldKind::Scalar | FieldKind::Enum => {
                scalars.add_member(property);
            }
            FieldKind::Unsupported => {}
        }
    }

    let scalars: TypeBuilder = if is_composite {
        scalars.into()
    } else {
        generic(
            "runtime.Types.Extensions.GetPayloadResult",
            [scalars.into(), model_result_extensions(&model.name)],
        )
    };
    let body = object()
        .property("name", string_literal(&model.name))
        .property("objects", objects.into())
        .property("scalars", scalars)
        .property("composites", composites.into());

    let declaration = TypeDeclaration::new(payload_name(&model.name), body);
    if is_composite {
        export(declaration)
    } else {
        export(declaration.generic(ext_args_param()))
    }
}

/// `UserGetPayload<S>` resolving a selection against the payload.
pub fn get_payload_type(model: &str) -> Export<TypeDeclaration> {
    let payload = format!("Prisma.{}", payload_name(model));
    let selection = union([
        named("boolean"),
        named("null"),
        named("undefined"),
        named(model_args_name(model, None)),
    ]);
    export(
        TypeDeclaration::new(
            get_payload_name(model),
            generic("runtime.Types.Result.GetResult", [named(payload), named("S")]),
        )
        .generic(GenericParameter::new("S").extends(selection)),
    )
}
