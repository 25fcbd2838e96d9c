//! Output object types and model properties as result types.

use super::input::deprecation_text;
use super::naming::{enum_type_name, payload_name};
use super::scalars::output_scalar_type;
use super::ext_args;
use crate::dmmf::{DmmfHelper, Field, FieldKind, OutputType, SchemaField, TypeLocation};
use crate::ts::{DocComment, Export, NamedType, Property, TypeBuilder, TypeDeclaration, export, named, object};

fn output_field(field: &SchemaField) -> Property {
    let type_ref = &field.output_type;
    let mut ty = match type_ref.location {
        TypeLocation::EnumTypes => named(enum_type_name(type_ref)),
        TypeLocation::Scalar => output_scalar_type(&type_ref.type_name),
        _ => named(&type_ref.type_name),
    };
    if type_ref.is_list {
        ty = ty.array();
    }
    if field.is_nullable {
        ty = ty.nullable();
    }
    let doc = field
        .deprecation
        .as_ref()
        .map(|d| DocComment::new(&deprecation_text(d)))
        .unwrap_or_default();
    Property::new(&field.name, ty).doc(doc)
}

/// `export type AggregateUser = { _count: UserCountAggregateOutputType | null ... }`
pub fn output_type_declaration(output_type: &OutputType) -> Export<TypeDeclaration> {
    let mut body = object();
    for field in &output_type.fields {
        body.add_member(output_field(field));
    }
    export(TypeDeclaration::new(&output_type.name, body))
}

/// A datamodel field as it appears in payloads: relations point at the
/// target's payload, scalars use their output type.
pub fn model_output_property(dmmf: &DmmfHelper, field: &Field) -> Property {
    let mut ty: TypeBuilder = match field.kind {
        FieldKind::Object => {
            let mut payload = NamedType::new(format!("Prisma.{}", payload_name(&field.field_type)));
            if !dmmf.is_composite_type(&field.field_type) {
                payload = payload.arg(ext_args());
            }
            payload.into()
        }
        FieldKind::Enum => named(format!("$Enums.{}", field.field_type)),
        FieldKind::Scalar | FieldKind::Unsupported => output_scalar_type(&field.field_type),
    };
    if field.is_list {
        ty = ty.array();
    } else if !field.is_required {
        ty = ty.nullable();
    }
    let doc = field
        .documentation
        .as_deref()
        .map(DocComment::new)
        .unwrap_or_default();
    Property::new(&field.name, ty).doc(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dmmf::PRISMA_NAMESPACE;
    use crate::generation::test_support::blog_helper;
    use crate::ts::to_source;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_aggregate_output_type() {
        let dmmf = blog_helper();
        let min = dmmf.output_type(PRISMA_NAMESPACE, "UserMinAggregateOutputType").unwrap();
        assert_eq!(
            to_source(&output_type_declaration(min)),
            "export type UserMinAggregateOutputType = {\n  id: number | null\n  email: string | null\n  role: $Enums.Role | null\n}"
        );
    }

    #[test]
    fn test_model_output_properties() {
        let dmmf = blog_helper();
        let post = dmmf.model("Post").unwrap();
        let render = |name: &str| {
            let field = post.fields.iter().find(|f| f.name == name).unwrap();
            to_source(&model_output_property(&dmmf, field))
        };
        assert_eq!(render("author"), "author: Prisma.$UserPayload<ExtArgs> | null");
        assert_eq!(render("metadata"), "metadata: runtime.JsonValue | null");
        assert_eq!(render("published"), "published: boolean");
    }
}
