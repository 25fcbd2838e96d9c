//! Input object types: filters, create/update payloads, order-by inputs.

use super::context::GenerateContext;
use super::naming::enum_type_name;
use super::scalars::input_scalar_type;
use crate::dmmf::{Deprecation, InputType, SchemaArg, TypeLocation, TypeRef};
use crate::ts::{
    DocComment, Export, GenericParameter, NamedType, ObjectType, Property, TypeBuilder,
    TypeDeclaration, export, generic, key_of, named, never, null, object, string_literal,
    string_literal_union, union,
};
use tracing::trace;

const MODEL_GENERIC: &str = "$PrismaModel";

pub fn deprecation_text(deprecation: &Deprecation) -> String {
    format!(
        "@deprecated since {} because {}",
        deprecation.since_version, deprecation.reason
    )
}

fn model_generic_arg(source: Option<&str>) -> TypeBuilder {
    match source {
        Some(source) => string_literal(source),
        None => named(MODEL_GENERIC),
    }
}

fn single_field_type(ctx: &GenerateContext<'_>, type_ref: &TypeRef, source: Option<&str>) -> TypeBuilder {
    let ty = match type_ref.location {
        TypeLocation::Scalar => return input_scalar_type(&type_ref.type_name, type_ref.is_list),
        TypeLocation::EnumTypes => named(enum_type_name(type_ref)),
        TypeLocation::InputObjectTypes | TypeLocation::FieldRefTypes => {
            let mut ty = NamedType::new(format!("Prisma.{}", type_ref.type_name));
            if ctx.generic_args.type_ref_needs_generic_model_arg(type_ref) {
                ty = ty.arg(model_generic_arg(source));
            }
            ty.into()
        }
        TypeLocation::OutputObjectTypes => named(&type_ref.type_name),
    };
    if type_ref.is_list { ty.array() } else { ty }
}

/// `XOR<XOR<A, B>, C>`
fn xor(types: Vec<TypeBuilder>) -> Option<TypeBuilder> {
    types
        .into_iter()
        .reduce(|acc, next| generic("Prisma.XOR", [acc, next]))
}

/// Type of an argument accepting any of `input_types`. Single input objects
/// are exclusive of each other; everything else is a plain alternative.
pub fn input_field_type(ctx: &GenerateContext<'_>, arg: &SchemaArg, source: Option<&str>) -> TypeBuilder {
    let (objects, others): (Vec<&TypeRef>, Vec<&TypeRef>) = arg
        .input_types
        .iter()
        .partition(|t| t.location == TypeLocation::InputObjectTypes && !t.is_list);

    let objects = xor(objects.into_iter().map(|t| single_field_type(ctx, t, source)).collect());
    let mut variants: Vec<TypeBuilder> = objects.into_iter().collect();
    variants.extend(others.into_iter().map(|t| single_field_type(ctx, t, source)));

    let has_null = arg
        .input_types
        .iter()
        .any(|t| t.location == TypeLocation::Scalar && t.type_name == "Null");
    if arg.is_nullable && !has_null {
        variants.push(null());
    }
    union(variants)
}

/// A documented property for `arg`. `doc` replaces the schema comment.
pub fn input_field(
    ctx: &GenerateContext<'_>,
    arg: &SchemaArg,
    source: Option<&str>,
    doc: Option<String>,
) -> Property {
    let mut ty = input_field_type(ctx, arg, source);
    if !arg.is_required && ctx.is_preview_feature_on("strictUndefinedChecks") {
        ty = ty.or(named("runtime.Types.Skip"));
    }

    let mut comment = DocComment::default();
    if let Some(text) = doc.as_deref().or(arg.comment.as_deref()) {
        comment.add_text(text);
    }
    if let Some(deprecation) = &arg.deprecation {
        comment.add_line(deprecation_text(deprecation));
    }

    Property::new(&arg.name, ty)
        .set_optional(!arg.is_required)
        .doc(comment)
}

fn is_json_filter(input_type: &InputType) -> bool {
    input_type.name.contains("Json") && input_type.name.contains("Filter")
}

fn fields_object(ctx: &GenerateContext<'_>, input_type: &InputType) -> ObjectType {
    let source = input_type.source();
    let mut body = object();
    for field in &input_type.fields {
        body.add_member(input_field(ctx, field, source, None));
    }
    body
}

/// Declarations for one input type: usually one, two for JSON filters.
pub fn input_type_declarations(ctx: &GenerateContext<'_>, input_type: &InputType) -> Vec<Export<TypeDeclaration>> {
    trace!(input_type = %input_type.name, "Building input type");
    let needs_generic = ctx.generic_args.type_needs_generic_model_arg(input_type);
    let with_generic = |decl: TypeDeclaration| {
        if needs_generic {
            decl.generic(GenericParameter::new(MODEL_GENERIC).default(never()))
        } else {
            decl
        }
    };

    let body = fields_object(ctx, input_type);

    if is_json_filter(input_type) {
        let base_name = format!("{}Base", input_type.name);
        let mut base_ref = NamedType::new(&base_name);
        if needs_generic {
            base_ref = base_ref.arg(named(MODEL_GENERIC));
        }
        let required = generic("Required", [base_ref.into()]);
        let path = string_literal("path");
        let wrapper = union([
            generic(
                "Prisma.PatchUndefined",
                [
                    generic(
                        "Prisma.Either",
                        [required.clone(), generic("Exclude", [key_of(required.clone()), path.clone()])],
                    ),
                    required.clone(),
                ],
            ),
            generic("Prisma.OptionalFlat", [generic("Omit", [required, path])]),
        ]);
        return vec![
            export(with_generic(TypeDeclaration::new(&input_type.name, wrapper))),
            export(with_generic(TypeDeclaration::new(base_name, body))),
        ];
    }

    let ty: TypeBuilder = match input_type.constraints.fields.as_deref() {
        Some(fields) if !fields.is_empty() => {
            generic("Prisma.AtLeast", [body.into(), string_literal_union(fields)])
        }
        _ => body.into(),
    };
    vec![export(with_generic(TypeDeclaration::new(&input_type.name, ty)))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::context::ContextSettings;
    use crate::generation::test_support::blog_helper;
    use crate::ts::to_source;
    use pretty_assertions::assert_eq;

    fn render(ctx: &GenerateContext<'_>, name: &str) -> String {
        let input_type = ctx.dmmf.input_type_by_name(name).unwrap();
        input_type_declarations(ctx, input_type)
            .iter()
            .map(to_source)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[test]
    fn test_model_owned_filter_passes_model_name() {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, ContextSettings::builder().build());
        let source = render(&ctx, "UserWhereInput");
        assert!(source.starts_with("export type UserWhereInput = {\n"));
        assert!(source.contains("  id?: Prisma.IntFilter<'User'> | number\n"));
        assert!(source.contains("  role?: Prisma.EnumRoleFilter<'User'> | $Enums.Role\n"));
        assert!(
            source.contains("  posts?: Prisma.PostListRelationFilter\n"),
            "{}",
            source
        );
    }

    #[test]
    fn test_shared_filter_takes_the_generic() {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, ContextSettings::builder().build());
        let source = render(&ctx, "IntFilter");
        assert!(source.starts_with("export type IntFilter<$PrismaModel = never> = {\n"));
        assert!(source.contains("equals?: number | Prisma.IntFieldRefInput<$PrismaModel>"));
        assert!(source.contains("not?: Prisma.NestedIntFilter<$PrismaModel> | number"));
    }

    #[test]
    fn test_unique_input_is_wrapped_in_at_least() {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, ContextSettings::builder().build());
        let source = render(&ctx, "UserWhereUniqueInput");
        assert!(source.starts_with("export type UserWhereUniqueInput = Prisma.AtLeast<{\n"));
        assert!(source.ends_with("}, 'id' | 'email'>"));
    }

    #[test]
    fn test_json_filter_emits_base_and_wrapper() {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, ContextSettings::builder().build());
        let source = render(&ctx, "JsonNullableFilter");
        insta::assert_snapshot!(
            source.lines().next().unwrap(),
            @"export type JsonNullableFilter<$PrismaModel = never> = Prisma.PatchUndefined<Prisma.Either<Required<JsonNullableFilterBase<$PrismaModel>>, Exclude<keyof Required<JsonNullableFilterBase<$PrismaModel>>, 'path'>>, Required<JsonNullableFilterBase<$PrismaModel>>> | Prisma.OptionalFlat<Omit<Required<JsonNullableFilterBase<$PrismaModel>>, 'path'>>"
        );
        assert!(source.contains("export type JsonNullableFilterBase<$PrismaModel = never> = {\n"));
    }

    #[test]
    fn test_strict_undefined_checks_accept_skip() {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(
            &dmmf,
            ContextSettings::builder()
                .preview_features(vec!["strictUndefinedChecks".to_string()])
                .build(),
        );
        let source = render(&ctx, "UserCreateInput");
        assert!(source.contains("name?: string | null | runtime.Types.Skip"), "{}", source);
        assert!(source.contains("  email: string\n"), "{}", source);
    }

    #[test]
    fn test_object_alternatives_are_xored() {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, ContextSettings::builder().build());
        let source = render(&ctx, "PostWhereInput");
        assert!(
            source.contains(
                "author?: Prisma.XOR<Prisma.UserNullableScalarRelationFilter, Prisma.UserWhereInput> | null"
            ),
            "{}",
            source
        );
    }

    #[test]
    fn test_field_comment_and_deprecation() {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, ContextSettings::builder().build());
        let arg: SchemaArg = serde_json::from_value(serde_json::json!({
            "name": "take",
            "comment": "How many",
            "isRequired": false,
            "inputTypes": [{ "type": "Int", "location": "scalar", "isList": false }],
            "deprecation": { "sinceVersion": "5.0.0", "reason": "use limit" }
        }))
        .unwrap();
        assert_eq!(
            to_source(&input_field(&ctx, &arg, None, None)),
            "/**\n * How many\n * @deprecated since 5.0.0 because use limit\n */\ntake?: number"
        );
    }
}
