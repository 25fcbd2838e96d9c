//! `TypeMap`: the per-model operation table the runtime extension types are
//! keyed by, and its `TypeMapCb` wrapper.

use super::context::GenerateContext;
use super::naming::{
    aggregate_name, aggregate_output_name, field_refs_name, group_by_output_name, model_args_name,
    payload_name, uncapitalize,
};
use super::{ext_args, ext_args_param, global_omit_param};
use crate::dmmf::{ModelAction, PRISMA_NAMESPACE};
use crate::ts::{
    Export, GenericParameter, Interface, ObjectType, Property, TypeBuilder, TypeDeclaration, export,
    generic, intersection, named, never, object, spread, string_literal, string_literal_union, tuple,
    union,
};
use strum::IntoEnumIterator;

fn payload_result(model: &str) -> TypeBuilder {
    generic(
        "runtime.Types.Utils.PayloadToResult",
        [named(format!("Prisma.{}", payload_name(model)))],
    )
}

fn optional(type_name: String) -> TypeBuilder {
    generic("runtime.Types.Utils.Optional", [named(type_name)])
}

fn operation_result(model: &str, action: ModelAction) -> TypeBuilder {
    use ModelAction::*;
    match action {
        FindUnique | FindFirst => payload_result(model).nullable(),
        FindUniqueOrThrow | FindFirstOrThrow | Create | Delete | Update | Upsert => payload_result(model),
        FindMany | CreateManyAndReturn | UpdateManyAndReturn => payload_result(model).array(),
        CreateMany | UpdateMany | DeleteMany => named("BatchPayload"),
        Aggregate => optional(format!("Prisma.{}", aggregate_name(model))),
        GroupBy => optional(format!("Prisma.{}", group_by_output_name(model))).array(),
        Count => optional(format!("Prisma.{}", aggregate_output_name(model, "Count"))).or(named("number")),
        FindRaw | AggregateRaw => named("JsonObject"),
    }
}

fn model_entry(ctx: &GenerateContext<'_>, model: &str) -> ObjectType {
    let mut operations = object();
    for action in ModelAction::iter().filter(|a| ctx.dmmf.has_action(model, *a)) {
        let args = generic(format!("Prisma.{}", model_args_name(model, Some(action))), [ext_args()]);
        let operation = object()
            .property("args", args)
            .property("result", operation_result(model, action));
        operations.add_member(Property::new(action.as_str(), operation.into()));
    }
    object()
        .property("payload", generic(format!("Prisma.{}", payload_name(model)), [ext_args()]))
        .property("fields", named(format!("Prisma.{}", field_refs_name(model))))
        .property("operations", operations.into())
}

/// `$executeRaw`, `$queryRawUnsafe`, ... with their argument tuples.
fn other_operations(ctx: &GenerateContext<'_>) -> ObjectType {
    let other = &ctx.dmmf.mappings().other_operations;
    let mut names = Vec::new();
    for name in other.read.iter().chain(other.write.iter()) {
        names.push(format!("${}", name));
        if name == "executeRaw" || name == "queryRaw" {
            names.push(format!("${}Unsafe", name));
        }
        if name == "queryRaw" && ctx.is_preview_feature_on("typedSql") {
            names.push("$queryRawTyped".to_string());
        }
    }

    let rest = spread(named("any").array());
    let mut operations = object();
    for name in names {
        let (args, result) = match name.as_str() {
            "$executeRaw" | "$queryRaw" => (
                tuple([union([named("TemplateStringsArray"), named("Sql")]), rest.clone()]),
                named("any"),
            ),
            "$executeRawUnsafe" | "$queryRawUnsafe" => (tuple([named("string"), rest.clone()]), named("any")),
            "$queryRawTyped" => (named("runtime.UnknownTypedSql"), named("any")),
            "$runCommandRaw" => (named("InputJsonObject"), named("JsonObject")),
            _ => (named("any"), named("any")),
        };
        let operation = object().property("args", args).property("result", result);
        operations.add_member(Property::new(name, operation.into()));
    }
    operations
}

pub fn type_map(ctx: &GenerateContext<'_>) -> Export<TypeDeclaration> {
    let dmmf = ctx.dmmf;
    let mapped: Vec<&str> = dmmf.mappings().model_operations.iter().map(|m| m.model.as_str()).collect();

    let model_props = if mapped.is_empty() {
        never()
    } else {
        string_literal_union(mapped.iter().map(|m| uncapitalize(m)))
    };
    let isolation_level = if dmmf.has_enum_in_namespace("TransactionIsolationLevel", PRISMA_NAMESPACE) {
        named("TransactionIsolationLevel")
    } else {
        never()
    };

    let mut models = object();
    for model in &mapped {
        models.add_member(Property::new(*model, model_entry(ctx, model).into()));
    }

    let meta = object()
        .property("modelProps", model_props)
        .property("txIsolationLevel", isolation_level);
    let global_omit = object().property("omit", named("GlobalOmitOptions"));
    let models_part = object()
        .property("globalOmitOptions", global_omit.into())
        .property("meta", meta.into())
        .property("model", models.into());
    let other_part = object().property(
        "other",
        object()
            .property("payload", named("any"))
            .property("operations", other_operations(ctx).into())
            .into(),
    );

    export(
        TypeDeclaration::new("TypeMap", intersection([models_part.into(), other_part.into()]))
            .generic(ext_args_param())
            .generic(global_omit_param()),
    )
}

/// `TypeMapCb`, the type-level function the extension machinery calls.
pub fn type_map_cb() -> Export<Interface> {
    let params = object()
        .property("extArgs", named("runtime.Types.Extensions.InternalArgs"))
        .inline();
    let returns = generic(
        "TypeMap",
        [
            named("this")
                .subscript(string_literal("params"))
                .subscript(string_literal("extArgs")),
            named("GlobalOmitOptions"),
        ],
    );
    export(
        Interface::new("TypeMapCb")
            .generic(GenericParameter::new("GlobalOmitOptions").default(object().into()))
            .extends(generic(
                "runtime.Types.Utils.Fn",
                [
                    params.into(),
                    generic("runtime.Types.Utils.Record", [named("string"), named("any")]),
                ],
            ))
            .add(Property::new("returns", returns)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::context::ContextSettings;
    use crate::generation::test_support::blog_helper;
    use crate::ts::to_source;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_type_map_models() {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, ContextSettings::builder().build());
        let source = to_source(&type_map(&ctx));
        assert!(source.starts_with("export type TypeMap<ExtArgs extends runtime.Types.Extensions.InternalArgs = runtime.Types.Extensions.DefaultArgs, GlobalOmitOptions = {}> = {\n"));
        assert!(source.contains("    modelProps: 'user' | 'post'\n    txIsolationLevel: TransactionIsolationLevel\n"));
        assert!(source.contains("      payload: Prisma.$UserPayload<ExtArgs>\n      fields: Prisma.UserFieldRefs\n"));
        assert!(source.contains(
            "        findUnique: {\n          args: Prisma.UserFindUniqueArgs<ExtArgs>\n          result: runtime.Types.Utils.PayloadToResult<Prisma.$UserPayload> | null\n        }\n"
        ));
        assert!(source.contains("result: runtime.Types.Utils.Optional<Prisma.UserGroupByOutputType>[]"));
        assert!(source.contains("result: runtime.Types.Utils.Optional<Prisma.UserCountAggregateOutputType> | number"));
        assert!(!source.contains("PostCountArgs"));
    }

    #[test]
    fn test_other_operations() {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, ContextSettings::builder().build());
        let source = to_source(&type_map(&ctx));
        assert!(source.contains("      $executeRaw: {\n        args: [TemplateStringsArray | Sql, ...any[]]\n        result: any\n      }\n"));
        assert!(source.contains("      $queryRawUnsafe: {\n        args: [string, ...any[]]\n"));
        assert!(!source.contains("$queryRawTyped"));

        let typed = GenerateContext::new(
            &dmmf,
            ContextSettings::builder().preview_features(vec!["typedSql".into()]).build(),
        );
        assert!(to_source(&type_map(&typed)).contains("$queryRawTyped: {\n        args: runtime.UnknownTypedSql\n"));
    }

    #[test]
    fn test_type_map_cb() {
        insta::assert_snapshot!(
            to_source(&type_map_cb()).replace('\n', "|"),
            @"export interface TypeMapCb<GlobalOmitOptions = {}> extends runtime.Types.Utils.Fn<{ extArgs: runtime.Types.Extensions.InternalArgs }, runtime.Types.Utils.Record<string, any>> {|  returns: TypeMap<this['params']['extArgs'], GlobalOmitOptions>|}"
        );
        assert_eq!(to_source(&type_map_cb()).lines().count(), 3);
    }
}
