//! `aggregate`, `count` and `groupBy` types of a model.

use super::context::GenerateContext;
use super::input::input_field;
use super::jsdoc::{DocNames, arg_field_doc};
use super::naming::{
    aggregate_get_name, aggregate_input_name, aggregate_name, aggregate_output_name,
    group_by_output_name, group_by_payload_name, model_args_name,
};
use super::output::output_type_declaration;
use super::ext_args_param;
use crate::dmmf::{ModelAction, OutputType, PRISMA_NAMESPACE, TypeLocation};
use crate::ts::{
    BasicBuilder, DocComment, GenericParameter, ObjectType, Property, TypeBuilder, TypeDeclaration,
    conditional, export, generic, intersection, key_of, mapped, named, object, string_literal,
    union,
};
use tracing::trace;

type Item = Box<dyn BasicBuilder + Send + Sync>;

const AGGREGATE_KINDS: [&str; 5] = ["Avg", "Sum", "Min", "Max", "Count"];

/// `{ [P in keyof T & keyof Out]: P extends <counted> ? T[P] extends <flag> ? number : GetScalarType : GetScalarType }`
fn scalar_result_map(output: &str, counted: TypeBuilder, flag: &str) -> TypeBuilder {
    let t_p = named("T").subscript(named("P"));
    let scalar = generic(
        "Prisma.GetScalarType",
        [t_p.clone(), named(output).subscript(named("P"))],
    );
    mapped(
        "P",
        intersection([key_of(named("T")), key_of(named(output))]),
        conditional(
            named("P"),
            counted,
            conditional(t_p, named(flag), named("number"), scalar.clone()),
            scalar,
        ),
    )
}

/// `{ id?: true, ... }` for one aggregate output type.
fn aggregate_input_type(output_type: &OutputType) -> TypeDeclaration {
    let mut body = object();
    for field in &output_type.fields {
        body.add_member(Property::new(&field.name, named("true")).optional());
    }
    TypeDeclaration::new(aggregate_input_name(&output_type.name), body)
}

/// Property selecting an aggregate, e.g. `_avg?: UserAvgAggregateInputType`.
fn aggregate_selection(field_name: &str, output_type: &str) -> TypeBuilder {
    let input = named(aggregate_input_name(output_type));
    if field_name == "_count" {
        input.or(named("true"))
    } else {
        input
    }
}

fn args_object(
    ctx: &GenerateContext<'_>,
    names: &DocNames,
    action: ModelAction,
    root_args: &[crate::dmmf::SchemaArg],
) -> ObjectType {
    let mut body = object();
    for arg in root_args {
        let doc = arg_field_doc(names, Some(action), &arg.name);
        body.add_member(input_field(ctx, arg, None, doc));
    }
    body
}

/// Every aggregate-related declaration of `model`. Parts without a backing
/// output type are left out.
pub fn aggregate_declarations(ctx: &GenerateContext<'_>, model: &str) -> Vec<Item> {
    let dmmf = ctx.dmmf;
    let mut items: Vec<Item> = Vec::new();
    let names = DocNames::new(dmmf, model);

    let Some(aggregate_type) = dmmf.output_type(PRISMA_NAMESPACE, &aggregate_name(model)) else {
        trace!(model, "No aggregate output type");
        return items;
    };

    let kind_types: Vec<&OutputType> = AGGREGATE_KINDS
        .iter()
        .filter_map(|kind| dmmf.output_type(PRISMA_NAMESPACE, &aggregate_output_name(model, kind)))
        .collect();

    items.push(Box::new(output_type_declaration(aggregate_type)));
    for output_type in &kind_types {
        items.push(Box::new(output_type_declaration(output_type)));
    }
    for output_type in &kind_types {
        items.push(Box::new(export(aggregate_input_type(output_type))));
    }

    if let Some(root) = dmmf.model_action_field(model, ModelAction::Aggregate) {
        let mut body = args_object(ctx, &names, ModelAction::Aggregate, &root.args);
        for field in &aggregate_type.fields {
            let doc = arg_field_doc(&names, Some(ModelAction::Aggregate), &field.name)
                .map(|text| DocComment::new(&text))
                .unwrap_or_default();
            body.add_member(
                Property::new(&field.name, aggregate_selection(&field.name, &field.output_type.type_name))
                    .optional()
                    .doc(doc),
            );
        }
        let args_name = model_args_name(model, Some(ModelAction::Aggregate));
        items.push(Box::new(export(
            TypeDeclaration::new(&args_name, body).generic(ext_args_param()),
        )));

        let aggregate = aggregate_name(model);
        let get_type = scalar_result_map(
            &aggregate,
            union([string_literal("_count"), string_literal("count")]),
            "true",
        );
        items.push(Box::new(export(
            TypeDeclaration::new(aggregate_get_name(model), get_type)
                .generic(GenericParameter::new("T").extends(named(&args_name))),
        )));
    }

    let group_by_output = dmmf.output_type(PRISMA_NAMESPACE, &group_by_output_name(model));
    if let (Some(root), Some(group_by_output)) =
        (dmmf.model_action_field(model, ModelAction::GroupBy), group_by_output)
    {
        let mut body = args_object(ctx, &names, ModelAction::GroupBy, &root.args);
        for field in group_by_output
            .fields
            .iter()
            .filter(|f| f.output_type.location == TypeLocation::OutputObjectTypes)
        {
            body.add_member(
                Property::new(&field.name, aggregate_selection(&field.name, &field.output_type.type_name))
                    .optional(),
            );
        }
        let args_name = model_args_name(model, Some(ModelAction::GroupBy));
        items.push(Box::new(export(
            TypeDeclaration::new(&args_name, body).generic(ext_args_param()),
        )));
        items.push(Box::new(output_type_declaration(group_by_output)));

        let output_name = group_by_output_name(model);
        let payload = generic(
            "Prisma.PrismaPromise",
            [generic(
                "Array",
                [intersection([
                    generic(
                        "Prisma.PickEnumerable",
                        [named(&output_name), named("T").subscript(string_literal("by"))],
                    ),
                    scalar_result_map(&output_name, string_literal("_count"), "boolean"),
                ])],
            )],
        );
        items.push(Box::new(
            TypeDeclaration::new(group_by_payload_name(model), payload)
                .generic(GenericParameter::new("T").extends(named(&args_name))),
        ));
    }

    trace!(model, declaration_count = items.len(), "Built aggregate declarations");
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::context::ContextSettings;
    use crate::generation::test_support::blog_helper;
    use crate::ts::to_source;

    fn render(model: &str) -> String {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, ContextSettings::builder().build());
        aggregate_declarations(&ctx, model)
            .iter()
            .map(to_source)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[test]
    fn test_aggregate_types_in_order() {
        let source = render("User");
        let positions: Vec<usize> = [
            "export type AggregateUser = {",
            "export type UserAvgAggregateOutputType = {",
            "export type UserCountAggregateOutputType = {",
            "export type UserAvgAggregateInputType = {",
            "export type UserCountAggregateInputType = {",
            "export type UserAggregateArgs<ExtArgs",
            "export type GetUserAggregateType<T extends UserAggregateArgs> =",
            "export type UserGroupByArgs<ExtArgs",
            "export type UserGroupByOutputType = {",
            "type GetUserGroupByPayload<T extends UserGroupByArgs> =",
        ]
        .iter()
        .map(|needle| source.find(needle).unwrap_or_else(|| panic!("missing {}\n{}", needle, source)))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", source);
        assert!(source.contains("  _all?: true\n"));
    }

    #[test]
    fn test_aggregate_args_select_aggregates() {
        let source = render("User");
        assert!(source.contains("  _count?: UserCountAggregateInputType | true\n"), "{}", source);
        assert!(source.contains("  _avg?: UserAvgAggregateInputType\n"));
        assert!(source.contains("Filter which User to aggregate."));
        insta::assert_snapshot!(
            source.lines().find(|l| l.starts_with("export type GetUserAggregateType")).unwrap(),
            @"export type GetUserAggregateType<T extends UserAggregateArgs> = { [P in keyof T & keyof AggregateUser]: P extends '_count' | 'count' ? T[P] extends true ? number : Prisma.GetScalarType<T[P], AggregateUser[P]> : Prisma.GetScalarType<T[P], AggregateUser[P]> }"
        );
    }

    #[test]
    fn test_group_by_payload_is_private() {
        let source = render("User");
        assert!(!source.contains("export type GetUserGroupByPayload"));
        assert!(source.contains("Prisma.PickEnumerable<UserGroupByOutputType, T['by']> & { [P in keyof T & keyof UserGroupByOutputType]: P extends '_count' ? T[P] extends boolean ? number"));
    }

    #[test]
    fn test_model_without_aggregates_has_none() {
        assert_eq!(render("Post"), "");
    }
}
