//! The model delegate (`prisma.user.*`) and its fluent promise client.

use super::context::GenerateContext;
use super::jsdoc::{DocNames, action_doc};
use super::naming::{
    aggregate_get_name, aggregate_output_name, delegate_name, field_args_name, field_refs_name,
    fluent_client_name, group_by_payload_name, model_args_name, payload_name,
};
use super::{ext_args, ext_args_param, global_omit_param};
use crate::dmmf::{MODEL_NAMESPACE, ModelAction, PRISMA_NAMESPACE, SchemaField, TypeLocation};
use crate::ts::{
    DocComment, Export, FunctionType, GenericParameter, IndexSignature, Interface, Member, Method,
    NamedType, Parameter, Property, TypeBuilder, conditional, export, generic, named, never, null,
    object, string_literal, to_source, union,
};
use strum::IntoEnumIterator;
use tracing::trace;

const GROUP_BY_SIGNATURE: &str = r#"groupBy<
  T extends {Model}GroupByArgs,
  HasSelectOrTake extends Prisma.Or<
    Prisma.Extends<'skip', Prisma.Keys<T>>,
    Prisma.Extends<'take', Prisma.Keys<T>>
  >,
  OrderByArg extends Prisma.True extends HasSelectOrTake
    ? { orderBy: {Model}GroupByArgs['orderBy'] }
    : { orderBy?: {Model}GroupByArgs['orderBy'] },
  OrderFields extends Prisma.ExcludeUnderscoreKeys<Prisma.Keys<Prisma.MaybeTupleToUnion<T['orderBy']>>>,
  ByFields extends Prisma.MaybeTupleToUnion<T['by']>,
  ByValid extends Prisma.Has<ByFields, OrderFields>,
  HavingFields extends Prisma.GetHavingFields<T['having']>,
  HavingValid extends Prisma.Has<ByFields, HavingFields>,
  ByEmpty extends T['by'] extends never[] ? Prisma.True : Prisma.False,
  InputErrors extends ByEmpty extends Prisma.True
  ? `Error: "by" must not be empty.`
  : HavingValid extends Prisma.False
  ? {
      [P in HavingFields]: P extends ByFields
        ? never
        : P extends string
        ? `Error: Field "${P}" used in "having" needs to be provided in "by".`
        : [
            Error,
            'Field ',
            P,
            ` in "having" needs to be provided in "by"`,
          ]
    }[HavingFields]
  : 'take' extends Prisma.Keys<T>
  ? 'orderBy' extends Prisma.Keys<T>
    ? ByValid extends Prisma.True
      ? {}
      : {
          [P in OrderFields]: P extends ByFields
            ? never
            : `Error: Field "${P}" in "orderBy" needs to be provided in "by"`
        }[OrderFields]
    : 'Error: If you provide "take", you also need to provide "orderBy"'
  : 'skip' extends Prisma.Keys<T>
  ? 'orderBy' extends Prisma.Keys<T>
    ? ByValid extends Prisma.True
      ? {}
      : {
          [P in OrderFields]: P extends ByFields
            ? never
            : `Error: Field "${P}" in "orderBy" needs to be provided in "by"`
        }[OrderFields]
    : 'Error: If you provide "skip", you also need to provide "orderBy"'
  : ByValid extends Prisma.True
  ? {}
  : {
      [P in OrderFields]: P extends ByFields
        ? never
        : `Error: Field "${P}" in "orderBy" needs to be provided in "by"`
    }[OrderFields]
>(args: Prisma.SubsetIntersection<T, {Model}GroupByArgs, OrderByArg> & InputErrors): {} extends InputErrors ? {GroupByPayload}<T> : Prisma.PrismaPromise<InputErrors>"#;

/// `runtime.Types.Result.GetResult<Prisma.$UserPayload<ExtArgs>, T, 'findMany', GlobalOmitOptions>`
fn get_result(model: &str, operation: &str) -> TypeBuilder {
    let payload = NamedType::new(format!("Prisma.{}", payload_name(model))).arg(ext_args());
    generic(
        "runtime.Types.Result.GetResult",
        [
            payload.into(),
            named("T"),
            string_literal(operation),
            named("GlobalOmitOptions"),
        ],
    )
}

fn prisma_promise(ty: TypeBuilder) -> TypeBuilder {
    generic("Prisma.PrismaPromise", [ty])
}

/// `Prisma.Prisma__UserClient<Result, Null, ExtArgs, GlobalOmitOptions>`
fn fluent_client(model: &str, result: TypeBuilder, null_type: TypeBuilder) -> TypeBuilder {
    generic(
        format!("Prisma.{}", fluent_client_name(model)),
        [result, null_type, ext_args(), named("GlobalOmitOptions")],
    )
}

fn action_return_type(ctx: &GenerateContext<'_>, model: &str, action: ModelAction) -> TypeBuilder {
    use ModelAction::*;
    let result = || get_result(model, action.as_str());
    match action {
        FindUnique | FindFirst => fluent_client(model, result().nullable(), null()),
        FindUniqueOrThrow | FindFirstOrThrow | Create | Delete | Update | Upsert => {
            fluent_client(model, result(), never())
        }
        FindMany | CreateManyAndReturn | UpdateManyAndReturn => prisma_promise(result()),
        CreateMany | UpdateMany | DeleteMany => prisma_promise(named("Prisma.BatchPayload")),
        Count => {
            let select = named("T").subscript(string_literal("select"));
            let count_output = aggregate_output_name(model, "Count");
            let selected = if ctx.dmmf.output_type(PRISMA_NAMESPACE, &count_output).is_some() {
                generic("Prisma.GetScalarType", [select.clone(), named(count_output)])
            } else {
                named("number")
            };
            prisma_promise(conditional(
                named("T"),
                generic(
                    "runtime.Types.Utils.Record",
                    [string_literal("select"), named("any")],
                ),
                conditional(select, named("true"), named("number"), selected),
                named("number"),
            ))
        }
        Aggregate => prisma_promise(generic(aggregate_get_name(model), [named("T")])),
        FindRaw | AggregateRaw => prisma_promise(named("Prisma.JsonObject")),
        GroupBy => prisma_promise(generic(group_by_payload_name(model), [named("T")])),
    }
}

fn action_method(ctx: &GenerateContext<'_>, names: &DocNames, model: &str, action: ModelAction) -> Member {
    let doc = action_doc(names, model, action);
    let args_name = model_args_name(model, Some(action));

    // The groupBy signature validates `by`, `having` and `orderBy` against
    // each other and is kept as a template.
    if action == ModelAction::GroupBy {
        let signature = GROUP_BY_SIGNATURE
            .replace("{Model}", model)
            .replace("{GroupByPayload}", &group_by_payload_name(model));
        return Member::raw(format!("{}{}", to_source(&doc), signature));
    }

    if matches!(action, ModelAction::FindRaw | ModelAction::AggregateRaw) {
        let param = Parameter::new("args", named(args_name)).optional();
        return Method::new(action.as_str(), action_return_type(ctx, model, action))
            .parameter(param)
            .doc(doc)
            .into();
    }

    let args_type = match action {
        ModelAction::Count | ModelAction::Aggregate => {
            generic("Prisma.Subset", [named("T"), named(&args_name)])
        }
        _ => {
            let with_ext = NamedType::new(&args_name).arg(ext_args());
            generic("Prisma.SelectSubset", [named("T"), with_ext.into()])
        }
    };
    let mut param = Parameter::new("args", args_type);
    if action.has_optional_args() {
        param = param.optional();
    }
    Method::new(action.as_str(), action_return_type(ctx, model, action))
        .generic(GenericParameter::new("T").extends(named(args_name)))
        .parameter(param)
        .doc(doc)
        .into()
}

/// `UserDelegate`: one method per mapped action plus the field references.
pub fn delegate_interface(ctx: &GenerateContext<'_>, model: &str) -> Export<Interface> {
    let names = DocNames::new(ctx.dmmf, model);
    let type_map_entry = generic("Prisma.TypeMap", [ext_args()])
        .subscript(string_literal("model"))
        .subscript(string_literal(model));
    let marker = object()
        .property("types", type_map_entry)
        .property("meta", object().property("name", string_literal(model)).inline().into())
        .inline();

    let mut delegate = Interface::new(delegate_name(model))
        .generic(ext_args_param())
        .generic(global_omit_param())
        .add(IndexSignature {
            key_name: "K".into(),
            key_type: named("symbol"),
            value: marker.into(),
        });

    for action in ModelAction::iter().filter(|a| ctx.dmmf.has_action(model, *a)) {
        trace!(model, action = %action, "Delegate method");
        delegate.add_member(action_method(ctx, &names, model, action));
    }

    delegate.add_member(
        Property::new("fields", named(field_refs_name(model)))
            .readonly()
            .doc(DocComment::new(&format!("Fields of the {} model", model))),
    );
    export(delegate)
}

fn is_fluent_relation(ctx: &GenerateContext<'_>, field: &SchemaField) -> bool {
    field.output_type.location == TypeLocation::OutputObjectTypes
        && field.name != "_count"
        && !ctx.dmmf.is_composite_type(&field.output_type.type_name)
}

/// `posts<T extends ...>(args?): ...` on the fluent client.
fn relation_method(model: &str, field: &SchemaField) -> Method {
    let target = &field.output_type.type_name;
    let args_name = format!("Prisma.{}", field_args_name(field, model));
    let args_type: TypeBuilder = NamedType::new(&args_name).arg(ext_args()).into();

    let return_type = if field.output_type.is_list {
        prisma_promise(get_result(target, "findMany").or(named("Null")))
    } else {
        let mut result = get_result(target, "findUniqueOrThrow").or(named("Null"));
        let null_type = if field.is_nullable {
            result = result.or(null());
            null()
        } else {
            named("Null")
        };
        fluent_client(target, result, null_type)
    };

    Method::new(&field.name, return_type)
        .generic(GenericParameter::new("T").extends(args_type.clone()).default(object().into()))
        .parameter(Parameter::new("args", generic("Prisma.Subset", [named("T"), args_type])).optional())
}

/// `(value: T) => TResult | PromiseLike<TResult>`, optional and nullable.
fn promise_callback(param: Option<(&str, TypeBuilder)>, result: TypeBuilder) -> TypeBuilder {
    let mut callback = FunctionType::new(result);
    if let Some((name, ty)) = param {
        callback = callback.parameter(Parameter::new(name, ty));
    }
    union([callback.into(), named("undefined"), null()])
}

fn promise_methods() -> Vec<Method> {
    let settles = |name: &str| {
        named(name).or(generic("PromiseLike", [named(name)]))
    };
    let then = Method::new(
        "then",
        generic("runtime.Types.Utils.JsPromise", [named("TResult1").or(named("TResult2"))]),
    )
    .generic(GenericParameter::new("TResult1").default(named("T")))
    .generic(GenericParameter::new("TResult2").default(never()))
    .parameter(
        Parameter::new("onfulfilled", promise_callback(Some(("value", named("T"))), settles("TResult1")))
            .optional(),
    )
    .parameter(
        Parameter::new("onrejected", promise_callback(Some(("reason", named("any"))), settles("TResult2")))
            .optional(),
    )
    .doc(DocComment::new(
        "Attaches callbacks for the resolution and/or rejection of the Promise.
@param onfulfilled The callback to execute when the Promise is resolved.
@param onrejected The callback to execute when the Promise is rejected.
@returns A Promise for the completion of which ever callback is executed.",
    ));

    let catch = Method::new(
        "catch",
        generic("runtime.Types.Utils.JsPromise", [named("T").or(named("TResult"))]),
    )
    .generic(GenericParameter::new("TResult").default(never()))
    .parameter(
        Parameter::new("onrejected", promise_callback(Some(("reason", named("any"))), settles("TResult")))
            .optional(),
    )
    .doc(DocComment::new(
        "Attaches a callback for only the rejection of the Promise.
@param onrejected The callback to execute when the Promise is rejected.
@returns A Promise for the completion of the callback.",
    ));

    let finally = Method::new("finally", generic("runtime.Types.Utils.JsPromise", [named("T")]))
        .parameter(Parameter::new("onfinally", promise_callback(None, named("void"))).optional())
        .doc(DocComment::new(
            "Attaches a callback that is invoked when the Promise is settled (fulfilled or rejected). The
resolved value cannot be modified from the callback.
@param onfinally The callback to execute when the Promise is settled (fulfilled or rejected).
@returns A Promise for the completion of the callback.",
        ));

    vec![then, catch, finally]
}

/// `Prisma__UserClient`: the promise returned by single-record actions,
/// with one method per relation to continue the query from.
pub fn fluent_client_interface(ctx: &GenerateContext<'_>, model: &str) -> Export<Interface> {
    let mut client = Interface::new(fluent_client_name(model))
        .generic(GenericParameter::new("T"))
        .generic(GenericParameter::new("Null").default(never()))
        .generic(ext_args_param())
        .generic(global_omit_param())
        .extends(generic("Prisma.PrismaPromise", [named("T")]))
        .add(Property::new("Symbol.toStringTag", string_literal("PrismaPromise")).readonly().computed())
        .doc(DocComment::new(&format!(
            "The delegate class that acts as a \"Promise-like\" for {model}.
Why is this prefixed with `Prisma__`?
Because we want to prevent naming conflicts as mentioned in
https://github.com/prisma/prisma-client-js/issues/707"
        )));

    if let Some(output_type) = ctx.dmmf.output_type(MODEL_NAMESPACE, model) {
        for field in output_type.fields.iter().filter(|f| is_fluent_relation(ctx, f)) {
            client.add_member(relation_method(model, field));
        }
    }
    for method in promise_methods() {
        client.add_member(method);
    }
    export(client)
}
