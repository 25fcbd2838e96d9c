//! Argument types: one per delegate action, one per relation field taking
//! arguments, and the `DefaultArgs` used wherever a relation is selected.

use super::context::GenerateContext;
use super::input::input_field;
use super::jsdoc::{DocNames, arg_field_doc};
use super::naming::{
    aggregate_input_name, aggregate_output_name, and_return_output_name, count_args_name,
    count_output_type_name, include_and_return_name, include_name, model_args_name,
    model_field_args_name, omit_name, select_and_return_name, select_name,
};
use super::output::output_type_declaration;
use super::select::include_fields;
use super::{ext_args, ext_args_param};
use crate::dmmf::{MODEL_NAMESPACE, ModelAction, OutputType, PRISMA_NAMESPACE, SchemaArg};
use crate::ts::{
    BasicBuilder, DocComment, Export, NamedType, ObjectType, Property, TypeBuilder, TypeDeclaration,
    export, generic, intersection, named, object, string_literal_union,
};
use strum::IntoEnumIterator;
use tracing::trace;

/// Incrementally assembled `XArgs<ExtArgs> = { ... }` declaration.
pub struct ArgsTypeBuilder<'c, 'a> {
    ctx: &'c GenerateContext<'a>,
    output_type: &'c OutputType,
    action: Option<ModelAction>,
    names: DocNames,
    name: String,
    doc: String,
    body: ObjectType,
}

fn selection_arg(name: &str, type_name: &str, doc: String) -> Property {
    let ty = NamedType::new(format!("Prisma.{}", type_name)).arg(ext_args());
    Property::new(name, TypeBuilder::from(ty).nullable())
        .optional()
        .doc(DocComment::new(&doc))
}

impl<'c, 'a> ArgsTypeBuilder<'c, 'a> {
    pub fn new(ctx: &'c GenerateContext<'a>, output_type: &'c OutputType, action: Option<ModelAction>) -> Self {
        let type_name = &output_type.name;
        let doc = match action {
            Some(action) => format!("{} {}", type_name, action.as_str()),
            None => format!("{} without action", type_name),
        };
        Self {
            ctx,
            output_type,
            action,
            names: DocNames::new(ctx.dmmf, type_name),
            name: model_args_name(type_name, action),
            doc,
            body: object(),
        }
    }

    pub fn select(mut self, select_type: Option<String>) -> Self {
        let type_name = &self.output_type.name;
        let select_type = select_type.unwrap_or_else(|| select_name(type_name));
        let doc = format!("Select specific fields to fetch from the {}", type_name);
        self.body.add_member(selection_arg("select", &select_type, doc));
        self
    }

    pub fn omit(mut self) -> Self {
        let type_name = &self.output_type.name;
        let doc = format!("Omit specific fields from the {}", type_name);
        self.body.add_member(selection_arg("omit", &omit_name(type_name), doc));
        self
    }

    /// Adds `include` when `fields_of` has relations to include.
    pub fn include_if_has_relations(mut self, include_type: Option<String>, fields_of: Option<&OutputType>) -> Self {
        let fields_of = fields_of.unwrap_or(self.output_type);
        if include_fields(self.ctx, &fields_of.fields).is_empty() {
            return self;
        }
        let include_type = include_type.unwrap_or_else(|| include_name(&self.output_type.name));
        let doc = "Choose, which related nodes to fetch as well".to_string();
        self.body.add_member(selection_arg("include", &include_type, doc));
        self
    }

    pub fn schema_args(mut self, args: &[SchemaArg]) -> Self {
        for arg in args {
            let doc = arg_field_doc(&self.names, self.action, &arg.name);
            self.body.add_member(input_field(self.ctx, arg, None, doc));
        }
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn comment(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn build(self) -> Export<TypeDeclaration> {
        trace!(args = %self.name, "Building args type");
        export(
            TypeDeclaration::new(self.name, self.body)
                .generic(ext_args_param())
                .doc(DocComment::new(&self.doc)),
        )
    }
}

/// Actions whose arguments take no selection at all.
fn is_bulk_or_raw(action: ModelAction) -> bool {
    matches!(
        action,
        ModelAction::CreateMany
            | ModelAction::UpdateMany
            | ModelAction::DeleteMany
            | ModelAction::FindRaw
            | ModelAction::AggregateRaw
    )
}

/// Args of every mapped action of `model`, in delegate order. `aggregate`,
/// `groupBy` and `count` have dedicated declarations.
pub fn action_args_declarations(ctx: &GenerateContext<'_>, model: &str) -> Vec<Export<TypeDeclaration>> {
    let dmmf = ctx.dmmf;
    let Some(output_type) = dmmf.output_type(MODEL_NAMESPACE, model) else {
        return Vec::new();
    };
    let mut declarations = Vec::new();
    for action in ModelAction::iter() {
        if matches!(action, ModelAction::Aggregate | ModelAction::GroupBy | ModelAction::Count) {
            continue;
        }
        let Some(field) = dmmf.model_action_field(model, action) else {
            continue;
        };
        let mut builder = ArgsTypeBuilder::new(ctx, output_type, Some(action));
        if action.is_and_return() {
            let and_return = and_return_output_name(model, action)
                .and_then(|name| dmmf.output_type(MODEL_NAMESPACE, &name));
            builder = builder
                .select(Some(select_and_return_name(model, action)))
                .omit()
                .include_if_has_relations(Some(include_and_return_name(model, action)), and_return);
        } else if !is_bulk_or_raw(action) {
            builder = builder.select(None).omit().include_if_has_relations(None, None);
        }
        declarations.push(builder.schema_args(&field.args).build());
    }
    declarations
}

/// `User$postsArgs` for every relation field of `output_type` taking
/// arguments.
pub fn relation_field_args_declarations(ctx: &GenerateContext<'_>, output_type: &OutputType) -> Vec<Export<TypeDeclaration>> {
    output_type
        .fields
        .iter()
        .filter(|field| !field.args.is_empty())
        .filter_map(|field| {
            let target = ctx.dmmf.resolve_output_object_type(&field.output_type)?;
            // The `_count` field is selected through its own count args.
            if target.name == count_output_type_name(&output_type.name) {
                return None;
            }
            let declaration = ArgsTypeBuilder::new(ctx, target, None)
                .select(None)
                .omit()
                .include_if_has_relations(None, None)
                .schema_args(&field.args)
                .name(model_field_args_name(&output_type.name, &field.name))
                .comment(format!("{}.{}", output_type.name, field.name))
                .build();
            Some(declaration)
        })
        .collect()
}

/// `UserDefaultArgs`, the args of a relation selected without arguments.
pub fn default_args_declaration(ctx: &GenerateContext<'_>, output_type: &OutputType) -> Export<TypeDeclaration> {
    let builder = ArgsTypeBuilder::new(ctx, output_type, None).select(None).omit();
    if ctx.dmmf.is_composite_type(&output_type.name) {
        builder.build()
    } else {
        builder.include_if_has_relations(None, None).build()
    }
}

/// `UserCountArgs`: `findMany` args narrowed to what `count` accepts.
pub fn count_args_declaration(ctx: &GenerateContext<'_>, model: &str) -> Option<Export<TypeDeclaration>> {
    let dmmf = ctx.dmmf;
    if !dmmf.has_action(model, ModelAction::Count) || !dmmf.has_action(model, ModelAction::FindMany) {
        return None;
    }
    let find_many = named(model_args_name(model, Some(ModelAction::FindMany)));
    let omitted = generic(
        "Omit",
        [find_many, string_literal_union(["select", "include", "distinct", "omit"])],
    );
    let count_output = aggregate_output_name(model, "Count");
    let select = if dmmf.output_type(PRISMA_NAMESPACE, &count_output).is_some() {
        named(aggregate_input_name(&count_output)).or(named("true"))
    } else {
        named("true")
    };
    let narrowed = object().add(
        Property::new("select", select)
            .optional()
            .doc(DocComment::new("Select specific fields to fetch from the count.")),
    );
    Some(export(
        TypeDeclaration::new(
            model_args_name(model, Some(ModelAction::Count)),
            intersection([omitted, narrowed.into()]),
        )
        .generic(ext_args_param()),
    ))
}

type Item = Box<dyn BasicBuilder + Send + Sync>;

/// `UserCountOutputType` and the types selecting from it.
pub fn count_output_declarations(ctx: &GenerateContext<'_>, model: &str) -> Vec<Item> {
    let name = count_output_type_name(model);
    let Some(count_type) = ctx.dmmf.output_type(PRISMA_NAMESPACE, &name) else {
        return Vec::new();
    };

    let mut select = object();
    for field in &count_type.fields {
        let mut ty = named("boolean");
        if !field.args.is_empty() {
            ty = ty.or(NamedType::new(count_args_name(&name, &field.name)).arg(ext_args()).into());
        }
        select.add_member(Property::new(&field.name, ty).optional());
    }

    let mut items: Vec<Item> = vec![
        Box::new(export(
            output_type_declaration(count_type)
                .0
                .doc(DocComment::new(&format!("Count Type {}", name))),
        )),
        Box::new(export(
            TypeDeclaration::new(select_name(&name), select).generic(ext_args_param()),
        )),
        Box::new(
            ArgsTypeBuilder::new(ctx, count_type, None)
                .select(None)
                .build(),
        ),
    ];
    for field in count_type.fields.iter().filter(|f| !f.args.is_empty()) {
        let declaration = ArgsTypeBuilder::new(ctx, count_type, None)
            .schema_args(&field.args)
            .name(count_args_name(&name, &field.name))
            .build();
        items.push(Box::new(declaration));
    }
    items
}
