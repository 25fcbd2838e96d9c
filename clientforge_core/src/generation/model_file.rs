//! One module per model (`models/User`) and per composite type.

use super::aggregate::aggregate_declarations;
use super::args::{
    action_args_declarations, count_args_declaration, count_output_declarations,
    default_args_declaration, relation_field_args_declarations,
};
use super::context::GenerateContext;
use super::delegate::{delegate_interface, fluent_client_interface};
use super::field_refs::model_field_refs;
use super::input::input_type_declarations;
use super::naming::{
    and_return_output_name, include_and_return_name, include_name, model_type_name, payload_name,
    select_and_return_name, select_name,
};
use super::select::{
    get_payload_type, include_fields, include_type, omit_type, payload_type, select_scalar_type,
    select_type,
};
use crate::dmmf::{MODEL_NAMESPACE, Model, ModelAction};
use crate::error::{ClientforgeError, Result};
use crate::ts::{DocComment, Import, SourceFile, TypeDeclaration, export, generic, named};
use tracing::{debug, trace};

/// Directory model modules live in, relative to the output root.
pub const MODELS_DIR: &str = "models";

pub fn model_module_path(model: &str) -> String {
    format!("{}/{}", MODELS_DIR, model)
}

fn model_file_imports(ctx: &GenerateContext<'_>, file: &mut SourceFile) {
    file.add_import(Import::namespace("runtime", ctx.runtime_import_from(1)).type_only())
        .add_import(Import::namespace("$Enums", ctx.import_file_name("../enums")).type_only())
        .add_import(
            Import::namespace("Prisma", ctx.import_file_name("../internal/prismaNamespace")).type_only(),
        );
}

fn file_header(model: &str, kind: &str) -> DocComment {
    DocComment::new(&format!(
        "This file exports the `{model}` {kind} and its related types.

🟢 You can import this file directly."
    ))
}

fn add_grouped_input_types(ctx: &GenerateContext<'_>, file: &mut SourceFile, name: &str) {
    for input_type in ctx
        .dmmf
        .all_input_types()
        .filter(|t| t.grouping() == Some(name))
    {
        file.extend(input_type_declarations(ctx, input_type));
    }
}

/// `export type UserModel = runtime.Types.Result.DefaultSelection<Prisma.$UserPayload>`
fn model_alias(model: &Model) -> TypeDeclaration {
    let mut doc = DocComment::new(&format!("Model {}", model.name));
    if let Some(documentation) = &model.documentation {
        doc.add_text(documentation);
    }
    TypeDeclaration::new(
        model_type_name(&model.name),
        generic(
            "runtime.Types.Result.DefaultSelection",
            [named(format!("Prisma.{}", payload_name(&model.name)))],
        ),
    )
    .doc(doc)
}

pub fn model_file(ctx: &GenerateContext<'_>, model: &Model) -> Result<SourceFile> {
    let dmmf = ctx.dmmf;
    let name = model.name.as_str();
    let output_type = dmmf
        .output_type(MODEL_NAMESPACE, name)
        .ok_or_else(|| ClientforgeError::missing("output type", name))?;
    trace!(model = name, "Building model file");

    let mut file = SourceFile::new();
    file.set_header(file_header(name, "model"));
    model_file_imports(ctx, &mut file);

    file.add(export(model_alias(model)));
    for item in aggregate_declarations(ctx, name) {
        file.add(item);
    }
    add_grouped_input_types(ctx, &mut file, name);
    for item in count_output_declarations(ctx, name) {
        file.add(item);
    }

    file.add(select_type(name, &select_name(name), &output_type.fields));
    let and_return: Vec<_> = [ModelAction::CreateManyAndReturn, ModelAction::UpdateManyAndReturn]
        .into_iter()
        .filter(|action| dmmf.has_action(name, *action))
        .filter_map(|action| {
            let output = and_return_output_name(name, action)?;
            dmmf.output_type(MODEL_NAMESPACE, &output).map(|t| (action, t))
        })
        .collect();
    for (action, and_return_type) in &and_return {
        file.add(select_type(
            name,
            &select_and_return_name(name, *action),
            &and_return_type.fields,
        ));
    }
    file.add(select_scalar_type(ctx, name, &output_type.fields));
    file.add(omit_type(ctx, name, &output_type.fields));
    if !include_fields(ctx, &output_type.fields).is_empty() {
        file.add(include_type(ctx, name, &include_name(name), &output_type.fields));
    }
    for (action, and_return_type) in &and_return {
        if !include_fields(ctx, &and_return_type.fields).is_empty() {
            file.add(include_type(
                ctx,
                name,
                &include_and_return_name(name, *action),
                &and_return_type.fields,
            ));
        }
    }

    file.add(payload_type(ctx, model));
    file.add(get_payload_type(name));
    if let Some(count_args) = count_args_declaration(ctx, name) {
        file.add(count_args);
    }
    file.add(delegate_interface(ctx, name));
    file.add(fluent_client_interface(ctx, name));
    file.add(model_field_refs(output_type));

    file.extend(action_args_declarations(ctx, name));
    file.extend(relation_field_args_declarations(ctx, output_type));
    file.add(default_args_declaration(ctx, output_type));

    Ok(file)
}

/// Composite types only need their selection, payload and input types.
pub fn composite_type_file(ctx: &GenerateContext<'_>, composite: &Model) -> Result<SourceFile> {
    let name = composite.name.as_str();
    let output_type = ctx
        .dmmf
        .output_type(MODEL_NAMESPACE, name)
        .ok_or_else(|| ClientforgeError::missing("output type", name))?;
    trace!(composite_type = name, "Building composite type file");

    let mut file = SourceFile::new();
    file.set_header(file_header(name, "composite type"));
    model_file_imports(ctx, &mut file);

    file.add(export(model_alias(composite)));
    add_grouped_input_types(ctx, &mut file, name);
    file.add(select_type(name, &select_name(name), &output_type.fields));
    file.add(omit_type(ctx, name, &output_type.fields));
    file.add(payload_type(ctx, composite));
    file.add(get_payload_type(name));
    file.add(default_args_declaration(ctx, output_type));
    Ok(file)
}

/// Every model and composite type module, in datamodel order.
pub fn model_files(ctx: &GenerateContext<'_>) -> Result<Vec<(String, SourceFile)>> {
    use rayon::prelude::*;

    let dmmf = ctx.dmmf;
    let models: Vec<&Model> = dmmf
        .models()
        .iter()
        .filter(|m| dmmf.output_type(MODEL_NAMESPACE, &m.name).is_some())
        .collect();

    let mut files: Vec<(String, SourceFile)> = models
        .par_iter()
        .map(|model| Ok((model_module_path(&model.name), model_file(ctx, model)?)))
        .collect::<Result<Vec<_>>>()?;
    let composites = dmmf
        .composite_types()
        .par_iter()
        .map(|composite| Ok((model_module_path(&composite.name), composite_type_file(ctx, composite)?)))
        .collect::<Result<Vec<_>>>()?;
    files.extend(composites);

    debug!(model_files = files.len(), "Model modules built");
    Ok(files)
}
