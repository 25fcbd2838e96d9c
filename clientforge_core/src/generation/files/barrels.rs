//! Aggregate modules: `enums`, `models` and `commonInputTypes`.

use crate::generation::context::GenerateContext;
use crate::generation::enums::model_enum;
use crate::generation::input::input_type_declarations;
use crate::generation::model_file::model_module_path;
use crate::ts::{DocComment, ExportFrom, Import, SourceFile};

pub const ENUMS_MODULE: &str = "enums";
pub const MODELS_MODULE: &str = "models";
pub const COMMON_INPUT_TYPES_MODULE: &str = "commonInputTypes";

pub fn enums_file(ctx: &GenerateContext<'_>) -> SourceFile {
    let mut file = SourceFile::new();
    file.set_header(DocComment::new(
        "This file exports all enum related types from the schema.

🟢 You can import this file directly.",
    ));
    file.extend(ctx.dmmf.datamodel_enums().iter().map(model_enum));
    file
}

/// `export type * from './models/User'` for every model module plus the
/// shared input types.
pub fn models_file(ctx: &GenerateContext<'_>) -> SourceFile {
    let dmmf = ctx.dmmf;
    let mut file = SourceFile::new();
    file.set_header(DocComment::new(
        "This is a barrel export file for all models and their related types.

🟢 You can import this file directly.",
    ));
    let names = dmmf
        .models()
        .iter()
        .chain(dmmf.composite_types())
        .map(|m| m.name.as_str());
    for name in names {
        let specifier = ctx.import_file_name(&format!("./{}", model_module_path(name)));
        file.add_export_from(ExportFrom::all(specifier).type_only());
    }
    file.add_export_from(
        ExportFrom::all(ctx.import_file_name(&format!("./{}", COMMON_INPUT_TYPES_MODULE))).type_only(),
    );
    file
}

/// Input types that do not belong to a single model.
pub fn common_input_types_file(ctx: &GenerateContext<'_>) -> SourceFile {
    let mut file = SourceFile::new();
    file.set_header(DocComment::new(
        "This file exports various common sort, input & filter types that are not directly linked to a particular model.

🟢 You can import this file directly.",
    ));
    file.add_import(Import::namespace("runtime", ctx.runtime_import_from(0)).type_only())
        .add_import(Import::namespace("$Enums", ctx.import_file_name("./enums")).type_only())
        .add_import(
            Import::namespace("Prisma", ctx.import_file_name("./internal/prismaNamespace")).type_only(),
        );

    for input_type in ctx.dmmf.all_input_types().filter(|t| t.grouping().is_none()) {
        file.extend(input_type_declarations(ctx, input_type));
    }
    file
}
