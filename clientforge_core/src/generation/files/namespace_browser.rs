//! `internal/prismaNamespaceBrowser`: the runtime-free subset of the
//! namespace that is safe to bundle for browsers.

use super::common::{ValueAndType, null_types};
use crate::dmmf::PRISMA_NAMESPACE;
use crate::generation::context::GenerateContext;
use crate::generation::enums::{model_name_enum, prisma_enum};
use crate::ts::{DocComment, ExportFrom, Import, SourceFile};

pub const NAMESPACE_BROWSER_MODULE: &str = "internal/prismaNamespaceBrowser";

const HEADER: &str = "WARNING: This is an internal file that is subject to change!

🛑 Under no circumstances should you import this file directly! 🛑

All exports from this file are wrapped under a `Prisma` namespace object in the browser.ts file.
While this enables partial backward compatibility, it is not part of the stable public API.

If you are looking for your Models, Enums, and Input Types, please import them from the respective
model files in the `model` directory!";

pub fn namespace_browser_file(ctx: &GenerateContext<'_>) -> SourceFile {
    let mut file = SourceFile::new();
    file.set_header(DocComment::new(HEADER));
    file.add_import(Import::namespace("runtime", ctx.browser_runtime_import_from(1)));
    file.add_export_from(ExportFrom::all(ctx.import_file_name("../models")).type_only());
    file.add_export_from(ExportFrom::all(ctx.import_file_name("./prismaNamespace")).type_only());

    file.add(ValueAndType::runtime("Decimal"));
    file.extend(null_types());
    file.add(model_name_enum(
        ctx.dmmf.mappings().model_operations.iter().map(|m| m.model.as_str()),
    ));
    file.add(DocComment::new("Enums"));
    file.extend(ctx.dmmf.enum_types(PRISMA_NAMESPACE).iter().map(prisma_enum));
    file
}
