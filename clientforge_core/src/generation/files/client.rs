//! `client` and `browser`: the two public entry points.

use super::barrels::ENUMS_MODULE;
use super::class::{CLASS_MODULE, client_doc};
use super::namespace::NAMESPACE_MODULE;
use super::namespace_browser::NAMESPACE_BROWSER_MODULE;
use crate::generation::context::GenerateContext;
use crate::generation::naming::model_type_name;
use crate::layout::ModuleFormat;
use crate::ts::{
    ConstDeclaration, DocComment, Export, ExportFrom, GenericParameter, Import, NamedItem, Raw, SourceFile,
    TypeBuilder, TypeDeclaration, export, generic, named, string_literal, to_source, value,
};

pub const CLIENT_MODULE: &str = "client";
pub const BROWSER_MODULE: &str = "browser";

/// `export type User = Prisma.UserModel` for every model.
fn model_aliases(ctx: &GenerateContext<'_>) -> Vec<Export<TypeDeclaration>> {
    ctx.dmmf
        .models()
        .iter()
        .map(|model| {
            export(
                TypeDeclaration::new(&model.name, named(format!("Prisma.{}", model_type_name(&model.name))))
                    .doc(DocComment::new(&format!("Model {}", model.name))),
            )
        })
        .collect()
}

fn enum_exports(ctx: &GenerateContext<'_>, file: &mut SourceFile) {
    let enums = ctx.import_file_name(&format!("./{}", ENUMS_MODULE));
    file.add_export_from(ExportFrom::all_as("$Enums", enums.clone()))
        .add_export_from(ExportFrom::all(enums));
}

/// ES modules have no `__dirname`; non-edge targets recreate it from
/// `import.meta.url` before the client class reads it.
fn needs_dirname_shim(ctx: &GenerateContext<'_>) -> bool {
    ctx.module_format == ModuleFormat::Esm && !ctx.target.is_edge()
}

fn omit_option() -> TypeBuilder {
    named("Prisma.PrismaClientOptions").subscript(string_literal("omit"))
}

/// `export type PrismaClient<...> = $Class.PrismaClient<...>`
fn client_type_alias() -> TypeDeclaration {
    TypeDeclaration::new(
        "PrismaClient",
        generic(
            "$Class.PrismaClient",
            [named("LogOpts"), named("OmitOpts"), named("ExtArgs")],
        ),
    )
    .generic(
        GenericParameter::new("LogOpts")
            .extends(named("Prisma.LogLevel"))
            .default(named("never")),
    )
    .generic(
        GenericParameter::new("OmitOpts")
            .extends(omit_option())
            .default(omit_option()),
    )
    .generic(crate::generation::ext_args_param())
}

pub fn client_file(ctx: &GenerateContext<'_>) -> SourceFile {
    let mut file = SourceFile::new();
    file.set_header(DocComment::new(
        "This file should be your main import to use Prisma. Through it you get access to all the models, enums, and input types.
If you're looking for something you can import in the client-side of your application, please refer to the `browser.ts` file instead.

🟢 You can import this file directly.",
    ));

    let shim = needs_dirname_shim(ctx);
    if shim {
        file.add_import(Import::namespace("path", "node:path"))
            .add_import(Import::named(vec![NamedItem::new("fileURLToPath")], "node:url"));
    }
    file.add_import(Import::namespace("runtime", ctx.runtime_import_from(0)))
        .add_import(Import::namespace("$Enums", ctx.import_file_name(&format!("./{}", ENUMS_MODULE))))
        .add_import(Import::namespace("$Class", ctx.import_file_name(&format!("./{}", CLASS_MODULE))))
        .add_import(Import::namespace("Prisma", ctx.import_file_name(&format!("./{}", NAMESPACE_MODULE))));
    enum_exports(ctx, &mut file);

    if shim {
        file.add(Raw::new("globalThis['__dirname'] = path.dirname(fileURLToPath(import.meta.url))"));
    }

    let factory = if ctx.target.is_edge() {
        "$Class.getPrismaClientClass()"
    } else {
        "$Class.getPrismaClientClass(__dirname)"
    };
    file.add(Raw::new(format!(
        "{}\n{}",
        to_source(&client_doc(ctx)).trim_end(),
        to_source(&export(ConstDeclaration::new("PrismaClient", value(factory))))
    )));
    file.add(export(client_type_alias()));
    file.add(Raw::new("export { Prisma }"));
    file.extend(model_aliases(ctx));
    file
}

pub fn browser_file(ctx: &GenerateContext<'_>) -> SourceFile {
    let mut file = SourceFile::new();
    file.set_header(DocComment::new(
        "This file should be your main import to use Prisma-related types and utilities in a browser.
Use it to get access to models, enums, and input types.

This file does not contain a `PrismaClient` class, nor several other helpers that are intended as server-side only.
See `client.ts` for the standard, server-side entry point.

🟢 You can import this file directly.",
    ));
    file.add_import(Import::namespace(
        "Prisma",
        ctx.import_file_name(&format!("./{}", NAMESPACE_BROWSER_MODULE)),
    ));
    enum_exports(ctx, &mut file);
    file.add(Raw::new("export { Prisma }"));
    file.extend(model_aliases(ctx));
    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::context::ContextSettings;
    use crate::generation::test_support::blog_helper;
    use crate::layout::RuntimeTarget;

    fn client_source(settings: ContextSettings) -> String {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, settings);
        to_source(&client_file(&ctx))
    }

    #[test]
    fn test_esm_client_recreates_dirname() {
        let source = client_source(ContextSettings::builder().build());
        assert!(source.contains("import * as path from 'node:path'\nimport { fileURLToPath } from 'node:url'\n"));
        assert!(source.contains("globalThis['__dirname'] = path.dirname(fileURLToPath(import.meta.url))"));
        assert!(source.contains("export const PrismaClient = $Class.getPrismaClientClass(__dirname)"));
    }

    #[test]
    fn test_cjs_and_edge_clients_skip_the_shim() {
        let cjs = client_source(ContextSettings::builder().module_format(ModuleFormat::Cjs).build());
        assert!(!cjs.contains("node:path"));
        assert!(cjs.contains("$Class.getPrismaClientClass(__dirname)"));

        let edge = client_source(ContextSettings::builder().target(RuntimeTarget::Workerd).build());
        assert!(!edge.contains("import.meta.url"));
        assert!(edge.contains("export const PrismaClient = $Class.getPrismaClientClass()"));
    }

    #[test]
    fn test_client_exports() {
        let source = client_source(ContextSettings::builder().build());
        assert!(source.contains("export * as $Enums from './enums.js'\nexport * from './enums.js'\n"));
        assert!(source.contains("import * as Prisma from './internal/prismaNamespace.js'\n"));
        assert!(source.contains("export { Prisma }"));
        assert!(source.contains("/**\n * Model User\n */\nexport type User = Prisma.UserModel"));
        assert!(source.contains(
            "export type PrismaClient<LogOpts extends Prisma.LogLevel = never, OmitOpts extends Prisma.PrismaClientOptions['omit'] = Prisma.PrismaClientOptions['omit'], ExtArgs extends runtime.Types.Extensions.InternalArgs = runtime.Types.Extensions.DefaultArgs> = $Class.PrismaClient<LogOpts, OmitOpts, ExtArgs>"
        ));
    }

    #[test]
    fn test_browser_entry_point() {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, ContextSettings::builder().build());
        let source = to_source(&browser_file(&ctx));
        assert!(source.contains("import * as Prisma from './internal/prismaNamespaceBrowser.js'\n"));
        assert!(source.contains("export type Post = Prisma.PostModel"));
        assert!(!source.contains("getPrismaClientClass"));
        assert!(!source.contains("runtime"));
    }
}
