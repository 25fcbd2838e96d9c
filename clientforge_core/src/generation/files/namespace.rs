//! `internal/prismaNamespace`: everything the client exposes under `Prisma.*`.

use super::ClientMetadata;
use super::common::{Item, common_declarations};
use crate::dmmf::PRISMA_NAMESPACE;
use crate::generation::context::GenerateContext;
use crate::generation::enums::{model_name_enum, prisma_enum};
use crate::generation::field_refs::field_ref_input;
use crate::generation::naming::{omit_name, uncapitalize};
use crate::generation::type_map::{type_map, type_map_cb};
use crate::ts::{
    ConstDeclaration, DocComment, ExportFrom, FunctionType, GenericParameter, Import, Interface,
    NamedItem, Parameter, Property, SourceFile, TypeBuilder, TypeDeclaration, array, conditional,
    export, generic, named, never, object, string_literal, string_literal_union, union, value,
};

pub const NAMESPACE_MODULE: &str = "internal/prismaNamespace";

const HEADER: &str = "WARNING: This is an internal file that is subject to change!

🛑 Under no circumstances should you import this file directly! 🛑

All exports from this file are wrapped under a `Prisma` namespace object in the client.ts file.
While this enables partial backward compatibility, it is not part of the stable public API.

If you are looking for your Models, Enums, and Input Types, please import them from the respective
model files in the `model` directory!";

const PRISMA_ACTIONS: [&str; 21] = [
    "findUnique",
    "findUniqueOrThrow",
    "findMany",
    "findFirst",
    "findFirstOrThrow",
    "create",
    "createMany",
    "createManyAndReturn",
    "update",
    "updateMany",
    "updateManyAndReturn",
    "upsert",
    "delete",
    "deleteMany",
    "executeRaw",
    "queryRaw",
    "aggregate",
    "count",
    "runCommandRaw",
    "findRaw",
    "groupBy",
];

fn section(title: &str) -> Item {
    Box::new(DocComment::new(title))
}

fn type_alias(name: &str, ty: impl Into<TypeBuilder>) -> Item {
    Box::new(export(TypeDeclaration::new(name, ty)))
}

/// `Datasource` plus one optional override per configured datasource.
fn datasource_types(metadata: &ClientMetadata) -> Vec<Item> {
    let mut datasources = object();
    for datasource in &metadata.datasources {
        datasources = datasources.optional_property(&datasource.name, named("Datasource"));
    }
    vec![
        type_alias("Datasource", object().optional_property("url", named("string"))),
        type_alias("Datasources", datasources),
    ]
}

fn define_extension() -> Item {
    let hook = generic(
        "runtime.Types.Extensions.ExtendsHook",
        [
            string_literal("define"),
            named("TypeMapCb"),
            named("runtime.Types.Extensions.DefaultArgs"),
        ],
    );
    Box::new(export(ConstDeclaration::new(
        "defineExtension",
        value("runtime.Extensions.defineExtension")
            .as_type(named("unknown"))
            .as_type(hook),
    )))
}

const LOG_OPTION_DOC: &str = "
    @example
    ```
    // Defaults to stdout
    log: ['query', 'info', 'warn', 'error']

    // Emit as events
    log: [
      { emit: 'stdout', level: 'query' },
      { emit: 'stdout', level: 'info' },
      { emit: 'stdout', level: 'warn' }
      { emit: 'stdout', level: 'error' }
    ]
    ```
    Read more in our [docs](https://www.prisma.io/docs/reference/tools-and-interfaces/prisma-client/logging#the-log-option).
";

const OMIT_OPTION_DOC: &str = "
    Global configuration for omitting model fields by default.

    @example
    ```
    const prisma = new PrismaClient({
      omit: {
        user: {
          password: true
        }
      }
    })
    ```
";

fn client_options(ctx: &GenerateContext<'_>) -> Interface {
    let datasource_doc = || DocComment::new("Overwrites the datasource url from your schema.prisma file");
    let mut options = Interface::new("PrismaClientOptions")
        .add(Property::new("datasources", named("Datasources")).optional().doc(datasource_doc()))
        .add(Property::new("datasourceUrl", named("string")).optional().doc(datasource_doc()))
        .add(
            Property::new("errorFormat", named("ErrorFormat"))
                .optional()
                .doc(DocComment::new("@default \"colorless\"")),
        )
        .add(
            Property::new("log", array(union([named("LogLevel"), named("LogDefinition")])))
                .optional()
                .doc(DocComment::new(LOG_OPTION_DOC)),
        );

    let mut transaction_options = object()
        .optional_property("maxWait", named("number"))
        .optional_property("timeout", named("number"));
    if ctx.dmmf.has_enum_in_namespace("TransactionIsolationLevel", PRISMA_NAMESPACE) {
        transaction_options =
            transaction_options.optional_property("isolationLevel", named("TransactionIsolationLevel"));
    }
    options.add_member(
        Property::new("transactionOptions", transaction_options.into())
            .optional()
            .doc(DocComment::new(
                "The default values for transactionOptions\nmaxWait ?= 2000\ntimeout ?= 5000",
            )),
    );

    if ctx.runtime_name.supports_driver_adapters() && ctx.is_preview_feature_on("driverAdapters") {
        options.add_member(
            Property::new("adapter", named("runtime.SqlDriverAdapterFactory").nullable())
                .optional()
                .doc(DocComment::new(
                    "Instance of a Driver Adapter, e.g., like one provided by `@prisma/adapter-planetscale`",
                )),
        );
    }

    options.add_member(
        Property::new("omit", named("GlobalOmitConfig"))
            .optional()
            .doc(DocComment::new(OMIT_OPTION_DOC)),
    );
    options
}

/// `GlobalOmitConfig`: per-model omit defaults keyed by delegate name.
fn global_omit_config(ctx: &GenerateContext<'_>) -> Item {
    let mut config = object();
    for mapping in &ctx.dmmf.mappings().model_operations {
        config = config.optional_property(
            uncapitalize(&mapping.model),
            named(format!("Prisma.{}", omit_name(&mapping.model))),
        );
    }
    type_alias("GlobalOmitConfig", config)
}

fn logging_types() -> Vec<Item> {
    let t = || named("T");
    let log_level_or_definition = || union([named("LogLevel"), named("LogDefinition")]);

    let get_log_type = TypeDeclaration::new(
        "GetLogType",
        conditional(
            t(),
            named("LogDefinition"),
            conditional(
                t().subscript(string_literal("emit")),
                string_literal("event"),
                t().subscript(string_literal("level")),
                never(),
            ),
            never(),
        ),
    )
    .generic(GenericParameter::new("T").extends(log_level_or_definition()));

    let events = (0..4).map(|idx| generic("GetLogType", [t().subscript(TypeBuilder::NumberLiteral(idx))]));
    let get_events = TypeDeclaration::new(
        "GetEvents",
        conditional(
            t(),
            generic("Array", [log_level_or_definition()]),
            union(events),
            never(),
        ),
    )
    .generic(GenericParameter::new("T").extends(named("any")));

    vec![
        type_alias("LogLevel", string_literal_union(["info", "query", "warn", "error"])),
        type_alias(
            "LogDefinition",
            object()
                .property("level", named("LogLevel"))
                .property("emit", string_literal_union(["stdout", "event"])),
        ),
        Box::new(export(get_log_type)),
        Box::new(export(get_events)),
        type_alias(
            "QueryEvent",
            object()
                .property("timestamp", named("Date"))
                .property("query", named("string"))
                .property("params", named("string"))
                .property("duration", named("number"))
                .property("target", named("string")),
        ),
        type_alias(
            "LogEvent",
            object()
                .property("timestamp", named("Date"))
                .property("message", named("string"))
                .property("target", named("string")),
        ),
    ]
}

fn middleware_types() -> Vec<Item> {
    let params = TypeDeclaration::new(
        "MiddlewareParams",
        object()
            .optional_property("model", named("ModelName"))
            .property("action", named("PrismaAction"))
            .property("args", named("any"))
            .property("dataPath", named("string").array())
            .property("runInTransaction", named("boolean")),
    )
    .doc(DocComment::new("These options are being passed into the middleware as \"params\""));

    let promise = || generic("runtime.Types.Utils.JsPromise", [named("T")]);
    let next = FunctionType::new(promise()).parameter(Parameter::new("params", named("MiddlewareParams")));
    let middleware = TypeDeclaration::new(
        "Middleware",
        FunctionType::new(promise())
            .parameter(Parameter::new("params", named("MiddlewareParams")))
            .parameter(Parameter::new("next", next.into())),
    )
    .generic(GenericParameter::new("T").default(named("any")))
    .doc(DocComment::new(
        "The `T` type makes sure, that the `return proceed` is not forgotten in the middleware implementation",
    ));

    vec![
        type_alias("PrismaAction", string_literal_union(PRISMA_ACTIONS)),
        Box::new(export(params)),
        Box::new(export(middleware)),
    ]
}

pub fn namespace_file(ctx: &GenerateContext<'_>, metadata: &ClientMetadata) -> SourceFile {
    let dmmf = ctx.dmmf;
    let mut file = SourceFile::new();
    file.set_header(DocComment::new(HEADER));
    file.add_import(Import::namespace("runtime", ctx.runtime_import_from(1)))
        .add_import(Import::namespace("Prisma", ctx.import_file_name("../models")).type_only())
        .add_import(Import::named(
            vec![NamedItem::new("PrismaClient").as_type()],
            ctx.import_file_name("./class"),
        ));
    file.add_export_from(ExportFrom::all(ctx.import_file_name("../models")).type_only());

    file.extend(common_declarations(
        &metadata.client_version,
        &metadata.engine_version,
        ctx.is_preview_feature_on("strictUndefinedChecks"),
    ));
    file.add(model_name_enum(
        dmmf.mappings().model_operations.iter().map(|m| m.model.as_str()),
    ));
    file.add(type_map_cb());
    file.add(type_map(ctx));

    file.add(section("Enums"));
    file.extend(dmmf.enum_types(PRISMA_NAMESPACE).iter().map(prisma_enum));

    let field_refs = dmmf.field_ref_types(PRISMA_NAMESPACE);
    if !field_refs.is_empty() {
        file.add(section("Field references"));
        file.extend(field_refs.iter().map(field_ref_input));
    }

    file.add(export(
        TypeDeclaration::new("BatchPayload", object().property("count", named("number")))
            .doc(DocComment::new("Batch Payload for updateMany & deleteMany & createMany")),
    ));
    file.extend(datasource_types(metadata));
    file.add(define_extension());
    file.add(type_alias("DefaultPrismaClient", named("PrismaClient")));
    file.add(type_alias(
        "ErrorFormat",
        string_literal_union(["pretty", "colorless", "minimal"]),
    ));
    file.add(export(client_options(ctx)));
    file.add(global_omit_config(ctx));

    file.add(section("Types for Logging"));
    file.extend(logging_types());
    file.extend(middleware_types());
    file.add(export(
        TypeDeclaration::new(
            "TransactionClient",
            generic("Omit", [named("DefaultPrismaClient"), named("runtime.ITXClientDenyList")]),
        )
        .doc(DocComment::new("`PrismaClient` proxy available in interactive transactions.")),
    ));
    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::context::ContextSettings;
    use crate::generation::files::test_metadata;
    use crate::generation::test_support::blog_helper;
    use crate::ts::to_source;

    fn render(settings: ContextSettings) -> String {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, settings);
        to_source(&namespace_file(&ctx, &test_metadata()))
    }

    #[test]
    fn test_namespace_imports_and_reexports() {
        let source = render(ContextSettings::builder().build());
        assert!(source.starts_with("/**\n * WARNING: This is an internal file that is subject to change!\n"));
        assert!(source.contains(
            "import * as runtime from '@prisma/client/runtime/client'\nimport type * as Prisma from '../models.js'\nimport { type PrismaClient } from './class.js'\n\nexport type * from '../models.js'\n"
        ));
    }

    #[test]
    fn test_namespace_sections_in_order() {
        let source = render(ContextSettings::builder().build());
        let order = [
            "export type DMMF = typeof runtime.DMMF",
            "export const prismaVersion: PrismaVersion",
            "export const ModelName = {",
            "export interface TypeMapCb<",
            "export type TypeMap<",
            "export const SortOrder = {",
            "export type IntFieldRefInput<$PrismaModel>",
            "export type BatchPayload = {",
            "export type Datasources = {\n  db?: Datasource\n}",
            "export const defineExtension = runtime.Extensions.defineExtension as unknown as runtime.Types.Extensions.ExtendsHook<'define', TypeMapCb, runtime.Types.Extensions.DefaultArgs>",
            "export type DefaultPrismaClient = PrismaClient",
            "export interface PrismaClientOptions {",
            "export type GlobalOmitConfig = {\n  user?: Prisma.UserOmit\n  post?: Prisma.PostOmit\n}",
            "export type LogLevel = 'info' | 'query' | 'warn' | 'error'",
            "export type MiddlewareParams = {",
            "export type TransactionClient = Omit<DefaultPrismaClient, runtime.ITXClientDenyList>",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| source.find(needle).unwrap_or_else(|| panic!("missing {}", needle)))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_adapter_option_needs_driver_adapters() {
        let without = render(ContextSettings::builder().build());
        assert!(!without.contains("adapter?:"));
        let with = render(
            ContextSettings::builder()
                .preview_features(vec!["driverAdapters".to_string()])
                .build(),
        );
        assert!(with.contains("  adapter?: runtime.SqlDriverAdapterFactory | null\n"));
    }

    #[test]
    fn test_logging_conditionals() {
        let source = render(ContextSettings::builder().build());
        assert!(source.contains(
            "export type GetLogType<T extends LogLevel | LogDefinition> = T extends LogDefinition ? T['emit'] extends 'event' ? T['level'] : never : never"
        ));
        assert!(source.contains(
            "export type GetEvents<T extends any> = T extends Array<LogLevel | LogDefinition> ? GetLogType<T[0]> | GetLogType<T[1]> | GetLogType<T[2]> | GetLogType<T[3]> : never"
        ));
    }

    #[test]
    fn test_middleware_signature() {
        let source = render(ContextSettings::builder().build());
        assert!(source.contains(
            "export type Middleware<T = any> = (params: MiddlewareParams, next: (params: MiddlewareParams) => runtime.Types.Utils.JsPromise<T>) => runtime.Types.Utils.JsPromise<T>"
        ));
    }
}
