//! `internal/class`: the runtime config and the `PrismaClient` interfaces.

use super::ClientMetadata;
use super::runtime_config::RuntimeConfig;
use crate::dmmf::PRISMA_NAMESPACE;
use crate::error::Result;
use crate::generation::context::GenerateContext;
use crate::generation::naming::{capitalize, delegate_name, uncapitalize};
use crate::ts::{
    DocComment, FunctionType, GenericParameter, Import, IndexSignature, Interface, Member, Method,
    Parameter, Property, Raw, SourceFile, TypeBuilder, TypeDeclaration, conditional, export,
    generic, key_of, named, never, object, spread, string_literal, to_source, tuple, union,
};

pub const CLASS_MODULE: &str = "internal/class";

const CONNECT_DOC: &str = "Connect with the database";
const DISCONNECT_DOC: &str = "Disconnect from the database";

fn js_promise(ty: TypeBuilder) -> TypeBuilder {
    generic("runtime.Types.Utils.JsPromise", [ty])
}

fn prisma_promise(ty: TypeBuilder) -> TypeBuilder {
    generic("Prisma.PrismaPromise", [ty])
}

fn ext_args_bound() -> TypeBuilder {
    named("runtime.Types.Extensions.InternalArgs")
}

fn default_ext_args() -> TypeBuilder {
    named("runtime.Types.Extensions.DefaultArgs")
}

fn omit_option() -> TypeBuilder {
    named("Prisma.PrismaClientOptions").subscript(string_literal("omit"))
}

/// Documentation shared by the constructor signature and the client
/// interface, using the first mapped model as example.
pub fn client_doc(ctx: &GenerateContext<'_>) -> DocComment {
    let (model, plural) = ctx
        .dmmf
        .mappings()
        .model_operations
        .first()
        .map(|m| (m.model.clone(), m.plural.clone()))
        .unwrap_or_else(|| ("User".to_string(), "users".to_string()));
    DocComment::new(&format!(
        "## Prisma Client

Type-safe database client for TypeScript
@example
```
const prisma = new PrismaClient()
// Fetch zero or more {plural_cap}
const {plural} = await prisma.{model}.findMany()
```

Read more in our [docs](https://pris.ly/d/client).",
        plural_cap = capitalize(&plural),
        plural = uncapitalize(&plural),
        model = uncapitalize(&model),
    ))
}

/// `LogOptions<ClientOptions>`: the log levels emitted as events.
fn log_options() -> TypeDeclaration {
    let log = || named("ClientOptions").subscript(string_literal("log"));
    TypeDeclaration::new(
        "LogOptions",
        conditional(
            string_literal("log"),
            key_of(named("ClientOptions")),
            conditional(
                log(),
                generic("Array", [union([named("Prisma.LogLevel"), named("Prisma.LogDefinition")])]),
                generic("Prisma.GetEvents", [log()]),
                never(),
            ),
            never(),
        ),
    )
    .generic(GenericParameter::new("ClientOptions").extends(named("Prisma.PrismaClientOptions")))
}

/// The constructor signature is not expressible as a plain member, so it is
/// kept as source text.
fn constructor_interface(ctx: &GenerateContext<'_>) -> Interface {
    let signature = "new <
  Options extends Prisma.PrismaClientOptions = Prisma.PrismaClientOptions,
  LogOpts extends LogOptions<Options> = LogOptions<Options>,
  OmitOpts extends Prisma.PrismaClientOptions['omit'] = Options extends { omit: infer U } ? U : Prisma.PrismaClientOptions['omit'],
  ExtArgs extends runtime.Types.Extensions.InternalArgs = runtime.Types.Extensions.DefaultArgs
>(options: Prisma.Subset<Options, Prisma.PrismaClientOptions>): PrismaClient<LogOpts, OmitOpts, ExtArgs>";
    Interface::new("PrismaClientConstructor").add(Member::raw(format!(
        "{}{}",
        to_source(&client_doc(ctx)),
        signature
    )))
}

fn raw_query_methods(ctx: &GenerateContext<'_>) -> Vec<Method> {
    let dmmf = ctx.dmmf;
    let template = || union([named("TemplateStringsArray"), named("Prisma.Sql")]);
    let values = || Parameter::new("...values", named("any").array());
    let unknown_t = || GenericParameter::new("T").default(named("unknown"));
    let mut methods = Vec::new();

    if dmmf.has_other_write_operation("executeRaw") {
        methods.push(
            Method::new("$executeRaw", prisma_promise(named("number")))
                .generic(unknown_t())
                .parameter(Parameter::new("query", template()))
                .parameter(values())
                .doc(DocComment::new(
                    "Executes a prepared raw query and returns the number of affected rows.
@example
```
const result = await prisma.$executeRaw`UPDATE User SET cool = ${true} WHERE email = ${'user@email.com'};`
```

Read more in our [docs](https://pris.ly/d/raw-queries).",
                )),
        );
        methods.push(
            Method::new("$executeRawUnsafe", prisma_promise(named("number")))
                .generic(unknown_t())
                .parameter(Parameter::new("query", named("string")))
                .parameter(values())
                .doc(DocComment::new(
                    "Executes a raw query and returns the number of affected rows.
Susceptible to SQL injections, see documentation.
@example
```
const result = await prisma.$executeRawUnsafe('UPDATE User SET cool = $1 WHERE email = $2 ;', true, 'user@email.com')
```

Read more in our [docs](https://pris.ly/d/raw-queries).",
                )),
        );
    }

    if dmmf.has_other_write_operation("queryRaw") {
        methods.push(
            Method::new("$queryRaw", prisma_promise(named("T")))
                .generic(unknown_t())
                .parameter(Parameter::new("query", template()))
                .parameter(values())
                .doc(DocComment::new(
                    "Performs a prepared raw query and returns the `SELECT` data.
@example
```
const result = await prisma.$queryRaw`SELECT * FROM User WHERE id = ${1} OR email = ${'user@email.com'};`
```

Read more in our [docs](https://pris.ly/d/raw-queries).",
                )),
        );
        methods.push(
            Method::new("$queryRawUnsafe", prisma_promise(named("T")))
                .generic(unknown_t())
                .parameter(Parameter::new("query", named("string")))
                .parameter(values())
                .doc(DocComment::new(
                    "Performs a raw query and returns the `SELECT` data.
Susceptible to SQL injections, see documentation.
@example
```
const result = await prisma.$queryRawUnsafe('SELECT * FROM User WHERE id = $1 OR email = $2;', 1, 'user@email.com')
```

Read more in our [docs](https://pris.ly/d/raw-queries).",
                )),
        );

        if ctx.is_preview_feature_on("typedSql") {
            methods.push(
                Method::new("$queryRawTyped", prisma_promise(named("T").array()))
                    .generic(GenericParameter::new("T"))
                    .parameter(Parameter::new(
                        "typedSql",
                        generic("runtime.TypedSql", [named("unknown").array(), named("T")]),
                    ))
                    .doc(DocComment::new(
                        "Executes a typed SQL query and returns a typed result
@example
```
import { myQuery } from '@prisma/client/sql'

const result = await prisma.$queryRawTyped(myQuery())
```",
                    )),
            );
        }
    }
    methods
}

fn transaction_methods(ctx: &GenerateContext<'_>) -> Vec<Method> {
    let has_isolation_level = ctx
        .dmmf
        .has_enum_in_namespace("TransactionIsolationLevel", PRISMA_NAMESPACE);
    let isolation_level = || named("Prisma.TransactionIsolationLevel");

    let mut batch = Method::new(
        "$transaction",
        js_promise(generic("runtime.Types.Utils.UnwrapTuple", [named("P")])),
    )
    .generic(GenericParameter::new("P").extends(prisma_promise(named("any")).array()))
    .parameter(Parameter::new("arg", tuple([spread(named("P"))])))
    .doc(DocComment::new(
        "Allows the running of a sequence of read/write operations that are guaranteed to either succeed or fail as a whole.
@example
```
const [george, bob, alice] = await prisma.$transaction([
  prisma.user.create({ data: { name: 'George' } }),
  prisma.user.create({ data: { name: 'Bob' } }),
  prisma.user.create({ data: { name: 'Alice' } }),
])
```

Read more in our [docs](https://www.prisma.io/docs/concepts/components/prisma-client/transactions).",
    ));
    if has_isolation_level {
        batch = batch.parameter(
            Parameter::new(
                "options",
                object().optional_property("isolationLevel", isolation_level()).inline().into(),
            )
            .optional(),
        );
    }

    let mut options = object()
        .optional_property("maxWait", named("number"))
        .optional_property("timeout", named("number"))
        .inline();
    if has_isolation_level {
        options = options.optional_property("isolationLevel", isolation_level());
    }
    let callback = FunctionType::new(js_promise(named("R"))).parameter(Parameter::new(
        "prisma",
        generic("Omit", [named("PrismaClient"), named("runtime.ITXClientDenyList")]),
    ));
    let interactive = Method::new("$transaction", js_promise(named("R")))
        .generic(GenericParameter::new("R"))
        .parameter(Parameter::new("fn", callback.into()))
        .parameter(Parameter::new("options", options.into()).optional());

    vec![batch, interactive]
}

fn run_command_raw(ctx: &GenerateContext<'_>) -> Option<Method> {
    if !ctx.dmmf.has_other_write_operation("runCommandRaw") {
        return None;
    }
    Some(
        Method::new("$runCommandRaw", prisma_promise(named("Prisma.JsonObject")))
            .parameter(Parameter::new("command", named("Prisma.InputJsonObject")))
            .doc(DocComment::new(
                "Executes a raw MongoDB command and returns the result of it.
@example
```
const user = await prisma.$runCommandRaw({
  aggregate: 'User',
  pipeline: [{ $match: { name: 'Bob' } }, { $project: { email: true, _id: false } }],
  explain: false,
})
```

Read more in our [docs](https://pris.ly/d/raw-queries).",
            )),
    )
}

/// `$extends: runtime.Types.Extensions.ExtendsHook<'extends', ...>`
fn extends_property() -> Property {
    let callback = || generic("Prisma.TypeMapCb", [named("OmitOpts")]);
    Property::new(
        "$extends",
        generic(
            "runtime.Types.Extensions.ExtendsHook",
            [
                string_literal("extends"),
                callback(),
                named("ExtArgs"),
                generic(
                    "runtime.Types.Utils.Call",
                    [callback(), object().property("extArgs", named("ExtArgs")).inline().into()],
                ),
            ],
        ),
    )
}

/// One getter per model that supports `findMany`.
fn delegate_getters(ctx: &GenerateContext<'_>) -> Vec<Member> {
    ctx.dmmf
        .mappings()
        .model_operations
        .iter()
        .filter(|m| m.find_many.is_some())
        .map(|mapping| {
            let mut property = uncapitalize(&mapping.model);
            if property == "constructor" {
                property = "[\"constructor\"]".to_string();
            }
            let doc = DocComment::new(&format!(
                "`prisma.{property}`: Exposes CRUD operations for the **{model}** model.
Example usage:
```ts
// Fetch zero or more {plural_cap}
const {plural} = await prisma.{property}.findMany()
```",
                model = mapping.model,
                plural_cap = capitalize(&mapping.plural),
                plural = uncapitalize(&mapping.plural),
            ));
            let delegate = generic(
                format!("Prisma.{}", delegate_name(&mapping.model)),
                [
                    named("ExtArgs"),
                    object().property("omit", named("OmitOpts")).inline().into(),
                ],
            );
            Member::getter(property, delegate, doc)
        })
        .collect()
}

fn client_interface(ctx: &GenerateContext<'_>) -> Interface {
    let on_callback = FunctionType::new(named("void")).parameter(Parameter::new(
        "event",
        conditional(
            named("V"),
            string_literal("query"),
            named("Prisma.QueryEvent"),
            named("Prisma.LogEvent"),
        ),
    ));

    let mut client = Interface::new("PrismaClient")
        .generic(
            GenericParameter::new("LogOpts")
                .extends(named("Prisma.LogLevel"))
                .default(never())
                .variance_in(),
        )
        .generic(
            GenericParameter::new("OmitOpts")
                .extends(omit_option())
                .default(named("undefined"))
                .variance_in()
                .variance_out(),
        )
        .generic(
            GenericParameter::new("ExtArgs")
                .extends(ext_args_bound())
                .default(default_ext_args())
                .variance_in()
                .variance_out(),
        )
        .doc(client_doc(ctx))
        .add(IndexSignature {
            key_name: "K".to_string(),
            key_type: named("symbol"),
            value: object()
                .property(
                    "types",
                    generic("Prisma.TypeMap", [named("ExtArgs")]).subscript(string_literal("other")),
                )
                .inline()
                .into(),
        })
        .add(
            Method::new("$on", named("PrismaClient"))
                .generic(GenericParameter::new("V").extends(named("LogOpts")))
                .parameter(Parameter::new("eventType", named("V")))
                .parameter(Parameter::new("callback", on_callback.into())),
        )
        .add(Method::new("$connect", js_promise(named("void"))).doc(DocComment::new(CONNECT_DOC)))
        .add(Method::new("$disconnect", js_promise(named("void"))).doc(DocComment::new(DISCONNECT_DOC)));

    for method in raw_query_methods(ctx) {
        client.add_member(method);
    }
    for method in transaction_methods(ctx) {
        client.add_member(method);
    }
    if let Some(method) = run_command_raw(ctx) {
        client.add_member(method);
    }
    client.add_member(extends_property());
    for getter in delegate_getters(ctx) {
        client.add_member(getter);
    }
    client
}

/// Edge runtimes have no `__dirname` to hand over.
fn get_client_class(ctx: &GenerateContext<'_>) -> Raw {
    if ctx.target.is_edge() {
        Raw::new(
            "export function getPrismaClientClass(): PrismaClientConstructor {
  return runtime.getPrismaClient(config) as unknown as PrismaClientConstructor
}",
        )
    } else {
        Raw::new(
            "export function getPrismaClientClass(dirname: string): PrismaClientConstructor {
  config.dirname = dirname
  return runtime.getPrismaClient(config) as unknown as PrismaClientConstructor
}",
        )
    }
}

pub fn class_file(ctx: &GenerateContext<'_>, metadata: &ClientMetadata) -> Result<SourceFile> {
    let config = RuntimeConfig::new(ctx, metadata).to_source()?;

    let mut file = SourceFile::new();
    file.set_header(DocComment::new(
        "WARNING: This is an internal file that is subject to change!

🛑 Under no circumstances should you import this file directly! 🛑

Please import the `PrismaClient` class from the `client.ts` file instead.",
    ));
    file.add_import(Import::namespace("runtime", ctx.runtime_import_from(1)))
        .add_import(Import::namespace("Prisma", ctx.import_file_name("./prismaNamespace")).type_only());

    file.add(Raw::new(config));
    file.add(export(log_options()));
    file.add(export(constructor_interface(ctx)));
    file.add(export(client_interface(ctx)));
    file.add(get_client_class(ctx));
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::context::ContextSettings;
    use crate::generation::files::test_metadata;
    use crate::dmmf::DmmfHelper;
    use crate::generation::test_support::{blog_document, blog_helper};
    use crate::layout::RuntimeTarget;

    fn render(settings: ContextSettings) -> String {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, settings);
        to_source(&class_file(&ctx, &test_metadata()).unwrap())
    }

    #[test]
    fn test_class_file_imports() {
        let source = render(ContextSettings::builder().build());
        assert!(source.contains(
            "import * as runtime from '@prisma/client/runtime/client'\nimport type * as Prisma from './prismaNamespace.js'\n"
        ));
        assert!(source.contains("const config: runtime.GetPrismaClientConfig = {"));
    }

    #[test]
    fn test_client_interface_members() {
        let source = render(ContextSettings::builder().build());
        assert!(source.contains(
            "export interface PrismaClient<in LogOpts extends Prisma.LogLevel = never, in out OmitOpts extends Prisma.PrismaClientOptions['omit'] = undefined, in out ExtArgs extends runtime.Types.Extensions.InternalArgs = runtime.Types.Extensions.DefaultArgs> {\n  [K: symbol]: { types: Prisma.TypeMap<ExtArgs>['other'] }\n"
        ));
        assert!(source.contains(
            "  $on<V extends LogOpts>(eventType: V, callback: (event: V extends 'query' ? Prisma.QueryEvent : Prisma.LogEvent) => void): PrismaClient\n"
        ));
        assert!(source.contains("  $executeRaw<T = unknown>(query: TemplateStringsArray | Prisma.Sql, ...values: any[]): Prisma.PrismaPromise<number>\n"));
        assert!(source.contains(
            "  $transaction<P extends Prisma.PrismaPromise<any>[]>(arg: [...P], options?: { isolationLevel?: Prisma.TransactionIsolationLevel }): runtime.Types.Utils.JsPromise<runtime.Types.Utils.UnwrapTuple<P>>\n"
        ));
        assert!(source.contains(
            "  $transaction<R>(fn: (prisma: Omit<PrismaClient, runtime.ITXClientDenyList>) => runtime.Types.Utils.JsPromise<R>, options?: { maxWait?: number; timeout?: number; isolationLevel?: Prisma.TransactionIsolationLevel }): runtime.Types.Utils.JsPromise<R>\n"
        ));
        assert!(source.contains("  get user(): Prisma.UserDelegate<ExtArgs, { omit: OmitOpts }>\n"));
        assert!(source.contains("  get post(): Prisma.PostDelegate<ExtArgs, { omit: OmitOpts }>\n"));
        assert!(!source.contains("$runCommandRaw"));
        assert!(!source.contains("$queryRawTyped"));
    }

    #[test]
    fn test_typed_sql_adds_query_raw_typed() {
        let source = render(
            ContextSettings::builder()
                .preview_features(vec!["typedSql".to_string()])
                .build(),
        );
        assert!(source.contains("  $queryRawTyped<T>(typedSql: runtime.TypedSql<unknown[], T>): Prisma.PrismaPromise<T[]>\n"));
    }

    #[test]
    fn test_query_raw_typed_requires_query_raw() {
        let mut document = blog_document();
        document.mappings.other_operations.write.retain(|op| op != "queryRaw");
        let dmmf = DmmfHelper::new(document);
        let ctx = GenerateContext::new(
            &dmmf,
            ContextSettings::builder()
                .preview_features(vec!["typedSql".to_string()])
                .build(),
        );
        let source = to_source(&class_file(&ctx, &test_metadata()).unwrap());
        assert!(source.contains("  $executeRaw<T = unknown>"));
        assert!(!source.contains("$queryRaw"));
    }

    #[test]
    fn test_client_class_factory_per_target() {
        let node = render(ContextSettings::builder().build());
        assert!(node.contains("export function getPrismaClientClass(dirname: string): PrismaClientConstructor {"));
        let edge = render(ContextSettings::builder().target(RuntimeTarget::VercelEdge).build());
        assert!(edge.contains("export function getPrismaClientClass(): PrismaClientConstructor {"));
        assert!(edge.contains("import * as runtime from '@prisma/client/runtime/wasm-compiler-edge'"));
    }

    #[test]
    fn test_log_options() {
        insta::assert_snapshot!(
            to_source(&export(log_options())),
            @"export type LogOptions<ClientOptions extends Prisma.PrismaClientOptions> = 'log' extends keyof ClientOptions ? ClientOptions['log'] extends Array<Prisma.LogLevel | Prisma.LogDefinition> ? Prisma.GetEvents<ClientOptions['log']> : never : never"
        );
    }

    #[test]
    fn test_constructor_keeps_client_doc() {
        let source = render(ContextSettings::builder().build());
        assert!(source.contains("export interface PrismaClientConstructor {\n  /**\n   * ## Prisma Client\n"));
        assert!(source.contains("   * const users = await prisma.user.findMany()\n"));
    }
}
