//! Declarations shared by the server and browser namespace modules.

use crate::ts::{
    BasicBuilder, ConstDeclaration, DocComment, GenericParameter, Raw, TypeDeclaration, ValueBuilder,
    Writer, export, generic, named, object, value,
};

/// Helper types the generated declarations are written against.
const UTILITY_TYPES: &str = include_str!("templates/utility_types.ts");

pub(super) type Item = Box<dyn BasicBuilder + Send + Sync>;

/// A runtime value re-exported together with its instance type:
/// `export const X = runtime.X` then `export type X = runtime.X`.
#[derive(Debug, Clone)]
pub(super) struct ValueAndType {
    name: String,
    source: String,
}

impl ValueAndType {
    pub(super) fn runtime(name: &str) -> Self {
        Self {
            name: name.to_string(),
            source: format!("runtime.{}", name),
        }
    }
}

impl BasicBuilder for ValueAndType {
    fn write(&self, writer: &mut Writer) {
        export(ConstDeclaration::new(&self.name, value(&self.source))).write(writer);
        writer.new_line();
        export(TypeDeclaration::new(&self.name, named(&self.source))).write(writer);
    }
}

fn section(title: &str) -> Item {
    Box::new(DocComment::new(title))
}

fn runtime_type(name: &str) -> Item {
    Box::new(export(TypeDeclaration::new(name, named(format!("runtime.{}", name)))))
}

fn runtime_const(name: &str, source: &str) -> Item {
    Box::new(export(ConstDeclaration::new(name, value(source))))
}

const ERROR_CLASSES: [&str; 5] = [
    "PrismaClientKnownRequestError",
    "PrismaClientUnknownRequestError",
    "PrismaClientRustPanicError",
    "PrismaClientInitializationError",
    "PrismaClientValidationError",
];

/// `type Args<T, F extends runtime.Operation> = runtime.Types.Public.Args<T, F>` and friends.
fn extension_types() -> Vec<Item> {
    let operation = || named("runtime.Operation");
    let public = |name: &str, params: Vec<GenericParameter>| -> Item {
        let args = params.iter().map(|p| named(&p.name));
        let mut declaration = TypeDeclaration::new(name, generic(format!("runtime.Types.Public.{}", name), args));
        for param in params {
            declaration = declaration.generic(param);
        }
        Box::new(export(declaration))
    };
    vec![
        Box::new(export(TypeDeclaration::new(
            "Extension",
            named("runtime.Types.Extensions.UserArgs"),
        ))),
        runtime_const("getExtensionContext", "runtime.Extensions.getExtensionContext"),
        public(
            "Args",
            vec![GenericParameter::new("T"), GenericParameter::new("F").extends(operation())],
        ),
        public(
            "Payload",
            vec![
                GenericParameter::new("T"),
                GenericParameter::new("F").extends(operation()).default(named("never")),
            ],
        ),
        public(
            "Result",
            vec![
                GenericParameter::new("T"),
                GenericParameter::new("A"),
                GenericParameter::new("F").extends(operation()),
            ],
        ),
        public("Exact", vec![GenericParameter::new("A"), GenericParameter::new("W")]),
    ]
}

/// `PrismaVersion` and the `prismaVersion` constant.
fn version_declarations(client_version: &str, engine_version: &str) -> Vec<Item> {
    let version_type = object()
        .property("client", named("string"))
        .property("engine", named("string"));
    let version = ValueBuilder::Object(vec![
        ("client".to_string(), ValueBuilder::StringLiteral(client_version.to_string())),
        ("engine".to_string(), ValueBuilder::StringLiteral(engine_version.to_string())),
    ]);
    vec![
        Box::new(export(TypeDeclaration::new("PrismaVersion", version_type))),
        Box::new(export(
            ConstDeclaration::new("prismaVersion", version)
                .typed(named("PrismaVersion"))
                .doc(DocComment::new(&format!(
                    "Prisma Client JS version: {}\nQuery Engine version: {}",
                    client_version, engine_version
                ))),
        )),
    ]
}

const NULL_TYPES: [&str; 3] = ["DbNull", "JsonNull", "AnyNull"];

/// `NullTypes` classes and the `DbNull`/`JsonNull`/`AnyNull` sentinels the
/// object enums point at.
pub(super) fn null_types() -> Vec<Item> {
    let classes = ValueBuilder::Object(
        NULL_TYPES
            .iter()
            .map(|name| {
                let constructor = named(format!("(new (secret: never) => typeof runtime.{})", name));
                (
                    name.to_string(),
                    value(format!("runtime.NullTypes.{}", name)).as_type(constructor),
                )
            })
            .collect(),
    );
    let mut items: Vec<Item> = vec![Box::new(export(ConstDeclaration::new("NullTypes", classes)))];
    let docs = [
        "Helper for filtering JSON entries that have `null` on the database (empty on the db)",
        "Helper for filtering JSON entries that have JSON `null` values (not empty on the db)",
        "Helper for filtering JSON entries that are `Prisma.DbNull` or `Prisma.JsonNull`",
    ];
    for (name, doc) in NULL_TYPES.iter().zip(docs) {
        items.push(Box::new(export(
            ConstDeclaration::new(*name, value(format!("runtime.{}", name))).doc(DocComment::new(doc)),
        )));
    }
    items
}

/// Runtime re-exports, version information and utility types at the top of
/// the namespace module.
pub(super) fn common_declarations(
    client_version: &str,
    engine_version: &str,
    strict_undefined_checks: bool,
) -> Vec<Item> {
    let mut items: Vec<Item> = vec![
        Box::new(export(TypeDeclaration::new("DMMF", named("typeof runtime.DMMF")))),
        Box::new(export(
            TypeDeclaration::new("PrismaPromise", generic("runtime.Types.Public.PrismaPromise", [named("T")]))
                .generic(GenericParameter::new("T")),
        )),
        section("Prisma Errors"),
    ];
    items.extend(ERROR_CLASSES.iter().map(|name| Box::new(ValueAndType::runtime(name)) as Item));

    items.push(section("Re-export of sql-template-tag"));
    items.push(runtime_const("sql", "runtime.sqltag"));
    items.push(runtime_const("empty", "runtime.empty"));
    items.push(runtime_const("join", "runtime.join"));
    items.push(runtime_const("raw", "runtime.raw"));
    items.push(Box::new(ValueAndType::runtime("Sql")));

    if strict_undefined_checks {
        items.push(Box::new(export(
            ConstDeclaration::new("skip", value("runtime.skip")).doc(DocComment::new("Prisma.skip")),
        )));
    }

    items.push(section("Decimal.js"));
    items.push(Box::new(ValueAndType::runtime("Decimal")));
    items.push(runtime_type("DecimalJsLike"));

    items.push(section("Extensions"));
    items.extend(extension_types());
    items.extend(version_declarations(client_version, engine_version));

    items.push(section("Utility Types"));
    for name in [
        "Bytes",
        "JsonObject",
        "JsonArray",
        "JsonValue",
        "InputJsonObject",
        "InputJsonArray",
        "InputJsonValue",
    ] {
        items.push(runtime_type(name));
    }
    items.extend(null_types());
    items.push(Box::new(Raw::new(UTILITY_TYPES.trim_end())));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ts::to_source;
    use pretty_assertions::assert_eq;

    fn render(items: &[Item]) -> String {
        items.iter().map(|item| to_source(item)).collect::<Vec<_>>().join("\n\n")
    }

    #[test]
    fn test_value_and_type_pair() {
        assert_eq!(
            to_source(&ValueAndType::runtime("Decimal")),
            "export const Decimal = runtime.Decimal\nexport type Decimal = runtime.Decimal"
        );
    }

    #[test]
    fn test_version_is_documented_and_inlined() {
        let source = render(&version_declarations("6.1.0", "abc123"));
        insta::assert_snapshot!(
            source.replace('\n', "|"),
            @"export type PrismaVersion = {|  client: string|  engine: string|}||/**| * Prisma Client JS version: 6.1.0| * Query Engine version: abc123| */|export const prismaVersion: PrismaVersion = {|  client: '6.1.0',|  engine: 'abc123'|}"
        );
    }

    #[test]
    fn test_skip_follows_strict_undefined_checks() {
        let without = render(&common_declarations("1.0.0", "e", false));
        let with = render(&common_declarations("1.0.0", "e", true));
        assert!(!without.contains("export const skip"));
        assert!(with.contains("/**\n * Prisma.skip\n */\nexport const skip = runtime.skip"));
    }

    #[test]
    fn test_null_types() {
        let source = render(&null_types());
        assert!(source.contains("  DbNull: runtime.NullTypes.DbNull as (new (secret: never) => typeof runtime.DbNull),\n"));
        assert!(source.contains("export const AnyNull = runtime.AnyNull"));
    }

    #[test]
    fn test_extension_types() {
        let source = render(&extension_types());
        assert!(source.contains(
            "export type Payload<T, F extends runtime.Operation = never> = runtime.Types.Public.Payload<T, F>"
        ));
        assert!(source.contains("export const getExtensionContext = runtime.Extensions.getExtensionContext"));
    }

    #[test]
    fn test_utility_types_are_present() {
        let source = render(&common_declarations("1.0.0", "e", false));
        for needle in [
            "export type XOR<T, U>",
            "export type AtLeast<O extends object, K extends string>",
            "type FieldRefInputType<Model, FieldType>",
            "export const PrismaClientValidationError = runtime.PrismaClientValidationError",
        ] {
            assert!(source.contains(needle), "missing {}", needle);
        }
    }
}
