use crate::dmmf::DmmfHelper;
use crate::error::{ClientforgeError, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Names that would shadow the client's own exports or are not valid
/// JavaScript binding names.
pub const RESERVED_MODEL_NAMES: &[&str] = &[
    "PrismaClient",
    "Prisma",
    "async",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "using",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Filter combinators of the query language.
pub const RESERVED_FIELD_NAMES: &[&str] = &["AND", "OR", "NOT"];

fn is_reserved(name: &str) -> bool {
    RESERVED_MODEL_NAMES.contains(&name) || RESERVED_FIELD_NAMES.contains(&name)
}

/// Every enum and model whose name is reserved, enums first, in datamodel
/// order. Entries read `"enum Prisma"` / `"model async"`.
pub fn denylist_violations(dmmf: &DmmfHelper) -> Vec<String> {
    let enums = dmmf
        .datamodel_enums()
        .iter()
        .filter(|e| is_reserved(&e.name))
        .map(|e| format!("\"enum {}\"", e.name));
    let models = dmmf
        .models()
        .iter()
        .filter(|m| is_reserved(&m.name))
        .map(|m| format!("\"model {}\"", m.name));
    enums.chain(models).collect()
}

/// Rejects schemas that use reserved names, listing every offender in a
/// single error.
pub fn validate_denylists(dmmf: &DmmfHelper, schema_path: &Path) -> Result<()> {
    let violations = denylist_violations(dmmf);
    if violations.is_empty() {
        debug!("No reserved names in datamodel");
        return Ok(());
    }
    warn!(count = violations.len(), "Datamodel uses reserved names");

    let mut message = format!(
        "The schema at \"{}\" contains reserved keywords.\n       Rename the following items:",
        schema_path.display()
    );
    for violation in &violations {
        message.push_str("\n         - ");
        message.push_str(violation);
    }
    message.push_str("\nTo learn more about how to rename models, check out https://pris.ly/d/naming-models");
    Err(ClientforgeError::denylist(message))
}
