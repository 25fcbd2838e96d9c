//! Schema scalars as TypeScript types.

use crate::ts::{TypeBuilder, named, union};

/// Types accepted for a scalar in input positions. Multi-variant scalars
/// such as `DateTime` accept every variant.
pub fn input_scalar(scalar: &str) -> Option<Vec<&'static str>> {
    let variants: &[&'static str] = match scalar {
        "String" | "UUID" | "ID" => &["string"],
        "Int" | "Float" | "Long" => &["number"],
        "BigInt" => &["bigint", "number"],
        "Boolean" => &["boolean"],
        "DateTime" => &["Date", "string"],
        "Decimal" => &["runtime.Decimal", "runtime.DecimalJsLike", "number", "string"],
        "Json" => &["runtime.InputJsonValue"],
        "Bytes" => &["runtime.Bytes"],
        "Null" => &["null"],
        _ => return None,
    };
    Some(variants.to_vec())
}

pub fn output_scalar(scalar: &str) -> Option<&'static str> {
    Some(match scalar {
        "String" | "UUID" | "ID" => "string",
        "Int" | "Float" | "Long" => "number",
        "BigInt" => "bigint",
        "Boolean" => "boolean",
        "DateTime" => "Date",
        "Decimal" => "runtime.Decimal",
        "Json" => "runtime.JsonValue",
        "Bytes" => "runtime.Bytes",
        "Null" => "null",
        _ => return None,
    })
}

/// Input type for a scalar; lists of multi-variant scalars become a union of
/// arrays (`Date[] | string[]`).
pub fn input_scalar_type(scalar: &str, is_list: bool) -> TypeBuilder {
    let Some(variants) = input_scalar(scalar) else {
        let ty = named(scalar);
        return if is_list { ty.array() } else { ty };
    };
    union(variants.into_iter().map(|variant| {
        let ty = named(variant);
        if is_list { ty.array() } else { ty }
    }))
}

pub fn output_scalar_type(scalar: &str) -> TypeBuilder {
    named(output_scalar(scalar).unwrap_or(scalar))
}
