use super::types::{TypeBuilder, quote_property_name, quote_string};
use super::writer::{BasicBuilder, Writer};

/// Value-level expressions used in `const` initializers.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueBuilder {
    /// An identifier or member path, e.g. `runtime.DbNull`.
    Named(String),
    StringLiteral(String),
    NumberLiteral(i64),
    Object(Vec<(String, ValueBuilder)>),
    As(Box<ValueBuilder>, TypeBuilder),
    /// `callee(arg, ...)`
    Call(String, Vec<ValueBuilder>),
}

pub fn value(name: impl Into<String>) -> ValueBuilder {
    ValueBuilder::Named(name.into())
}

pub fn string_value(text: impl Into<String>) -> ValueBuilder {
    ValueBuilder::StringLiteral(text.into())
}

impl ValueBuilder {
    pub fn as_type(self, ty: TypeBuilder) -> ValueBuilder {
        ValueBuilder::As(Box::new(self), ty)
    }

    /// `<value> as const`
    pub fn as_const(self) -> ValueBuilder {
        self.as_type(super::types::named("const"))
    }
}

impl BasicBuilder for ValueBuilder {
    fn write(&self, writer: &mut Writer) {
        match self {
            ValueBuilder::Named(name) => {
                writer.write(name);
            }
            ValueBuilder::StringLiteral(text) => {
                writer.write(&quote_string(text));
            }
            ValueBuilder::NumberLiteral(number) => {
                writer.write(&number.to_string());
            }
            ValueBuilder::Object(entries) if entries.is_empty() => {
                writer.write("{}");
            }
            ValueBuilder::Object(entries) => {
                writer.write_line("{");
                writer.with_indent(|w| {
                    for (idx, (key, value)) in entries.iter().enumerate() {
                        w.write(&quote_property_name(key)).write(": ");
                        value.write(w);
                        if idx + 1 < entries.len() {
                            w.write(",");
                        }
                        w.new_line();
                    }
                });
                writer.write("}");
            }
            ValueBuilder::As(inner, ty) => {
                inner.write(writer);
                writer.write(" as ");
                ty.write(writer);
            }
            ValueBuilder::Call(callee, args) => {
                writer.write(callee).write("(");
                writer.write_joined(", ", args);
                writer.write(")");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ts::{StringifyOptions, stringify};

    #[test]
    fn test_const_object() {
        let role = ValueBuilder::Object(vec![
            ("USER".into(), string_value("USER")),
            ("ADMIN".into(), string_value("ADMIN")),
        ])
        .as_const();
        assert_eq!(
            stringify(&role, StringifyOptions::default()),
            "{\n  USER: 'USER',\n  ADMIN: 'ADMIN'\n} as const"
        );
    }

    #[test]
    fn test_call_and_named_values() {
        let call = ValueBuilder::Call(
            "runtime.Extensions.getExtensionContext".into(),
            vec![value("this")],
        );
        assert_eq!(
            stringify(&call, StringifyOptions::default()),
            "runtime.Extensions.getExtensionContext(this)"
        );
    }
}
