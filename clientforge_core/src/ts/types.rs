//! Type expressions and the members that make up object types.

use super::doc_comment::DocComment;
use super::writer::{BasicBuilder, Writer};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("Invalid regex for JavaScript identifiers")
});

pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Property key as it has to appear in source: bare when it is an
/// identifier, double-quoted otherwise.
pub fn quote_property_name(name: &str) -> Cow<'_, str> {
    if is_valid_identifier(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!(
            "\"{}\"",
            name.replace('\\', "\\\\").replace('"', "\\\"")
        ))
    }
}

/// Single-quoted string literal.
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => quoted.push_str("\\'"),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('\'');
    quoted
}

/// Binding strength of a type expression, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Union,
    Intersection,
    TypeOperator,
    Postfix,
    Primary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeBuilder {
    Named(NamedType),
    Array(Box<TypeBuilder>),
    Union(Vec<TypeBuilder>),
    Intersection(Vec<TypeBuilder>),
    Object(ObjectType),
    Conditional(Box<ConditionalType>),
    StringLiteral(String),
    NumberLiteral(i64),
    KeyOf(Box<TypeBuilder>),
    TypeOf(String),
    IndexedAccess {
        object: Box<TypeBuilder>,
        index: Box<TypeBuilder>,
    },
    Function(FunctionType),
    Tuple(Vec<TypeBuilder>),
    Mapped(Box<MappedType>),
    Infer(String),
    Spread(Box<TypeBuilder>),
}

pub fn named(name: impl Into<String>) -> TypeBuilder {
    TypeBuilder::Named(NamedType::new(name))
}

pub fn generic(name: impl Into<String>, args: impl IntoIterator<Item = TypeBuilder>) -> TypeBuilder {
    TypeBuilder::Named(NamedType::new(name).args(args))
}

pub fn string_literal(value: impl Into<String>) -> TypeBuilder {
    TypeBuilder::StringLiteral(value.into())
}

pub fn array(item: TypeBuilder) -> TypeBuilder {
    TypeBuilder::Array(Box::new(item))
}

/// Union of `types`; nested unions are flattened.
pub fn union(types: impl IntoIterator<Item = TypeBuilder>) -> TypeBuilder {
    let mut members = Vec::new();
    for ty in types {
        match ty {
            TypeBuilder::Union(inner) => members.extend(inner),
            other => members.push(other),
        }
    }
    TypeBuilder::Union(members)
}

pub fn intersection(types: impl IntoIterator<Item = TypeBuilder>) -> TypeBuilder {
    let mut members = Vec::new();
    for ty in types {
        match ty {
            TypeBuilder::Intersection(inner) => members.extend(inner),
            other => members.push(other),
        }
    }
    TypeBuilder::Intersection(members)
}

/// Union of string literal types, e.g. `'id' | 'email'`.
pub fn string_literal_union<S: AsRef<str>>(values: impl IntoIterator<Item = S>) -> TypeBuilder {
    union(values.into_iter().map(|v| string_literal(v.as_ref())))
}

pub fn key_of(ty: TypeBuilder) -> TypeBuilder {
    TypeBuilder::KeyOf(Box::new(ty))
}

pub fn type_of(name: impl Into<String>) -> TypeBuilder {
    TypeBuilder::TypeOf(name.into())
}

pub fn tuple(items: impl IntoIterator<Item = TypeBuilder>) -> TypeBuilder {
    TypeBuilder::Tuple(items.into_iter().collect())
}

pub fn conditional(
    check: TypeBuilder,
    extends: TypeBuilder,
    then: TypeBuilder,
    otherwise: TypeBuilder,
) -> TypeBuilder {
    TypeBuilder::Conditional(Box::new(ConditionalType {
        check,
        extends,
        then,
        otherwise,
    }))
}

pub fn mapped(key: impl Into<String>, constraint: TypeBuilder, value: TypeBuilder) -> TypeBuilder {
    TypeBuilder::Mapped(Box::new(MappedType {
        key: key.into(),
        constraint,
        value,
        optional: false,
    }))
}

pub fn infer(name: impl Into<String>) -> TypeBuilder {
    TypeBuilder::Infer(name.into())
}

pub fn spread(ty: TypeBuilder) -> TypeBuilder {
    TypeBuilder::Spread(Box::new(ty))
}

pub fn never() -> TypeBuilder {
    named("never")
}

pub fn null() -> TypeBuilder {
    named("null")
}

impl TypeBuilder {
    pub fn array(self) -> TypeBuilder {
        array(self)
    }

    pub fn or(self, other: TypeBuilder) -> TypeBuilder {
        union([self, other])
    }

    pub fn and(self, other: TypeBuilder) -> TypeBuilder {
        intersection([self, other])
    }

    pub fn nullable(self) -> TypeBuilder {
        self.or(null())
    }

    pub fn subscript(self, index: TypeBuilder) -> TypeBuilder {
        TypeBuilder::IndexedAccess {
            object: Box::new(self),
            index: Box::new(index),
        }
    }

    fn precedence(&self) -> Precedence {
        match self {
            TypeBuilder::Union(members) | TypeBuilder::Intersection(members)
                if members.len() == 1 =>
            {
                members[0].precedence()
            }
            TypeBuilder::Union(members) if members.is_empty() => Precedence::Primary,
            TypeBuilder::Intersection(members) if members.is_empty() => Precedence::Primary,
            TypeBuilder::Union(_) => Precedence::Union,
            TypeBuilder::Intersection(_) => Precedence::Intersection,
            TypeBuilder::Conditional(_) | TypeBuilder::Function(_) => Precedence::Lowest,
            TypeBuilder::KeyOf(_)
            | TypeBuilder::TypeOf(_)
            | TypeBuilder::Infer(_)
            | TypeBuilder::Spread(_) => Precedence::TypeOperator,
            TypeBuilder::Array(_) | TypeBuilder::IndexedAccess { .. } => Precedence::Postfix,
            TypeBuilder::Named(_)
            | TypeBuilder::Object(_)
            | TypeBuilder::StringLiteral(_)
            | TypeBuilder::NumberLiteral(_)
            | TypeBuilder::Tuple(_)
            | TypeBuilder::Mapped(_) => Precedence::Primary,
        }
    }

    fn write_at(&self, writer: &mut Writer, required: Precedence) {
        if self.precedence() < required {
            writer.write("(");
            self.write(writer);
            writer.write(")");
        } else {
            self.write(writer);
        }
    }

    fn write_members(
        writer: &mut Writer,
        members: &[TypeBuilder],
        separator: &str,
        required: Precedence,
    ) {
        for (idx, member) in members.iter().enumerate() {
            if idx > 0 {
                writer.write(separator);
            }
            member.write_at(writer, required);
        }
    }
}

impl BasicBuilder for TypeBuilder {
    fn write(&self, writer: &mut Writer) {
        match self {
            TypeBuilder::Named(named) => named.write(writer),
            TypeBuilder::Array(item) => {
                item.write_at(writer, Precedence::Postfix);
                writer.write("[]");
            }
            TypeBuilder::Union(members) | TypeBuilder::Intersection(members)
                if members.len() == 1 =>
            {
                members[0].write(writer);
            }
            TypeBuilder::Union(members) if members.is_empty() => {
                writer.write("never");
            }
            TypeBuilder::Intersection(members) if members.is_empty() => {
                writer.write("unknown");
            }
            TypeBuilder::Union(members) => {
                TypeBuilder::write_members(writer, members, " | ", Precedence::Union)
            }
            TypeBuilder::Intersection(members) => TypeBuilder::write_members(
                writer,
                members,
                " & ",
                Precedence::Intersection,
            ),
            TypeBuilder::Object(object) => object.write(writer),
            TypeBuilder::Conditional(conditional) => conditional.write(writer),
            TypeBuilder::StringLiteral(value) => {
                writer.write(&quote_string(value));
            }
            TypeBuilder::NumberLiteral(value) => {
                writer.write(&value.to_string());
            }
            TypeBuilder::KeyOf(ty) => {
                writer.write("keyof ");
                ty.write_at(writer, Precedence::TypeOperator);
            }
            TypeBuilder::TypeOf(name) => {
                writer.write("typeof ").write(name);
            }
            TypeBuilder::IndexedAccess { object, index } => {
                object.write_at(writer, Precedence::Postfix);
                writer.write("[");
                index.write(writer);
                writer.write("]");
            }
            TypeBuilder::Function(function) => function.write(writer),
            TypeBuilder::Tuple(items) => {
                writer.write("[");
                writer.write_joined(", ", items);
                writer.write("]");
            }
            TypeBuilder::Mapped(mapped) => mapped.write(writer),
            TypeBuilder::Infer(name) => {
                writer.write("infer ").write(name);
            }
            TypeBuilder::Spread(ty) => {
                writer.write("...");
                ty.write_at(writer, Precedence::Postfix);
            }
        }
    }
}

/// A type reference such as `Prisma.XOR<A, B>`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    pub name: String,
    pub generic_args: Vec<TypeBuilder>,
}

impl NamedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: TypeBuilder) -> Self {
        self.generic_args.push(arg);
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = TypeBuilder>) -> Self {
        self.generic_args.extend(args);
        self
    }
}

impl From<NamedType> for TypeBuilder {
    fn from(named: NamedType) -> Self {
        TypeBuilder::Named(named)
    }
}

impl BasicBuilder for NamedType {
    fn write(&self, writer: &mut Writer) {
        writer.write(&self.name);
        if !self.generic_args.is_empty() {
            writer.write("<");
            writer.write_joined(", ", &self.generic_args);
            writer.write(">");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalType {
    pub check: TypeBuilder,
    pub extends: TypeBuilder,
    pub then: TypeBuilder,
    pub otherwise: TypeBuilder,
}

impl BasicBuilder for ConditionalType {
    fn write(&self, writer: &mut Writer) {
        self.check.write_at(writer, Precedence::Union);
        writer.write(" extends ");
        // a nested conditional needs parentheses here, a function type does not
        match &self.extends {
            TypeBuilder::Function(function) => function.write(writer),
            extends => extends.write_at(writer, Precedence::Union),
        }
        writer.write(" ? ");
        self.then.write(writer);
        writer.write(" : ");
        self.otherwise.write(writer);
    }
}

/// `{ [P in K]: V }`
#[derive(Debug, Clone, PartialEq)]
pub struct MappedType {
    pub key: String,
    pub constraint: TypeBuilder,
    pub value: TypeBuilder,
    pub optional: bool,
}

impl BasicBuilder for MappedType {
    fn write(&self, writer: &mut Writer) {
        writer.write("{ [").write(&self.key).write(" in ");
        self.constraint.write(writer);
        writer.write(if self.optional { "]?: " } else { "]: " });
        self.value.write(writer);
        writer.write(" }");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeBuilder,
    pub optional: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeBuilder) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl BasicBuilder for Parameter {
    fn write(&self, writer: &mut Writer) {
        writer.write(&self.name);
        if self.optional {
            writer.write("?");
        }
        writer.write(": ");
        self.ty.write(writer);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenericParameter {
    pub name: String,
    pub extends: Option<TypeBuilder>,
    pub default: Option<TypeBuilder>,
    pub variance_in: bool,
    pub variance_out: bool,
}

impl GenericParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn extends(mut self, bound: TypeBuilder) -> Self {
        self.extends = Some(bound);
        self
    }

    pub fn default(mut self, default: TypeBuilder) -> Self {
        self.default = Some(default);
        self
    }

    pub fn variance_in(mut self) -> Self {
        self.variance_in = true;
        self
    }

    pub fn variance_out(mut self) -> Self {
        self.variance_out = true;
        self
    }
}

impl BasicBuilder for GenericParameter {
    fn write(&self, writer: &mut Writer) {
        if self.variance_in {
            writer.write("in ");
        }
        if self.variance_out {
            writer.write("out ");
        }
        writer.write(&self.name);
        if let Some(bound) = &self.extends {
            writer.write(" extends ");
            bound.write(writer);
        }
        if let Some(default) = &self.default {
            writer.write(" = ");
            default.write(writer);
        }
    }
}

pub(crate) fn write_generic_parameters(writer: &mut Writer, params: &[GenericParameter]) {
    if params.is_empty() {
        return;
    }
    writer.write("<");
    writer.write_joined(", ", params);
    writer.write(">");
}

/// `<T>(a: A) => R`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub generic_parameters: Vec<GenericParameter>,
    pub parameters: Vec<Parameter>,
    pub return_type: Box<TypeBuilder>,
}

impl FunctionType {
    pub fn new(return_type: TypeBuilder) -> Self {
        Self {
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: Box::new(return_type),
        }
    }

    pub fn generic(mut self, param: GenericParameter) -> Self {
        self.generic_parameters.push(param);
        self
    }

    pub fn parameter(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }
}

impl From<FunctionType> for TypeBuilder {
    fn from(function: FunctionType) -> Self {
        TypeBuilder::Function(function)
    }
}

impl BasicBuilder for FunctionType {
    fn write(&self, writer: &mut Writer) {
        write_generic_parameters(writer, &self.generic_parameters);
        writer.write("(");
        writer.write_joined(", ", &self.parameters);
        writer.write(") => ");
        self.return_type.write(writer);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: TypeBuilder,
    pub optional: bool,
    pub readonly: bool,
    /// Written as `[name]` without quoting, e.g. `[Symbol.toStringTag]`.
    pub computed: bool,
    pub doc_comment: Option<DocComment>,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeBuilder) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            readonly: false,
            computed: false,
            doc_comment: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn set_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn doc(mut self, doc: DocComment) -> Self {
        if !doc.is_empty() {
            self.doc_comment = Some(doc);
        }
        self
    }
}

impl BasicBuilder for Property {
    fn write(&self, writer: &mut Writer) {
        if let Some(doc) = &self.doc_comment {
            doc.write(writer);
        }
        if self.readonly {
            writer.write("readonly ");
        }
        if self.computed {
            writer.write("[").write(&self.name).write("]");
        } else {
            writer.write(&quote_property_name(&self.name));
        }
        if self.optional {
            writer.write("?");
        }
        writer.write(": ");
        self.ty.write(writer);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub generic_parameters: Vec<GenericParameter>,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeBuilder,
    pub doc_comment: Option<DocComment>,
}

impl Method {
    pub fn new(name: impl Into<String>, return_type: TypeBuilder) -> Self {
        Self {
            name: name.into(),
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type,
            doc_comment: None,
        }
    }

    pub fn generic(mut self, param: GenericParameter) -> Self {
        self.generic_parameters.push(param);
        self
    }

    pub fn parameter(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn doc(mut self, doc: DocComment) -> Self {
        if !doc.is_empty() {
            self.doc_comment = Some(doc);
        }
        self
    }
}

impl BasicBuilder for Method {
    fn write(&self, writer: &mut Writer) {
        if let Some(doc) = &self.doc_comment {
            doc.write(writer);
        }
        writer.write(&self.name);
        write_generic_parameters(writer, &self.generic_parameters);
        writer.write("(");
        writer.write_joined(", ", &self.parameters);
        writer.write("): ");
        self.return_type.write(writer);
    }
}

/// `[key: K]: V`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSignature {
    pub key_name: String,
    pub key_type: TypeBuilder,
    pub value: TypeBuilder,
}

/// A member of an object type or interface body.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Property(Property),
    Method(Method),
    /// `get name(): T`
    Getter {
        name: String,
        ty: TypeBuilder,
        doc_comment: Option<DocComment>,
    },
    IndexSignature(IndexSignature),
    /// Source text printed as is, for signatures the builders do not model.
    Raw(String),
}

impl Member {
    fn has_doc(&self) -> bool {
        match self {
            Member::Property(p) => p.doc_comment.is_some(),
            Member::Method(m) => m.doc_comment.is_some(),
            Member::Getter { doc_comment, .. } => doc_comment.is_some(),
            Member::IndexSignature(_) => false,
            Member::Raw(text) => text.trim_start().starts_with("/**"),
        }
    }
}

impl From<Property> for Member {
    fn from(property: Property) -> Self {
        Member::Property(property)
    }
}

impl From<Method> for Member {
    fn from(method: Method) -> Self {
        Member::Method(method)
    }
}

impl From<IndexSignature> for Member {
    fn from(signature: IndexSignature) -> Self {
        Member::IndexSignature(signature)
    }
}

impl Member {
    pub fn raw(text: impl Into<String>) -> Self {
        Member::Raw(text.into())
    }

    pub fn getter(name: impl Into<String>, ty: TypeBuilder, doc: DocComment) -> Self {
        Member::Getter {
            name: name.into(),
            ty,
            doc_comment: (!doc.is_empty()).then_some(doc),
        }
    }
}

impl BasicBuilder for Member {
    fn write(&self, writer: &mut Writer) {
        match self {
            Member::Property(property) => property.write(writer),
            Member::Method(method) => method.write(writer),
            Member::Getter {
                name,
                ty,
                doc_comment,
            } => {
                if let Some(doc) = doc_comment {
                    doc.write(writer);
                }
                writer.write("get ").write(name).write("(): ");
                ty.write(writer);
            }
            Member::IndexSignature(signature) => {
                writer
                    .write("[")
                    .write(&signature.key_name)
                    .write(": ");
                signature.key_type.write(writer);
                writer.write("]: ");
                signature.value.write(writer);
            }
            Member::Raw(text) => {
                writer.write(text.trim_end());
            }
        }
    }
}

/// Members one per line; documented members after the first are set off
/// by a blank line.
pub(crate) fn write_member_block(writer: &mut Writer, members: &[Member]) {
    writer.write("{");
    writer.new_line();
    writer.with_indent(|w| {
        for (idx, member) in members.iter().enumerate() {
            if idx > 0 && member.has_doc() {
                w.new_line();
            }
            member.write(w);
            w.new_line();
        }
    });
    writer.write("}");
}

/// An object type literal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectType {
    pub members: Vec<Member>,
    pub inline: bool,
}

pub fn object() -> ObjectType {
    ObjectType::default()
}

impl ObjectType {
    pub fn add(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }

    pub fn add_member(&mut self, member: impl Into<Member>) -> &mut Self {
        self.members.push(member.into());
        self
    }

    pub fn property(self, name: impl Into<String>, ty: TypeBuilder) -> Self {
        self.add(Property::new(name, ty))
    }

    pub fn optional_property(self, name: impl Into<String>, ty: TypeBuilder) -> Self {
        self.add(Property::new(name, ty).optional())
    }

    /// Prints on a single line.
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl From<ObjectType> for TypeBuilder {
    fn from(object: ObjectType) -> Self {
        TypeBuilder::Object(object)
    }
}

impl BasicBuilder for ObjectType {
    fn write(&self, writer: &mut Writer) {
        if self.members.is_empty() {
            writer.write("{}");
        } else if self.inline {
            writer.write("{ ");
            writer.write_joined("; ", &self.members);
            writer.write(" }");
        } else {
            write_member_block(writer, &self.members);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ts::{StringifyOptions, stringify};
    use proptest::prelude::*;

    fn render(ty: &TypeBuilder) -> String {
        stringify(ty, StringifyOptions::default())
    }

    #[test]
    fn test_union_inside_array_is_parenthesized() {
        let ty = union([named("A"), named("B")]).array();
        insta::assert_snapshot!(render(&ty), @"(A | B)[]");
    }

    #[test]
    fn test_nested_unions_flatten() {
        let ty = named("A").or(named("B")).or(null());
        assert_eq!(render(&ty), "A | B | null");
    }

    #[test]
    fn test_intersection_wraps_unions_but_not_names() {
        let ty = intersection([named("A"), union([named("B"), named("C")])]);
        assert_eq!(render(&ty), "A & (B | C)");
    }

    #[test]
    fn test_typeof_in_indexed_access() {
        let ty = type_of("Role").subscript(key_of(type_of("Role")));
        insta::assert_snapshot!(render(&ty), @"(typeof Role)[keyof typeof Role]");
    }

    #[test]
    fn test_function_inside_union_is_parenthesized() {
        let function = FunctionType::new(named("void"))
            .parameter(Parameter::new("event", named("Prisma.QueryEvent")));
        let ty = union([TypeBuilder::from(function), named("undefined")]);
        assert_eq!(render(&ty), "((event: Prisma.QueryEvent) => void) | undefined");
    }

    #[test]
    fn test_conditional_check_and_nesting() {
        let ty = conditional(
            named("T"),
            named("true"),
            named("number"),
            conditional(named("T"), named("false"), never(), named("unknown")),
        );
        assert_eq!(
            render(&ty),
            "T extends true ? number : T extends false ? never : unknown"
        );
    }

    #[test]
    fn test_function_in_extends_position_is_bare() {
        let function = FunctionType::new(named("number")).parameter(Parameter::new("x", named("string")));
        let ty = conditional(named("A"), function.into(), named("true"), named("false"));
        assert_eq!(render(&ty), "A extends (x: string) => number ? true : false");

        let nested = conditional(
            named("A"),
            conditional(named("B"), named("C"), named("D"), named("E")),
            named("true"),
            named("false"),
        );
        assert_eq!(render(&nested), "A extends (B extends C ? D : E) ? true : false");
    }

    #[test]
    fn test_single_member_union_is_transparent() {
        let ty = union([named("A")]).array();
        assert_eq!(render(&ty), "A[]");
        assert_eq!(render(&union([])), "never");
    }

    #[test]
    fn test_object_types() {
        let obj: TypeBuilder = object()
            .property("id", named("string"))
            .optional_property("display-name", named("string").nullable())
            .into();
        assert_eq!(
            render(&obj),
            "{\n  id: string\n  \"display-name\"?: string | null\n}"
        );

        let inline: TypeBuilder = object()
            .property("a", named("A"))
            .property("b", named("B"))
            .inline()
            .into();
        assert_eq!(render(&inline), "{ a: A; b: B }");
        assert_eq!(render(&object().into()), "{}");
    }

    #[test]
    fn test_generic_parameters_with_variance() {
        let method = Method::new("count", named("Prisma.PrismaPromise").or(never()))
            .generic(
                GenericParameter::new("T")
                    .extends(named("UserCountArgs"))
                    .default(named("{}")),
            )
            .parameter(Parameter::new("args", named("T")).optional());
        assert_eq!(
            stringify(&method, StringifyOptions::default()),
            "count<T extends UserCountArgs = {}>(args?: T): Prisma.PrismaPromise | never"
        );

        let param = GenericParameter::new("ExtArgs").variance_in().variance_out();
        assert_eq!(stringify(&param, StringifyOptions::default()), "in out ExtArgs");
    }

    #[test]
    fn test_mapped_and_string_literals() {
        let ty = mapped(
            "P",
            key_of(named("T")).and(key_of(named("AggregateUser"))),
            named("T").subscript(named("P")),
        );
        assert_eq!(
            render(&ty),
            "{ [P in keyof T & keyof AggregateUser]: T[P] }"
        );
        assert_eq!(render(&string_literal("it's")), "'it\\'s'");
        assert_eq!(render(&string_literal_union(["id", "email"])), "'id' | 'email'");
    }

    #[test]
    fn test_keyof_wraps_union_operand() {
        let ty = key_of(named("A").or(named("B")));
        assert_eq!(render(&ty), "keyof (A | B)");
    }

    proptest! {
        #[test]
        fn test_identifiers_are_never_quoted(name in "[A-Za-z_$][A-Za-z0-9_$]{0,16}") {
            let quoted = quote_property_name(&name);
            prop_assert_eq!(quoted.as_ref(), name.as_str());
        }

        #[test]
        fn test_non_identifiers_are_quoted(name in "[0-9-][A-Za-z0-9 -]{0,16}") {
            let quoted = quote_property_name(&name);
            prop_assert!(quoted.starts_with('"') && quoted.ends_with('"'));
        }
    }
}
