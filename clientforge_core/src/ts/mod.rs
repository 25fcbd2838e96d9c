//! A small TypeScript AST and its printer.
//!
//! Generators assemble [`TypeBuilder`]s, declarations and [`SourceFile`]s;
//! nothing in here knows about DMMF.

mod declarations;
mod doc_comment;
mod module;
mod types;
mod values;
mod writer;

pub use declarations::{ConstDeclaration, Declaration, Export, Interface, TypeDeclaration, export};
pub use doc_comment::DocComment;
pub use module::{
    ExportFrom, ExportFromKind, Import, ImportKind, ModuleReference, NamedItem, SourceFile,
};
pub use types::{
    ConditionalType, FunctionType, GenericParameter, IndexSignature, MappedType, Member, Method,
    NamedType, ObjectType, Parameter, Property, TypeBuilder, array, conditional, generic, infer,
    intersection, is_valid_identifier, key_of, mapped, named, never, null, object,
    quote_property_name, quote_string, spread, string_literal, string_literal_union, tuple,
    type_of, union,
};
pub use values::{ValueBuilder, string_value, value};
pub use writer::{BasicBuilder, NewLine, Raw, StringifyOptions, Writer, stringify};

/// Renders with default options.
pub fn to_source(builder: &(impl BasicBuilder + ?Sized)) -> String {
    stringify(builder, StringifyOptions::default())
}
