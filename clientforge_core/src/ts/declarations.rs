use super::doc_comment::DocComment;
use super::types::{GenericParameter, Member, TypeBuilder, write_generic_parameters, write_member_block};
use super::values::ValueBuilder;
use super::writer::{BasicBuilder, Writer};

/// Top-level declaration that can be exported.
///
/// The doc comment is split out so that `export` lands between the comment
/// and the declaration keyword.
pub trait Declaration {
    fn doc_comment(&self) -> Option<&DocComment>;
    fn write_declaration(&self, writer: &mut Writer);
}

macro_rules! impl_builder_for_declaration {
    ($($ty:ty),*) => {
        $(impl BasicBuilder for $ty {
            fn write(&self, writer: &mut Writer) {
                if let Some(doc) = self.doc_comment() {
                    doc.write(writer);
                }
                self.write_declaration(writer);
            }
        })*
    };
}

/// `type Name<G> = T`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub name: String,
    pub generic_parameters: Vec<GenericParameter>,
    pub ty: TypeBuilder,
    pub doc_comment: Option<DocComment>,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeBuilder>) -> Self {
        Self {
            name: name.into(),
            generic_parameters: Vec::new(),
            ty: ty.into(),
            doc_comment: None,
        }
    }

    pub fn generic(mut self, param: GenericParameter) -> Self {
        self.generic_parameters.push(param);
        self
    }

    pub fn doc(mut self, doc: DocComment) -> Self {
        if !doc.is_empty() {
            self.doc_comment = Some(doc);
        }
        self
    }
}

impl Declaration for TypeDeclaration {
    fn doc_comment(&self) -> Option<&DocComment> {
        self.doc_comment.as_ref()
    }

    fn write_declaration(&self, writer: &mut Writer) {
        writer.write("type ").write(&self.name);
        write_generic_parameters(writer, &self.generic_parameters);
        writer.write(" = ");
        self.ty.write(writer);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub name: String,
    pub generic_parameters: Vec<GenericParameter>,
    pub extends: Vec<TypeBuilder>,
    pub members: Vec<Member>,
    pub doc_comment: Option<DocComment>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_parameters: Vec::new(),
            extends: Vec::new(),
            members: Vec::new(),
            doc_comment: None,
        }
    }

    pub fn generic(mut self, param: GenericParameter) -> Self {
        self.generic_parameters.push(param);
        self
    }

    pub fn extends(mut self, parent: TypeBuilder) -> Self {
        self.extends.push(parent);
        self
    }

    pub fn add(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }

    pub fn add_member(&mut self, member: impl Into<Member>) -> &mut Self {
        self.members.push(member.into());
        self
    }

    pub fn doc(mut self, doc: DocComment) -> Self {
        if !doc.is_empty() {
            self.doc_comment = Some(doc);
        }
        self
    }
}

impl Declaration for Interface {
    fn doc_comment(&self) -> Option<&DocComment> {
        self.doc_comment.as_ref()
    }

    fn write_declaration(&self, writer: &mut Writer) {
        writer.write("interface ").write(&self.name);
        write_generic_parameters(writer, &self.generic_parameters);
        if !self.extends.is_empty() {
            writer.write(" extends ");
            writer.write_joined(", ", &self.extends);
        }
        writer.write(" ");
        if self.members.is_empty() {
            writer.write("{}");
        } else {
            write_member_block(writer, &self.members);
        }
    }
}

/// `const name: T = value`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDeclaration {
    pub name: String,
    pub ty: Option<TypeBuilder>,
    pub value: ValueBuilder,
    pub doc_comment: Option<DocComment>,
}

impl ConstDeclaration {
    pub fn new(name: impl Into<String>, value: ValueBuilder) -> Self {
        Self {
            name: name.into(),
            ty: None,
            value,
            doc_comment: None,
        }
    }

    pub fn typed(mut self, ty: TypeBuilder) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn doc(mut self, doc: DocComment) -> Self {
        if !doc.is_empty() {
            self.doc_comment = Some(doc);
        }
        self
    }
}

impl Declaration for ConstDeclaration {
    fn doc_comment(&self) -> Option<&DocComment> {
        self.doc_comment.as_ref()
    }

    fn write_declaration(&self, writer: &mut Writer) {
        writer.write("const ").write(&self.name);
        if let Some(ty) = &self.ty {
            writer.write(": ");
            ty.write(writer);
        }
        writer.write(" = ");
        self.value.write(writer);
    }
}

impl_builder_for_declaration!(TypeDeclaration, Interface, ConstDeclaration);

/// `export <declaration>`
#[derive(Debug, Clone, PartialEq)]
pub struct Export<T: Declaration>(pub T);

pub fn export<T: Declaration>(declaration: T) -> Export<T> {
    Export(declaration)
}

impl<T: Declaration> BasicBuilder for Export<T> {
    fn write(&self, writer: &mut Writer) {
        if let Some(doc) = self.0.doc_comment() {
            doc.write(writer);
        }
        writer.write("export ");
        self.0.write_declaration(writer);
    }
}
