//! Imports, re-exports and whole source files.

use super::doc_comment::DocComment;
use super::types::quote_string;
use super::writer::{BasicBuilder, Writer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedItem {
    pub name: String,
    pub alias: Option<String>,
    pub type_only: bool,
}

impl NamedItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            type_only: false,
        }
    }

    pub fn as_type(mut self) -> Self {
        self.type_only = true;
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl BasicBuilder for NamedItem {
    fn write(&self, writer: &mut Writer) {
        if self.type_only {
            writer.write("type ");
        }
        writer.write(&self.name);
        if let Some(alias) = &self.alias {
            writer.write(" as ").write(alias);
        }
    }
}

fn write_named_items(writer: &mut Writer, items: &[NamedItem]) {
    writer.write("{ ");
    writer.write_joined(", ", items);
    writer.write(" }");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKind {
    /// `import * as alias from`
    Namespace(String),
    /// `import { a, type b } from`
    Named(Vec<NamedItem>),
    /// `import alias from`
    Default(String),
    /// `import 'module'`
    SideEffect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub kind: ImportKind,
    pub from: String,
    /// `import type ...`
    pub type_only: bool,
}

impl Import {
    pub fn namespace(alias: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            kind: ImportKind::Namespace(alias.into()),
            from: from.into(),
            type_only: false,
        }
    }

    pub fn named(items: Vec<NamedItem>, from: impl Into<String>) -> Self {
        Self {
            kind: ImportKind::Named(items),
            from: from.into(),
            type_only: false,
        }
    }

    pub fn default(alias: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            kind: ImportKind::Default(alias.into()),
            from: from.into(),
            type_only: false,
        }
    }

    pub fn side_effect(from: impl Into<String>) -> Self {
        Self {
            kind: ImportKind::SideEffect,
            from: from.into(),
            type_only: false,
        }
    }

    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    /// Whether the import disappears at runtime.
    pub fn is_erased(&self) -> bool {
        self.type_only
            || matches!(&self.kind, ImportKind::Named(items) if !items.is_empty() && items.iter().all(|i| i.type_only))
    }
}

impl BasicBuilder for Import {
    fn write(&self, writer: &mut Writer) {
        writer.write("import ");
        if self.type_only {
            writer.write("type ");
        }
        match &self.kind {
            ImportKind::Namespace(alias) => {
                writer.write("* as ").write(alias).write(" from ");
            }
            ImportKind::Named(items) => {
                write_named_items(writer, items);
                writer.write(" from ");
            }
            ImportKind::Default(alias) => {
                writer.write(alias).write(" from ");
            }
            ImportKind::SideEffect => {}
        }
        writer.write(&quote_string(&self.from));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportFromKind {
    /// `export * from`
    All,
    /// `export * as alias from`
    AllAs(String),
    /// `export { a, type b } from`
    Named(Vec<NamedItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFrom {
    pub kind: ExportFromKind,
    pub from: String,
    /// `export type ...`
    pub type_only: bool,
}

impl ExportFrom {
    pub fn all(from: impl Into<String>) -> Self {
        Self {
            kind: ExportFromKind::All,
            from: from.into(),
            type_only: false,
        }
    }

    pub fn all_as(alias: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            kind: ExportFromKind::AllAs(alias.into()),
            from: from.into(),
            type_only: false,
        }
    }

    pub fn named(items: Vec<NamedItem>, from: impl Into<String>) -> Self {
        Self {
            kind: ExportFromKind::Named(items),
            from: from.into(),
            type_only: false,
        }
    }

    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    pub fn is_erased(&self) -> bool {
        self.type_only
            || matches!(&self.kind, ExportFromKind::Named(items) if !items.is_empty() && items.iter().all(|i| i.type_only))
    }
}

impl BasicBuilder for ExportFrom {
    fn write(&self, writer: &mut Writer) {
        writer.write("export ");
        if self.type_only {
            writer.write("type ");
        }
        match &self.kind {
            ExportFromKind::All => {
                writer.write("*");
            }
            ExportFromKind::AllAs(alias) => {
                writer.write("* as ").write(alias);
            }
            ExportFromKind::Named(items) => write_named_items(writer, items),
        }
        writer.write(" from ").write(&quote_string(&self.from));
    }
}

/// A module specifier some file depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReference<'a> {
    pub specifier: &'a str,
    pub type_only: bool,
}

type Item = Box<dyn BasicBuilder + Send + Sync>;

/// A generated TypeScript module: imports, re-exports, then body items
/// separated by blank lines.
#[derive(Default)]
pub struct SourceFile {
    header: Option<DocComment>,
    imports: Vec<Import>,
    exports_from: Vec<ExportFrom>,
    body: Vec<Item>,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("header", &self.header)
            .field("imports", &self.imports)
            .field("exports_from", &self.exports_from)
            .field("body_items", &self.body.len())
            .finish()
    }
}

impl SourceFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leading comment printed above the imports.
    pub fn set_header(&mut self, header: DocComment) -> &mut Self {
        self.header = Some(header);
        self
    }

    pub fn add_import(&mut self, import: Import) -> &mut Self {
        self.imports.push(import);
        self
    }

    pub fn add_export_from(&mut self, export: ExportFrom) -> &mut Self {
        self.exports_from.push(export);
        self
    }

    pub fn add(&mut self, item: impl BasicBuilder + Send + Sync + 'static) -> &mut Self {
        self.body.push(Box::new(item));
        self
    }

    pub fn extend<I, B>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = B>,
        B: BasicBuilder + Send + Sync + 'static,
    {
        for item in items {
            self.add(item);
        }
        self
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    pub fn exports_from(&self) -> &[ExportFrom] {
        &self.exports_from
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.exports_from.is_empty() && self.body.is_empty()
    }

    /// Every module this file imports from or re-exports.
    pub fn references(&self) -> impl Iterator<Item = ModuleReference<'_>> {
        let imports = self.imports.iter().map(|i| ModuleReference {
            specifier: &i.from,
            type_only: i.is_erased(),
        });
        let exports = self.exports_from.iter().map(|e| ModuleReference {
            specifier: &e.from,
            type_only: e.is_erased(),
        });
        imports.chain(exports)
    }
}

impl BasicBuilder for SourceFile {
    fn write(&self, writer: &mut Writer) {
        if let Some(header) = &self.header {
            header.write(writer);
            writer.new_line();
        }
        for import in &self.imports {
            import.write(writer);
            writer.new_line();
        }
        if !self.imports.is_empty() {
            writer.new_line();
        }
        for export in &self.exports_from {
            export.write(writer);
            writer.new_line();
        }
        if !self.exports_from.is_empty() {
            writer.new_line();
        }
        for item in &self.body {
            item.write(writer);
            writer.ensure_new_line();
            writer.new_line();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ts::declarations::{TypeDeclaration, export};
    use crate::ts::types::named;
    use crate::ts::{StringifyOptions, stringify};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_import_forms() {
        let render = |i: &Import| stringify(i, StringifyOptions::default());
        assert_eq!(
            render(&Import::namespace("runtime", "@prisma/client/runtime/client")),
            "import * as runtime from '@prisma/client/runtime/client'"
        );
        assert_eq!(
            render(&Import::namespace("$Enums", "../enums.js").type_only()),
            "import type * as $Enums from '../enums.js'"
        );
        assert_eq!(
            render(&Import::named(
                vec![NamedItem::new("PrismaClient").as_type(), NamedItem::new("x").alias("y")],
                "./class.js"
            )),
            "import { type PrismaClient, x as y } from './class.js'"
        );
        assert_eq!(render(&Import::side_effect("./shim.js")), "import './shim.js'");
    }

    #[test]
    fn test_export_from_forms() {
        let render = |e: &ExportFrom| stringify(e, StringifyOptions::default());
        assert_eq!(render(&ExportFrom::all("./enums.js")), "export * from './enums.js'");
        assert_eq!(
            render(&ExportFrom::all("../models.js").type_only()),
            "export type * from '../models.js'"
        );
        assert_eq!(
            render(&ExportFrom::all_as("$Enums", "./enums.js")),
            "export * as $Enums from './enums.js'"
        );
    }

    #[test]
    fn test_erased_references() {
        let mut file = SourceFile::new();
        file.add_import(Import::namespace("runtime", "rt"))
            .add_import(Import::named(vec![NamedItem::new("A").as_type()], "./a.js"))
            .add_export_from(ExportFrom::all("./b.js").type_only());
        let refs: Vec<_> = file.references().map(|r| (r.specifier, r.type_only)).collect();
        assert_eq!(refs, vec![("rt", false), ("./a.js", true), ("./b.js", true)]);
    }

    #[test]
    fn test_header_precedes_imports() {
        let mut file = SourceFile::new();
        file.set_header(DocComment::new("🟢 You can import this file directly."))
            .add_import(Import::namespace("runtime", "rt"));
        insta::assert_snapshot!(
            stringify(&file, StringifyOptions::default()).replace('\n', "|"),
            @"/**| * 🟢 You can import this file directly.| */||import * as runtime from 'rt'||"
        );
    }

    #[test]
    fn test_source_file_layout() {
        let mut file = SourceFile::new();
        file.add_import(Import::namespace("runtime", "rt"));
        file.add(export(TypeDeclaration::new("A", named("string"))));
        file.add(export(TypeDeclaration::new("B", named("number"))));
        assert_eq!(
            stringify(&file, StringifyOptions::default()),
            "import * as runtime from 'rt'\n\nexport type A = string\n\nexport type B = number\n\n"
        );
    }
}
