//! How generated modules are named, laid out and wired together.

mod extensions;
mod file_map;
mod module_format;
mod module_graph;
mod preamble;
mod runtime;

pub use extensions::{GeneratedFileExtension, ImportFileExtension};
pub use file_map::FileMap;
pub use module_format::ModuleFormat;
pub use module_graph::{ModuleEdge, ModuleGraph, resolve_relative};
pub use preamble::{GENERATED_BANNER, TS_NO_CHECK, is_source_file, preamble};
pub use runtime::{RuntimeName, RuntimeTarget, runtime_import_path};
