use super::generic_args::GenericArgsInfo;
use crate::dmmf::DmmfHelper;
use crate::layout::{ImportFileExtension, ModuleFormat, RuntimeName, RuntimeTarget, runtime_import_path};
use bon::Builder;
use std::collections::BTreeSet;

pub const DEFAULT_RUNTIME_BASE: &str = "@prisma/client/runtime";

/// Generation switches that do not come from the DMMF document.
#[derive(Debug, Clone, Builder)]
pub struct ContextSettings {
    #[builder(default)]
    pub preview_features: Vec<String>,
    #[builder(default)]
    pub target: RuntimeTarget,
    #[builder(default)]
    pub module_format: ModuleFormat,
    #[builder(default = ImportFileExtension::Js)]
    pub import_extension: ImportFileExtension,
    #[builder(default = DEFAULT_RUNTIME_BASE.to_string())]
    pub runtime_base: String,
}

/// Everything the declaration builders need besides the node being built.
#[derive(Debug)]
pub struct GenerateContext<'a> {
    pub dmmf: &'a DmmfHelper,
    pub generic_args: GenericArgsInfo,
    pub target: RuntimeTarget,
    pub runtime_name: RuntimeName,
    pub module_format: ModuleFormat,
    pub import_extension: ImportFileExtension,
    /// Base path the runtime bundles live under.
    pub runtime_base: String,
    /// Specifier of the runtime bundle, e.g. `@prisma/client/runtime/client`.
    pub runtime_import: String,
    preview_features: BTreeSet<String>,
}

impl<'a> GenerateContext<'a> {
    pub fn new(dmmf: &'a DmmfHelper, settings: ContextSettings) -> Self {
        let runtime_name = settings.target.runtime_name();
        Self {
            dmmf,
            generic_args: GenericArgsInfo::new(dmmf),
            target: settings.target,
            runtime_name,
            module_format: settings.module_format,
            import_extension: settings.import_extension,
            runtime_import: runtime_import_path(&settings.runtime_base, runtime_name),
            runtime_base: settings.runtime_base,
            preview_features: settings.preview_features.into_iter().collect(),
        }
    }

    pub fn is_preview_feature_on(&self, feature: &str) -> bool {
        self.preview_features.contains(feature)
    }

    pub fn preview_features(&self) -> impl Iterator<Item = &str> {
        self.preview_features.iter().map(String::as_str)
    }

    /// Import specifier for a generated module, e.g. `./enums` → `./enums.js`.
    pub fn import_file_name(&self, base: &str) -> String {
        self.import_extension.import_file_name(base)
    }

    /// Specifier of the runtime as seen from a module nested `depth`
    /// directories below the output root. Package specifiers are returned
    /// unchanged; relative ones are rebased.
    pub fn runtime_import_from(&self, depth: usize) -> String {
        rebase_specifier(&self.runtime_import, depth)
    }

    /// Specifier of the browser runtime bundle.
    pub fn browser_runtime_import_from(&self, depth: usize) -> String {
        let base = format!("{}/index-browser", self.runtime_base.trim_end_matches('/'));
        rebase_specifier(&base, depth)
    }
}

fn rebase_specifier(specifier: &str, depth: usize) -> String {
    if depth == 0 || !(specifier.starts_with("./") || specifier.starts_with("../")) {
        return specifier.to_string();
    }
    let rest = specifier.strip_prefix("./").unwrap_or(specifier);
    format!("{}{}", "../".repeat(depth), rest)
}
