//! The fixed set of generated modules.
//!
//! Every module is returned under its extension-less path relative to the
//! output directory; extensions are applied when the file map is written.

pub mod barrels;
pub mod class;
pub mod client;
mod common;
pub mod namespace;
pub mod namespace_browser;
pub mod runtime_config;

use crate::config::{ClientforgeConfig, DatasourceConfig};
use crate::error::Result;
use crate::generation::context::GenerateContext;
use crate::generation::model_file::model_files;
use crate::ts::SourceFile;
use bon::Builder;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Facts about the generator invocation that end up in the runtime config.
#[derive(Debug, Clone, Builder)]
pub struct ClientMetadata {
    #[builder(into, default = "client".to_string())]
    pub generator_name: String,
    #[builder(into, default = "prisma-client".to_string())]
    pub generator_provider: String,
    #[builder(default)]
    pub generator_config: BTreeMap<String, String>,
    #[builder(into)]
    pub output_dir: PathBuf,
    #[builder(into)]
    pub schema_path: Option<PathBuf>,
    #[builder(into, default)]
    pub inline_schema: String,
    #[builder(into, default = "0.0.0".to_string())]
    pub client_version: String,
    #[builder(into, default)]
    pub engine_version: String,
    #[builder(into, default)]
    pub active_provider: String,
    #[builder(default)]
    pub datasources: Vec<DatasourceConfig>,
}

impl ClientMetadata {
    /// Metadata for a configured generator. The schema text is read by the
    /// caller since the file is optional.
    pub fn from_config(config: &ClientforgeConfig, inline_schema: String) -> Self {
        let generator = &config.generator;
        ClientMetadata {
            generator_name: generator.name.clone(),
            generator_provider: generator.provider.clone(),
            generator_config: generator.config.clone(),
            output_dir: config.output_dir(),
            schema_path: config.schema_path(),
            inline_schema,
            client_version: generator.client_version.clone(),
            engine_version: generator.engine_version.clone(),
            active_provider: config.active_provider(),
            datasources: config.datasources.clone(),
        }
    }
}

/// Builds every generated module.
pub fn build_source_files(
    ctx: &GenerateContext<'_>,
    metadata: &ClientMetadata,
) -> Result<Vec<(String, SourceFile)>> {
    info!(
        models = ctx.dmmf.models().len(),
        enums = ctx.dmmf.datamodel_enums().len(),
        "Building client modules"
    );

    let mut files = vec![
        (client::CLIENT_MODULE.to_string(), client::client_file(ctx)),
        (client::BROWSER_MODULE.to_string(), client::browser_file(ctx)),
        (barrels::ENUMS_MODULE.to_string(), barrels::enums_file(ctx)),
        (barrels::MODELS_MODULE.to_string(), barrels::models_file(ctx)),
        (
            barrels::COMMON_INPUT_TYPES_MODULE.to_string(),
            barrels::common_input_types_file(ctx),
        ),
        (
            namespace::NAMESPACE_MODULE.to_string(),
            namespace::namespace_file(ctx, metadata),
        ),
        (
            namespace_browser::NAMESPACE_BROWSER_MODULE.to_string(),
            namespace_browser::namespace_browser_file(ctx),
        ),
        (class::CLASS_MODULE.to_string(), class::class_file(ctx, metadata)?),
    ];
    files.extend(model_files(ctx)?);

    debug!(module_count = files.len(), "Client modules built");
    Ok(files)
}

#[cfg(test)]
pub(crate) fn test_metadata() -> ClientMetadata {
    ClientMetadata::builder()
        .output_dir("/project/generated")
        .schema_path(PathBuf::from("/project/prisma/schema.prisma"))
        .inline_schema("datasource db {\n  provider = \"postgresql\"\n  url      = env(\"DATABASE_URL\")\n}\n")
        .client_version("6.1.0")
        .engine_version("0000000000000000000000000000000000000000")
        .active_provider("postgresql")
        .datasources(vec![DatasourceConfig {
            name: "db".to_string(),
            provider: "postgresql".to_string(),
            url: Some("env(\"DATABASE_URL\")".to_string()),
        }])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::context::ContextSettings;
    use crate::generation::test_support::blog_helper;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_module_set() {
        let dmmf = blog_helper();
        let ctx = GenerateContext::new(&dmmf, ContextSettings::builder().build());
        let files = build_source_files(&ctx, &test_metadata()).unwrap();
        let names: Vec<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "client",
                "browser",
                "enums",
                "models",
                "commonInputTypes",
                "internal/prismaNamespace",
                "internal/prismaNamespaceBrowser",
                "internal/class",
                "models/User",
                "models/Post",
            ]
        );
    }

    #[test]
    fn test_metadata_defaults() {
        let metadata = ClientMetadata::builder().output_dir("out").build();
        assert_eq!(metadata.generator_name, "client");
        assert_eq!(metadata.generator_provider, "prisma-client");
        assert_eq!(metadata.client_version, "0.0.0");
        assert!(metadata.schema_path.is_none());
        assert!(metadata.datasources.is_empty());
    }
}
