//! The configuration object `internal/class` hands to the runtime.

use super::ClientMetadata;
use crate::config::{DatasourceConfig, normalize_path};
use crate::dmmf::{DatamodelEnum, EnumValue, Field, Model, PrimaryKey, UniqueIndex};
use crate::error::Result;
use crate::generation::context::GenerateContext;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Component, Path};

/// `env("DATABASE_URL")`
static ENV_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^env\(\s*"([^"]+)"\s*\)$"#).expect("Invalid regex for env() urls"));

/// A generator or datasource value that may be read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvValue {
    pub from_env_var: Option<String>,
    pub value: Option<String>,
}

impl EnvValue {
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            from_env_var: None,
            value: Some(value.into()),
        }
    }

    /// Datasource urls written as `env("NAME")` are resolved by the runtime,
    /// everything else is inlined.
    pub fn from_url(url: &str) -> Self {
        match ENV_URL.captures(url.trim()) {
            Some(captures) => Self {
                from_env_var: Some(captures[1].to_string()),
                value: None,
            },
            None => Self::literal(url),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorInfo {
    pub name: String,
    pub provider: EnvValue,
    pub output: EnvValue,
    pub config: BTreeMap<String, String>,
    pub binary_targets: Vec<String>,
    pub preview_features: Vec<String>,
    pub source_file_path: Option<String>,
    pub is_custom_output: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineDatasource {
    pub url: EnvValue,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeModel {
    pub db_name: Option<String>,
    pub schema: Option<String>,
    pub fields: Vec<Field>,
    pub primary_key: Option<PrimaryKey>,
    pub unique_fields: Vec<Vec<String>>,
    pub unique_indexes: Vec<UniqueIndex>,
}

impl From<&Model> for RuntimeModel {
    fn from(model: &Model) -> Self {
        Self {
            db_name: model.db_name.clone(),
            schema: model.schema.clone(),
            fields: model
                .fields
                .iter()
                .map(|field| Field {
                    documentation: None,
                    ..field.clone()
                })
                .collect(),
            primary_key: model.primary_key.clone(),
            unique_fields: model.unique_fields.clone(),
            unique_indexes: model.unique_indexes.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeEnum {
    pub values: Vec<EnumValue>,
    pub db_name: Option<String>,
}

impl From<&DatamodelEnum> for RuntimeEnum {
    fn from(datamodel_enum: &DatamodelEnum) -> Self {
        Self {
            values: datamodel_enum.values.clone(),
            db_name: datamodel_enum.db_name.clone(),
        }
    }
}

/// Datamodel subset the runtime needs to serialize queries, without
/// documentation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuntimeDataModel {
    pub models: BTreeMap<String, RuntimeModel>,
    pub enums: BTreeMap<String, RuntimeEnum>,
    pub types: BTreeMap<String, RuntimeModel>,
}

impl RuntimeDataModel {
    pub fn new(ctx: &GenerateContext<'_>) -> Self {
        let dmmf = ctx.dmmf;
        Self {
            models: dmmf.models().iter().map(|m| (m.name.clone(), m.into())).collect(),
            enums: dmmf
                .datamodel_enums()
                .iter()
                .map(|e| (e.name.clone(), e.into()))
                .collect(),
            types: dmmf
                .composite_types()
                .iter()
                .map(|t| (t.name.clone(), t.into()))
                .collect(),
        }
    }
}

/// The runtime `config` object. The data model is attached separately as a
/// JSON string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub generator: GeneratorInfo,
    pub relative_path: String,
    pub client_version: String,
    pub engine_version: String,
    pub datasource_names: Vec<String>,
    pub active_provider: String,
    pub inline_datasources: BTreeMap<String, InlineDatasource>,
    pub inline_schema: String,
    pub inline_schema_hash: String,
    #[serde(skip)]
    pub runtime_data_model: RuntimeDataModel,
}

/// Hex SHA-256 of the base64-encoded schema.
pub fn inline_schema_hash(schema: &str) -> String {
    let encoded = STANDARD.encode(schema.as_bytes());
    format!("{:x}", Sha256::digest(encoded.as_bytes()))
}

/// Posix path leading from `from` to `to`. Both are expected to be absolute
/// or both relative to the same base.
pub fn relative_path(from: &Path, to: &Path) -> String {
    let (from, to) = (normalize_path(from), normalize_path(to));
    let from: Vec<Component> = from.components().filter(|c| *c != Component::CurDir).collect();
    let to: Vec<Component> = to.components().filter(|c| *c != Component::CurDir).collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts.join("/")
}

fn posix(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn inline_datasources(datasources: &[DatasourceConfig]) -> BTreeMap<String, InlineDatasource> {
    datasources
        .iter()
        .map(|d| {
            let url = match &d.url {
                Some(url) => EnvValue::from_url(url),
                None => EnvValue {
                    from_env_var: None,
                    value: None,
                },
            };
            (d.name.clone(), InlineDatasource { url })
        })
        .collect()
}

impl RuntimeConfig {
    pub fn new(ctx: &GenerateContext<'_>, metadata: &ClientMetadata) -> Self {
        let schema_relative_path = metadata
            .schema_path
            .as_deref()
            .and_then(Path::parent)
            .map(|schema_dir| relative_path(&metadata.output_dir, schema_dir))
            .unwrap_or_default();

        let generator = GeneratorInfo {
            name: metadata.generator_name.clone(),
            provider: EnvValue::literal(&metadata.generator_provider),
            output: EnvValue::literal(posix(&normalize_path(&metadata.output_dir))),
            config: metadata.generator_config.clone(),
            binary_targets: Vec::new(),
            preview_features: ctx.preview_features().map(str::to_string).collect(),
            source_file_path: metadata.schema_path.as_deref().map(posix),
            is_custom_output: true,
        };

        Self {
            generator,
            relative_path: schema_relative_path,
            client_version: metadata.client_version.clone(),
            engine_version: metadata.engine_version.clone(),
            datasource_names: metadata.datasources.iter().map(|d| d.name.clone()).collect(),
            active_provider: metadata.active_provider.clone(),
            inline_datasources: inline_datasources(&metadata.datasources),
            inline_schema: metadata.inline_schema.clone(),
            inline_schema_hash: inline_schema_hash(&metadata.inline_schema),
            runtime_data_model: RuntimeDataModel::new(ctx),
        }
    }

    /// `const config: runtime.GetPrismaClientConfig = {...}` followed by the
    /// data model assignment.
    pub fn to_source(&self) -> Result<String> {
        let mut head = serde_json::to_value(self)?;
        if let Some(object) = head.as_object_mut() {
            object.insert(
                "runtimeDataModel".to_string(),
                serde_json::json!({ "models": {}, "enums": {}, "types": {} }),
            );
        }
        let data_model = serde_json::to_string(&self.runtime_data_model)?;
        Ok(format!(
            "const config: runtime.GetPrismaClientConfig = {}\nconfig.runtimeDataModel = JSON.parse({})",
            serde_json::to_string_pretty(&head)?,
            serde_json::to_string(&data_model)?
        ))
    }
}
