use crate::error::{ClientforgeError, Result};
use crate::layout::{GeneratedFileExtension, ImportFileExtension, ModuleFormat, RuntimeTarget};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{
    env, fs,
    path::{Component, Path, PathBuf},
};
use tracing::{debug, error, info, trace, warn};

pub const CONFIG_FILE_NAME: &str = "clientforge.toml";

/// `${VAR_NAME}` or `${VAR_NAME:-default}`
static ENV_VAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")
        .expect("Invalid regex for environment variable substitution")
});

/// Lexically folds `.` and `..` components without touching the file system.
/// A `..` that would climb above the root is dropped; on a relative path it
/// is kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

fn default_generator_name() -> String {
    "client".to_string()
}

fn default_provider() -> String {
    "prisma-client".to_string()
}

fn default_runtime_base() -> String {
    "@prisma/client/runtime".to_string()
}

fn default_client_version() -> String {
    "0.0.0".to_string()
}

/// The `[generator]` table of `clientforge.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorSection {
    #[serde(default = "default_generator_name")]
    pub name: String,

    #[serde(default = "default_provider")]
    pub provider: String,

    /// Directory the client is written to
    pub output: String,

    /// JSON DMMF document produced by the schema engine
    pub dmmf_path: String,

    /// Schema source embedded into the client as `inlineSchema`
    #[serde(default)]
    pub schema_path: Option<String>,

    /// Package path the runtime bundles are imported from
    #[serde(default = "default_runtime_base")]
    pub runtime_base: String,

    #[serde(default)]
    pub target: RuntimeTarget,

    #[serde(default)]
    pub module_format: Option<ModuleFormat>,

    #[serde(default)]
    pub generated_file_extension: GeneratedFileExtension,

    /// Defaults to the compiled counterpart of `generated_file_extension`
    #[serde(default)]
    pub import_file_extension: Option<ImportFileExtension>,

    #[serde(default)]
    pub preview_features: Vec<String>,

    /// Prepends `// @ts-nocheck` to every generated file
    #[serde(default)]
    pub ts_no_check_preamble: bool,

    #[serde(default = "default_client_version")]
    pub client_version: String,

    #[serde(default)]
    pub engine_version: String,

    /// Falls back to the provider of the first datasource
    #[serde(default)]
    pub active_provider: Option<String>,

    /// Free-form generator options passed through to the runtime config
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

/// One `[[datasources]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DatasourceConfig {
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Root configuration loaded from `clientforge.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientforgeConfig {
    pub generator: GeneratorSection,

    #[serde(default)]
    pub datasources: Vec<DatasourceConfig>,

    /// Directory containing the configuration file; relative paths resolve against it
    #[serde(skip)]
    pub config_dir: PathBuf,
}

impl ClientforgeConfig {
    /// Load configuration by searching for `clientforge.toml` in the current
    /// directory and its ancestors.
    pub fn new() -> Result<ClientforgeConfig> {
        info!("Loading clientforge configuration");
        dotenv::dotenv().ok();
        debug!("Environment variables loaded from .env if present");

        let config_path = Self::find_config_file()?;
        info!("Found configuration file at: {:?}", config_path);

        Self::from_path(&config_path)
    }

    /// Load and post-process a specific configuration file.
    pub fn from_path(config_path: &Path) -> Result<ClientforgeConfig> {
        let contents = fs::read_to_string(config_path).map_err(|e| {
            error!("Failed to read configuration file: {}", e);
            ClientforgeError::from(e)
        })?;

        debug!("Configuration file size: {} bytes", contents.len());

        let mut config = Self::from_toml_str(&contents)?;
        config.config_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        info!("Configuration loaded successfully");
        debug!(
            target_runtime = %config.generator.target,
            extension = %config.generator.generated_file_extension,
            preview_features = ?config.generator.preview_features,
            datasource_count = config.datasources.len(),
            "Generator settings"
        );

        Ok(config)
    }

    /// Parse configuration text and substitute environment variables.
    pub fn from_toml_str(contents: &str) -> Result<ClientforgeConfig> {
        let mut config: ClientforgeConfig = toml::from_str(contents).map_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
            ClientforgeError::config(e.to_string())
        })?;
        debug!("Successfully parsed TOML configuration");

        debug!("Substituting environment variables in configuration");
        let generator = &mut config.generator;
        generator.output = Self::substitute_env_vars(&generator.output)?;
        generator.dmmf_path = Self::substitute_env_vars(&generator.dmmf_path)?;
        generator.runtime_base = Self::substitute_env_vars(&generator.runtime_base)?;
        if let Some(schema_path) = &generator.schema_path {
            generator.schema_path = Some(Self::substitute_env_vars(schema_path)?);
        }
        for datasource in &mut config.datasources {
            if let Some(url) = &datasource.url {
                datasource.url = Some(Self::substitute_env_vars(url)?);
            }
        }

        if config.generator.output.trim().is_empty() {
            return Err(ClientforgeError::invalid_config_value(
                "generator.output",
                "\"\"",
            ));
        }

        Ok(config)
    }

    /// Provider string reported to the runtime.
    pub fn active_provider(&self) -> String {
        self.generator
            .active_provider
            .clone()
            .or_else(|| self.datasources.first().map(|d| d.provider.clone()))
            .unwrap_or_default()
    }

    /// Resolves a configured path against the configuration directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            normalize_path(path)
        } else {
            normalize_path(&self.config_dir.join(path))
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.generator.output)
    }

    pub fn dmmf_path(&self) -> PathBuf {
        self.resolve_path(&self.generator.dmmf_path)
    }

    pub fn schema_path(&self) -> Option<PathBuf> {
        self.generator
            .schema_path
            .as_deref()
            .map(|p| self.resolve_path(p))
    }

    /// Searches for `clientforge.toml` starting from the current directory
    /// and traversing up to the root.
    fn find_config_file() -> Result<PathBuf> {
        let current_dir = env::current_dir()?;
        debug!("Starting config file search from: {:?}", current_dir);

        for path in current_dir.ancestors() {
            let config_path = path.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", config_path);
            if config_path.exists() {
                return Ok(config_path);
            }
        }

        error!("Configuration file '{}' not found in any parent directory.", CONFIG_FILE_NAME);
        Err(ClientforgeError::config(format!(
            "{} not found in current or any parent directory.",
            CONFIG_FILE_NAME
        )))
    }

    /// Substitute environment variables in config strings.
    /// Supports `${VAR_NAME:-default}` syntax.
    pub(crate) fn substitute_env_vars(value: &str) -> Result<String> {
        trace!("Substituting environment variables in: {}", value);
        let mut result = value.to_string();

        for cap in ENV_VAR_PATTERN.captures_iter(value) {
            let var_name = &cap[1];
            let default_value = cap.get(2).map(|m| m.as_str());

            let replacement = match env::var(var_name) {
                Ok(val) => {
                    debug!("Resolved environment variable: {}", var_name);
                    val
                }
                Err(_) => match default_value {
                    Some(default) => {
                        warn!(
                            "Environment variable {} not set, using default: {}",
                            var_name, default
                        );
                        default.to_string()
                    }
                    None => {
                        error!(
                            "Environment variable {} not set and no default provided",
                            var_name
                        );
                        return Err(ClientforgeError::EnvVarNotSet(var_name.to_string()));
                    }
                },
            };

            result = result.replace(&cap[0], &replacement);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
        [generator]
        output = "./generated/client"
        dmmf_path = "./dmmf.json"
    "#;

    // ==================== Parsing ====================

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = ClientforgeConfig::from_toml_str(MINIMAL).unwrap();
        let generator = &config.generator;
        assert_eq!(generator.name, "client");
        assert_eq!(generator.provider, "prisma-client");
        assert_eq!(generator.runtime_base, "@prisma/client/runtime");
        assert_eq!(generator.target, RuntimeTarget::Nodejs);
        assert_eq!(generator.generated_file_extension, GeneratedFileExtension::Ts);
        assert_eq!(generator.import_file_extension, None);
        assert_eq!(generator.module_format, None);
        assert!(generator.preview_features.is_empty());
        assert!(!generator.ts_no_check_preamble);
        assert!(config.datasources.is_empty());
    }

    #[test]
    fn test_full_config() {
        let toml_str = r#"
            [generator]
            output = "out"
            dmmf_path = "dmmf.json"
            schema_path = "schema.prisma"
            target = "vercel-edge"
            module_format = "cjs"
            generated_file_extension = "cts"
            import_file_extension = ""
            preview_features = ["driverAdapters", "strictUndefinedChecks"]
            ts_no_check_preamble = true
            engine_version = "abc123"

            [generator.config]
            engineType = "client"

            [[datasources]]
            name = "db"
            provider = "postgresql"
            url = "postgres://localhost/db"
        "#;
        let config = ClientforgeConfig::from_toml_str(toml_str).unwrap();
        let generator = &config.generator;
        assert_eq!(generator.target, RuntimeTarget::VercelEdge);
        assert_eq!(generator.module_format, Some(ModuleFormat::Cjs));
        assert_eq!(generator.generated_file_extension, GeneratedFileExtension::Cts);
        assert_eq!(
            generator.import_file_extension,
            Some(ImportFileExtension::Bare)
        );
        assert_eq!(generator.preview_features.len(), 2);
        assert!(generator.ts_no_check_preamble);
        assert_eq!(generator.config.get("engineType").unwrap(), "client");
        assert_eq!(config.active_provider(), "postgresql");
    }

    #[test]
    fn test_explicit_active_provider_wins() {
        let toml_str = r#"
            [generator]
            output = "out"
            dmmf_path = "dmmf.json"
            active_provider = "sqlite"

            [[datasources]]
            name = "db"
            provider = "postgresql"
        "#;
        let config = ClientforgeConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.active_provider(), "sqlite");
    }

    #[test]
    fn test_missing_generator_table_is_error() {
        let result = ClientforgeConfig::from_toml_str("[[datasources]]\nname = \"db\"\nprovider = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_target_is_error() {
        let toml_str = r#"
            [generator]
            output = "out"
            dmmf_path = "dmmf.json"
            target = "bun"
        "#;
        assert!(ClientforgeConfig::from_toml_str(toml_str).is_err());
    }

    #[test]
    fn test_empty_output_is_rejected() {
        let toml_str = r#"
            [generator]
            output = "  "
            dmmf_path = "dmmf.json"
        "#;
        let err = ClientforgeConfig::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, ClientforgeError::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_env_substitution_applies_to_paths_and_urls() {
        temp_env::with_vars(
            [
                ("CF_TEST_OUT_DIR", Some("/tmp/cf-out")),
                ("CF_TEST_DB_URL", Some("file:./dev.db")),
            ],
            || {
                let toml_str = r#"
                    [generator]
                    output = "${CF_TEST_OUT_DIR}"
                    dmmf_path = "${CF_TEST_DMMF:-./dmmf.json}"

                    [[datasources]]
                    name = "db"
                    provider = "sqlite"
                    url = "${CF_TEST_DB_URL}"
                "#;
                let config = ClientforgeConfig::from_toml_str(toml_str).unwrap();
                assert_eq!(config.generator.output, "/tmp/cf-out");
                assert_eq!(config.generator.dmmf_path, "./dmmf.json");
                assert_eq!(
                    config.datasources[0].url.as_deref(),
                    Some("file:./dev.db")
                );
            },
        );
    }

    #[test]
    fn test_from_path_resolves_relative_paths() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, MINIMAL).unwrap();

        let config = ClientforgeConfig::from_path(&config_path).unwrap();
        assert_eq!(config.config_dir, temp_dir.path());
        assert_eq!(config.output_dir(), temp_dir.path().join("generated/client"));
        assert_eq!(config.dmmf_path(), temp_dir.path().join("dmmf.json"));
        assert_eq!(config.schema_path(), None);
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let mut config = ClientforgeConfig::from_toml_str(MINIMAL).unwrap();
        config.config_dir = PathBuf::from("/project");
        let absolute = if cfg!(windows) { "C:\\out" } else { "/out" };
        assert_eq!(config.resolve_path(absolute), PathBuf::from(absolute));
        assert_eq!(config.resolve_path("out"), PathBuf::from("/project/out"));
    }

    #[test]
    fn test_resolve_path_folds_dot_segments() {
        let mut config = ClientforgeConfig::from_toml_str(MINIMAL).unwrap();
        config.config_dir = PathBuf::from("/proj/prisma");
        assert_eq!(config.resolve_path("../generated"), PathBuf::from("/proj/generated"));
        assert_eq!(config.resolve_path("./out/./client"), PathBuf::from("/proj/prisma/out/client"));
        assert_eq!(config.resolve_path("/a/b/../../../c"), PathBuf::from("/c"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_path(Path::new("../x/..")), PathBuf::from(".."));
        assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
    }

    // ==================== substitute_env_vars ====================

    #[test]
    fn test_substitute_env_vars_basic() {
        temp_env::with_var("CF_TEST_VAR_BASIC", Some("hello"), || {
            let result = ClientforgeConfig::substitute_env_vars("${CF_TEST_VAR_BASIC}").unwrap();
            assert_eq!(result, "hello");
        });
    }

    #[test]
    fn test_substitute_env_vars_multiple_and_adjacent() {
        temp_env::with_vars(
            [("CF_TEST_ADJ1", Some("a")), ("CF_TEST_ADJ2", Some("b"))],
            || {
                let result =
                    ClientforgeConfig::substitute_env_vars("${CF_TEST_ADJ1}${CF_TEST_ADJ2}/x")
                        .unwrap();
                assert_eq!(result, "ab/x");
            },
        );
    }

    #[test]
    fn test_substitute_env_vars_default_used_when_unset() {
        temp_env::with_var_unset("CF_TEST_UNSET_WITH_DEFAULT", || {
            let result =
                ClientforgeConfig::substitute_env_vars("${CF_TEST_UNSET_WITH_DEFAULT:-fallback}")
                    .unwrap();
            assert_eq!(result, "fallback");
        });
    }

    #[test]
    fn test_substitute_env_vars_missing_returns_error() {
        temp_env::with_var_unset("CF_DEFINITELY_NOT_SET_12345", || {
            let result = ClientforgeConfig::substitute_env_vars("${CF_DEFINITELY_NOT_SET_12345}");
            assert!(matches!(result, Err(ClientforgeError::EnvVarNotSet(_))));
        });
    }

    #[test]
    fn test_substitute_env_vars_preserves_non_matching_braces() {
        let result = ClientforgeConfig::substitute_env_vars("{not_a_var}").unwrap();
        assert_eq!(result, "{not_a_var}");
    }

    // ==================== find_config_file ====================
    // These change the process working directory and must run with
    // --test-threads=1.

    #[test]
    #[ignore = "requires --test-threads=1 due to env::set_current_dir"]
    fn test_find_config_file_in_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let child_dir = temp_dir.path().join("child");
        fs::create_dir(&child_dir).unwrap();

        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, MINIMAL).unwrap();
        let expected_canonical = config_path.canonicalize().unwrap();

        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(&child_dir).unwrap();

        let result = ClientforgeConfig::find_config_file();

        env::set_current_dir(original_dir).unwrap();

        let result_canonical = result.unwrap().canonicalize().unwrap();
        assert_eq!(result_canonical, expected_canonical);
    }

    #[test]
    #[ignore = "requires --test-threads=1 due to env::set_current_dir"]
    fn test_find_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(temp_dir.path()).unwrap();

        let result = ClientforgeConfig::find_config_file();

        env::set_current_dir(original_dir).unwrap();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("clientforge.toml not found"));
    }
}
