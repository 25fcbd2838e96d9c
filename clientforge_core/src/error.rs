use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientforgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to parse DMMF document {file}: {message}")]
    DmmfParse { file: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidConfigValue { key: String, value: String },

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Could not find {kind} `{name}` in the DMMF document")]
    MissingSchemaItem { kind: String, name: String },

    #[error("{0}")]
    Denylist(String),

    #[error("Module graph error: {0}")]
    ModuleGraph(String),

    #[error("Circular dependency detected: {0}")]
    CircularDependency(String),

    #[error("Output directory error: {0}")]
    OutputDirectory(String),

    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid regex pattern: {0}")]
    Regex(String),

    #[error("Directory walk error: {0}")]
    Walk(String),
}

impl From<regex::Error> for ClientforgeError {
    fn from(err: regex::Error) -> Self {
        ClientforgeError::Regex(err.to_string())
    }
}

impl From<walkdir::Error> for ClientforgeError {
    fn from(err: walkdir::Error) -> Self {
        ClientforgeError::Walk(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientforgeError>;

impl ClientforgeError {
    pub fn dmmf_parse(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ClientforgeError::DmmfParse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ClientforgeError::Config(message.into())
    }

    pub fn invalid_config_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        ClientforgeError::InvalidConfigValue {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn missing(kind: impl Into<String>, name: impl Into<String>) -> Self {
        ClientforgeError::MissingSchemaItem {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn denylist(message: impl Into<String>) -> Self {
        ClientforgeError::Denylist(message.into())
    }

    pub fn module_graph(message: impl Into<String>) -> Self {
        ClientforgeError::ModuleGraph(message.into())
    }

    pub fn circular_dependency(message: impl Into<String>) -> Self {
        ClientforgeError::CircularDependency(message.into())
    }

    pub fn output_directory(message: impl Into<String>) -> Self {
        ClientforgeError::OutputDirectory(message.into())
    }
}
