use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// JavaScript runtime the generated client is meant to run on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RuntimeTarget {
    #[default]
    Nodejs,
    Deno,
    Workerd,
    VercelEdge,
}

/// Runtime bundle the generated code imports from `<runtime_base>/<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RuntimeName {
    #[strum(serialize = "client")]
    Client,
    #[strum(serialize = "wasm-compiler-edge")]
    WasmCompilerEdge,
}

impl RuntimeTarget {
    pub fn runtime_name(&self) -> RuntimeName {
        match self {
            RuntimeTarget::Nodejs | RuntimeTarget::Deno => RuntimeName::Client,
            RuntimeTarget::Workerd | RuntimeTarget::VercelEdge => RuntimeName::WasmCompilerEdge,
        }
    }

    /// Edge targets have no file system, so no `__dirname` is wired in.
    pub fn is_edge(&self) -> bool {
        matches!(self, RuntimeTarget::Workerd | RuntimeTarget::VercelEdge)
    }
}

impl RuntimeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeName::Client => "client",
            RuntimeName::WasmCompilerEdge => "wasm-compiler-edge",
        }
    }

    /// Runtimes that accept a driver adapter instance in the client options.
    pub fn supports_driver_adapters(&self) -> bool {
        matches!(self, RuntimeName::Client)
    }
}

/// Joins the configured runtime base with the runtime bundle name.
pub fn runtime_import_path(runtime_base: &str, name: RuntimeName) -> String {
    format!("{}/{}", runtime_base.trim_end_matches('/'), name.as_str())
}
