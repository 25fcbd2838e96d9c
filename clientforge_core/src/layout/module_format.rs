use super::extensions::GeneratedFileExtension;
use crate::error::{ClientforgeError, Result};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModuleFormat {
    #[default]
    Esm,
    Cjs,
}

impl ModuleFormat {
    /// Resolves the effective module format.
    ///
    /// `.mts` files are always ES modules and `.cts` files are always
    /// CommonJS; asking for the other format with those extensions is an
    /// error. Plain `.ts` output uses the configured format, ESM by default.
    pub fn resolve(
        configured: Option<ModuleFormat>,
        extension: GeneratedFileExtension,
    ) -> Result<ModuleFormat> {
        let implied = match extension {
            GeneratedFileExtension::Mts => Some(ModuleFormat::Esm),
            GeneratedFileExtension::Cts => Some(ModuleFormat::Cjs),
            GeneratedFileExtension::Ts => None,
        };

        match (configured, implied) {
            (Some(configured), Some(implied)) if configured != implied => {
                Err(ClientforgeError::config(format!(
                    "module format `{}` conflicts with generated file extension `{}`, which implies `{}`",
                    configured, extension, implied
                )))
            }
            (_, Some(implied)) => Ok(implied),
            (Some(configured), None) => Ok(configured),
            (None, None) => Ok(ModuleFormat::default()),
        }
    }
}
