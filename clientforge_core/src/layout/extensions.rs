use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Extension of the files written to the output directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GeneratedFileExtension {
    #[default]
    Ts,
    Mts,
    Cts,
}

impl GeneratedFileExtension {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratedFileExtension::Ts => "ts",
            GeneratedFileExtension::Mts => "mts",
            GeneratedFileExtension::Cts => "cts",
        }
    }

    /// Appends this extension to an extension-less module path.
    pub fn file_name(&self, base: &str) -> String {
        format!("{}.{}", base, self.as_str())
    }
}

/// Extension used inside import specifiers of generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImportFileExtension {
    #[serde(rename = "")]
    #[strum(serialize = "")]
    Bare,
    Ts,
    Mts,
    Cts,
    Js,
    Mjs,
    Cjs,
}

impl ImportFileExtension {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportFileExtension::Bare => "",
            ImportFileExtension::Ts => "ts",
            ImportFileExtension::Mts => "mts",
            ImportFileExtension::Cts => "cts",
            ImportFileExtension::Js => "js",
            ImportFileExtension::Mjs => "mjs",
            ImportFileExtension::Cjs => "cjs",
        }
    }

    /// The extension a compiled `generated` file is imported under.
    pub fn default_for(generated: GeneratedFileExtension) -> Self {
        match generated {
            GeneratedFileExtension::Ts => ImportFileExtension::Js,
            GeneratedFileExtension::Mts => ImportFileExtension::Mjs,
            GeneratedFileExtension::Cts => ImportFileExtension::Cjs,
        }
    }

    /// Builds the specifier used to import `base` (a relative, extension-less path).
    pub fn import_file_name(&self, base: &str) -> String {
        match self {
            ImportFileExtension::Bare => base.to_string(),
            ext => format!("{}.{}", base, ext.as_str()),
        }
    }

    /// Strips this extension from an import specifier, if present.
    pub fn strip<'a>(&self, specifier: &'a str) -> &'a str {
        match self {
            ImportFileExtension::Bare => specifier,
            ext => specifier
                .strip_suffix(ext.as_str())
                .and_then(|s| s.strip_suffix('.'))
                .unwrap_or(specifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_import_extension_defaults_follow_generated_extension() {
        assert_eq!(
            ImportFileExtension::default_for(GeneratedFileExtension::Ts),
            ImportFileExtension::Js
        );
        assert_eq!(
            ImportFileExtension::default_for(GeneratedFileExtension::Mts),
            ImportFileExtension::Mjs
        );
        assert_eq!(
            ImportFileExtension::default_for(GeneratedFileExtension::Cts),
            ImportFileExtension::Cjs
        );
    }

    #[test]
    fn test_import_file_name() {
        assert_eq!(
            ImportFileExtension::Js.import_file_name("./enums"),
            "./enums.js"
        );
        assert_eq!(
            ImportFileExtension::Bare.import_file_name("../models"),
            "../models"
        );
    }

    #[test]
    fn test_strip_only_removes_matching_extension() {
        assert_eq!(ImportFileExtension::Js.strip("./class.js"), "./class");
        assert_eq!(ImportFileExtension::Js.strip("./class.mjs"), "./class.mjs");
        assert_eq!(ImportFileExtension::Bare.strip("./class"), "./class");
    }

    #[test]
    fn test_parse_from_strings() {
        assert_eq!(
            GeneratedFileExtension::from_str("mts").unwrap(),
            GeneratedFileExtension::Mts
        );
        assert_eq!(
            ImportFileExtension::from_str("").unwrap(),
            ImportFileExtension::Bare
        );
        assert!(GeneratedFileExtension::from_str("tsx").is_err());
    }

    #[test]
    fn test_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            generated: GeneratedFileExtension,
            import: ImportFileExtension,
        }
        let holder: Holder = toml::from_str("generated = \"cts\"\nimport = \"\"").unwrap();
        assert_eq!(holder.generated, GeneratedFileExtension::Cts);
        assert_eq!(holder.import, ImportFileExtension::Bare);
    }
}
