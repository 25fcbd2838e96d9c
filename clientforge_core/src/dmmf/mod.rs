//! The DMMF document: schema IR produced by the query engine.

mod helper;
mod types;

pub use helper::DmmfHelper;
pub use types::*;

use crate::error::{ClientforgeError, Result};
use std::path::Path;
use tracing::debug;

impl Document {
    pub fn from_json(json: &str) -> Result<Document> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Document> {
        debug!(path = %path.display(), "Reading DMMF document");
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| ClientforgeError::dmmf_parse(path, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_path_reports_file_on_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"datamodel\": ").unwrap();

        let err = Document::from_path(file.path()).unwrap_err();
        assert!(matches!(err, ClientforgeError::DmmfParse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_from_json_accepts_minimal_document() {
        let doc = Document::from_json(
            r#"{"datamodel": {}, "schema": {}, "mappings": {}}"#,
        )
        .unwrap();
        assert!(doc.datamodel.models.is_empty());
        assert!(doc.mappings.other_operations.write.is_empty());
    }
}
