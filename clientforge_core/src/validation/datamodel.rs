use crate::dmmf::{DmmfHelper, MODEL_NAMESPACE};
use crate::error::{ClientforgeError, Result};
use tracing::{debug, trace};

/// Every model with operation mappings must exist in the datamodel and have
/// an output type to derive payloads from.
pub fn validate_mappings(dmmf: &DmmfHelper) -> Result<()> {
    for mapping in &dmmf.mappings().model_operations {
        trace!(model = %mapping.model, "Checking model mapping");
        if dmmf.model(&mapping.model).is_none() {
            return Err(ClientforgeError::missing("model", &mapping.model));
        }
        if dmmf.output_type(MODEL_NAMESPACE, &mapping.model).is_none() {
            return Err(ClientforgeError::missing("output type", &mapping.model));
        }
    }
    debug!(
        mappings = dmmf.mappings().model_operations.len(),
        "Model mappings validated"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::test_support::{blog_document, blog_helper};

    #[test]
    fn test_blog_mappings_are_consistent() {
        assert!(validate_mappings(&blog_helper()).is_ok());
    }

    #[test]
    fn test_mapping_without_model() {
        let mut document = blog_document();
        let mut orphan = document.mappings.model_operations[0].clone();
        orphan.model = "Comment".to_string();
        document.mappings.model_operations.push(orphan);

        let err = validate_mappings(&DmmfHelper::new(document)).unwrap_err();
        assert_eq!(err.to_string(), "Could not find model `Comment` in the DMMF document");
    }

    #[test]
    fn test_mapping_without_output_type() {
        let mut document = blog_document();
        for types in document.schema.output_object_types.values_mut() {
            types.retain(|t| t.name != "Post");
        }

        let err = validate_mappings(&DmmfHelper::new(document)).unwrap_err();
        assert!(matches!(
            err,
            ClientforgeError::MissingSchemaItem { ref kind, ref name } if kind == "output type" && name == "Post"
        ));
    }
}
