//! Names of the generated declarations, derived from model and field names.

use crate::dmmf::{DmmfHelper, ModelAction, SchemaField, TypeRef};

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn uncapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Plural used in documentation: the mapping's plural, capitalized.
pub fn plural_name(dmmf: &DmmfHelper, model: &str) -> String {
    dmmf.mapping(model)
        .map(|mapping| capitalize(&mapping.plural))
        .unwrap_or_else(|| format!("{}s", model))
}

pub fn model_type_name(model: &str) -> String {
    format!("{}Model", model)
}

pub fn payload_name(model: &str) -> String {
    format!("${}Payload", model)
}

pub fn get_payload_name(model: &str) -> String {
    format!("{}GetPayload", model)
}

pub fn select_name(model: &str) -> String {
    format!("{}Select", model)
}

pub fn select_scalar_name(model: &str) -> String {
    format!("{}SelectScalar", model)
}

pub fn select_and_return_name(model: &str, action: ModelAction) -> String {
    format!("{}Select{}", model, capitalize(action.as_str()))
}

pub fn include_name(model: &str) -> String {
    format!("{}Include", model)
}

pub fn include_and_return_name(model: &str, action: ModelAction) -> String {
    format!("{}Include{}", model, capitalize(action.as_str()))
}

pub fn omit_name(model: &str) -> String {
    format!("{}Omit", model)
}

pub fn delegate_name(model: &str) -> String {
    format!("{}Delegate", model)
}

pub fn fluent_client_name(model: &str) -> String {
    format!("Prisma__{}Client", model)
}

pub fn field_refs_name(model: &str) -> String {
    format!("{}FieldRefs", model)
}

/// `UserFindManyArgs`, or `UserDefaultArgs` without an action.
pub fn model_args_name(model: &str, action: Option<ModelAction>) -> String {
    match action {
        Some(action) => format!("{}{}Args", model, capitalize(action.as_str())),
        None => format!("{}DefaultArgs", model),
    }
}

/// `User$postsArgs`
pub fn model_field_args_name(model: &str, field: &str) -> String {
    format!("{}${}Args", model, field)
}

/// Args type accepted by a relation field in select and include: the
/// dedicated field args when the field takes arguments, the target's default
/// args otherwise.
pub fn field_args_name(field: &SchemaField, model: &str) -> String {
    if field.args.is_empty() {
        model_args_name(&field.output_type.type_name, None)
    } else {
        model_field_args_name(model, &field.name)
    }
}

pub fn count_args_name(type_name: &str, field: &str) -> String {
    format!("{}Count{}Args", type_name, capitalize(field))
}

pub fn count_output_type_name(model: &str) -> String {
    format!("{}CountOutputType", model)
}

pub fn aggregate_name(model: &str) -> String {
    format!("Aggregate{}", model)
}

pub fn aggregate_output_name(model: &str, kind: &str) -> String {
    format!("{}{}AggregateOutputType", model, kind)
}

/// `UserCountAggregateOutputType` → `UserCountAggregateInputType`
pub fn aggregate_input_name(output_type: &str) -> String {
    match output_type.strip_suffix("OutputType") {
        Some(base) => format!("{}InputType", base),
        None => output_type.to_string(),
    }
}

pub fn aggregate_get_name(model: &str) -> String {
    format!("Get{}AggregateType", model)
}

pub fn group_by_output_name(model: &str) -> String {
    format!("{}GroupByOutputType", model)
}

pub fn group_by_payload_name(model: &str) -> String {
    format!("Get{}GroupByPayload", model)
}

pub fn and_return_output_name(model: &str, action: ModelAction) -> Option<String> {
    match action {
        ModelAction::CreateManyAndReturn => Some(format!("CreateMany{}AndReturnOutputType", model)),
        ModelAction::UpdateManyAndReturn => Some(format!("UpdateMany{}AndReturnOutputType", model)),
        _ => None,
    }
}

/// Model enums are reached through `$Enums`, everything else of the schema
/// through the `Prisma` namespace.
pub fn enum_type_name(type_ref: &TypeRef) -> String {
    if type_ref.namespace() == crate::dmmf::MODEL_NAMESPACE {
        format!("$Enums.{}", type_ref.type_name)
    } else {
        format!("Prisma.{}", type_ref.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_case_helpers() {
        assert_eq!(capitalize("findMany"), "FindMany");
        assert_eq!(uncapitalize("UserProfile"), "userProfile");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_args_names() {
        assert_eq!(
            model_args_name("User", Some(ModelAction::FindUniqueOrThrow)),
            "UserFindUniqueOrThrowArgs"
        );
        assert_eq!(model_args_name("User", None), "UserDefaultArgs");
        assert_eq!(model_field_args_name("User", "posts"), "User$postsArgs");
        assert_eq!(count_args_name("UserCountOutputType", "posts"), "UserCountOutputTypeCountPostsArgs");
    }

    #[test]
    fn test_aggregate_names() {
        assert_eq!(aggregate_output_name("User", "Avg"), "UserAvgAggregateOutputType");
        assert_eq!(
            aggregate_input_name("UserAvgAggregateOutputType"),
            "UserAvgAggregateInputType"
        );
        assert_eq!(
            select_and_return_name("User", ModelAction::CreateManyAndReturn),
            "UserSelectCreateManyAndReturn"
        );
        assert_eq!(
            and_return_output_name("Post", ModelAction::UpdateManyAndReturn).as_deref(),
            Some("UpdateManyPostAndReturnOutputType")
        );
    }
}
