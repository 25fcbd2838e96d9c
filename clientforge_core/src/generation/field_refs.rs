use super::naming::field_refs_name;
use crate::dmmf::{FieldRefType, OutputType, TypeLocation, TypeRef};
use crate::ts::{
    DocComment, Export, GenericParameter, Interface, Property, TypeDeclaration, export, generic,
    named, string_literal, union,
};

/// `'Int'`, or `'Int[]'` for lists.
fn allowed_type_name(type_ref: &TypeRef) -> String {
    if type_ref.is_list {
        format!("{}[]", type_ref.type_name)
    } else {
        type_ref.type_name.clone()
    }
}

/// `export type IntFieldRefInput<$PrismaModel> = FieldRefInputType<$PrismaModel, 'Int'>`
pub fn field_ref_input(field_ref: &FieldRefType) -> Export<TypeDeclaration> {
    let allowed: Vec<String> = field_ref.allow_types.iter().map(allowed_type_name).collect();
    let doc = DocComment::new(&format!(
        "Reference to a field of type {}",
        allowed
            .iter()
            .map(|t| format!("'{}'", t))
            .collect::<Vec<_>>()
            .join(" | ")
    ));
    let ty = generic(
        "FieldRefInputType",
        [named("$PrismaModel"), union(allowed.iter().map(string_literal))],
    );
    export(
        TypeDeclaration::new(&field_ref.name, ty)
            .generic(GenericParameter::new("$PrismaModel"))
            .doc(doc),
    )
}

/// `XFieldRefs`: one readonly `FieldRef` per scalar or enum field.
pub fn model_field_refs(output_type: &OutputType) -> Export<Interface> {
    let model = output_type.name.as_str();
    let mut interface = Interface::new(field_refs_name(model))
        .doc(DocComment::new(&format!("Fields of the {} model", model)));
    for field in output_type
        .fields
        .iter()
        .filter(|f| f.output_type.location != TypeLocation::OutputObjectTypes)
    {
        let ty = generic(
            "Prisma.FieldRef",
            [string_literal(model), string_literal(allowed_type_name(&field.output_type))],
        );
        interface.add_member(Property::new(&field.name, ty).readonly());
    }
    export(interface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dmmf::MODEL_NAMESPACE;
    use crate::generation::test_support::blog_helper;
    use crate::ts::to_source;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_ref_input() {
        let dmmf = blog_helper();
        let list = dmmf
            .field_ref_types("prisma")
            .iter()
            .find(|f| f.name == "ListIntFieldRefInput")
            .unwrap();
        assert_eq!(
            to_source(&field_ref_input(list)),
            "/**\n * Reference to a field of type 'Int[]'\n */\nexport type ListIntFieldRefInput<$PrismaModel> = FieldRefInputType<$PrismaModel, 'Int[]'>"
        );
    }

    #[test]
    fn test_model_field_refs_skip_relations() {
        let dmmf = blog_helper();
        let user = dmmf.output_type(MODEL_NAMESPACE, "User").unwrap();
        let source = to_source(&model_field_refs(user));
        assert!(source.contains("export interface UserFieldRefs {\n  readonly id: Prisma.FieldRef<'User', 'Int'>\n"));
        assert!(source.contains("readonly role: Prisma.FieldRef<'User', 'Role'>"));
        assert!(!source.contains("posts"));
    }
}
