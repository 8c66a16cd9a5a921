use roost_types::{Annotation, FieldMetadata, JavaType, MemberDetails};

pub fn members(fields: Vec<FieldMetadata>) -> MemberDetails {
    MemberDetails::bean(JavaType::new("com.example.Person"), fields)
}

/// Fields whose capitalized names never shadow one another or a keyword in
/// a way the greedy tokenizer cannot recover from.
pub fn field_pool() -> Vec<FieldMetadata> {
    vec![
        FieldMetadata::new("name", JavaType::string()),
        FieldMetadata::new("age", JavaType::int()),
        FieldMetadata::new("salary", JavaType::new("java.math.BigDecimal")),
        FieldMetadata::new("birthDay", JavaType::new("java.util.Date")),
        FieldMetadata::new("active", JavaType::boolean()),
        FieldMetadata::new("notes", JavaType::string()),
        FieldMetadata::new("lastName", JavaType::string()),
        FieldMetadata::new("nickname", JavaType::string()),
    ]
}

pub fn person() -> MemberDetails {
    let mut fields = vec![
        FieldMetadata::new("id", JavaType::long_object()).with_annotation(Annotation::new("Id")),
        FieldMetadata::new("version", JavaType::new("java.lang.Integer"))
            .with_annotation(Annotation::new("Version")),
    ];
    fields.extend(field_pool());
    members(fields)
}
