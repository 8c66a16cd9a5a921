//! Annotation-aware view of a user type, as resolved by the metadata layer.

use crate::beans::{capitalize, is_mutator, property_name_for_mutator};
use crate::plural::pluralize;
use crate::{JavaType, Parameter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    String(String),
    Boolean(bool),
    Integer(i64),
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// All string values, flattening `{...}` array values.
    pub fn strings(&self) -> Vec<&str> {
        match self {
            AnnotationValue::String(value) => vec![value.as_str()],
            AnnotationValue::Array(values) => values.iter().flat_map(|v| v.strings()).collect(),
            AnnotationValue::Boolean(_) | AnnotationValue::Integer(_) => Vec::new(),
        }
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        AnnotationValue::String(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationAttribute {
    pub name: String,
    pub value: AnnotationValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: String,
    pub attributes: Vec<AnnotationAttribute>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        let mut name = name.into();
        if let Some(stripped) = name.strip_prefix('@') {
            name = stripped.to_string();
        }
        Self {
            name,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.attributes.push(AnnotationAttribute {
            name: name.into(),
            value,
        });
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AnnotationValue> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| &attr.value)
    }

    /// Matches either the fully qualified or the simple annotation name.
    pub fn matches(&self, query: &str) -> bool {
        if self.name == query {
            return true;
        }
        let simple = self.name.rsplit('.').next().unwrap_or(&self.name);
        let query_simple = query.rsplit('.').next().unwrap_or(query);
        simple == query_simple
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMetadata {
    pub name: String,
    pub ty: JavaType,
    pub is_static: bool,
    /// The Java `transient` modifier.
    pub is_transient: bool,
    pub annotations: Vec<Annotation>,
}

impl FieldMetadata {
    pub fn new(name: impl Into<String>, ty: JavaType) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: false,
            is_transient: false,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.matches(name))
    }

    pub fn is_transient(&self) -> bool {
        self.is_transient || self.has_annotation("Transient")
    }

    pub fn is_identifier(&self) -> bool {
        self.has_annotation("Id") || self.has_annotation("EmbeddedId")
    }

    pub fn is_version(&self) -> bool {
        self.has_annotation("Version")
    }

    pub fn is_collection(&self) -> bool {
        self.ty.is_common_collection_type()
    }

    /// Element type of a collection field (`Set<Tag>` => `Tag`).
    pub fn collection_element_type(&self) -> Option<&JavaType> {
        if self.is_collection() {
            self.ty.args().first()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMetadata {
    pub name: String,
    pub return_type: JavaType,
    pub params: Vec<Parameter>,
    pub is_public: bool,
    pub is_static: bool,
}

impl MethodMetadata {
    /// A public `void setXxx(T xxx)` mutator for `field`.
    pub fn setter_for(field: &FieldMetadata) -> Self {
        Self {
            name: format!("set{}", capitalize(&field.name)),
            return_type: JavaType::new("void"),
            params: vec![Parameter::new(field.name.clone(), field.ty.clone())],
            is_public: true,
            is_static: false,
        }
    }
}

/// Declared and inherited members of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDetails {
    owner: JavaType,
    fields: Vec<FieldMetadata>,
    methods: Vec<MethodMetadata>,
}

impl MemberDetails {
    pub fn new(owner: JavaType, fields: Vec<FieldMetadata>, methods: Vec<MethodMetadata>) -> Self {
        Self {
            owner,
            fields,
            methods,
        }
    }

    /// Members of a plain JavaBean: the given fields plus a public setter for
    /// every non-static field.
    pub fn bean(owner: JavaType, fields: Vec<FieldMetadata>) -> Self {
        let methods = fields
            .iter()
            .filter(|f| !f.is_static)
            .map(MethodMetadata::setter_for)
            .collect();
        Self::new(owner, fields, methods)
    }

    pub fn owner(&self) -> &JavaType {
        &self.owner
    }

    pub fn fields(&self) -> &[FieldMetadata] {
        &self.fields
    }

    pub fn methods(&self) -> &[MethodMetadata] {
        &self.methods
    }

    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn mutators(&self) -> impl Iterator<Item = &MethodMetadata> {
        self.methods.iter().filter(|m| is_mutator(m))
    }

    /// Field backing a mutator: looked up by bean property name first, then by
    /// the name of the mutator's parameter.
    pub fn field_for_mutator(&self, method: &MethodMetadata) -> Option<&FieldMetadata> {
        property_name_for_mutator(&method.name)
            .and_then(|property| self.field(&property))
            .or_else(|| method.params.first().and_then(|p| self.field(&p.name)))
    }

    /// Fields that have a located mutator, in mutator declaration order and
    /// without duplicates.
    pub fn settable_fields(&self) -> Vec<&FieldMetadata> {
        let mut out: Vec<&FieldMetadata> = Vec::new();
        for method in self.mutators() {
            let Some(field) = self.field_for_mutator(method) else {
                continue;
            };
            if !out.iter().any(|f| f.name == field.name) {
                out.push(field);
            }
        }
        out
    }
}

const ENTITY_ANNOTATIONS: [&str; 3] = ["RooJpaActiveRecord", "RooEntity", "RooJpaEntity"];

/// A persistent type together with its class-level annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDetails {
    pub annotations: Vec<Annotation>,
    pub members: MemberDetails,
}

impl EntityDetails {
    pub fn new(members: MemberDetails) -> Self {
        Self {
            annotations: Vec::new(),
            members,
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn ty(&self) -> &JavaType {
        self.members.owner()
    }

    pub fn simple_name(&self) -> &str {
        self.members.owner().simple_type_name()
    }

    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.matches(name))
    }

    /// `@RooPlural("...")` when present, otherwise the English plural of the
    /// simple type name.
    pub fn plural(&self) -> String {
        self.annotation("RooPlural")
            .and_then(|a| a.attribute("value"))
            .and_then(AnnotationValue::as_str)
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.trim().to_string())
            .unwrap_or_else(|| pluralize(self.simple_name()))
    }

    /// Finder names requested through the entity annotation's `finders` attribute.
    pub fn declared_finders(&self) -> Vec<String> {
        ENTITY_ANNOTATIONS
            .iter()
            .filter_map(|name| self.annotation(name))
            .filter_map(|a| a.attribute("finders"))
            .flat_map(|value| value.strings())
            .map(str::to_string)
            .collect()
    }
}
