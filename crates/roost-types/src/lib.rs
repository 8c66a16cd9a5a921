//! Java type and member model shared by the Roost code generators.
//!
//! The generators never parse Java themselves. An external metadata layer
//! resolves each user type into the read-only view defined here (fields,
//! methods, annotations) and hands it to the generators.

use std::fmt;

mod beans;
mod members;
mod plural;

pub use beans::{capitalize, decapitalize, is_mutator, property_name_for_mutator};
pub use members::{
    Annotation, AnnotationAttribute, AnnotationValue, EntityDetails, FieldMetadata,
    MemberDetails, MethodMetadata,
};
pub use plural::pluralize;

const PRIMITIVES: [&str; 9] = [
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

const NUMBER_OR_DATE_TYPES: [&str; 16] = [
    "short",
    "int",
    "long",
    "float",
    "double",
    "java.lang.Short",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Float",
    "java.lang.Double",
    "java.math.BigInteger",
    "java.math.BigDecimal",
    "java.util.Date",
    "java.util.Calendar",
    "java.sql.Date",
    "java.sql.Timestamp",
];

const COLLECTION_TYPES: [&str; 10] = [
    "java.util.Collection",
    "java.util.List",
    "java.util.ArrayList",
    "java.util.LinkedList",
    "java.util.Set",
    "java.util.HashSet",
    "java.util.LinkedHashSet",
    "java.util.SortedSet",
    "java.util.TreeSet",
    "java.util.Vector",
];

const MAP_TYPES: [&str; 5] = [
    "java.util.Map",
    "java.util.HashMap",
    "java.util.LinkedHashMap",
    "java.util.SortedMap",
    "java.util.TreeMap",
];

/// A (possibly parameterized) Java type, identified by its fully qualified name.
///
/// Primitive types use their keyword (`int`, `boolean`, ...) as the name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JavaType {
    name: String,
    args: Vec<JavaType>,
}

impl JavaType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(name: impl Into<String>, args: Vec<JavaType>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn string() -> Self {
        Self::new("java.lang.String")
    }

    pub fn boolean() -> Self {
        Self::new("boolean")
    }

    pub fn boolean_object() -> Self {
        Self::new("java.lang.Boolean")
    }

    pub fn int() -> Self {
        Self::new("int")
    }

    pub fn long_object() -> Self {
        Self::new("java.lang.Long")
    }

    pub fn fully_qualified_name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[JavaType] {
        &self.args
    }

    pub fn simple_type_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Simple-name rendering including type arguments, e.g. `TypedQuery<Person>`.
    pub fn source_name(&self) -> String {
        if self.args.is_empty() {
            return self.simple_type_name().to_string();
        }
        let args: Vec<String> = self.args.iter().map(JavaType::source_name).collect();
        format!("{}<{}>", self.simple_type_name(), args.join(", "))
    }

    pub fn is_primitive(&self) -> bool {
        PRIMITIVES.contains(&self.name.as_str())
    }

    pub fn is_string(&self) -> bool {
        self.name == "java.lang.String"
    }

    pub fn is_boolean(&self) -> bool {
        self.name == "boolean" || self.name == "java.lang.Boolean"
    }

    pub fn is_number_or_date(&self) -> bool {
        NUMBER_OR_DATE_TYPES.contains(&self.name.as_str())
    }

    pub fn is_common_collection_type(&self) -> bool {
        COLLECTION_TYPES.contains(&self.name.as_str())
    }

    pub fn is_map(&self) -> bool {
        MAP_TYPES.contains(&self.name.as_str())
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub ty: JavaType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: JavaType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}
