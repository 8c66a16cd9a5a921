//! JavaBean naming conventions.

use crate::MethodMetadata;

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// `setFirstName` => `firstName`. Returns `None` for names that are not bean
/// mutators (`set`, `settle`, ...).
pub fn property_name_for_mutator(method_name: &str) -> Option<String> {
    let rest = method_name.strip_prefix("set")?;
    if !rest.chars().next().is_some_and(|c| c.is_uppercase()) {
        return None;
    }
    Some(decapitalize(rest))
}

/// Public, non-static, single-argument `setXxx` methods.
pub fn is_mutator(method: &MethodMetadata) -> bool {
    method.is_public
        && !method.is_static
        && method.params.len() == 1
        && property_name_for_mutator(&method.name).is_some()
}
