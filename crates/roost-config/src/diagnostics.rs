use std::fmt;

/// Everything noticed while loading a `roost.toml` that did not stop loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    /// Keys the schema does not know, with their full dotted path
    /// (e.g. `finder.dept`).
    pub unknown_keys: Vec<String>,
    pub warnings: Vec<ConfigWarning>,
}

impl ConfigDiagnostics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unknown_keys.is_empty() && self.warnings.is_empty()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A value that is replaced by a usable one when the configuration is applied.
    InvalidValue { toml_path: String, message: String },
}

impl ConfigWarning {
    pub fn toml_path(&self) -> &str {
        match self {
            ConfigWarning::InvalidValue { toml_path, .. } => toml_path,
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::InvalidValue { toml_path, message } => {
                write!(f, "{toml_path}: {message}")
            }
        }
    }
}
