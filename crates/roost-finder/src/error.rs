use thiserror::Error;

pub const ROOST_INVALID_FINDER: &str = "ROOST_INVALID_FINDER";
pub const ROOST_UNMATCHED_TOKEN: &str = "ROOST_UNMATCHED_TOKEN";

/// Why a finder name could not be resolved. Both variants are defects in the
/// user-supplied name, not in the generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinderError {
    /// The name still contains `find<Plural>By` after the leading prefix was
    /// stripped, typically because it was pasted twice.
    #[error("dynamic finder definition `{finder}` is invalid: `{prefix}` occurs more than once")]
    InvalidFinderName { finder: String, prefix: String },

    /// Part of the name matches neither a field nor a keyword.
    #[error(
        "dynamic finder `{finder}` in {type_name}.java is unable to match `{fragment}` to a field or keyword"
    )]
    MissingFieldToken {
        fragment: String,
        finder: String,
        type_name: String,
    },
}

impl FinderError {
    pub fn code(&self) -> &'static str {
        match self {
            FinderError::InvalidFinderName { .. } => ROOST_INVALID_FINDER,
            FinderError::MissingFieldToken { .. } => ROOST_UNMATCHED_TOKEN,
        }
    }

    pub fn finder(&self) -> &str {
        match self {
            FinderError::InvalidFinderName { finder, .. }
            | FinderError::MissingFieldToken { finder, .. } => finder,
        }
    }
}
