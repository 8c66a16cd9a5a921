//! Reserved finder keywords and the per-type catalogs they are drawn from.
//!
//! Catalogs are `const` slices kept in matching order (longest literal first,
//! ties broken alphabetically) so a left-to-right scan always tries
//! `GreaterThanEquals` before `GreaterThan`.

use std::cmp::Ordering;
use std::fmt;

use roost_types::JavaType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Or,
    And,
    Not,
    Like,
    Ilike,
    LessThanEquals,
    IsNull,
    Equals,
    Between,
    LessThan,
    NotEquals,
    IsNotNull,
    GreaterThan,
    GreaterThanEquals,
    Member,
}

impl Keyword {
    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Or => "Or",
            Keyword::And => "And",
            Keyword::Not => "Not",
            Keyword::Like => "Like",
            Keyword::Ilike => "Ilike",
            Keyword::LessThanEquals => "LessThanEquals",
            Keyword::IsNull => "IsNull",
            Keyword::Equals => "Equals",
            Keyword::Between => "Between",
            Keyword::LessThan => "LessThan",
            Keyword::NotEquals => "NotEquals",
            Keyword::IsNotNull => "IsNotNull",
            Keyword::GreaterThan => "GreaterThan",
            Keyword::GreaterThanEquals => "GreaterThanEquals",
            Keyword::Member => "Member",
        }
    }

    /// `And` / `Or`.
    pub const fn is_connective(self) -> bool {
        matches!(self, Keyword::And | Keyword::Or)
    }

    /// Keywords that compare the column case-insensitively.
    pub const fn is_case_insensitive(self) -> bool {
        matches!(self, Keyword::Like | Keyword::Ilike)
    }

    /// Keywords that consume their field without binding a parameter.
    pub const fn is_null_test(self) -> bool {
        matches!(self, Keyword::IsNull | Keyword::IsNotNull)
    }

    /// Keywords the generator may append to a field of type `ty`.
    pub fn applicable_to(ty: &JavaType) -> &'static [ReservedToken] {
        if ty.is_number_or_date() {
            NUMERIC_TOKENS
        } else if ty.is_string() {
            STRING_TOKENS
        } else if ty.is_boolean() {
            BOOLEAN_TOKENS
        } else {
            &[]
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keyword segment of a finder name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReservedToken(Keyword);

impl ReservedToken {
    pub const fn new(keyword: Keyword) -> Self {
        Self(keyword)
    }

    pub const fn keyword(self) -> Keyword {
        self.0
    }

    pub const fn literal(self) -> &'static str {
        self.0.as_str()
    }
}

impl Ord for ReservedToken {
    fn cmp(&self, other: &Self) -> Ordering {
        matching_order(self.literal(), other.literal())
    }
}

impl PartialOrd for ReservedToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Longest literal first; equal lengths fall back to alphabetical order so
/// distinct literals never compare equal.
pub(crate) fn matching_order(a: &str, b: &str) -> Ordering {
    b.len().cmp(&a.len()).then_with(|| a.cmp(b))
}

const fn rt(keyword: Keyword) -> ReservedToken {
    ReservedToken::new(keyword)
}

/// Keywords applicable to numeric and date fields.
pub const NUMERIC_TOKENS: &[ReservedToken] = &[
    rt(Keyword::GreaterThanEquals),
    rt(Keyword::LessThanEquals),
    rt(Keyword::GreaterThan),
    rt(Keyword::IsNotNull),
    rt(Keyword::NotEquals),
    rt(Keyword::LessThan),
    rt(Keyword::Between),
    rt(Keyword::Equals),
    rt(Keyword::IsNull),
];

/// Keywords applicable to `String` fields.
pub const STRING_TOKENS: &[ReservedToken] = &[
    rt(Keyword::IsNotNull),
    rt(Keyword::NotEquals),
    rt(Keyword::Equals),
    rt(Keyword::IsNull),
    rt(Keyword::Like),
];

/// Keywords applicable to `boolean` / `Boolean` fields.
pub const BOOLEAN_TOKENS: &[ReservedToken] = &[rt(Keyword::Not)];

/// Every keyword the tokenizer recognizes, regardless of field type.
pub const ALL_TOKENS: &[ReservedToken] = &[
    rt(Keyword::GreaterThanEquals),
    rt(Keyword::LessThanEquals),
    rt(Keyword::GreaterThan),
    rt(Keyword::IsNotNull),
    rt(Keyword::NotEquals),
    rt(Keyword::LessThan),
    rt(Keyword::Between),
    rt(Keyword::Equals),
    rt(Keyword::IsNull),
    rt(Keyword::Member),
    rt(Keyword::Ilike),
    rt(Keyword::Like),
    rt(Keyword::And),
    rt(Keyword::Not),
    rt(Keyword::Or),
];
