use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use roost_types::{capitalize, FieldMetadata, JavaType};

use crate::vocabulary::{matching_order, Keyword, ReservedToken};

/// A field segment of a finder name.
///
/// Identity (equality, ordering, hashing) is the capitalized field name, which
/// is also the literal the tokenizer matches against.
#[derive(Clone, Debug)]
pub struct FieldToken {
    literal: String,
    field: FieldMetadata,
}

impl FieldToken {
    pub fn new(field: FieldMetadata) -> Self {
        Self {
            literal: capitalize(&field.name),
            field,
        }
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn field(&self) -> &FieldMetadata {
        &self.field
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }

    pub fn ty(&self) -> &JavaType {
        &self.field.ty
    }
}

impl PartialEq for FieldToken {
    fn eq(&self, other: &Self) -> bool {
        self.literal == other.literal
    }
}

impl Eq for FieldToken {}

impl Hash for FieldToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.literal.hash(state);
    }
}

impl Ord for FieldToken {
    fn cmp(&self, other: &Self) -> Ordering {
        matching_order(&self.literal, &other.literal)
    }
}

impl PartialOrd for FieldToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One lexical unit of a parsed finder name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Field(FieldToken),
    Reserved(ReservedToken),
}

impl Token {
    pub fn literal(&self) -> &str {
        match self {
            Token::Field(field) => field.literal(),
            Token::Reserved(reserved) => reserved.literal(),
        }
    }

    pub fn as_field(&self) -> Option<&FieldToken> {
        match self {
            Token::Field(field) => Some(field),
            Token::Reserved(_) => None,
        }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Token::Field(_) => None,
            Token::Reserved(reserved) => Some(reserved.keyword()),
        }
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        // A field literally named like a keyword sorts before the keyword.
        let rank = |token: &Token| matches!(token, Token::Reserved(_));
        matching_order(self.literal(), other.literal()).then_with(|| rank(self).cmp(&rank(other)))
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<FieldToken> for Token {
    fn from(value: FieldToken) -> Self {
        Token::Field(value)
    }
}

impl From<ReservedToken> for Token {
    fn from(value: ReservedToken) -> Self {
        Token::Reserved(value)
    }
}
