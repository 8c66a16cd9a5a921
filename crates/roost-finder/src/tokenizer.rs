//! Finder name tokenizer.
//!
//! Finder names are camel-case concatenations without delimiters
//! (`findPeopleByLastNameAndAgeGreaterThan`), so the scanner is a greedy
//! longest-match lexer over two vocabularies. Fields are tried before keywords
//! because a field name may itself contain a keyword (`Notes` vs `Not`). There
//! is no backtracking.

use roost_types::MemberDetails;

use crate::catalog::field_tokens;
use crate::error::FinderError;
use crate::token::Token;
use crate::vocabulary::ALL_TOKENS;

pub(crate) fn finder_prefix(plural: &str) -> String {
    format!("find{plural}By")
}

/// Splits `finder` into field and keyword tokens.
///
/// A leading `find<Plural>By` is optional and stripped before scanning.
pub fn tokenize(
    members: &MemberDetails,
    finder: &str,
    plural: &str,
) -> Result<Vec<Token>, FinderError> {
    let prefix = finder_prefix(plural);
    let body = finder.strip_prefix(prefix.as_str()).unwrap_or(finder);
    if body.contains(prefix.as_str()) {
        tracing::debug!(
            target: "roost.finder",
            finder,
            prefix = prefix.as_str(),
            "rejecting finder with repeated prefix"
        );
        return Err(FinderError::InvalidFinderName {
            finder: finder.to_string(),
            prefix,
        });
    }

    let fields = field_tokens(members);
    let mut tokens = Vec::new();
    let mut rest = body;

    while !rest.is_empty() {
        let matched: Option<Token> = fields
            .iter()
            .find(|field| rest.starts_with(field.literal()))
            .map(|field| Token::Field(field.clone()))
            .or_else(|| {
                ALL_TOKENS
                    .iter()
                    .find(|reserved| rest.starts_with(reserved.literal()))
                    .map(|reserved| Token::Reserved(*reserved))
            });

        let Some(token) = matched else {
            let type_name = members.owner().simple_type_name().to_string();
            tracing::debug!(
                target: "roost.finder",
                finder,
                fragment = rest,
                type_name = type_name.as_str(),
                "finder fragment matches no field or keyword"
            );
            return Err(FinderError::MissingFieldToken {
                fragment: rest.to_string(),
                finder: finder.to_string(),
                type_name,
            });
        };

        tracing::trace!(target: "roost.finder", token = token.literal(), "matched finder token");
        rest = &rest[token.literal().len()..];
        tokens.push(token);
    }

    Ok(tokens)
}
