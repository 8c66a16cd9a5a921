//! JPQL synthesis from a finder token sequence.
//!
//! The WHERE clause is built in a single forward pass. After a field token the
//! column reference is pending until the next keyword decides whether it is
//! wrapped in `LOWER(...)`. A field that never receives an operator defaults
//! to `= :field`. Parameter metadata is derived independently by replaying the
//! tokens, so the two outputs stay position-aligned by construction.

use roost_types::{capitalize, JavaType, Parameter};

use crate::token::{FieldToken, Token};
use crate::vocabulary::Keyword;

/// A resolved finder: query text plus the parameters needed to bind it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryHolder {
    jpql: String,
    count_jpql: String,
    parameter_names: Vec<String>,
    parameter_types: Vec<JavaType>,
    tokens: Vec<Token>,
}

impl QueryHolder {
    pub fn new(tokens: Vec<Token>, simple_type_name: &str, alias: &str) -> Self {
        let jpql = synthesize(&tokens, simple_type_name, alias);
        let count_jpql = count_query(&jpql, alias);
        let (parameter_names, parameter_types): (Vec<String>, Vec<JavaType>) = parameters(&tokens)
            .into_iter()
            .map(|p| (p.name, p.ty))
            .unzip();
        Self {
            jpql,
            count_jpql,
            parameter_names,
            parameter_types,
            tokens,
        }
    }

    pub fn jpql(&self) -> &str {
        &self.jpql
    }

    pub fn count_jpql(&self) -> &str {
        &self.count_jpql
    }

    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    pub fn parameter_types(&self) -> &[JavaType] {
        &self.parameter_types
    }

    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.parameter_names
            .iter()
            .zip(&self.parameter_types)
            .map(|(name, ty)| Parameter::new(name.clone(), ty.clone()))
    }

    /// Tokens the query was built from, for dependency tracking.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

fn select_prefix(alias: &str) -> String {
    format!("SELECT {alias} FROM")
}

/// `SELECT <alias> FROM <Type> AS <alias> [WHERE ...]` for `tokens`.
pub fn synthesize(tokens: &[Token], simple_type_name: &str, alias: &str) -> String {
    let clause = where_clause(tokens, alias);
    let mut query = format!("{} {simple_type_name} AS {alias}", select_prefix(alias));
    if !clause.is_empty() {
        query.push_str(" WHERE ");
        query.push_str(&clause);
    }
    query
}

/// The count form of [`synthesize`]; only the select clause differs.
pub fn synthesize_count(tokens: &[Token], simple_type_name: &str, alias: &str) -> String {
    count_query(&synthesize(tokens, simple_type_name, alias), alias)
}

fn count_query(jpql: &str, alias: &str) -> String {
    let prefix = select_prefix(alias);
    match jpql.strip_prefix(prefix.as_str()) {
        Some(rest) => format!("SELECT COUNT({alias}) FROM{rest}"),
        None => jpql.to_string(),
    }
}

fn where_clause(tokens: &[Token], alias: &str) -> String {
    let mut out = String::new();
    let mut last_field: Option<&FieldToken> = None;
    let mut is_new_field = false;
    let mut is_field_applied = false;

    for token in tokens {
        let reserved = match token {
            Token::Field(field) => {
                last_field = Some(field);
                is_new_field = true;
                continue;
            }
            Token::Reserved(reserved) => reserved.keyword(),
        };
        let Some(field) = last_field else {
            continue;
        };
        // Collection membership is rendered by the emitting layer.
        if field.field().is_collection() {
            continue;
        }

        let name = field.name();
        if is_new_field {
            if reserved.is_case_insensitive() {
                out.push_str(&format!("LOWER({alias}.{name})"));
            } else {
                out.push_str(&format!("{alias}.{name}"));
            }
            is_new_field = false;
            is_field_applied = false;
        }

        let binds_value = match reserved {
            Keyword::And | Keyword::Or => {
                if !is_field_applied {
                    out.push_str(&format!(" = :{name}"));
                    is_field_applied = true;
                }
                out.push_str(if reserved == Keyword::And {
                    " AND "
                } else {
                    " OR "
                });
                false
            }
            Keyword::Between => {
                let capitalized = capitalize(name);
                out.push_str(&format!(
                    " BETWEEN :min{capitalized} AND :max{capitalized}"
                ));
                is_field_applied = true;
                false
            }
            Keyword::Like | Keyword::Ilike => {
                out.push_str(" LIKE ");
                true
            }
            Keyword::IsNotNull => {
                out.push_str(" IS NOT NULL");
                is_field_applied = true;
                false
            }
            Keyword::IsNull => {
                out.push_str(" IS NULL");
                is_field_applied = true;
                false
            }
            Keyword::Not => {
                out.push_str(" IS NOT ");
                true
            }
            Keyword::NotEquals => {
                out.push_str(" != ");
                true
            }
            Keyword::LessThan => {
                out.push_str(" < ");
                true
            }
            Keyword::LessThanEquals => {
                out.push_str(" <= ");
                true
            }
            Keyword::GreaterThan => {
                out.push_str(" > ");
                true
            }
            Keyword::GreaterThanEquals => {
                out.push_str(" >= ");
                true
            }
            Keyword::Equals => {
                out.push_str(" = ");
                true
            }
            Keyword::Member => false,
        };

        if binds_value {
            if out.ends_with("LIKE ") {
                out.push_str(&format!("LOWER(:{name})"));
            } else {
                out.push_str(&format!(":{name}"));
            }
            is_field_applied = true;
        }
    }

    if let Some(field) = last_field.filter(|f| !f.field().is_collection()) {
        if is_new_field {
            out.push_str(&format!("{alias}.{}", field.name()));
            is_field_applied = false;
        }
        if !is_field_applied {
            out.push_str(&format!(" = :{}", field.name()));
        }
    }

    // A trailing connective is left behind when the last predicate was a
    // collection field.
    for connective in [" AND ", " OR "] {
        if let Some(len) = out.strip_suffix(connective).map(str::len) {
            out.truncate(len);
        }
    }
    out
}

/// Parameters binding the query built from `tokens`, in query order.
///
/// Each field contributes one parameter named after it, except that a field
/// followed by `IsNull`/`IsNotNull` contributes none and a field followed by
/// `Between` contributes `min<Field>` and `max<Field>`.
pub fn parameters(tokens: &[Token]) -> Vec<Parameter> {
    let mut out: Vec<Parameter> = Vec::new();
    for (idx, token) in tokens.iter().enumerate() {
        let keyword = match token {
            Token::Field(field) => {
                out.push(Parameter::new(field.name(), field.ty().clone()));
                continue;
            }
            Token::Reserved(reserved) => reserved.keyword(),
        };
        let Some(field) = idx
            .checked_sub(1)
            .and_then(|prev| tokens.get(prev))
            .and_then(Token::as_field)
        else {
            continue;
        };

        if keyword == Keyword::Between {
            out.pop();
            let capitalized = capitalize(field.name());
            out.push(Parameter::new(format!("min{capitalized}"), field.ty().clone()));
            out.push(Parameter::new(format!("max{capitalized}"), field.ty().clone()));
        } else if keyword.is_null_test() {
            out.pop();
        }
    }
    out
}
