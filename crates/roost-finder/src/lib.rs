//! Dynamic finder support for Roost entities.
//!
//! A dynamic finder is a static query method whose name encodes its query,
//! e.g. `findPeopleByLastNameLikeAndAgeGreaterThan`. This crate provides:
//!
//! - the keyword vocabulary and token model of finder names
//! - a tokenizer turning a finder name into field/keyword tokens
//! - a generator listing every finder name a type supports up to a depth
//! - a JPQL synthesizer producing the query and its bound parameters
//! - finder method descriptions for entities that request finders through
//!   their `@RooJpaActiveRecord(finders = {...})` annotation

use std::collections::BTreeSet;

use roost_types::{EntityDetails, MemberDetails};

mod catalog;
mod error;
mod generator;
mod introducer;
mod query;
mod token;
mod tokenizer;
mod vocabulary;

pub use catalog::field_tokens;
pub use error::{FinderError, ROOST_INVALID_FINDER, ROOST_UNMATCHED_TOKEN};
pub use generator::finder_names;
pub use introducer::{FinderIntroducer, FinderMethod, Introduction};
pub use query::{parameters, synthesize, synthesize_count, QueryHolder};
pub use token::{FieldToken, Token};
pub use tokenizer::tokenize;
pub use vocabulary::{
    Keyword, ReservedToken, ALL_TOKENS, BOOLEAN_TOKENS, NUMERIC_TOKENS, STRING_TOKENS,
};

pub const DEFAULT_ALIAS: &str = "o";

const ENTITY_MANAGER_TYPES: [&str; 2] = [
    "javax.persistence.EntityManager",
    "jakarta.persistence.EntityManager",
];

/// Knobs for listing and introducing finders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinderOptions {
    /// Maximum number of fields combined in one generated finder name.
    pub depth: usize,
    /// Entity alias used in generated queries.
    pub alias: String,
    /// Also introduce `countFind...` methods.
    pub count_queries: bool,
    /// Field names never used in generated finder names.
    pub exclusions: BTreeSet<String>,
}

impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            depth: 1,
            alias: DEFAULT_ALIAS.to_string(),
            count_queries: true,
            exclusions: BTreeSet::new(),
        }
    }
}

/// Outcome of resolving one listed finder name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinderListing {
    pub name: String,
    pub outcome: Result<QueryHolder, FinderError>,
}

impl FinderListing {
    pub fn is_resolved(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Identifier, version and entity-manager fields, which never take part in
/// generated finders.
pub fn default_exclusions(members: &MemberDetails) -> BTreeSet<String> {
    members
        .fields()
        .iter()
        .filter(|field| {
            field.is_identifier()
                || field.is_version()
                || ENTITY_MANAGER_TYPES.contains(&field.ty.fully_qualified_name())
        })
        .map(|field| field.name.clone())
        .collect()
}

/// Stateless entry point bundling tokenizing, generation and resolution.
#[derive(Clone, Copy, Debug, Default)]
pub struct DynamicFinderServices;

impl DynamicFinderServices {
    pub fn finders_for(
        &self,
        members: &MemberDetails,
        plural: &str,
        depth: usize,
        exclusions: &BTreeSet<String>,
    ) -> Vec<String> {
        finder_names(members, plural, depth, exclusions)
    }

    pub fn tokenize(
        &self,
        members: &MemberDetails,
        finder: &str,
        plural: &str,
    ) -> Result<Vec<Token>, FinderError> {
        tokenize(members, finder, plural)
    }

    /// Resolves `finder` against `members` into a query over `entity_name`,
    /// aliased as [`DEFAULT_ALIAS`].
    pub fn query_holder(
        &self,
        members: &MemberDetails,
        finder: &str,
        plural: &str,
        entity_name: &str,
    ) -> Result<QueryHolder, FinderError> {
        self.query_holder_with_alias(members, finder, plural, entity_name, DEFAULT_ALIAS)
    }

    pub fn query_holder_with_alias(
        &self,
        members: &MemberDetails,
        finder: &str,
        plural: &str,
        entity_name: &str,
        alias: &str,
    ) -> Result<QueryHolder, FinderError> {
        let tokens = tokenize(members, finder, plural)?;
        Ok(QueryHolder::new(tokens, entity_name, alias))
    }

    /// Every candidate finder of `entity` with its resolution outcome.
    ///
    /// A name that fails to resolve is reported, not fatal.
    pub fn list_finders(
        &self,
        entity: &EntityDetails,
        options: &FinderOptions,
    ) -> Vec<FinderListing> {
        let plural = entity.plural();
        let mut exclusions = default_exclusions(&entity.members);
        exclusions.extend(options.exclusions.iter().cloned());

        finder_names(&entity.members, &plural, options.depth, &exclusions)
            .into_iter()
            .map(|name| {
                let outcome = self.query_holder_with_alias(
                    &entity.members,
                    &name,
                    &plural,
                    entity.simple_name(),
                    &options.alias,
                );
                if let Err(err) = &outcome {
                    tracing::debug!(
                        target: "roost.finder",
                        finder = name.as_str(),
                        error = %err,
                        "listed finder does not resolve"
                    );
                }
                FinderListing { name, outcome }
            })
            .collect()
    }
}
