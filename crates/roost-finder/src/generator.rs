//! Enumerates the finder names a type supports.

use std::collections::BTreeSet;

use roost_types::{FieldMetadata, MemberDetails};

use crate::token::FieldToken;
use crate::tokenizer::finder_prefix;
use crate::vocabulary::Keyword;

/// Every finder name combining up to `depth` fields of `members`.
///
/// Round 0 seeds `find<Plural>By<Field>[<Keyword>]` stubs; every later round
/// extends all stubs produced so far with `And<Field>[<Keyword>]` and
/// `Or<Field>[<Keyword>]`, skipping fields whose capitalized name already
/// occurs in the stub. Output is sorted and free of duplicates.
pub fn finder_names(
    members: &MemberDetails,
    plural: &str,
    depth: usize,
    exclusions: &BTreeSet<String>,
) -> Vec<String> {
    let candidates: Vec<FieldToken> = members
        .settable_fields()
        .into_iter()
        .filter(|field| is_candidate(field, exclusions))
        .map(|field| FieldToken::new(field.clone()))
        .collect();

    let prefix = finder_prefix(plural);
    let mut finders: BTreeSet<String> = BTreeSet::new();
    let mut round_finders: BTreeSet<String> = BTreeSet::new();

    for round in 0..depth {
        for field in &candidates {
            if round == 0 {
                round_finders.extend(stubs(field, &prefix));
            } else {
                for connective in [Keyword::And, Keyword::Or] {
                    for stub in stubs(field, connective.as_str()) {
                        round_finders.extend(
                            finders
                                .iter()
                                .filter(|finder| !finder.contains(field.literal()))
                                .map(|finder| format!("{finder}{stub}")),
                        );
                    }
                }
            }
        }
        finders.extend(round_finders.iter().cloned());
    }

    tracing::debug!(
        target: "roost.finder",
        type_name = members.owner().simple_type_name(),
        fields = candidates.len(),
        depth,
        finders = finders.len(),
        "generated finder names"
    );

    finders.into_iter().collect()
}

fn is_candidate(field: &FieldMetadata, exclusions: &BTreeSet<String>) -> bool {
    !exclusions.contains(&field.name)
        && !field.ty.is_map()
        && !field.is_transient()
        && !field.is_identifier()
        && !field.is_version()
        && !field.is_collection()
}

/// `<lead><Field>` followed by each applicable keyword, plus the bare form.
fn stubs<'a>(field: &'a FieldToken, lead: &'a str) -> impl Iterator<Item = String> + 'a {
    Keyword::applicable_to(field.ty())
        .iter()
        .map(|reserved| reserved.literal())
        .chain(std::iter::once(""))
        .map(move |keyword| format!("{lead}{}{keyword}", field.literal()))
}
