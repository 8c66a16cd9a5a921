//! Field tokens a finder name may reference.

use std::collections::BTreeSet;

use roost_types::MemberDetails;

use crate::token::FieldToken;

/// Builds the field catalog for one tokenize call.
///
/// Only fields backed by a public mutator are visible; `Map`-typed fields are
/// never finder-addressable. The set iterates longest literal first.
pub fn field_tokens(members: &MemberDetails) -> BTreeSet<FieldToken> {
    members
        .settable_fields()
        .into_iter()
        .filter(|field| !field.ty.is_map())
        .map(|field| FieldToken::new(field.clone()))
        .collect()
}
