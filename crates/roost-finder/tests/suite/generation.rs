use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use roost_finder::{finder_names, tokenize, DynamicFinderServices};
use roost_types::FieldMetadata;

use crate::suite::fixtures::{field_pool, members, person};

fn pool_subset() -> impl Strategy<Value = Vec<FieldMetadata>> {
    let pool = field_pool();
    let len = pool.len();
    proptest::sample::subsequence(pool, 1..=len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn generation_is_deterministic(fields in pool_subset(), depth in 0usize..=2) {
        let members = members(fields);
        let first = finder_names(&members, "People", depth, &BTreeSet::new());
        let second = finder_names(&members, "People", depth, &BTreeSet::new());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_generated_name_tokenizes(fields in pool_subset(), depth in 1usize..=2) {
        let members = members(fields);
        for name in finder_names(&members, "People", depth, &BTreeSet::new()) {
            let tokens = tokenize(&members, &name, "People");
            prop_assert!(tokens.is_ok(), "{name}: {tokens:?}");
        }
    }

    #[test]
    fn excluded_fields_never_appear(
        fields in pool_subset(),
        depth in 1usize..=2,
        excluded in proptest::sample::select(vec!["age", "salary", "active", "nickname"]),
    ) {
        let members = members(fields);
        let exclusions: BTreeSet<String> = [excluded.to_string()].into_iter().collect();
        let literal = roost_types::capitalize(excluded);
        for name in finder_names(&members, "People", depth, &exclusions) {
            prop_assert!(!name.contains(&literal), "{name} mentions {literal}");
        }
    }
}

#[test]
fn generated_names_are_sorted_and_unique() {
    let names = DynamicFinderServices.finders_for(&person(), "People", 2, &BTreeSet::new());
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(names, sorted);
    assert!(names.iter().all(|name| name.starts_with("findPeopleBy")));
    assert!(!names.iter().any(|name| name.contains("Id") || name.contains("Version")));
}

#[test]
fn numeric_field_gets_every_numeric_keyword() {
    let members = members(vec![FieldMetadata::new("age", roost_types::JavaType::int())]);
    let names = finder_names(&members, "", 1, &BTreeSet::new());
    assert_eq!(
        names,
        vec![
            "findByAge",
            "findByAgeBetween",
            "findByAgeEquals",
            "findByAgeGreaterThan",
            "findByAgeGreaterThanEquals",
            "findByAgeIsNotNull",
            "findByAgeIsNull",
            "findByAgeLessThan",
            "findByAgeLessThanEquals",
            "findByAgeNotEquals",
        ]
    );
}
