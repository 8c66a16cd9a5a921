use pretty_assertions::assert_eq;
use roost_finder::{
    synthesize, synthesize_count, tokenize, DynamicFinderServices, FinderError, FinderOptions,
    Token, ROOST_INVALID_FINDER,
};
use roost_types::{Annotation, EntityDetails, FieldMetadata, JavaType};

use crate::suite::fixtures::{members, person};

#[test]
fn field_names_win_over_keywords() {
    let members = members(vec![FieldMetadata::new("notes", JavaType::string())]);
    let tokens = tokenize(&members, "findByNotes", "").unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Field(field) if field.name() == "notes"));
}

#[test]
fn between_expands_into_min_and_max() {
    let salary = JavaType::new("java.math.BigDecimal");
    let members = members(vec![FieldMetadata::new("salary", salary.clone())]);
    let holder = DynamicFinderServices
        .query_holder(&members, "findBySalaryBetween", "", "Person")
        .unwrap();
    assert_eq!(holder.parameter_names(), ["minSalary", "maxSalary"]);
    assert_eq!(holder.parameter_types(), [salary.clone(), salary]);
    assert!(holder
        .jpql()
        .contains("BETWEEN :minSalary AND :maxSalary"));
}

#[test]
fn null_tests_bind_no_parameters() {
    let members = members(vec![FieldMetadata::new("nickname", JavaType::string())]);
    let holder = DynamicFinderServices
        .query_holder(&members, "findByNicknameIsNull", "", "Person")
        .unwrap();
    assert!(holder.parameter_names().is_empty());
    assert!(holder.jpql().ends_with("IS NULL"), "{}", holder.jpql());
}

#[test]
fn repeated_prefix_is_rejected() {
    let members = members(vec![FieldMetadata::new("name", JavaType::string())]);
    let err = tokenize(&members, "findPersonsByfindPersonsByName", "Persons").unwrap_err();
    assert_eq!(
        err,
        FinderError::InvalidFinderName {
            finder: "findPersonsByfindPersonsByName".into(),
            prefix: "findPersonsBy".into(),
        }
    );
    assert_eq!(err.code(), ROOST_INVALID_FINDER);
}

#[test]
fn unmatched_fragment_is_reported() {
    let members = members(vec![FieldMetadata::new("age", JavaType::int())]);
    let err = tokenize(&members, "findByColor", "").unwrap_err();
    match err {
        FinderError::MissingFieldToken {
            fragment,
            type_name,
            ..
        } => {
            assert_eq!(fragment, "Color");
            assert_eq!(type_name, "Person");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn count_query_differs_only_in_select() {
    let members = person();
    for finder in DynamicFinderServices.finders_for(&members, "People", 2, &Default::default()) {
        let tokens = tokenize(&members, &finder, "People").unwrap();
        let query = synthesize(&tokens, "Person", "o");
        let count = synthesize_count(&tokens, "Person", "o");
        let expected = query.replacen("SELECT o FROM", "SELECT COUNT(o) FROM", 1);
        assert_eq!(count, expected);
    }
}

#[test]
fn listing_reports_each_candidate() {
    let entity = EntityDetails::new(person())
        .with_annotation(Annotation::new("RooPlural").with_attribute("value", "Persons".into()));
    let options = FinderOptions {
        exclusions: ["notes", "lastName", "nickname", "birthDay", "salary"]
            .into_iter()
            .map(String::from)
            .collect(),
        ..FinderOptions::default()
    };
    let listings = DynamicFinderServices.list_finders(&entity, &options);

    let names: Vec<_> = listings.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "findPersonsByActive",
            "findPersonsByActiveNot",
            "findPersonsByAge",
            "findPersonsByAgeBetween",
            "findPersonsByAgeEquals",
            "findPersonsByAgeGreaterThan",
            "findPersonsByAgeGreaterThanEquals",
            "findPersonsByAgeIsNotNull",
            "findPersonsByAgeIsNull",
            "findPersonsByAgeLessThan",
            "findPersonsByAgeLessThanEquals",
            "findPersonsByAgeNotEquals",
            "findPersonsByName",
            "findPersonsByNameEquals",
            "findPersonsByNameIsNotNull",
            "findPersonsByNameIsNull",
            "findPersonsByNameLike",
            "findPersonsByNameNotEquals",
        ]
    );

    let active_not = listings
        .iter()
        .find(|l| l.name == "findPersonsByActiveNot")
        .and_then(|l| l.outcome.as_ref().ok())
        .unwrap();
    assert_eq!(
        active_not.jpql(),
        "SELECT o FROM Person AS o WHERE o.active IS NOT :active"
    );
}
