use roost_finder::{FinderIntroducer, FinderOptions};
use roost_types::{Annotation, AnnotationValue, EntityDetails, FieldMetadata, JavaType};

use crate::suite::fixtures::members;

fn entity(finders: &[&str]) -> EntityDetails {
    let finders = finders.iter().map(|f| AnnotationValue::from(*f)).collect();
    EntityDetails::new(members(vec![
        FieldMetadata::new("lastName", JavaType::string()),
        FieldMetadata::new("age", JavaType::new("java.lang.Integer")),
    ]))
    .with_annotation(
        Annotation::new("org.springframework.roo.addon.entity.RooEntity")
            .with_attribute("finders", AnnotationValue::Array(finders)),
    )
}

#[test]
fn renders_like_finder() {
    let introducer = FinderIntroducer::new(FinderOptions {
        count_queries: false,
        ..FinderOptions::default()
    });
    let introduction =
        introducer.introduce(&entity(&["findPeopleByLastNameLikeAndAgeGreaterThan"]));
    assert!(introduction.diagnostics.is_empty());
    assert_eq!(introduction.methods.len(), 1);

    insta::assert_snapshot!(introduction.methods[0].render(), @r###"
    public static TypedQuery<Person> findPeopleByLastNameLikeAndAgeGreaterThan(String lastName, Integer age) {
        if (lastName == null || lastName.length() == 0) throw new IllegalArgumentException("The lastName argument is required");
        if (age == null) throw new IllegalArgumentException("The age argument is required");
        lastName = lastName.replace('*', '%');
        if (lastName.charAt(0) != '%') {
            lastName = "%" + lastName;
        }
        if (lastName.charAt(lastName.length() - 1) != '%') {
            lastName = lastName + "%";
        }
        EntityManager em = Person.entityManager();
        TypedQuery<Person> q = em.createQuery("SELECT o FROM Person AS o WHERE LOWER(o.lastName) LIKE LOWER(:lastName) AND o.age > :age", Person.class);
        q.setParameter("lastName", lastName);
        q.setParameter("age", age);
        return q;
    }
    "###);
}

#[test]
fn count_method_follows_finder() {
    let introduction = FinderIntroducer::default().introduce(&entity(&["findPeopleByAge"]));
    let rendered: Vec<String> = introduction.methods.iter().map(|m| m.render()).collect();
    assert_eq!(rendered.len(), 2);
    insta::assert_snapshot!(rendered[1].as_str(), @r###"
    public static Long countFindPeopleByAge(Integer age) {
        if (age == null) throw new IllegalArgumentException("The age argument is required");
        EntityManager em = Person.entityManager();
        TypedQuery<Long> q = em.createQuery("SELECT COUNT(o) FROM Person AS o WHERE o.age = :age", Long.class);
        q.setParameter("age", age);
        return q.getSingleResult();
    }
    "###);
}

#[test]
fn entity_without_finders_introduces_nothing() {
    let entity = EntityDetails::new(members(vec![FieldMetadata::new(
        "age",
        JavaType::int(),
    )]));
    let introduction = FinderIntroducer::default().introduce(&entity);
    assert!(introduction.methods.is_empty());
    assert!(introduction.diagnostics.is_empty());
}
