//! Tests for leaf generators.

use chrono::{NaiveDate, TimeZone, Utc};
use specforge_core::{EvalError, Specification, Value};
use specforge_test::people::{sample_people, Person};

use super::prop;
use super::temporal::{date, datetime};

fn names(spec: &Specification<Person>) -> Vec<String> {
    sample_people()
        .into_iter()
        .filter(|p| spec.evaluate(p).unwrap())
        .map(|p| p.name)
        .collect()
}

#[test]
fn test_comparisons() {
    assert_eq!(names(&prop("age").ge(30)), ["Ada", "carla"]);
    assert_eq!(names(&prop("age").lt(18)), ["Brian"]);
    assert_eq!(names(&prop("name").ne("Ada")), ["Brian", "carla", "Dmitri"]);

    // Guarded so people without an address never reach the nested member.
    let in_london = prop("address").is_some().and(&prop("address.city").eq("London"));
    assert_eq!(names(&in_london), ["Ada", "Dmitri"]);
}

#[test]
fn test_between_is_inclusive() {
    let spec = prop("age").between(29, 36);
    assert_eq!(names(&spec), ["Ada", "Dmitri"]);
    assert_eq!(spec.explain(), "(x.age >= 29) AND (x.age <= 36)");
}

#[test]
fn test_one_of() {
    let spec = prop("name").one_of(["Ada", "Brian"]);
    assert_eq!(names(&spec), ["Ada", "Brian"]);
    assert_eq!(spec.explain(), "x.name in [\"Ada\", \"Brian\"]");
}

#[test]
fn test_null_checks() {
    assert_eq!(names(&prop("email").is_none()), ["Brian"]);
    assert_eq!(names(&prop("address").is_some()), ["Ada", "carla", "Dmitri"]);
    assert_eq!(prop("email").is_none::<Person>().explain(), "x.email is none");
}

#[test]
fn test_text_leaves() {
    assert_eq!(names(&prop("email").ends_with(".org")), ["carla"]);
    assert_eq!(names(&prop("name").starts_with("D")), ["Dmitri"]);
    assert_eq!(names(&prop("email").contains_text("@example")), ["Ada", "carla"]);
    assert_eq!(names(&prop("name").eq_ignore_case("CARLA")), ["carla"]);
    assert_eq!(names(&prop("email").is_blank()), ["Brian", "Dmitri"]);
}

#[test]
fn test_text_leaf_on_non_string_fails() {
    let spec = prop("age").starts_with("3");
    let err = spec.evaluate(&Person::new("Ada", 36)).unwrap_err();

    assert_eq!(
        err,
        EvalError::Leaf {
            leaf: "starts_with".to_string(),
            message: "expected string, found int".to_string()
        }
    );
}

#[test]
fn test_collection_leaves() {
    assert_eq!(names(&prop("tags").contains("dev")), ["Ada", "Brian"]);
    assert_eq!(names(&prop("tags").is_empty()), ["carla", "Dmitri"]);
    assert_eq!(names(&prop("tags").not_empty()), ["Ada", "Brian"]);
    assert_eq!(names(&prop("tags").len_eq(2)), ["Ada"]);
    assert_eq!(
        prop("tags").contains::<Person>("dev").explain(),
        "x.tags contains \"dev\""
    );
}

#[test]
fn test_temporal_leaves() {
    assert_eq!(names(&prop("joined").before(Value::Date(200))), ["Ada"]);
    assert_eq!(names(&prop("joined").after(Value::Date(300))), ["Dmitri"]);
    assert_eq!(
        names(&prop("joined").within(Value::Date(200), Value::Date(400))),
        ["Brian", "carla"]
    );
}

#[test]
fn test_temporal_kind_mismatch_fails() {
    let spec = prop("joined").before(Value::DateTime(0));
    assert!(matches!(
        spec.evaluate(&Person::new("Ada", 36)),
        Err(EvalError::Leaf { .. })
    ));
}

#[test]
fn test_date_conversions() {
    let day = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    assert_eq!(date(day), Value::Date(0));
    assert_eq!(
        date(NaiveDate::from_ymd_opt(1969, 12, 31).unwrap()),
        Value::Date(-1)
    );

    let instant = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap();
    assert_eq!(datetime(instant), Value::DateTime(1000));
}

#[test]
fn test_leaves_keep_their_path() {
    let age = prop("address.city");
    assert_eq!(age.path().segments().len(), 2);
    assert_eq!(age.eq::<Person>("Lisbon").explain(), "x.address.city = \"Lisbon\"");
}
