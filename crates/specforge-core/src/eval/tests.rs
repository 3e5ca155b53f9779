//! Tests for tree evaluation.

use super::*;
use crate::node::Path;
use crate::test_utils::{Flags, Item, Person};

fn person_city_is(x: &Var, city: &str) -> Node<Person> {
    Node::eq(Path::parse("address.city").bind(x), Node::literal(city))
}

#[test]
fn test_member_access() {
    let x = Var::fresh("x");
    let item = Item::new(1, 60, 20, 4.5);
    let scope = Scope::new(&x, &item);

    let price = Path::parse("price").bind::<Item>(&x);
    assert_eq!(scope.eval_value(&price).unwrap(), Value::I64(60));

    let cheap = Node::compare(price, CompareOp::Lt, Node::int(50));
    assert!(!scope.eval_bool(&cheap).unwrap());
}

#[test]
fn test_nested_member_access() {
    let x = Var::fresh("x");
    let tree = person_city_is(&x, "Lyon");

    assert!(tree
        .evaluate(&x, &Person::new("Ada", 36, Some("Lyon")))
        .unwrap());
    assert!(!tree
        .evaluate(&x, &Person::new("Bob", 41, Some("Oslo")))
        .unwrap());
}

#[test]
fn test_null_intermediate_propagates() {
    let x = Var::fresh("x");
    let tree = person_city_is(&x, "Lyon");

    let err = tree
        .evaluate(&x, &Person::new("Cy", 20, None))
        .unwrap_err();
    assert_eq!(
        err,
        EvalError::NullAccess {
            member: "city".to_string()
        }
    );
}

#[test]
fn test_unknown_member() {
    let x = Var::fresh("x");
    let tree = Node::eq(Path::parse("c").bind::<Flags>(&x), Node::bool(true));
    let err = tree.evaluate(&x, &Flags::new(true, true)).unwrap_err();
    assert!(matches!(err, EvalError::UnknownMember { member } if member == "c"));
}

#[test]
fn test_method_call() {
    let x = Var::fresh("x");
    let older = Node::call(Node::var(&x), "older_than", vec![Node::int(30)]);
    let initial = Node::eq(
        Path::parse("initial()").bind::<Person>(&x),
        Node::literal("A"),
    );
    let ada = Person::new("Ada", 36, None);

    assert!(older.evaluate(&x, &ada).unwrap());
    assert!(initial.evaluate(&x, &ada).unwrap());

    let missing = Node::call(Node::var(&x), "shout", vec![]);
    assert!(matches!(
        missing.evaluate(&x, &ada),
        Err(EvalError::UnknownMethod { .. })
    ));
}

#[test]
fn test_incomparable_values_fail() {
    let x = Var::fresh("x");
    let tree = Node::compare(
        Path::parse("name").bind::<Person>(&x),
        CompareOp::Gt,
        Node::int(3),
    );
    let err = tree
        .evaluate(&x, &Person::new("Ada", 36, None))
        .unwrap_err();
    assert!(matches!(err, EvalError::Incomparable { .. }));
}

#[test]
fn test_ordering_against_nan_is_false() {
    let x = Var::fresh("x");
    let good = Node::<Item>::ge(Path::parse("rating").bind(&x), Node::literal(4.0));
    let unrated = Item::new(7, 10, 1, f64::NAN);

    assert_eq!(good.evaluate(&x, &unrated), Ok(false));
    assert_eq!(
        Node::<Item>::le(Path::parse("rating").bind(&x), Node::literal(4.0)).evaluate(&x, &unrated),
        Ok(false)
    );
    assert!(!apply_compare(CompareOp::Lt, &Value::I64(1), &Value::F64(f64::NAN)).unwrap());
}

#[test]
fn test_ordering_against_none_is_false() {
    assert!(!apply_compare(CompareOp::Lt, &Value::None, &Value::I64(1)).unwrap());
    assert!(apply_compare(CompareOp::Eq, &Value::None, &Value::None).unwrap());
    assert!(apply_compare(CompareOp::Ne, &Value::None, &Value::I64(1)).unwrap());
}

#[test]
fn test_conditional_and_add() {
    let x = Var::fresh("x");
    let a = Node::eq(Path::parse("a").bind::<Flags>(&x), Node::bool(true));
    let b = Node::eq(Path::parse("b").bind::<Flags>(&x), Node::bool(true));
    let sum = Node::add(
        Node::conditional(a, Node::int(1), Node::int(0)),
        Node::conditional(b, Node::int(1), Node::int(0)),
    );
    let f = Flags::new(true, false);
    let scope = Scope::new(&x, &f);
    assert_eq!(scope.eval_value(&sum).unwrap(), Value::I64(1));
}

#[test]
fn test_short_circuit_skips_failing_operand() {
    let x = Var::fresh("x");
    let failing = Node::custom(&x, "boom", |_: &Flags| Err(EvalError::leaf("boom", "fails")));
    let tree = Node::and(Node::bool(false), failing.clone());
    assert!(!tree.evaluate(&x, &Flags::new(true, true)).unwrap());

    let tree = Node::or(Node::bool(false), failing);
    assert!(tree.evaluate(&x, &Flags::new(true, true)).is_err());
}

#[test]
fn test_foreign_variable_fails_fast() {
    let x = Var::fresh("x");
    let y = Var::fresh("y");
    let tree = Node::eq(Path::parse("a").bind::<Flags>(&y), Node::bool(true));
    assert!(matches!(
        tree.evaluate(&x, &Flags::new(true, true)),
        Err(EvalError::ForeignVariable { .. })
    ));
}

#[test]
fn test_bare_variable_is_not_a_value() {
    let x = Var::fresh("x");
    let tree: Node<Flags> = Node::eq(Node::var(&x), Node::bool(true));
    assert!(matches!(
        tree.evaluate(&x, &Flags::new(true, true)),
        Err(EvalError::BareVariable(_))
    ));
}

#[test]
fn test_non_boolean_in_boolean_position() {
    let x = Var::fresh("x");
    let tree: Node<Flags> = Node::not(Node::int(3));
    assert!(matches!(
        tree.evaluate(&x, &Flags::new(true, true)),
        Err(EvalError::NotBoolean { .. })
    ));
}
