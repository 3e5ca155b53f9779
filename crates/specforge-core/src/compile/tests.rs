//! Tests for compiled predicates.

use super::*;
use crate::node::{CompareOp, Path};
use crate::test_utils::{six_items, Flags, Item, Person};

fn bound<T>(build: impl FnOnce(&Var) -> Node<T>) -> Symbolic<T> {
    let x = Var::fresh("x");
    let body = build(&x);
    Symbolic::new(x, body)
}

fn flag(x: &Var, name: &str) -> Node<Flags> {
    Node::eq(Path::parse(name).bind(x), Node::bool(true))
}

#[test]
fn test_compiled_matches_interpreter_on_flags() {
    let trees = vec![
        bound(|x| Node::and(flag(x, "a"), flag(x, "b"))),
        bound(|x| Node::or(flag(x, "a"), Node::not(flag(x, "b")))),
        bound(|x| Node::not(Node::and(flag(x, "a"), flag(x, "b")))),
        bound(|x| Node::custom(x, "a_xor_b", |f: &Flags| Ok(f.a != f.b))),
    ];

    for tree in &trees {
        let compiled = compile(tree);
        for f in Flags::all() {
            assert_eq!(compiled.call(&f), tree.evaluate(&f), "{}", tree.body);
        }
    }
}

#[test]
fn test_compiled_counting_sum() {
    let tree = bound(|x| {
        let leaves = [
            Node::ge(Path::parse("price").bind(x), Node::int(50)),
            Node::ge(Path::parse("stock").bind(x), Node::int(10)),
            Node::ge(Path::parse("rating").bind(x), Node::literal(4.0)),
        ];
        let sum = leaves
            .into_iter()
            .map(|leaf| Node::conditional(leaf, Node::int(1), Node::int(0)))
            .reduce(Node::add)
            .unwrap();
        Node::eq(sum, Node::int(2))
    });
    let compiled = compile::<Item>(&tree);

    let selected: Vec<i64> = six_items()
        .iter()
        .filter(|item| compiled.call(*item).unwrap())
        .map(|item: &Item| item.id)
        .collect();
    assert_eq!(selected, vec![2, 3, 4]);
}

#[test]
fn test_compiled_nested_access_and_errors() {
    let tree = bound(|x| Node::eq(Path::parse("address.city").bind::<Person>(x), Node::literal("Lyon")));
    let compiled = compile(&tree);

    assert_eq!(compiled.call(&Person::new("Ada", 36, Some("Lyon"))), Ok(true));
    assert_eq!(
        compiled.call(&Person::new("Cy", 20, None)),
        Err(EvalError::NullAccess {
            member: "city".to_string()
        })
    );
}

#[test]
fn test_compiled_method_call() {
    let tree = bound(|x| {
        Node::compare(
            Node::call(Node::var(x), "older_than", vec![Node::int(30)]),
            CompareOp::Eq,
            Node::bool(true),
        )
    });
    let compiled = compile(&tree);
    assert_eq!(compiled.call(&Person::new("Ada", 36, None)), Ok(true));
    assert_eq!(compiled.call(&Person::new("Bo", 12, None)), Ok(false));
}

#[test]
fn test_compiled_foreign_variable() {
    let y = Var::fresh("y");
    let tree = bound(|_| Node::eq(Path::parse("a").bind::<Flags>(&y), Node::bool(true)));
    let compiled = compile(&tree);
    assert!(matches!(
        compiled.call(&Flags::new(true, true)),
        Err(EvalError::ForeignVariable { .. })
    ));
}

#[test]
fn test_clone_shares_closure() {
    let compiled = compile(&bound(|x| flag(x, "a")));
    let copy = compiled.clone();
    assert!(Compiled::ptr_eq(&compiled, &copy));
    assert_eq!(copy.node_count(), 4);
}
