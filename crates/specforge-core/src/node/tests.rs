//! Tests for tree construction and inspection.

use super::*;
use crate::test_utils::Flags;

fn flag(x: &Var, name: &str) -> Node<Flags> {
    Node::eq(Path::parse(name).bind(x), Node::bool(true))
}

#[test]
fn test_size_counts_every_node() {
    let x = Var::fresh("x");
    // Leaf(Member(Var), Literal) is four nodes.
    assert_eq!(flag(&x, "a").size(), 4);
    assert_eq!(Node::not(flag(&x, "a")).size(), 5);
    assert_eq!(Node::and(flag(&x, "a"), flag(&x, "b")).size(), 9);
}

#[test]
fn test_free_vars_collects_custom_leaves() {
    let x = Var::fresh("x");
    let y = Var::fresh("y");
    let tree = Node::or(flag(&x, "a"), Node::custom(&y, "b_set", |f: &Flags| Ok(f.b)));

    let vars: Vec<_> = tree.free_vars().into_iter().collect();
    assert_eq!(vars, vec![x.clone(), y.clone()]);
    assert!(tree.references(&x));
    assert!(tree.references(&y));
    assert!(!Node::<Flags>::bool(true).references(&x));
}

#[test]
fn test_structural_equality() {
    let x = Var::fresh("x");
    let y = Var::fresh("x");

    assert!(flag(&x, "a").structurally_eq(&flag(&x, "a")));
    assert!(!flag(&x, "a").structurally_eq(&flag(&x, "b")));
    // Same shape over a different variable is a different tree.
    assert!(!flag(&x, "a").structurally_eq(&flag(&y, "a")));
    // Literal types must agree even when the values compare equal.
    assert!(!Node::<Flags>::int(1).structurally_eq(&Node::literal(1.0)));
}

#[test]
fn test_opaque_tests_compare_by_identity() {
    let x = Var::fresh("x");
    let tree = Node::custom(&x, "b_set", |f: &Flags| Ok(f.b));
    let copy = tree.clone();
    let rebuilt = Node::custom(&x, "b_set", |f: &Flags| Ok(f.b));

    assert!(tree.structurally_eq(&copy));
    assert!(!tree.structurally_eq(&rebuilt));
}

#[test]
fn test_alpha_equality_ignores_variable_identity() {
    let x = Var::fresh("x");
    let y = Var::fresh("y");
    let left = Symbolic::new(x.clone(), Node::and(flag(&x, "a"), flag(&x, "b")));
    let right = Symbolic::new(y.clone(), Node::and(flag(&y, "a"), flag(&y, "b")));
    let other = Symbolic::new(y.clone(), Node::and(flag(&y, "b"), flag(&y, "a")));

    assert!(left.alpha_eq(&right));
    assert!(!left.alpha_eq(&other));
}

#[test]
fn test_children_order() {
    let x = Var::fresh("x");
    let tree = Node::conditional(flag(&x, "a"), Node::int(1), Node::int(0));
    let children = tree.children();

    assert_eq!(children.len(), 3);
    assert!(children[0].structurally_eq(&flag(&x, "a")));
    assert!(children[2].structurally_eq(&Node::int(0)));
}

#[test]
fn test_path_parse_and_display() {
    let path = Path::parse("address.city");
    assert_eq!(
        path.segments(),
        &[Segment::Member("address".into()), Segment::Member("city".into())]
    );
    assert_eq!(path.to_string(), "address.city");

    let call = Path::root().call("older_than", vec![Value::I64(30)]);
    assert_eq!(call.to_string(), "older_than(30)");
    assert!(Path::parse("").is_root());
}

#[test]
fn test_path_parse_call_arguments() {
    let path = Path::parse("older_than(30).tag(\"a.b\", 1.5, true, none)");
    assert_eq!(
        path.segments(),
        &[
            Segment::Call {
                method: "older_than".into(),
                args: vec![Value::I64(30)],
            },
            Segment::Call {
                method: "tag".into(),
                args: vec![
                    Value::from("a.b"),
                    Value::F64(1.5),
                    Value::Bool(true),
                    Value::None,
                ],
            },
        ]
    );
    assert_eq!(path.to_string(), "older_than(30).tag(\"a.b\", 1.5, true, none)");
    assert_eq!(Path::parse(&path.to_string()), path);
}

#[test]
fn test_path_bind_builds_member_chain() {
    let x = Var::fresh("x");
    let bound: Node<Flags> = Path::parse("address.city").bind(&x);
    let expected = Node::member(Node::member(Node::var(&x), "address"), "city");

    assert!(bound.structurally_eq(&expected));
}

#[test]
fn test_compare_op_symbols() {
    let symbols: Vec<_> = [
        CompareOp::Eq,
        CompareOp::Ne,
        CompareOp::Lt,
        CompareOp::Le,
        CompareOp::Gt,
        CompareOp::Ge,
    ]
    .iter()
    .map(|op| op.to_string())
    .collect();
    assert_eq!(symbols, ["=", "!=", "<", "<=", ">", ">="]);
}
