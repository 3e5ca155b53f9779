//! Binary combinator tests over the two-flag entity.

use crate::error::SpecError;
use crate::node::{CompareOp, Node, Path};
use crate::spec::Specification;
use crate::test_utils::{is_a, is_b, Flags};
use crate::var::Var;

type Combinator = fn(&Specification<Flags>, &Specification<Flags>) -> Specification<Flags>;

/// Evaluates `combine(a, b)` for (T,T), (T,F), (F,T), (F,F).
fn truth_table(combine: Combinator) -> [bool; 4] {
    let spec = combine(&is_a(), &is_b());
    Flags::all().map(|f| spec.evaluate(&f).unwrap())
}

#[test]
fn test_and_or_tables() {
    assert_eq!(truth_table(Specification::and), [true, false, false, false]);
    assert_eq!(truth_table(Specification::or), [true, true, true, false]);
}

#[test]
fn test_xor_table() {
    assert_eq!(truth_table(Specification::xor), [false, true, true, false]);
}

#[test]
fn test_implies_table() {
    assert_eq!(truth_table(Specification::implies), [true, false, true, true]);
}

#[test]
fn test_iff_nand_nor_and_not_tables() {
    assert_eq!(truth_table(Specification::iff), [true, false, false, true]);
    assert_eq!(truth_table(Specification::nand), [false, true, true, true]);
    assert_eq!(truth_table(Specification::nor), [false, false, false, true]);
    assert_eq!(truth_table(Specification::and_not), [false, true, false, false]);
}

#[test]
fn test_not() {
    let not_a = is_a().not();
    for f in Flags::all() {
        assert_eq!(not_a.evaluate(&f).unwrap(), !f.a);
    }
}

#[test]
fn test_double_negation_and_de_morgan() {
    let (a, b) = (is_a(), is_b());
    let double = a.not().not();
    let left = a.and(&b).not();
    let right = a.not().or(&b.not());

    for f in Flags::all() {
        assert_eq!(double.evaluate(&f).unwrap(), a.evaluate(&f).unwrap());
        assert_eq!(left.evaluate(&f).unwrap(), right.evaluate(&f).unwrap());
    }
}

#[test]
fn test_operator_sugar() {
    let (a, b) = (is_a(), is_b());
    let by_ops = [&a & &b, &a | &b, &a ^ &b, !&a, a.clone() & b.clone()];
    let by_methods = [a.and(&b), a.or(&b), a.xor(&b), a.not(), a.and(&b)];

    for (ops, methods) in by_ops.iter().zip(&by_methods) {
        assert!(ops.to_symbolic().alpha_eq(&methods.to_symbolic()));
    }
}

#[test]
fn test_composition_shares_one_fresh_variable() {
    let (a, b) = (is_a(), is_b());
    let both = a.and(&b);

    let vars: Vec<_> = both.root().free_vars().into_iter().collect();
    assert_eq!(vars, vec![both.var().clone()]);
    assert_ne!(both.var(), a.var());
    assert_ne!(both.var(), b.var());
}

#[test]
fn test_operands_are_not_modified() {
    let (a, b) = (is_a(), is_b());
    let before = a.to_symbolic();

    let _ = a.xor(&b).and(&a).not();

    assert!(a.root().structurally_eq(&before.body));
    assert_eq!(a.var(), &before.var);
    assert_eq!(a.explain(), "x.a = true");
}

#[test]
fn test_custom_leaves_are_rebound() {
    let b_set = Specification::<Flags>::predicate("b_set", |f: &Flags| f.b);
    let spec = is_a().and(&b_set);

    assert_eq!(spec.root().free_vars().len(), 1);
    assert_eq!(spec.explain(), "(x.a = true) AND (b_set(x))");
    for f in Flags::all() {
        assert_eq!(spec.evaluate(&f).unwrap(), f.a && f.b);
    }
}

#[test]
fn test_explain_xor() {
    assert_eq!(
        is_a().xor(&is_b()).explain(),
        "((x.a = true) AND (NOT (x.b = true))) OR ((NOT (x.a = true)) AND (x.b = true))"
    );
}

#[test]
fn test_name_is_not_inherited() {
    let a = is_a().named("has a");
    assert_eq!(a.to_string(), "has a");
    assert_eq!(a.name(), Some("has a"));

    let composed = a.and(&is_b());
    assert_eq!(composed.name(), None);
    assert_eq!(composed.to_string(), "(x.a = true) AND (x.b = true)");
}

#[test]
fn test_constant_operand() {
    let spec = is_a().or(&Specification::always(false));
    for f in Flags::all() {
        assert_eq!(spec.evaluate(&f).unwrap(), f.a);
    }
}

#[test]
fn test_from_node_rejects_foreign_variable() {
    let x = Var::fresh("x");
    let y = Var::fresh("y");
    let tree = Node::and(
        Node::eq(Path::parse("a").bind(&x), Node::bool(true)),
        Node::eq(Path::parse("b").bind(&y), Node::bool(true)),
    );

    let err = Specification::<Flags>::from_node(x.clone(), tree).unwrap_err();
    assert_eq!(
        err,
        SpecError::UnboundVariable {
            expected: x,
            found: y
        }
    );
}

#[test]
fn test_build_binds_fresh_variable() {
    let spec = Specification::<Flags>::build(|x| {
        Node::compare(Path::parse("a").bind(x), CompareOp::Ne, Node::bool(false))
    })
    .unwrap();

    assert_eq!(spec.explain(), "x.a != false");
    assert!(spec.evaluate(&Flags::new(true, false)).unwrap());
}

fn debug_of<T>(spec: &Specification<T>) -> String {
    format!("{spec:?}")
}

#[test]
fn test_debug_shows_kind_and_tree() {
    let both = is_a().and(&is_b());
    let rendered = debug_of(&both);

    assert!(rendered.starts_with("Specification {"));
    assert!(rendered.contains("kind: \"tree\""));
    assert!(rendered.contains("(x.a = true) AND (x.b = true)"));
    assert!(debug_of(&both.cached()).contains("kind: \"cached\""));
}
