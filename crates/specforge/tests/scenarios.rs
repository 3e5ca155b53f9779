//! End-to-end scenarios over the shared fixtures.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use specforge::prelude::*;
use specforge::SpecConfig;
use specforge_test::flags::Flags;
use specforge_test::inventory::{six_items, Item};
use specforge_test::people::{sample_people, Person};

fn a() -> Specification<Flags> {
    prop("a").is_true()
}

fn b() -> Specification<Flags> {
    prop("b").is_true()
}

#[test]
fn xor_truth_table() {
    let spec = a() ^ b();
    let table: Vec<bool> = Flags::all()
        .iter()
        .map(|f| spec.evaluate(f).unwrap())
        .collect();
    assert_eq!(table, [false, true, true, false]);
}

#[test]
fn implies_truth_table() {
    let spec = a().implies(&b());
    let table: Vec<bool> = Flags::all()
        .iter()
        .map(|f| spec.evaluate(f).unwrap())
        .collect();
    assert_eq!(table, [true, false, true, true]);
}

#[test]
fn exactly_two_of_three_thresholds() {
    let in_budget = prop("price").ge(50).named("price");
    let stocked = prop("stock").ge(10).named("stock");
    let rated = prop("rating").ge(4.0).named("rating");
    let spec = Specification::exactly(2, [in_budget, stocked, rated]).unwrap();

    let items = six_items();
    let ids: Vec<i64> = filter(&spec, &items).unwrap().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![2, 3, 4]);
    assert_eq!(par_filter(&spec.cached(), &items).unwrap().len(), 3);
    assert_eq!(count(&spec.not(), &items).unwrap(), 3);
}

#[test]
fn trace_explains_a_rejection() {
    let adult = prop("age").ge(18).named("adult");
    let has_email = prop("email").is_some();
    let spec = adult.and(&has_email);

    let brian = &sample_people()[1];
    let (result, trace) = spec.evaluate_with_trace(brian).unwrap();

    assert!(!result);
    let failed: Vec<&str> = trace.failed().map(|e| e.condition.as_str()).collect();
    assert_eq!(failed, ["x.age >= 18", "x.email is some"]);
    assert_eq!(
        trace.to_string(),
        "[FAIL] x.age >= 18\n[FAIL] x.email is some\n"
    );

    let (_, short) = spec
        .evaluate_with_trace_mode(brian, TraceMode::ShortCircuit)
        .unwrap();
    assert_eq!(short.len(), 1);
}

#[test]
fn configured_trace_mode() {
    let config = SpecConfig::from_toml_str("[trace]\nmode = \"short_circuit\"\n").unwrap();
    let spec = prop("age").ge(18).and(&prop("email").is_some());

    let (_, trace) = config
        .evaluate_with_trace(&spec, &sample_people()[1])
        .unwrap();
    assert_eq!(trace.len(), 1);
}

#[test]
fn method_calls_and_nested_members() {
    let older = Specification::<Person>::compare(
        Path::root().call("older_than", vec![Value::I64(30)]),
        CompareOp::Eq,
        true,
    );
    let lisbon = prop("address")
        .is_some()
        .and(&prop("address.city").eq("Lisbon"));
    let spec = older.and(&lisbon);

    let matched: Vec<String> = sample_people()
        .into_iter()
        .filter(|p| spec.evaluate(p).unwrap())
        .map(|p| p.name)
        .collect();
    assert_eq!(matched, ["carla"]);
    assert_eq!(
        spec.explain(),
        "(x.older_than(30) = true) AND ((x.address is some) AND (x.address.city = \"Lisbon\"))"
    );
}

#[test]
fn unguarded_nested_member_propagates_null() {
    let spec = prop("address.city").eq("London");
    let err = spec.evaluate(&sample_people()[1]).unwrap_err();
    assert_eq!(
        err,
        EvalError::NullAccess {
            member: "city".to_string()
        }
    );
}

struct Account {
    balance: AtomicI64,
}

impl Record for Account {
    fn member(&self, name: &str) -> Option<Value> {
        match name {
            "balance" => Some(Value::I64(self.balance.load(Ordering::SeqCst))),
            _ => None,
        }
    }
}

#[test]
fn memoized_result_is_stable_until_invalidated() {
    let solvent = prop("balance").ge(0).memoized();
    let account = Arc::new(Account {
        balance: AtomicI64::new(10),
    });

    assert!(solvent.evaluate(&account).unwrap());
    account.balance.store(-5, Ordering::SeqCst);
    assert!(solvent.evaluate(&account).unwrap());

    solvent.invalidate(&account);
    assert!(!solvent.evaluate(&account).unwrap());
}

#[test]
fn builder_with_named_parts() {
    let spec = SpecBuilder::<Item>::new()
        .and(prop("price").between(10, 60))
        .and_not(prop("stock").lt(2))
        .named("sellable")
        .build()
        .unwrap();

    let items = six_items();
    let ids: Vec<i64> = filter(&spec, &items).unwrap().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 6]);
    assert_eq!(spec.to_string(), "sellable");
}
