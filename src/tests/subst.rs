use super::*;
use crate::symbol::SymbolStore;
use crate::test_utils::{ctor, lit, var};

fn setup() -> SymbolStore {
    SymbolStore::new()
}

// ========== CONSTRUCTION TESTS ==========

#[test]
fn new_subst_is_empty() {
    let subst = Subst::new();
    assert!(subst.is_empty());
    assert_eq!(subst.len(), 0);
}

#[test]
fn extend_appends_one_binding() {
    let symbols = setup();
    let n = Var::new(symbols.intern("n"), 0);
    let subst = Subst::new().extend(n, lit(&symbols, "zero")).unwrap();
    assert_eq!(subst.len(), 1);
    assert_eq!(subst.lookup(n), Some(&lit(&symbols, "zero")));
}

#[test]
fn extend_shares_the_predecessor() {
    let symbols = setup();
    let n = Var::new(symbols.intern("n"), 0);
    let m = Var::new(symbols.intern("m"), 0);
    let base = Subst::new().extend(n, lit(&symbols, "zero")).unwrap();
    let fork_a = base.extend(m, lit(&symbols, "a")).unwrap();
    let fork_b = base.extend(m, lit(&symbols, "b")).unwrap();
    assert_eq!(base.len(), 1, "forking must not grow the base");
    assert_eq!(fork_a.lookup(m), Some(&lit(&symbols, "a")));
    assert_eq!(fork_b.lookup(m), Some(&lit(&symbols, "b")));
    assert_eq!(fork_a.lookup(n), fork_b.lookup(n));
}

// ========== LOOKUP TESTS ==========

#[test]
fn lookup_prefers_the_most_recent_binding() {
    let symbols = setup();
    let n = Var::new(symbols.intern("n"), 0);
    let subst = Subst::new()
        .extend(n, lit(&symbols, "old"))
        .unwrap()
        .extend(n, lit(&symbols, "new"))
        .unwrap();
    assert_eq!(
        subst.lookup(n),
        Some(&lit(&symbols, "new")),
        "last binding must win"
    );
}

#[test]
fn lookup_distinguishes_counters() {
    let symbols = setup();
    let name = symbols.intern("n");
    let n0 = Var::new(name, 0);
    let n1 = Var::new(name, 1);
    let subst = Subst::new().extend(n0, lit(&symbols, "zero")).unwrap();
    assert_eq!(subst.lookup(n0), Some(&lit(&symbols, "zero")));
    assert_eq!(subst.lookup(n1), None, "same name at another counter is a different variable");
}

// ========== WALK TESTS ==========

#[test]
fn walk_follows_variable_chains() {
    let symbols = setup();
    let a = Var::new(symbols.intern("a"), 0);
    let b = Var::new(symbols.intern("b"), 0);
    let subst = Subst::new()
        .extend(a, Term::Var(b))
        .unwrap()
        .extend(b, lit(&symbols, "end"))
        .unwrap();
    assert_eq!(subst.walk(&Term::Var(a)), lit(&symbols, "end"));
}

#[test]
fn walk_stops_at_unbound_variables() {
    let symbols = setup();
    let a = Var::new(symbols.intern("a"), 0);
    let b = Var::new(symbols.intern("b"), 0);
    let subst = Subst::new().extend(a, Term::Var(b)).unwrap();
    assert_eq!(subst.walk(&Term::Var(a)), Term::Var(b));
}

#[test]
fn walk_does_not_enter_constructor_arguments() {
    let symbols = setup();
    let a = Var::new(symbols.intern("a"), 0);
    let inner = Var::new(symbols.intern("inner"), 0);
    let subst = Subst::new()
        .extend(a, ctor(&symbols, "succ", vec![Term::Var(inner)]))
        .unwrap()
        .extend(inner, lit(&symbols, "zero"))
        .unwrap();
    let walked = subst.walk(&Term::Var(a));
    assert_eq!(
        walked,
        ctor(&symbols, "succ", vec![Term::Var(inner)]),
        "walk must leave constructor arguments unresolved"
    );
}

#[test]
fn walk_all_resolves_nested_arguments() {
    let symbols = setup();
    let a = Var::new(symbols.intern("a"), 0);
    let inner = Var::new(symbols.intern("inner"), 0);
    let subst = Subst::new()
        .extend(a, ctor(&symbols, "succ", vec![Term::Var(inner)]))
        .unwrap()
        .extend(inner, lit(&symbols, "zero"))
        .unwrap();
    assert_eq!(
        subst.walk_all(&Term::Var(a)),
        ctor(&symbols, "succ", vec![lit(&symbols, "zero")]),
    );
}

// ========== OCCURS CHECK TESTS ==========

#[test]
fn extend_rejects_direct_self_reference() {
    let symbols = setup();
    let n = Var::new(symbols.intern("n"), 0);
    let cyclic = ctor(&symbols, "succ", vec![Term::Var(n)]);
    let err = Subst::new().extend(n, cyclic.clone()).unwrap_err();
    assert_eq!(
        err,
        EngineError::OccursCheck {
            var: n,
            term: cyclic
        }
    );
}

#[test]
fn extend_rejects_self_reference_through_a_chain() {
    let symbols = setup();
    let a = Var::new(symbols.intern("a"), 0);
    let b = Var::new(symbols.intern("b"), 0);
    let subst = Subst::new().extend(a, Term::Var(b)).unwrap();
    // binding b to succ(a) closes the cycle b -> succ(a) -> succ(b)
    let err = subst
        .extend(b, ctor(&symbols, "succ", vec![Term::Var(a)]))
        .unwrap_err();
    assert!(matches!(err, EngineError::OccursCheck { var, .. } if var == b));
}

#[test]
fn extend_allows_sibling_references() {
    let symbols = setup();
    let a = Var::new(symbols.intern("a"), 0);
    let b = Var::new(symbols.intern("b"), 0);
    let subst = Subst::new()
        .extend(a, ctor(&symbols, "pair", vec![Term::Var(b), Term::Var(b)]))
        .unwrap();
    assert_eq!(subst.len(), 1, "sharing an unrelated variable is not a cycle");
}

#[test]
fn occurs_sees_through_existing_bindings() {
    let symbols = setup();
    let a = Var::new(symbols.intern("a"), 0);
    let b = Var::new(symbols.intern("b"), 0);
    let subst = Subst::new()
        .extend(b, ctor(&symbols, "succ", vec![Term::Var(a)]))
        .unwrap();
    assert!(subst.occurs(a, &Term::Var(b)), "occurs must resolve b first");
    assert!(!subst.occurs(b, &var(&symbols, "c", 0)));
}

// ========== IDEMPOTENT RESOLUTION TESTS ==========

#[test]
fn to_idempotent_resolves_every_value() {
    let symbols = setup();
    let a = Var::new(symbols.intern("a"), 0);
    let b = Var::new(symbols.intern("b"), 0);
    let subst = Subst::new()
        .extend(a, ctor(&symbols, "succ", vec![Term::Var(b)]))
        .unwrap()
        .extend(b, lit(&symbols, "zero"))
        .unwrap();
    let resolved = subst.to_idempotent();
    assert_eq!(
        resolved.lookup(a),
        Some(&ctor(&symbols, "succ", vec![lit(&symbols, "zero")])),
    );
    assert_eq!(resolved.lookup(b), Some(&lit(&symbols, "zero")));
}

#[test]
fn to_idempotent_twice_is_the_same_as_once() {
    let symbols = setup();
    let a = Var::new(symbols.intern("a"), 0);
    let b = Var::new(symbols.intern("b"), 0);
    let c = Var::new(symbols.intern("c"), 0);
    let subst = Subst::new()
        .extend(a, Term::Var(b))
        .unwrap()
        .extend(b, ctor(&symbols, "succ", vec![Term::Var(c)]))
        .unwrap()
        .extend(c, lit(&symbols, "zero"))
        .unwrap();
    let once = subst.to_idempotent();
    let twice = once.to_idempotent();
    assert_eq!(once, twice);
}
