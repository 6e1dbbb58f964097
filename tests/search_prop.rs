use proptest::prelude::*;
use relog::goal::{disj, eq};
use relog::state::State;
use relog::subst::Subst;
use relog::symbol::SymbolStore;
use relog::term::{Term, Var};
use relog::unify::unify;

const VAR_NAMES: [&str; 3] = ["x", "y", "z"];
const TAG_NAMES: [&str; 4] = ["a", "b", "f", "g"];

#[derive(Clone, Debug)]
enum RawTerm {
    Var(usize),
    Lit(usize),
    Node { tag: usize, kids: Vec<RawTerm> },
}

fn raw_term_strategy() -> impl Strategy<Value = RawTerm> {
    let leaf = prop_oneof![
        (0..VAR_NAMES.len()).prop_map(RawTerm::Var),
        (0..2usize).prop_map(RawTerm::Lit),
    ];

    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| RawTerm::Node {
                tag: 2,
                kids: vec![t]
            }),
            (inner.clone(), inner).prop_map(|(a, b)| RawTerm::Node {
                tag: 3,
                kids: vec![a, b],
            }),
        ]
    })
}

fn build_term(raw: &RawTerm, symbols: &SymbolStore) -> Term {
    match raw {
        RawTerm::Var(v) => Term::Var(Var::new(symbols.intern(VAR_NAMES[*v]), 0)),
        RawTerm::Lit(l) => Term::Lit(symbols.intern(TAG_NAMES[*l])),
        RawTerm::Node { tag, kids } => {
            let args: Vec<Term> = kids.iter().map(|kid| build_term(kid, symbols)).collect();
            Term::ctor(symbols.intern(TAG_NAMES[*tag]), args)
        }
    }
}

fn contains_var(raw: &RawTerm, target: usize) -> bool {
    match raw {
        RawTerm::Var(v) => *v == target,
        RawTerm::Lit(_) => false,
        RawTerm::Node { kids, .. } => kids.iter().any(|kid| contains_var(kid, target)),
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn successful_unification_equates_both_sides(
        a in raw_term_strategy(),
        b in raw_term_strategy()
    ) {
        let symbols = SymbolStore::new();
        let left = build_term(&a, &symbols);
        let right = build_term(&b, &symbols);
        if let Ok(Some(subst)) = unify(&left, &right, &Subst::new()) {
            prop_assert_eq!(subst.walk_all(&left), subst.walk_all(&right));
        }
    }

    #[test]
    fn unification_success_is_symmetric(
        a in raw_term_strategy(),
        b in raw_term_strategy()
    ) {
        let symbols = SymbolStore::new();
        let left = build_term(&a, &symbols);
        let right = build_term(&b, &symbols);
        let forward = unify(&left, &right, &Subst::new());
        let backward = unify(&right, &left, &Subst::new());
        prop_assert_eq!(
            matches!(forward, Ok(Some(_))),
            matches!(backward, Ok(Some(_))),
        );
    }

    #[test]
    fn idempotent_substitutions_are_fixed_points(
        a in raw_term_strategy(),
        b in raw_term_strategy()
    ) {
        let symbols = SymbolStore::new();
        let left = build_term(&a, &symbols);
        let right = build_term(&b, &symbols);
        if let Ok(Some(subst)) = unify(&left, &right, &Subst::new()) {
            let once = subst.to_idempotent();
            let twice = once.to_idempotent();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn self_containment_is_rejected_at_any_depth(raw in raw_term_strategy()) {
        let symbols = SymbolStore::new();
        let term = build_term(&raw, &symbols);
        let x = Term::Var(Var::new(symbols.intern(VAR_NAMES[0]), 0));
        let result = unify(&x, &term, &Subst::new());
        if contains_var(&raw, 0) && !matches!(raw, RawTerm::Var(0)) {
            prop_assert!(matches!(result, Err(_)));
        } else {
            prop_assert!(matches!(result, Ok(Some(_))));
        }
    }

    #[test]
    fn disjunction_surfaces_every_branch_in_order(count in 1usize..6) {
        let symbols = SymbolStore::new();
        let names: Vec<String> = (0..count).map(|i| format!("v{i}")).collect();
        let probe = Term::Var(Var::new(symbols.intern("probe"), 0));
        let goals = names
            .iter()
            .map(|name| eq(probe.clone(), Term::Lit(symbols.intern(name))))
            .collect();
        let states = disj(goals)
            .apply(State::initial())
            .take(count + 1)
            .expect("no fault in plain unification branches");
        prop_assert_eq!(states.len(), count);
        for (ix, state) in states.iter().enumerate() {
            prop_assert_eq!(
                state.subst.walk(&probe),
                Term::Lit(symbols.intern(&names[ix])),
            );
        }
    }
}
