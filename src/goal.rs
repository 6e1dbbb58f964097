use std::fmt;
use std::sync::Arc;

use im::Vector;

use crate::derivation::Derivation;
use crate::error::EngineError;
use crate::state::State;
use crate::stream::Stream;
use crate::symbol::Sym;
use crate::term::{Term, Var};
use crate::unify::unify;

/// A goal maps one search state to a lazy stream of successor states.
///
/// Goals are pure: applying one never mutates anything, and combinators
/// compose goals without running them. Cloning is cheap (shared
/// closure).
#[derive(Clone)]
pub struct Goal(Arc<dyn Fn(State) -> Stream + Send + Sync>);

impl Goal {
    /// Wrap a closure as a goal.
    pub fn new(f: impl Fn(State) -> Stream + Send + Sync + 'static) -> Self {
        Goal(Arc::new(f))
    }

    /// Run the goal against one state.
    pub fn apply(&self, state: State) -> Stream {
        (self.0)(state)
    }

    /// The goal that always succeeds with the state unchanged.
    pub fn succeed() -> Goal {
        Goal::new(Stream::unit)
    }

    /// The goal that always fails.
    pub fn fail() -> Goal {
        Goal::new(|_| Stream::Empty)
    }

    /// A goal that aborts the run if its branch is ever explored.
    pub(crate) fn fault(err: EngineError) -> Goal {
        Goal::new(move |_| Stream::Fault(err.clone()))
    }

    /// Pairwise conjunction: `other` runs against every solution of
    /// `self`. `conj` is the n-ary fold of this.
    pub fn and(self, other: Goal) -> Goal {
        Goal::new(move |state| self.apply(state).append_map(&other))
    }

    /// Pairwise disjunction with fair interleaving. `disj` is the n-ary
    /// fold of this.
    pub fn or(self, other: Goal) -> Goal {
        Goal::new(move |state| self.apply(state.clone()).append(other.apply(state)))
    }
}

impl fmt::Debug for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Goal(..)")
    }
}

/// Unification goal: succeeds with the extended substitution, yields an
/// empty stream on mismatch, faults on an occurs-check violation.
pub fn eq(a: Term, b: Term) -> Goal {
    Goal::new(move |state: State| match unify(&a, &b, &state.subst) {
        Ok(Some(subst)) => Stream::unit(state.with_subst(subst)),
        Ok(None) => Stream::Empty,
        Err(err) => Stream::Fault(err),
    })
}

/// N-ary conjunction, folded right; the empty conjunction succeeds with
/// the state unchanged.
pub fn conj(goals: Vec<Goal>) -> Goal {
    goals
        .into_iter()
        .rev()
        .fold(Goal::succeed(), |rest, goal| goal.and(rest))
}

/// N-ary disjunction, folded right; the empty disjunction fails. Rule
/// order only affects the order solutions surface, never whether a
/// branch is explored.
pub fn disj(goals: Vec<Goal>) -> Goal {
    goals
        .into_iter()
        .rev()
        .fold(Goal::fail(), |rest, goal| goal.or(rest))
}

/// Allocate one fresh variable per name, hand the pool to `build`, and
/// run the built goal against the counter-advanced state.
///
/// The pool is rebuilt per application, so a recursive relation gets
/// capture-free variables on every entry.
pub fn fresh<F>(names: Vec<Sym>, build: F) -> Goal
where
    F: Fn(&[Var]) -> Goal + Send + Sync + 'static,
{
    Goal::new(move |state: State| {
        let (pool, advanced) = state.fresh_vars(&names);
        build(&pool).apply(advanced)
    })
}

/// Defer a goal's invocation behind a stream node.
///
/// Invoking a (mutually) recursive relation's goal must yield
/// immediately instead of recursing; every compiled relation wraps its
/// rule disjunction in this.
pub fn delay(goal: Goal) -> Goal {
    Goal::new(move |state| {
        let goal = goal.clone();
        Stream::delayed(move || goal.apply(state))
    })
}

/// Tag every solution of `goal` with one derivation node recording this
/// rule firing.
///
/// The node captures the call-site `args` unresolved; the solution's
/// accumulated log becomes the node's premises, and the node becomes the
/// solution's entire log. One relation call therefore always surfaces
/// exactly one log root.
pub fn wrap_logs(rule: Sym, relation: Sym, args: Vec<Term>, goal: Goal) -> Goal {
    Goal::new(move |state: State| {
        let args = args.clone();
        goal.apply(state).map(move |solution: State| {
            let node = Derivation::new(rule, relation, args.clone(), solution.log.clone());
            State {
                subst: solution.subst,
                log: Vector::unit(Arc::new(node)),
                counter: solution.counter,
            }
        })
    })
}
