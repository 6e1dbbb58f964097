//! Query execution: drive a goal's stream and present answers.
//!
//! The driver is a plain iterator. Each step pulls one solution state
//! out of the stream, forcing delayed branches as needed, then turns it
//! into an [`Answer`]: the substitution made idempotent and the
//! derivation root resolved through it. Faults abort the run as `Err`.

use std::mem;
use std::sync::Arc;

use crate::compile::{resolve_decl, RelationStore};
use crate::derivation::Derivation;
use crate::error::EngineError;
use crate::goal::{fresh, Goal};
use crate::metrics::{MetricsReport, SearchMetrics};
use crate::state::State;
use crate::stream::Stream;
use crate::subst::Subst;
use crate::symbol::Sym;
use crate::system::QueryDoc;
use crate::term::{Term, Var};
use crate::trace::{debug, debug_span, trace};

/// One answer to a query: the resolved bindings and the derivation tree
/// that justifies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub subst: Subst,
    pub derivation: Derivation,
}

impl Answer {
    /// Look up what a query variable was bound to.
    ///
    /// Query variables are allocated before any rule fires, so they live
    /// at the first allocation generation. Returns `None` when the
    /// search never constrained the variable.
    pub fn binding(&self, name: Sym) -> Option<&Term> {
        self.subst.lookup(Var::new(name, 0))
    }
}

/// Lazy answer iterator over a goal's solutions.
///
/// Yields `Err` once and then stops if the stream faults; otherwise
/// yields answers until the stream is exhausted. An unbounded relation
/// yields forever, so callers cap consumption themselves ([`run`] does).
pub struct Answers {
    stream: Stream,
    metrics: SearchMetrics,
}

impl Answers {
    /// Start a search from the empty state.
    pub fn new(goal: &Goal) -> Answers {
        Answers {
            stream: goal.apply(State::initial()),
            metrics: SearchMetrics::new(),
        }
    }

    /// Snapshot of the driver counters so far.
    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }

    fn next_state(&mut self) -> Result<Option<State>, EngineError> {
        self.metrics.record_pull();
        loop {
            match mem::replace(&mut self.stream, Stream::Empty) {
                Stream::Empty => return Ok(None),
                Stream::Cons(state, rest) => {
                    self.stream = *rest;
                    self.metrics.record_solution();
                    trace!(counter = state.counter, "solution surfaced");
                    return Ok(Some(state));
                }
                Stream::Delayed(thunk) => {
                    self.metrics.record_force();
                    trace!("forcing delayed branch");
                    self.stream = thunk();
                }
                Stream::Fault(err) => {
                    self.metrics.record_fault();
                    debug!(error = %err, "search aborted");
                    return Err(err);
                }
            }
        }
    }
}

impl Iterator for Answers {
    type Item = Result<Answer, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_state() {
            Ok(Some(state)) => Some(present(state)),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

/// Turn a surfaced solution state into an answer.
///
/// Every relation call leaves exactly one derivation root in the log;
/// anything else means a goal was driven outside a relation invocation
/// and the run aborts. Both the bindings and the derivation are resolved
/// so the caller never sees an alias chain.
fn present(state: State) -> Result<Answer, EngineError> {
    let root = match (state.log.len(), state.log.front()) {
        (1, Some(root)) => Arc::clone(root),
        (found, _) => return Err(EngineError::MalformedLog { found }),
    };
    let subst = state.subst.to_idempotent();
    let derivation = root.resolve(&subst);
    Ok(Answer { subst, derivation })
}

/// Collect up to `max_results` answers from a goal.
///
/// Stops as soon as the cap is reached, so a relation with infinitely
/// many solutions is fine as long as the cap is finite. A cap of zero
/// does no search work at all.
pub fn run(max_results: usize, goal: &Goal) -> Result<Vec<Answer>, EngineError> {
    let _span = debug_span!("run", max_results).entered();
    let mut answers = Vec::new();
    if max_results == 0 {
        return Ok(answers);
    }
    for answer in Answers::new(goal) {
        answers.push(answer?);
        if answers.len() == max_results {
            break;
        }
    }
    debug!(answers = answers.len(), "run complete");
    Ok(answers)
}

/// Build the goal for a query document against a compiled system.
///
/// Validation is eager: the relation must exist, the argument count must
/// match its arity, and every identifier must resolve in the query's
/// scope. The returned goal allocates the query variables first, so
/// their bindings sit at the first allocation generation in every
/// answer.
pub fn build_query(store: &Arc<RelationStore>, query: &QueryDoc) -> Result<Goal, EngineError> {
    let symbols = store.symbols();
    let relation = symbols.intern(&query.relation);
    let Some(expected) = store.arity(relation) else {
        return Err(EngineError::UnknownRelation {
            relation: query.relation.clone(),
            known: store.relation_names(),
        });
    };
    if expected != query.args.len() {
        return Err(EngineError::ArityMismatch {
            relation: query.relation.clone(),
            expected,
            found: query.args.len(),
        });
    }

    let mut templates = Vec::with_capacity(query.args.len());
    for arg in &query.args {
        templates.push(resolve_decl(
            arg,
            &query.variables,
            &query.literals,
            symbols,
        )?);
    }

    let names = symbols.intern_all(&query.variables);
    let store = Arc::clone(store);
    Ok(fresh(names, move |pool| {
        let args: Vec<Term> = templates
            .iter()
            .map(|template| template.instantiate(pool))
            .collect();
        RelationStore::goal(&store, relation, args)
    }))
}

/// Build and run a query in one step.
pub fn run_query(store: &Arc<RelationStore>, query: &QueryDoc) -> Result<Vec<Answer>, EngineError> {
    debug!(
        relation = %query.relation,
        max_results = query.max_results,
        "running query"
    );
    let goal = build_query(store, query)?;
    run(query.max_results, &goal)
}

#[cfg(test)]
#[path = "tests/engine.rs"]
mod tests;
