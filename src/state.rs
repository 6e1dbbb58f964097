use std::sync::Arc;

use im::Vector;
use smallvec::SmallVec;

use crate::derivation::Derivation;
use crate::subst::Subst;
use crate::symbol::Sym;
use crate::term::Var;

/// One point in the search: the substitution accumulated so far, the
/// derivation log entries of the current relation call, and the
/// fresh-variable counter.
///
/// States are immutable. Goals produce successor states; independent
/// branches share the substitution and log structure of their common
/// prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub subst: Subst,
    pub log: Vector<Arc<Derivation>>,
    pub counter: u32,
}

impl State {
    /// The state every run starts from: empty substitution, empty log,
    /// counter zero.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Allocate one variable per name.
    ///
    /// All variables of a single allocation share the current counter
    /// value; the counter advances once, so no later allocation anywhere
    /// in the run can produce an equal variable.
    pub fn fresh_vars(&self, names: &[Sym]) -> (SmallVec<[Var; 8]>, State) {
        let pool = names
            .iter()
            .map(|name| Var::new(*name, self.counter))
            .collect();
        let advanced = State {
            subst: self.subst.clone(),
            log: self.log.clone(),
            counter: self.counter + 1,
        };
        (pool, advanced)
    }

    /// Successor state with a different substitution.
    pub fn with_subst(&self, subst: Subst) -> State {
        State {
            subst,
            log: self.log.clone(),
            counter: self.counter,
        }
    }
}
