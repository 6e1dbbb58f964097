use im::Vector;

use crate::error::EngineError;
use crate::term::{Term, Var};

/// Persistent substitution: an append-only sequence of bindings with
/// most-recent-wins lookup.
///
/// Extension shares structure with every predecessor, so search branches
/// fork in O(1) without copying. Lookup scans from the newest binding
/// backwards; the extra hops are paid only on the chains a branch
/// actually walks.
///
/// Invariant: no binding, once fully resolved, refers back to its own
/// key. `extend` enforces this with an occurs check, so the bound-value
/// graph is always acyclic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subst {
    bindings: Vector<(Var, Term)>,
}

impl Subst {
    /// Create an empty substitution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bindings, including superseded ones.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The most recent binding for `var`, if any.
    pub fn lookup(&self, var: Var) -> Option<&Term> {
        self.bindings
            .iter()
            .rev()
            .find(|(key, _)| *key == var)
            .map(|(_, term)| term)
    }

    /// Append a binding, sharing all existing structure.
    ///
    /// Fails with `EngineError::OccursCheck` if `term`, resolved under
    /// this substitution, contains `var`; such a binding would create a
    /// cyclic value and signals a malformed rule system.
    pub fn extend(&self, var: Var, term: Term) -> Result<Subst, EngineError> {
        if self.occurs(var, &term) {
            return Err(EngineError::OccursCheck { var, term });
        }
        let mut bindings = self.bindings.clone();
        bindings.push_back((var, term));
        Ok(Subst { bindings })
    }

    /// Resolve a variable chain: follow bindings hop by hop until an
    /// unbound variable or a non-variable term is reached. Does not
    /// recurse into constructor arguments.
    pub fn walk(&self, term: &Term) -> Term {
        let mut current = term.clone();
        while let Term::Var(var) = current {
            match self.lookup(var) {
                Some(bound) => current = bound.clone(),
                None => return Term::Var(var),
            }
        }
        current
    }

    /// Does `term`, resolved under this substitution, contain `var`?
    pub fn occurs(&self, var: Var, term: &Term) -> bool {
        match self.walk(term) {
            Term::Var(walked) => walked == var,
            Term::Lit(_) => false,
            Term::Ctor(_, args) => args.iter().any(|arg| self.occurs(var, arg)),
        }
    }

    /// Fully resolve `term`: walk the head and recurse into constructor
    /// arguments. Used when presenting a final solution; during search
    /// only `walk` runs.
    pub fn walk_all(&self, term: &Term) -> Term {
        match self.walk(term) {
            Term::Ctor(tag, args) => Term::ctor(
                tag,
                args.iter().map(|arg| self.walk_all(arg)).collect::<Vec<_>>(),
            ),
            resolved => resolved,
        }
    }

    /// A copy in which every bound value has all of its own variable
    /// references walked out. Applying this twice is the same as applying
    /// it once.
    pub fn to_idempotent(&self) -> Subst {
        Subst {
            bindings: self
                .bindings
                .iter()
                .map(|(var, term)| (*var, self.walk_all(term)))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "tests/subst.rs"]
mod tests;
