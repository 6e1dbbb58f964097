use std::error::Error;
use std::fmt;

use lasso::Key;

use crate::symbol::SymbolStore;
use crate::term::{Term, Var};

/// Integrity errors.
///
/// Every variant means the rule system itself is malformed or an engine
/// invariant is broken, and the whole run aborts. Ordinary unification
/// mismatches are not errors; they only prune a search branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An identifier in a rule or query names neither a declared variable
    /// nor a declared literal.
    UnboundIdentifier {
        identifier: String,
        variables: Vec<String>,
        literals: Vec<String>,
    },
    /// Binding `var` to `term` would make the variable's value contain
    /// itself.
    OccursCheck { var: Var, term: Term },
    /// A solution surfaced with `found` top-level log entries instead of
    /// exactly one.
    MalformedLog { found: usize },
    /// A premise or query names a relation the system does not define.
    UnknownRelation {
        relation: String,
        known: Vec<String>,
    },
    /// A premise or query passes the wrong number of arguments to a
    /// relation.
    ArityMismatch {
        relation: String,
        expected: usize,
        found: usize,
    },
}

impl EngineError {
    /// Render the error with interned names resolved through `symbols`.
    ///
    /// `Display` is self-contained but prints raw symbol indices for the
    /// occurs-check variant; this form prints the actual names.
    pub fn render(&self, symbols: &SymbolStore) -> String {
        match self {
            EngineError::OccursCheck { var, term } => format!(
                "occurs check failed: binding {} to {} would make the variable contain itself",
                Term::Var(*var).display(symbols),
                term.display(symbols),
            ),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnboundIdentifier {
                identifier,
                variables,
                literals,
            } => write!(
                f,
                "unbound identifier `{}` (declared variables: [{}]; declared literals: [{}])",
                identifier,
                variables.join(", "),
                literals.join(", "),
            ),
            EngineError::OccursCheck { var, .. } => write!(
                f,
                "occurs check failed: variable #{}@{} would be bound to a term containing it",
                var.name.into_usize(),
                var.counter,
            ),
            EngineError::MalformedLog { found } => write!(
                f,
                "malformed derivation log: expected exactly one root entry, found {}",
                found,
            ),
            EngineError::UnknownRelation { relation, known } => write!(
                f,
                "unknown relation `{}` (known relations: [{}])",
                relation,
                known.join(", "),
            ),
            EngineError::ArityMismatch {
                relation,
                expected,
                found,
            } => write!(
                f,
                "relation `{}` takes {} argument(s), got {}",
                relation, expected, found,
            ),
        }
    }
}

impl Error for EngineError {}
