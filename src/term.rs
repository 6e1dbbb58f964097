use std::fmt;
use std::sync::Arc;

use crate::symbol::{Sym, SymbolStore};

/// A logic variable.
///
/// `name` is the declared identifier; `counter` is the allocation
/// generation assigned when the variable is freshened, so two
/// instantiations of the same rule never share variables. Two `Var`s are
/// equal iff both fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Var {
    pub name: Sym,
    pub counter: u32,
}

impl Var {
    pub fn new(name: Sym, counter: u32) -> Self {
        Self { name, counter }
    }
}

/// A term: logic variable, opaque literal, or constructor application.
///
/// Argument lists are shared slices, so cloning a term is cheap and
/// independent search branches share structure instead of copying.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A logic variable.
    Var(Var),
    /// An opaque atom, compared only by identity.
    Lit(Sym),
    /// A constructor application: tag plus ordered arguments.
    Ctor(Sym, Arc<[Term]>),
}

impl Term {
    /// Build a variable term.
    pub fn var(name: Sym, counter: u32) -> Self {
        Term::Var(Var::new(name, counter))
    }

    /// Build a literal term.
    pub fn lit(id: Sym) -> Self {
        Term::Lit(id)
    }

    /// Build a constructor term from an argument list.
    pub fn ctor(tag: Sym, args: impl Into<Arc<[Term]>>) -> Self {
        Term::Ctor(tag, args.into())
    }

    /// Display adapter resolving interned names through `symbols`.
    pub fn display<'a>(&'a self, symbols: &'a SymbolStore) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            symbols,
        }
    }
}

/// Renders variables as `name@counter`, literals as `!name`, and
/// constructors as `tag(arg, arg)`.
pub struct TermDisplay<'a> {
    term: &'a Term,
    symbols: &'a SymbolStore,
}

impl TermDisplay<'_> {
    fn name(&self, sym: Sym) -> &str {
        self.symbols.resolve(sym).unwrap_or("?")
    }
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.term {
            Term::Var(var) => write!(f, "{}@{}", self.name(var.name), var.counter),
            Term::Lit(id) => write!(f, "!{}", self.name(*id)),
            Term::Ctor(tag, args) => {
                write!(f, "{}(", self.name(*tag))?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg.display(self.symbols))?;
                }
                f.write_str(")")
            }
        }
    }
}
