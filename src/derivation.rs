use std::fmt;
use std::sync::Arc;

use im::Vector;

use crate::subst::Subst;
use crate::symbol::{Sym, SymbolStore};
use crate::term::Term;

/// One node of a proof tree: which rule fired for which relation call.
///
/// `args` are the call-site argument terms as they were bound at rule
/// entry, not yet fully resolved; `resolve` walks them out under a
/// solution's substitution at presentation time. Nodes are shared via
/// `Arc` while the search is still extending branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub rule: Sym,
    pub relation: Sym,
    pub args: Vec<Term>,
    pub premises: Vector<Arc<Derivation>>,
}

impl Derivation {
    pub fn new(
        rule: Sym,
        relation: Sym,
        args: Vec<Term>,
        premises: Vector<Arc<Derivation>>,
    ) -> Self {
        Self {
            rule,
            relation,
            args,
            premises,
        }
    }

    /// Total number of nodes in this tree.
    pub fn node_count(&self) -> usize {
        1 + self
            .premises
            .iter()
            .map(|premise| premise.node_count())
            .sum::<usize>()
    }

    /// Resolve every argument, and every premise's arguments recursively,
    /// under `subst`.
    pub fn resolve(&self, subst: &Subst) -> Derivation {
        Derivation {
            rule: self.rule,
            relation: self.relation,
            args: self.args.iter().map(|arg| subst.walk_all(arg)).collect(),
            premises: self
                .premises
                .iter()
                .map(|premise| Arc::new(premise.resolve(subst)))
                .collect(),
        }
    }

    /// Display adapter resolving interned names through `symbols`.
    pub fn display<'a>(&'a self, symbols: &'a SymbolStore) -> DerivationDisplay<'a> {
        DerivationDisplay {
            node: self,
            symbols,
        }
    }
}

/// Tree rendering: one `[rule] relation(args)` line per node, each
/// premise indented beneath its conclusion with one `│ ` prefix per
/// depth level. Every line, the last included, ends with a newline.
pub struct DerivationDisplay<'a> {
    node: &'a Derivation,
    symbols: &'a SymbolStore,
}

impl fmt::Display for DerivationDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.node, self.symbols, 0)
    }
}

fn write_node(
    f: &mut fmt::Formatter<'_>,
    node: &Derivation,
    symbols: &SymbolStore,
    depth: usize,
) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("│ ")?;
    }
    write!(
        f,
        "[{}] {}(",
        symbols.resolve(node.rule).unwrap_or("?"),
        symbols.resolve(node.relation).unwrap_or("?"),
    )?;
    for (i, arg) in node.args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", arg.display(symbols))?;
    }
    f.write_str(")\n")?;
    for premise in &node.premises {
        write_node(f, premise, symbols, depth + 1)?;
    }
    Ok(())
}
