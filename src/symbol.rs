use lasso::{Spur, ThreadedRodeo};

/// An interned name.
///
/// Variable names, literal identities, constructor tags, relation names,
/// and rule identifiers all intern to a `Sym`; equality is a single
/// integer comparison.
pub type Sym = Spur;

/// Thread-safe store interning every name kind the engine touches.
///
/// Guarantees:
/// - Same string always produces the same Sym
/// - Different strings always produce different Syms
/// - A Sym can be resolved back to the original string
pub struct SymbolStore {
    rodeo: ThreadedRodeo,
}

impl SymbolStore {
    /// Create a new empty symbol store.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Intern a name, returning its unique Sym.
    /// If the name was already interned, returns the existing Sym.
    pub fn intern(&self, name: &str) -> Sym {
        self.rodeo.get_or_intern(name)
    }

    /// Intern a declaration list in order (rule variables, relation
    /// parameters, and the like).
    pub fn intern_all<I, S>(&self, names: I) -> Vec<Sym>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| self.rodeo.get_or_intern(name.as_ref()))
            .collect()
    }

    /// Resolve a Sym back to its string representation.
    /// Returns None if the Sym was not created by this store.
    pub fn resolve(&self, sym: Sym) -> Option<&str> {
        self.rodeo.try_resolve(&sym)
    }

    /// Check if a name has already been interned.
    pub fn contains(&self, name: &str) -> bool {
        self.rodeo.contains(name)
    }

    /// Get the Sym for a name if it exists, without interning.
    pub fn get(&self, name: &str) -> Option<Sym> {
        self.rodeo.get(name)
    }
}

impl Default for SymbolStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== INTERNING TESTS ==========

    #[test]
    fn same_name_same_sym() {
        let store = SymbolStore::new();
        let a = store.intern("even");
        let b = store.intern("even");
        assert_eq!(a, b, "interning the same name twice must agree");
    }

    #[test]
    fn different_names_different_syms() {
        let store = SymbolStore::new();
        let a = store.intern("zero");
        let b = store.intern("succ");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips() {
        let store = SymbolStore::new();
        let sym = store.intern("succ2");
        assert_eq!(store.resolve(sym), Some("succ2"));
    }

    #[test]
    fn intern_all_preserves_order() {
        let store = SymbolStore::new();
        let syms = store.intern_all(["n", "n2", "m"]);
        assert_eq!(syms.len(), 3);
        assert_eq!(store.resolve(syms[0]), Some("n"));
        assert_eq!(store.resolve(syms[1]), Some("n2"));
        assert_eq!(store.resolve(syms[2]), Some("m"));
    }

    #[test]
    fn get_without_interning() {
        let store = SymbolStore::new();
        assert_eq!(store.get("missing"), None);
        assert!(!store.contains("missing"));
        let sym = store.intern("present");
        assert_eq!(store.get("present"), Some(sym));
        assert!(store.contains("present"));
    }
}
