use crate::symbol::SymbolStore;
use crate::system::{DeclTerm, PremiseDecl, QueryDoc, RelationDecl, RuleDecl, SystemDoc};
use crate::term::{Term, Var};

pub(crate) fn var(symbols: &SymbolStore, name: &str, counter: u32) -> Term {
    Term::Var(Var::new(symbols.intern(name), counter))
}

pub(crate) fn lit(symbols: &SymbolStore, name: &str) -> Term {
    Term::Lit(symbols.intern(name))
}

pub(crate) fn ctor(symbols: &SymbolStore, tag: &str, args: Vec<Term>) -> Term {
    Term::ctor(symbols.intern(tag), args)
}

/// Peano evenness: `even(zero)` by rule `zero`, `even(succ(succ(n2)))`
/// by rule `succ2` whenever `even(n2)`.
pub(crate) fn even_system() -> SystemDoc {
    SystemDoc {
        relations: vec![RelationDecl {
            name: "even".to_string(),
            params: vec!["n".to_string()],
            rules: vec![
                RuleDecl {
                    id: "zero".to_string(),
                    variables: Vec::new(),
                    literals: vec!["zero".to_string()],
                    patterns: vec![("n".to_string(), DeclTerm::ident("zero"))],
                    premises: Vec::new(),
                },
                RuleDecl {
                    id: "succ2".to_string(),
                    variables: vec!["n2".to_string()],
                    literals: Vec::new(),
                    patterns: vec![(
                        "n".to_string(),
                        DeclTerm::node(
                            "succ",
                            vec![DeclTerm::node("succ", vec![DeclTerm::ident("n2")])],
                        ),
                    )],
                    premises: vec![PremiseDecl {
                        relation: "even".to_string(),
                        args: vec![DeclTerm::ident("n2")],
                    }],
                },
            ],
        }],
    }
}

pub(crate) fn even_query(max_results: usize) -> QueryDoc {
    QueryDoc {
        variables: vec!["n".to_string()],
        literals: Vec::new(),
        relation: "even".to_string(),
        args: vec![DeclTerm::ident("n")],
        max_results,
    }
}
