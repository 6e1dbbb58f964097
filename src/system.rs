//! Declaration documents for rule systems and queries.
//!
//! These are plain data: a front end (file format, embedding API, test
//! fixture) builds them however it likes, and `compile` turns a
//! [`SystemDoc`] into an executable relation store. Identifiers stay as
//! strings here; interning and scope resolution happen at compile time.

/// A term as written in a rule or query, before scope resolution.
///
/// An `Ident` is resolved against the enclosing scope's literal and
/// variable declarations when compiled, with literals taking precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclTerm {
    Ident(String),
    Node { tag: String, args: Vec<DeclTerm> },
}

impl DeclTerm {
    pub fn ident(name: impl Into<String>) -> DeclTerm {
        DeclTerm::Ident(name.into())
    }

    pub fn node(tag: impl Into<String>, args: Vec<DeclTerm>) -> DeclTerm {
        DeclTerm::Node {
            tag: tag.into(),
            args,
        }
    }
}

/// One premise of a rule: a call to a relation with argument terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiseDecl {
    pub relation: String,
    pub args: Vec<DeclTerm>,
}

/// One inference rule of a relation.
///
/// `patterns` pairs parameter names with the terms the call arguments
/// must unify against; a parameter a rule does not mention stays
/// unconstrained. `variables` and `literals` together form the scope
/// every identifier in the rule resolves against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDecl {
    pub id: String,
    pub variables: Vec<String>,
    pub literals: Vec<String>,
    pub patterns: Vec<(String, DeclTerm)>,
    pub premises: Vec<PremiseDecl>,
}

/// A named relation: a parameter list and the rules that can derive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDecl {
    pub name: String,
    pub params: Vec<String>,
    pub rules: Vec<RuleDecl>,
}

/// A whole rule system, as declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemDoc {
    pub relations: Vec<RelationDecl>,
}

/// A query against a compiled system: which relation to invoke, with
/// what arguments, under what scope, and how many answers to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDoc {
    pub variables: Vec<String>,
    pub literals: Vec<String>,
    pub relation: String,
    pub args: Vec<DeclTerm>,
    pub max_results: usize,
}
