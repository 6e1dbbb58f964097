//! Compilation of declared rule systems into executable form.
//!
//! Declarations are validated eagerly: every identifier, relation
//! reference, and arity is checked here, so a malformed system is
//! rejected before any search starts. The compiled store holds plain
//! data; goals are built from it per invocation, with premise calls
//! resolved through the store at search time so recursion and forward
//! references cost nothing at compile time.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::EngineError;
use crate::goal::{conj, delay, disj, eq, fresh, wrap_logs, Goal};
use crate::symbol::{Sym, SymbolStore};
use crate::system::{DeclTerm, RelationDecl, RuleDecl, SystemDoc};
use crate::term::{Term, Var};
use crate::trace::debug;

/// A term with its scope resolved: variables are indices into the
/// enclosing rule's fresh pool, names are interned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Template {
    Var(usize),
    Lit(Sym),
    Ctor(Sym, Vec<Template>),
}

impl Template {
    /// Build the concrete term for one rule firing, with `pool` holding
    /// that firing's fresh variables.
    pub(crate) fn instantiate(&self, pool: &[Var]) -> Term {
        match self {
            Template::Var(ix) => Term::Var(pool[*ix]),
            Template::Lit(sym) => Term::Lit(*sym),
            Template::Ctor(tag, args) => Term::ctor(
                *tag,
                args.iter()
                    .map(|arg| arg.instantiate(pool))
                    .collect::<Vec<_>>(),
            ),
        }
    }
}

/// Resolve a declared term against a scope. Literal declarations win
/// over variable declarations of the same name.
pub(crate) fn resolve_decl(
    decl: &DeclTerm,
    variables: &[String],
    literals: &[String],
    symbols: &SymbolStore,
) -> Result<Template, EngineError> {
    match decl {
        DeclTerm::Ident(name) => {
            if literals.iter().any(|lit| lit == name) {
                Ok(Template::Lit(symbols.intern(name)))
            } else if let Some(ix) = variables.iter().position(|var| var == name) {
                Ok(Template::Var(ix))
            } else {
                Err(EngineError::UnboundIdentifier {
                    identifier: name.clone(),
                    variables: variables.to_vec(),
                    literals: literals.to_vec(),
                })
            }
        }
        DeclTerm::Node { tag, args } => {
            let mut resolved = Vec::with_capacity(args.len());
            for arg in args {
                resolved.push(resolve_decl(arg, variables, literals, symbols)?);
            }
            Ok(Template::Ctor(symbols.intern(tag), resolved))
        }
    }
}

#[derive(Debug)]
pub(crate) struct CompiledPremise {
    pub(crate) relation: Sym,
    pub(crate) args: Vec<Template>,
}

#[derive(Debug)]
pub(crate) struct CompiledRule {
    pub(crate) id: Sym,
    pub(crate) variables: Vec<Sym>,
    pub(crate) patterns: Vec<(usize, Template)>,
    pub(crate) premises: Vec<CompiledPremise>,
}

#[derive(Debug)]
pub(crate) struct CompiledRelation {
    pub(crate) arity: usize,
    pub(crate) rules: Vec<Arc<CompiledRule>>,
}

/// A compiled rule system, ready to answer queries.
pub struct RelationStore {
    relations: FxHashMap<Sym, CompiledRelation>,
    symbols: Arc<SymbolStore>,
}

impl fmt::Debug for RelationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationStore")
            .field("relations", &self.relations)
            .finish_non_exhaustive()
    }
}

/// Compile a declared system, validating it completely.
///
/// If the same relation name is declared twice the later declaration
/// wins, matching a keyed-document source where a duplicate key
/// overwrites.
pub fn compile(
    doc: &SystemDoc,
    symbols: Arc<SymbolStore>,
) -> Result<Arc<RelationStore>, EngineError> {
    let mut declared: Vec<String> = doc.relations.iter().map(|rel| rel.name.clone()).collect();
    declared.sort();
    declared.dedup();

    let mut arities: FxHashMap<&str, usize> = FxHashMap::default();
    for relation in &doc.relations {
        arities.insert(relation.name.as_str(), relation.params.len());
    }

    let mut relations = FxHashMap::default();
    for relation in &doc.relations {
        let mut rules = Vec::with_capacity(relation.rules.len());
        for rule in &relation.rules {
            rules.push(Arc::new(compile_rule(
                rule, relation, &arities, &declared, &symbols,
            )?));
        }
        relations.insert(
            symbols.intern(&relation.name),
            CompiledRelation {
                arity: relation.params.len(),
                rules,
            },
        );
    }

    debug!(relations = relations.len(), "system compiled");
    Ok(Arc::new(RelationStore { relations, symbols }))
}

fn compile_rule(
    rule: &RuleDecl,
    relation: &RelationDecl,
    arities: &FxHashMap<&str, usize>,
    declared: &[String],
    symbols: &SymbolStore,
) -> Result<CompiledRule, EngineError> {
    let mut patterns = Vec::with_capacity(rule.patterns.len());
    for (param, decl) in &rule.patterns {
        let Some(param_ix) = relation.params.iter().position(|p| p == param) else {
            return Err(EngineError::UnboundIdentifier {
                identifier: param.clone(),
                variables: relation.params.clone(),
                literals: Vec::new(),
            });
        };
        let template = resolve_decl(decl, &rule.variables, &rule.literals, symbols)?;
        patterns.push((param_ix, template));
    }

    let mut premises = Vec::with_capacity(rule.premises.len());
    for premise in &rule.premises {
        let Some(&expected) = arities.get(premise.relation.as_str()) else {
            return Err(EngineError::UnknownRelation {
                relation: premise.relation.clone(),
                known: declared.to_vec(),
            });
        };
        if expected != premise.args.len() {
            return Err(EngineError::ArityMismatch {
                relation: premise.relation.clone(),
                expected,
                found: premise.args.len(),
            });
        }
        let mut args = Vec::with_capacity(premise.args.len());
        for arg in &premise.args {
            args.push(resolve_decl(arg, &rule.variables, &rule.literals, symbols)?);
        }
        premises.push(CompiledPremise {
            relation: symbols.intern(&premise.relation),
            args,
        });
    }

    Ok(CompiledRule {
        id: symbols.intern(&rule.id),
        variables: rule.variables.iter().map(|v| symbols.intern(v)).collect(),
        patterns,
        premises,
    })
}

impl RelationStore {
    pub fn symbols(&self) -> &Arc<SymbolStore> {
        &self.symbols
    }

    /// Parameter count of a relation, if it is defined.
    pub fn arity(&self, relation: Sym) -> Option<usize> {
        self.relations.get(&relation).map(|rel| rel.arity)
    }

    /// Defined relation names, sorted for stable error messages.
    pub fn relation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .relations
            .keys()
            .filter_map(|sym| self.symbols.resolve(*sym))
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }

    fn name_of(&self, sym: Sym) -> String {
        self.symbols.resolve(sym).unwrap_or("?").to_string()
    }

    /// Build the invocation goal for `relation` applied to `args`.
    ///
    /// The rules fire as a fair disjunction behind a delay, so building
    /// the goal never recurses even when the relation references itself.
    /// Referencing an unknown relation or passing the wrong argument
    /// count yields a faulting goal; validated systems only hit those
    /// paths through a direct store call with bad inputs.
    pub fn goal(this: &Arc<RelationStore>, relation: Sym, args: Vec<Term>) -> Goal {
        let Some(compiled) = this.relations.get(&relation) else {
            return Goal::fault(EngineError::UnknownRelation {
                relation: this.name_of(relation),
                known: this.relation_names(),
            });
        };
        if compiled.arity != args.len() {
            return Goal::fault(EngineError::ArityMismatch {
                relation: this.name_of(relation),
                expected: compiled.arity,
                found: args.len(),
            });
        }
        let branches = compiled
            .rules
            .iter()
            .map(|rule| Self::rule_goal(this, relation, rule, args.clone()))
            .collect();
        delay(disj(branches))
    }

    /// One rule firing: allocate the rule's fresh pool, unify the
    /// matched parameters, run the premises in order, and tag every
    /// solution with a derivation node for this rule.
    fn rule_goal(
        this: &Arc<RelationStore>,
        relation: Sym,
        rule: &Arc<CompiledRule>,
        call_args: Vec<Term>,
    ) -> Goal {
        let store = Arc::clone(this);
        let rule = Arc::clone(rule);
        let rule_id = rule.id;
        let head_args = call_args.clone();
        let body = fresh(rule.variables.clone(), move |pool| {
            let mut goals = Vec::with_capacity(rule.patterns.len() + rule.premises.len());
            for (param_ix, template) in &rule.patterns {
                goals.push(eq(head_args[*param_ix].clone(), template.instantiate(pool)));
            }
            for premise in &rule.premises {
                let args: Vec<Term> = premise
                    .args
                    .iter()
                    .map(|arg| arg.instantiate(pool))
                    .collect();
                goals.push(RelationStore::goal(&store, premise.relation, args));
            }
            conj(goals)
        });
        wrap_logs(rule_id, relation, call_args, body)
    }
}
