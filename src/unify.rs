use crate::error::EngineError;
use crate::subst::Subst;
use crate::term::Term;

/// Unify two terms under `subst`.
///
/// `Ok(Some)` carries the extended substitution. `Ok(None)` is an
/// ordinary mismatch: the search branch fails and nothing else happens.
/// `Err` is an occurs-check violation, which aborts the whole run.
///
/// Cases, in order: identical variables succeed unchanged; a variable on
/// either side binds to the other side (occurs-checked); literals succeed
/// iff their identities match; constructors succeed iff tags match and
/// argument lists unify pairwise left-to-right, threading the
/// substitution through each step; everything else is a mismatch.
pub fn unify(a: &Term, b: &Term, subst: &Subst) -> Result<Option<Subst>, EngineError> {
    let a = subst.walk(a);
    let b = subst.walk(b);
    match (a, b) {
        (Term::Var(x), Term::Var(y)) if x == y => Ok(Some(subst.clone())),
        (Term::Var(x), t) => subst.extend(x, t).map(Some),
        (t, Term::Var(y)) => subst.extend(y, t).map(Some),
        (Term::Lit(x), Term::Lit(y)) => Ok(if x == y { Some(subst.clone()) } else { None }),
        (Term::Ctor(tag_a, args_a), Term::Ctor(tag_b, args_b)) => {
            if tag_a != tag_b || args_a.len() != args_b.len() {
                return Ok(None);
            }
            unify_args(&args_a, &args_b, subst)
        }
        _ => Ok(None),
    }
}

/// Unify two argument lists of equal length, left to right.
fn unify_args(xs: &[Term], ys: &[Term], subst: &Subst) -> Result<Option<Subst>, EngineError> {
    let mut current = subst.clone();
    for (x, y) in xs.iter().zip(ys) {
        match unify(x, y, &current)? {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}
