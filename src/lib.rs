pub mod compile;
pub mod derivation;
pub mod engine;
pub mod error;
pub mod goal;
pub mod metrics;
pub mod state;
pub mod stream;
pub mod subst;
pub mod symbol;
pub mod system;
pub mod term;
pub mod trace;
pub mod unify;

#[cfg(test)]
pub(crate) mod test_utils;
