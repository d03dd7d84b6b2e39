//! Caller-facing parse failures (spec §7). Grammar construction failures
//! live in `earley_grammar::GrammarError`; `OutOfRangeItem` and
//! `UnexpectedCompletion` are internal invariant violations and abort via
//! `panic!` rather than appearing here.

use earley_symbol::Symbol;
use thiserror::Error;

/// The scan bucket for the token at `position` was empty: no item in the
/// previous column expects that terminal next. `expected` lists the
/// terminals that *were* expected there.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("parse error at position {position}: expected one of {expected:?}")]
pub struct ParseError {
    pub position: usize,
    pub expected: Vec<Symbol>,
}
