//! Caller-facing grammar construction errors (spec §7, `GrammarInvalid`).

use earley_symbol::Symbol;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum GrammarError {
    #[error("grammar has no rules")]
    Empty,

    #[error("no start symbol was set")]
    MissingStart,

    #[error("start symbol has no rules")]
    StartHasNoRules,

    #[error("nonterminal {0:?} is used but has no rules")]
    UndefinedNonterminal(Symbol),
}
