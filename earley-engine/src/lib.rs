//! The recognition engine: chart construction, the goto-reuse cache, and
//! the reduction-builder post-pass (spec §4.6/§4.7). Built over
//! `earley_grammar`'s validated grammar model and `earley_item`'s
//! interned dotted items.

mod error;
mod parser;
mod reduce;
mod report;
mod transitions;

pub use error::ParseError;
pub use parser::{Parser, DEFAULT_MAX_LOOKAHEAD_SETS};
pub use reduce::{ReductionEdge, ReductionGraph};
pub use report::{dump_chart, dump_column, EngineStats};
pub use transitions::TransitionIndex;

pub use earley_chart::{Chart, CoreEntry, DistanceVec, GotoCacheEntry, ItemSet, ItemSetCore};
pub use earley_grammar::{Grammar, GrammarBuilder, GrammarError, Rule, RuleBuilder};
pub use earley_intern::{Handle, HashSet, RegionStack, Run};
pub use earley_item::{Item, ItemId, ItemStore};
pub use earley_symbol::{Symbol, SymbolKind, SymbolSource, END_OF_INPUT};
