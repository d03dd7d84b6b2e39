//! A general context-free Earley recognizer: build a grammar, intern its
//! dotted items, and run the chart construction over a token sequence.
//!
//! ```
//! use earley::{GrammarBuilder, ItemStore, Parser};
//!
//! let mut b = GrammarBuilder::new();
//! let [s] = b.sym();
//! b.rule(s).rhs([]);
//! b.set_start(s);
//! let grammar = b.build().unwrap();
//! let items = ItemStore::build(&grammar);
//! let mut parser = Parser::new(&grammar, &items);
//! assert!(parser.parse(&[]).unwrap());
//! ```

pub use earley_chart::{Chart, CoreEntry, DistanceVec, GotoCacheEntry, ItemSet, ItemSetCore};
pub use earley_engine::{
    dump_chart, dump_column, EngineStats, ParseError, Parser, ReductionEdge, ReductionGraph,
    TransitionIndex, DEFAULT_MAX_LOOKAHEAD_SETS,
};
pub use earley_grammar::{Grammar, GrammarBuilder, GrammarError, Rule, RuleBuilder};
pub use earley_intern::{Handle, HashSet, RegionStack, Run};
pub use earley_item::{Item, ItemId, ItemStore};
pub use earley_symbol::{Symbol, SymbolKind, SymbolSource, END_OF_INPUT};
