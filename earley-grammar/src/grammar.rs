//! The immutable, validated grammar model (spec §4.1).

use std::rc::Rc;

use earley_symbol::Symbol;

use crate::rule::Rule;
use crate::symbol_set::SymbolSet;

/// A context-free grammar over dense [`Symbol`] ids, frozen after
/// construction. `nullable`/`first`/`follow` are precomputed once by
/// [`crate::builder::GrammarBuilder::build`].
#[derive(Debug)]
pub struct Grammar {
    pub(crate) rules_by_lhs: Vec<Vec<Rc<Rule>>>,
    pub(crate) start: Symbol,
    pub(crate) num_terminals: usize,
    pub(crate) nullable: Vec<bool>,
    pub(crate) first: Vec<SymbolSet>,
    pub(crate) follow: Vec<SymbolSet>,
}

impl Grammar {
    /// All alternatives for a nonterminal, in the order they were added.
    pub fn rules(&self, nt: Symbol) -> &[Rc<Rule>] {
        debug_assert!(nt.is_nonterminal());
        &self.rules_by_lhs[nt.usize()]
    }

    /// Every rule in the grammar, in definition order, across all
    /// nonterminals.
    pub fn all_rules(&self) -> impl Iterator<Item = &Rc<Rule>> {
        self.rules_by_lhs.iter().flatten()
    }

    pub fn nullable(&self, nt: Symbol) -> bool {
        debug_assert!(nt.is_nonterminal());
        self.nullable[nt.usize()]
    }

    pub fn first(&self, nt: Symbol) -> &SymbolSet {
        debug_assert!(nt.is_nonterminal());
        &self.first[nt.usize()]
    }

    pub fn follow(&self, nt: Symbol) -> &SymbolSet {
        debug_assert!(nt.is_nonterminal());
        &self.follow[nt.usize()]
    }

    pub fn start(&self) -> Symbol {
        self.start
    }

    pub fn symbol_kind(&self, sym: Symbol) -> earley_symbol::SymbolKind {
        sym.kind()
    }

    /// Size of the terminal alphabet the grammar was built against; used to
    /// size lookahead bit sets consistently across crates.
    pub fn num_terminals(&self) -> usize {
        self.num_terminals
    }

    pub fn num_nonterminals(&self) -> usize {
        self.rules_by_lhs.len()
    }
}
