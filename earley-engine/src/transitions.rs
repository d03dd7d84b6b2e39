//! Per-core transition index: which item (by position in the core's item
//! list) expects which symbol next. Built once per core, the first time
//! it is expanded, and consulted by every later column that transitions
//! out of it — including origin columns far back in the chart during
//! nullable-empty completion (spec §4.6 step 2b).

use std::collections::HashMap;

use earley_symbol::Symbol;

#[derive(Default)]
pub struct TransitionIndex {
    terminal: HashMap<Symbol, Vec<usize>>,
    nonterminal: HashMap<Symbol, Vec<usize>>,
}

impl TransitionIndex {
    pub fn terminal_bucket(&self, terminal: Symbol) -> &[usize] {
        self.terminal.get(&terminal).map_or(&[], Vec::as_slice)
    }

    pub fn nonterminal_bucket(&self, nonterminal: Symbol) -> &[usize] {
        self.nonterminal
            .get(&nonterminal)
            .map_or(&[], Vec::as_slice)
    }

    pub fn has_predicted(&self, nonterminal: Symbol) -> bool {
        self.nonterminal.contains_key(&nonterminal)
    }

    pub(crate) fn push_terminal(&mut self, terminal: Symbol, item_index: usize) {
        self.terminal.entry(terminal).or_default().push(item_index);
    }

    pub(crate) fn push_nonterminal(&mut self, nonterminal: Symbol, item_index: usize) {
        self.nonterminal
            .entry(nonterminal)
            .or_default()
            .push(item_index);
    }
}
