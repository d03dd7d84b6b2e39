//! A set of terminal symbols, stored as a bit vector over the terminal
//! alphabet — the same "pack the symbol space into a `BitVec`" trick
//! `cfg_grammar::SymbolBitSet` uses for set-of-symbol/terminal questions,
//! sized here to just the terminal half of the id space since that is all a
//! FIRST/FOLLOW/lookahead set ever ranges over.

use std::fmt;

use bit_vec::BitVec;
use earley_symbol::Symbol;

#[derive(Clone)]
pub struct SymbolSet {
    bits: BitVec,
}

impl SymbolSet {
    pub fn new(num_terminals: usize) -> Self {
        SymbolSet {
            bits: BitVec::from_elem(num_terminals, false),
        }
    }

    /// Inserts a terminal symbol. Returns `true` if the set changed.
    pub fn insert(&mut self, terminal: Symbol) -> bool {
        debug_assert!(terminal.is_terminal());
        let idx = terminal.usize();
        let was_set = self.bits[idx];
        self.bits.set(idx, true);
        !was_set
    }

    pub fn contains(&self, terminal: Symbol) -> bool {
        debug_assert!(terminal.is_terminal());
        self.bits.get(terminal.usize()).unwrap_or(false)
    }

    /// Unions `other` into `self`. Returns `true` if `self` changed.
    pub fn union_with(&mut self, other: &SymbolSet) -> bool {
        let before = self.bits.clone();
        self.bits.or(&other.bits);
        before != self.bits
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.any()
    }

    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, set)| set)
            .map(|(id, _)| Symbol::terminal(id as u32))
    }
}

impl fmt::Debug for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for SymbolSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}
impl Eq for SymbolSet {}
