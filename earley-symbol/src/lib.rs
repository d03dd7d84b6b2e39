//! Dense, tagged symbol ids shared by every crate in the recognition engine.
//!
//! A [`Symbol`] is the tagged pair `(id, kind)` from the data model: terminal
//! ids live in the same integer space as token ids (0 is `END_OF_INPUT`,
//! `[1, 127]` are literal bytes, `>= 256` are named terminals), while
//! nonterminal ids are handed out by a [`SymbolSource`] private to one
//! grammar under construction.

use std::collections::HashMap;
use std::fmt;

/// END_OF_INPUT token id, reserved per the token-stream contract.
pub const END_OF_INPUT: u32 = 0;

/// Distinguishes the two halves of the symbol id space.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Terminal,
    Nonterminal,
}

/// A grammar symbol: a dense id tagged with its kind.
///
/// Equality and ordering are derived from `(kind, id)` so that symbols from
/// the two halves of the id space never compare equal even if their raw ids
/// coincide.
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    kind: SymbolKind,
    id: u32,
}

impl Symbol {
    /// Constructs a terminal symbol for the given token id.
    pub fn terminal(id: u32) -> Self {
        Symbol {
            kind: SymbolKind::Terminal,
            id,
        }
    }

    /// Constructs a nonterminal symbol for the given internal id.
    ///
    /// Prefer [`SymbolSource::next_nonterminal`] so ids stay dense and
    /// unique within a grammar under construction.
    pub fn nonterminal(id: u32) -> Self {
        Symbol {
            kind: SymbolKind::Nonterminal,
            id,
        }
    }

    /// The symbol's numeric id within its kind's id space.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The symbol's numeric id as a `usize`, for indexing dense side tables.
    pub fn usize(&self) -> usize {
        self.id as usize
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, SymbolKind::Terminal)
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self.kind, SymbolKind::Nonterminal)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SymbolKind::Terminal => write!(f, "T{}", self.id),
            SymbolKind::Nonterminal => write!(f, "N{}", self.id),
        }
    }
}

/// Hands out fresh, dense nonterminal ids and records optional debug names
/// for both terminals and nonterminals.
///
/// Terminal symbols are never generated here: their ids come from the token
/// alphabet at the boundary (see the crate-level docs), so a caller
/// registers them with [`SymbolSource::terminal`] instead of generating one.
#[derive(Clone, Debug, Default)]
pub struct SymbolSource {
    next_nonterminal: u32,
    names: HashMap<Symbol, String>,
}

impl SymbolSource {
    pub fn new() -> Self {
        SymbolSource {
            next_nonterminal: 0,
            names: HashMap::new(),
        }
    }

    /// Generates a new unique nonterminal symbol, optionally naming it.
    pub fn next_nonterminal(&mut self, name: Option<&str>) -> Symbol {
        let sym = Symbol::nonterminal(self.next_nonterminal);
        self.next_nonterminal += 1;
        if let Some(name) = name {
            self.names.insert(sym, name.to_owned());
        }
        sym
    }

    /// Generates `N` fresh nonterminal symbols at once, mirroring the
    /// teacher's `let [a, b, c] = cfg.sym();` idiom.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        std::array::from_fn(|_| self.next_nonterminal(None))
    }

    /// Registers a terminal symbol for the given token id, optionally
    /// naming it. Registering the same id twice is harmless; the second
    /// name (if any) overwrites the first.
    pub fn terminal(&mut self, id: u32, name: Option<&str>) -> Symbol {
        let sym = Symbol::terminal(id);
        if let Some(name) = name {
            self.names.insert(sym, name.to_owned());
        }
        sym
    }

    pub fn name(&self, sym: Symbol) -> Option<&str> {
        self.names.get(&sym).map(String::as_str)
    }

    /// Number of nonterminal symbols generated so far.
    pub fn num_nonterminals(&self) -> usize {
        self.next_nonterminal as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonterminals_are_dense_and_unique() {
        let mut source = SymbolSource::new();
        let [a, b, c] = source.sym();
        assert_eq!([a.id(), b.id(), c.id()], [0, 1, 2]);
        assert_eq!(source.num_nonterminals(), 3);
    }

    #[test]
    fn terminal_and_nonterminal_with_same_id_are_distinct() {
        let mut source = SymbolSource::new();
        let nt = source.next_nonterminal(None);
        let t = source.terminal(0, None);
        assert_ne!(nt, t);
        assert!(t.is_terminal());
        assert!(nt.is_nonterminal());
    }

    #[test]
    fn names_round_trip() {
        let mut source = SymbolSource::new();
        let s = source.next_nonterminal(Some("Start"));
        assert_eq!(source.name(s), Some("Start"));
    }
}
