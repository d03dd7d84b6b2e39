//! Interned dotted items: `(rule, dot)` pairs with precomputed lookahead
//! sets and an `empty_rhs` flag, built once and never mutated (spec §3,
//! §4.2). Every dotted position of every rule is interned eagerly at
//! construction, following `earley::fast::Items::fill_to`'s approach of
//! filling the whole `0..=rule.len()` range up front rather than lazily.

use std::collections::HashMap;

use earley_grammar::{first_of_sequence, sequence_nullable, Grammar, Rule, Symbol, SymbolSet};
use log::debug;

/// Dense id of an interned item, stable for the lifetime of the
/// [`ItemStore`] that produced it. Mirrors the `Id { n: u32 }` newtype
/// pattern `cfg_history::earley::id::Id` uses for dense, niche-free handles.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    n: u32,
}

impl ItemId {
    pub fn index(self) -> usize {
        self.n as usize
    }
}

/// A dotted item: a rule id and a dot position in `[0, rule.len()]`, plus
/// the attributes materialized once at item-store construction time.
#[derive(Clone, Debug)]
pub struct Item {
    pub rule_id: u32,
    pub lhs: Symbol,
    pub dot: usize,
    /// The symbol right after the dot, or `None` if the dot is at the end.
    pub postdot: Option<Symbol>,
    /// Terminals allowed to follow this dot: FIRST(rhs suffix after the
    /// dot), propagated with FOLLOW(lhs) when that suffix is nullable.
    pub lookahead: SymbolSet,
    /// True iff `dot == rule.len()` and the rule's whole RHS is nullable
    /// (no symbols, or every symbol a nullable nonterminal). Drives the
    /// Aycock-Horspool nullable shortcut (spec §4.6 step 1) and the
    /// nullable-empty completion shortcut (spec §4.6 step 2b).
    pub empty_rhs: bool,
    index: ItemId,
}

impl Item {
    pub fn index(&self) -> ItemId {
        self.index
    }

    pub fn is_complete(&self) -> bool {
        self.postdot.is_none()
    }

    pub fn in_lookahead(&self, terminal: Symbol) -> bool {
        self.lookahead.contains(terminal)
    }
}

/// Interns every dotted position of every rule in a [`Grammar`].
pub struct ItemStore {
    /// Indexed by `ItemId`.
    items: Vec<Item>,
    /// `(rule_id, dot) -> ItemId`, used by [`ItemStore::get_item`].
    by_rule_dot: HashMap<(u32, usize), ItemId>,
    /// `rule_id -> rule length`, used to validate dot positions.
    rule_len: HashMap<u32, usize>,
}

impl ItemStore {
    pub fn build(grammar: &Grammar) -> Self {
        let mut items = Vec::new();
        let mut by_rule_dot = HashMap::new();
        let mut rule_len = HashMap::new();
        let nullable_table = nullable_table(grammar);
        let first_table = first_table(grammar);

        for rule in grammar.all_rules() {
            rule_len.insert(rule.id, rule.len());
            for dot in 0..=rule.len() {
                let index = ItemId {
                    n: items.len() as u32,
                };
                let postdot = rule.rhs.get(dot).copied();
                let lookahead =
                    item_lookahead(grammar, rule, dot, &nullable_table, &first_table);
                let empty_rhs = dot == rule.len() && sequence_nullable(&rule.rhs, &nullable_table);

                by_rule_dot.insert((rule.id, dot), index);
                items.push(Item {
                    rule_id: rule.id,
                    lhs: rule.lhs,
                    dot,
                    postdot,
                    lookahead,
                    empty_rhs,
                    index,
                });
            }
        }

        debug!("interned {} items", items.len());

        ItemStore {
            items,
            by_rule_dot,
            rule_len,
        }
    }

    /// Looks up the interned item for `(rule, dot)`.
    ///
    /// # Panics
    ///
    /// Panics if `dot` exceeds the rule's length — an out-of-range dot
    /// request is a programmer error (spec §4.2/§7 `OutOfRangeItem`), not a
    /// recoverable condition.
    pub fn get_item(&self, rule_id: u32, dot: usize) -> &Item {
        let len = *self
            .rule_len
            .get(&rule_id)
            .unwrap_or_else(|| panic!("unknown rule id {rule_id}"));
        assert!(
            dot <= len,
            "dot {dot} out of range for rule {rule_id} of length {len}"
        );
        let id = self.by_rule_dot[&(rule_id, dot)];
        &self.items[id.index()]
    }

    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id.index()]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn item_lookahead(
    grammar: &Grammar,
    rule: &Rule,
    dot: usize,
    nullable_table: &[bool],
    first_table: &[SymbolSet],
) -> SymbolSet {
    let suffix = &rule.rhs[dot..];
    let num_terminals = grammar.num_terminals();
    let (mut lookahead, suffix_nullable) =
        first_of_sequence(suffix, first_table, nullable_table, num_terminals);
    if suffix_nullable {
        lookahead.union_with(grammar.follow(rule.lhs));
    }
    lookahead
}

// `Grammar` intentionally exposes `nullable(nt)`/`first(nt)` one symbol at a
// time (spec §4.1's contract); the whole-table views below are just local
// conveniences for feeding the per-sequence helpers in `earley_grammar`.
fn nullable_table(grammar: &Grammar) -> Vec<bool> {
    (0..grammar.num_nonterminals())
        .map(|id| grammar.nullable(Symbol::nonterminal(id as u32)))
        .collect()
}

fn first_table(grammar: &Grammar) -> Vec<SymbolSet> {
    (0..grammar.num_nonterminals())
        .map(|id| grammar.first(Symbol::nonterminal(id as u32)).clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use earley_grammar::GrammarBuilder;

    fn digit_grammar() -> Grammar {
        // N -> D | N D
        // D -> '0'..'9'
        let mut b = GrammarBuilder::new();
        let [n, d] = b.sym();
        let digits: Vec<Symbol> = (b'0'..=b'9').map(|c| b.terminal(c as u32)).collect();
        b.rule(n).rhs([d]).rhs([n, d]);
        let mut rule_builder = b.rule(d);
        for &digit in &digits {
            rule_builder = rule_builder.rhs([digit]);
        }
        let _ = rule_builder;
        b.set_start(n);
        b.build().unwrap()
    }

    #[test]
    fn every_dot_position_is_interned() {
        let grammar = digit_grammar();
        let store = ItemStore::build(&grammar);
        // N -> N D has 2 symbols, so dots 0, 1, 2 are all interned.
        let n_d_rule = grammar
            .rules(grammar.start())
            .iter()
            .find(|r| r.len() == 2)
            .unwrap();
        for dot in 0..=2 {
            let item = store.get_item(n_d_rule.id, dot);
            assert_eq!(item.dot, dot);
        }
    }

    #[test]
    #[should_panic]
    fn out_of_range_dot_panics() {
        let grammar = digit_grammar();
        let store = ItemStore::build(&grammar);
        let rule = &grammar.rules(grammar.start())[0];
        store.get_item(rule.id, rule.len() + 1);
    }

    #[test]
    fn completed_item_over_nullable_rule_has_empty_rhs() {
        let mut b = GrammarBuilder::new();
        let [s, a] = b.sym();
        b.rule(s).rhs([a]);
        b.rule(a).rhs([]);
        b.set_start(s);
        let grammar = b.build().unwrap();
        let store = ItemStore::build(&grammar);

        let a_rule = &grammar.rules(a)[0];
        let completed = store.get_item(a_rule.id, 0);
        assert!(completed.empty_rhs);
    }
}
