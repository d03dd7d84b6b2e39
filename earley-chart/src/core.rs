//! `ItemSetCore`: the grammar-determined part of a column's item set —
//! which dotted items it holds and how the derived ones trace back to
//! the start items they were predicted/completed from (spec §3, ported
//! from `ItemSetCore::add_start_item`/`add_derived_item` in `fast.hpp`).

use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

use earley_intern::Run;
use earley_item::ItemId;

/// One entry in a core's item list: the item itself, and — for items
/// added during prediction/completion rather than copied in from the
/// previous column — the index of the start item it was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoreEntry {
    pub item: ItemId,
    pub parent: Option<u32>,
}

impl CoreEntry {
    pub fn start(item: ItemId) -> Self {
        CoreEntry { item, parent: None }
    }

    pub fn derived(item: ItemId, parent: u32) -> Self {
        CoreEntry {
            item,
            parent: Some(parent),
        }
    }

    /// A derived item with no traceable start item: predicted straight
    /// from the grammar, not reached via the nullable shortcut.
    pub fn predicted(item: ItemId) -> Self {
        CoreEntry { item, parent: None }
    }
}

/// Start items followed by derived items, ordered by insertion. Equality
/// and hashing only consider the start items: two columns predicted from
/// the same start items always expand into the same derived items, since
/// expansion is a deterministic function of the grammar (spec §4.6).
pub struct ItemSetCore {
    entries: Run<CoreEntry>,
    num_start_items: usize,
}

impl ItemSetCore {
    /// `entries` must list all of the core's start items before any
    /// derived item (the order `RegionStack`-backed core construction
    /// naturally produces).
    pub fn new(entries: Run<CoreEntry>, num_start_items: usize) -> Self {
        ItemSetCore {
            entries,
            num_start_items,
        }
    }

    pub fn start_items(&self) -> &[CoreEntry] {
        &self.entries.as_slice()[..self.num_start_items]
    }

    pub fn derived_items(&self) -> &[CoreEntry] {
        &self.entries.as_slice()[self.num_start_items..]
    }

    pub fn items(&self) -> &[CoreEntry] {
        self.entries.as_slice()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for ItemSetCore {
    fn eq(&self, other: &Self) -> bool {
        self.start_items() == other.start_items()
    }
}

impl Eq for ItemSetCore {}

impl Hash for ItemSetCore {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start_items().hash(state);
    }
}

/// Lets the engine probe the core intern table with a freshly-built start
/// item list before committing it to a region stack, so a duplicate core
/// can be discarded without ever running `expand_set` on it (spec §4.6
/// step 2c/2d).
impl Borrow<[CoreEntry]> for ItemSetCore {
    fn borrow(&self) -> &[CoreEntry] {
        self.start_items()
    }
}

impl std::fmt::Debug for ItemSetCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemSetCore")
            .field("start_items", &self.start_items())
            .field("derived_items", &self.derived_items())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use earley_intern::RegionStack;

    // `ItemId` has no public constructor, so these tests source real ids
    // from an `ItemStore` built over a small grammar rather than bare
    // integers.
    fn build_core(entries: &[CoreEntry], num_start_items: usize) -> ItemSetCore {
        let mut stack: RegionStack<CoreEntry> = RegionStack::new();
        stack.start();
        for &e in entries {
            stack.emplace(e);
        }
        let run = stack.finalise();
        ItemSetCore::new(run, num_start_items)
    }

    #[test]
    fn equal_start_items_make_equal_cores_even_with_different_derived_items() {
        use earley_grammar::GrammarBuilder;
        use earley_item::ItemStore;

        let mut b = GrammarBuilder::new();
        let [s, a] = b.sym();
        b.rule(s).rhs([a]);
        b.rule(a).rhs([]);
        b.set_start(s);
        let grammar = b.build().unwrap();
        let store = ItemStore::build(&grammar);

        let s_rule = &grammar.rules(s)[0];
        let a_rule = &grammar.rules(a)[0];
        let start_item = store.get_item(s_rule.id, 0).index();
        let derived_item = store.get_item(a_rule.id, 0).index();

        let core_a = build_core(&[CoreEntry::start(start_item)], 1);
        let core_b = build_core(
            &[
                CoreEntry::start(start_item),
                CoreEntry::derived(derived_item, 0),
            ],
            1,
        );

        assert_eq!(core_a, core_b);
    }

    #[test]
    fn different_start_items_make_different_cores() {
        use earley_grammar::GrammarBuilder;
        use earley_item::ItemStore;

        let mut b = GrammarBuilder::new();
        let [s, a] = b.sym();
        b.rule(s).rhs([a]).rhs([]);
        b.rule(a).rhs([]);
        b.set_start(s);
        let grammar = b.build().unwrap();
        let store = ItemStore::build(&grammar);

        let rules = grammar.rules(s);
        let item0 = store.get_item(rules[0].id, 0).index();
        let item1 = store.get_item(rules[1].id, 0).index();

        let core_a = build_core(&[CoreEntry::start(item0)], 1);
        let core_b = build_core(&[CoreEntry::start(item1)], 1);

        assert_ne!(core_a, core_b);
    }
}
