//! FIRST sets: for each nonterminal, the set of terminals that can begin a
//! string it derives. Computed by fixed-point the way
//! `cfg_predict_sets::FirstSets` does, adapted to the bit-set
//! [`SymbolSet`](crate::symbol_set::SymbolSet) representation and to treat
//! nullability as a side table rather than an in-set epsilon marker.

use std::rc::Rc;

use earley_symbol::Symbol;

use crate::rule::Rule;
use crate::symbol_set::SymbolSet;

/// FIRST of a symbol sequence (e.g. a rule's RHS suffix after the dot).
/// Returns the computed set and whether the whole sequence is nullable.
pub fn first_of_sequence(
    symbols: &[Symbol],
    first: &[SymbolSet],
    nullable: &[bool],
    num_terminals: usize,
) -> (SymbolSet, bool) {
    let mut result = SymbolSet::new(num_terminals);
    for &sym in symbols {
        if sym.is_terminal() {
            result.insert(sym);
            return (result, false);
        }
        result.union_with(&first[sym.usize()]);
        if !nullable[sym.usize()] {
            return (result, false);
        }
    }
    (result, true)
}

pub fn compute_first(
    rules_by_lhs: &[Vec<Rc<Rule>>],
    nullable: &[bool],
    num_terminals: usize,
) -> Vec<SymbolSet> {
    let num_nonterminals = rules_by_lhs.len();
    let mut first = vec![SymbolSet::new(num_terminals); num_nonterminals];

    let mut changed = true;
    while changed {
        changed = false;
        for (lhs, rules) in rules_by_lhs.iter().enumerate() {
            for rule in rules {
                let (rhs_first, _) = first_of_sequence(&rule.rhs, &first, nullable, num_terminals);
                changed |= first[lhs].union_with(&rhs_first);
            }
        }
    }

    first
}
