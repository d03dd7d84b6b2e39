//! FOLLOW sets: for each nonterminal, the set of terminals that can
//! immediately follow it in some derivation from the start symbol.
//!
//! Computed by the standard fixed point: the start symbol's FOLLOW contains
//! `END_OF_INPUT`; for every occurrence `A -> α B β`, FIRST(β)\{ε} is added
//! to FOLLOW(B), and FOLLOW(A) is added to FOLLOW(B) when β is nullable.
//! Structurally this mirrors `cfg_predict_sets::FollowSets::new`'s
//! right-to-left walk of each rule's RHS, adapted to bit sets.

use std::rc::Rc;

use earley_symbol::{Symbol, END_OF_INPUT};

use crate::first::first_of_sequence;
use crate::rule::Rule;
use crate::symbol_set::SymbolSet;

pub fn compute_follow(
    rules_by_lhs: &[Vec<Rc<Rule>>],
    first: &[SymbolSet],
    nullable: &[bool],
    start: Symbol,
    num_terminals: usize,
) -> Vec<SymbolSet> {
    let num_nonterminals = rules_by_lhs.len();
    let mut follow = vec![SymbolSet::new(num_terminals); num_nonterminals];
    follow[start.usize()].insert(Symbol::terminal(END_OF_INPUT));

    let mut changed = true;
    while changed {
        changed = false;
        for rules in rules_by_lhs {
            for rule in rules {
                for (i, &sym) in rule.rhs.iter().enumerate() {
                    if sym.is_terminal() {
                        continue;
                    }
                    let beta = &rule.rhs[i + 1..];
                    let (beta_first, beta_nullable) =
                        first_of_sequence(beta, first, nullable, num_terminals);
                    changed |= follow[sym.usize()].union_with(&beta_first);
                    if beta_nullable {
                        let follow_lhs = follow[rule.lhs.usize()].clone();
                        changed |= follow[sym.usize()].union_with(&follow_lhs);
                    }
                }
            }
        }
    }

    follow
}
