//! Nullability: which nonterminals can derive the empty string.
//!
//! Computed by fixed-point over an inverted index symbol -> rules that
//! mention it, following the original `earley::fast::grammar::find_nullable`
//! work-queue algorithm: seed the queue with nonterminals that have an
//! empty rule, then for every rule that mentions a newly-nullable symbol,
//! check whether the rest of its RHS is now entirely nullable too.

use std::collections::VecDeque;
use std::rc::Rc;

use earley_symbol::Symbol;

use crate::rule::Rule;

pub fn compute_nullable(rules_by_lhs: &[Vec<Rc<Rule>>]) -> Vec<bool> {
    let num_nonterminals = rules_by_lhs.len();
    let mut nullable = vec![false; num_nonterminals];
    let mut work: VecDeque<usize> = VecDeque::new();

    // Inverted index: nonterminal id -> rules that mention it in their RHS.
    let mut mentioned_in: Vec<Vec<Rc<Rule>>> = vec![Vec::new(); num_nonterminals];

    for rules in rules_by_lhs {
        for rule in rules {
            if rule.is_empty() {
                let lhs = rule.lhs.usize();
                if !nullable[lhs] {
                    nullable[lhs] = true;
                    work.push_back(lhs);
                }
            }
            for &sym in rule.rhs.iter() {
                if sym.is_nonterminal() {
                    mentioned_in[sym.usize()].push(rule.clone());
                }
            }
        }
    }

    while let Some(nt) = work.pop_front() {
        for rule in &mentioned_in[nt] {
            let lhs = rule.lhs.usize();
            if nullable[lhs] {
                continue;
            }
            let all_nullable = rule
                .rhs
                .iter()
                .all(|sym| sym.is_nonterminal() && nullable[sym.usize()]);
            if all_nullable {
                nullable[lhs] = true;
                work.push_back(lhs);
            }
        }
    }

    nullable
}

/// A sequence of symbols is nullable iff every symbol in it is a nullable
/// nonterminal (an empty sequence is trivially nullable).
pub fn sequence_nullable(symbols: &[Symbol], nullable: &[bool]) -> bool {
    symbols
        .iter()
        .all(|sym| sym.is_nonterminal() && nullable[sym.usize()])
}
