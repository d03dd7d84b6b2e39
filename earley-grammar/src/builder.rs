//! Fluent grammar construction, in the teacher's
//! `.rule(lhs).rhs([...]).rhs([...])` idiom
//! (`cfg_grammar::rule_builder::RuleBuilder`), closing over the in-memory
//! `GrammarBuilder` instead of a live `Cfg`.

use std::rc::Rc;

use earley_symbol::{Symbol, SymbolSource};
use log::debug;

use crate::error::GrammarError;
use crate::first::compute_first;
use crate::follow::compute_follow;
use crate::grammar::Grammar;
use crate::nullable::compute_nullable;
use crate::rule::Rule;

/// Builds a [`Grammar`] from fluently-added rules.
///
/// ```
/// use earley_grammar::GrammarBuilder;
///
/// let mut b = GrammarBuilder::new();
/// let [s, a] = b.sym();
/// b.rule(s).rhs([a]).rhs([]);
/// b.set_start(s);
/// let grammar = b.build().unwrap();
/// assert!(grammar.nullable(s));
/// ```
pub struct GrammarBuilder {
    symbols: SymbolSource,
    rules_by_lhs: Vec<Vec<Rc<Rule>>>,
    start: Option<Symbol>,
    max_terminal_id: Option<u32>,
    next_rule_id: u32,
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarBuilder {
    pub fn new() -> Self {
        GrammarBuilder {
            symbols: SymbolSource::new(),
            rules_by_lhs: Vec::new(),
            start: None,
            max_terminal_id: None,
            next_rule_id: 0,
        }
    }

    /// Generates `N` fresh nonterminal symbols.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        let syms: [Symbol; N] = self.symbols.sym();
        for _ in 0..N {
            self.rules_by_lhs.push(Vec::new());
        }
        syms
    }

    /// Registers (or re-registers) a terminal symbol for the given token id.
    pub fn terminal(&mut self, id: u32) -> Symbol {
        self.max_terminal_id = Some(self.max_terminal_id.map_or(id, |max| max.max(id)));
        self.symbols.terminal(id, None)
    }

    pub fn set_start(&mut self, start: Symbol) {
        self.start = Some(start);
    }

    /// Starts building the alternatives of one nonterminal.
    pub fn rule(&mut self, lhs: Symbol) -> RuleBuilder<'_> {
        debug_assert!(lhs.is_nonterminal());
        RuleBuilder { lhs, grammar: self }
    }

    fn add_rule(&mut self, lhs: Symbol, rhs: Vec<Symbol>) {
        for &sym in &rhs {
            if sym.is_terminal() {
                self.max_terminal_id =
                    Some(self.max_terminal_id.map_or(sym.id(), |max| max.max(sym.id())));
            }
        }
        let rule = Rc::new(Rule {
            lhs,
            rhs: rhs.into(),
            id: self.next_rule_id,
        });
        self.next_rule_id += 1;
        self.rules_by_lhs[lhs.usize()].push(rule);
    }

    /// Validates the grammar and computes nullable/FIRST/FOLLOW.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        if self.rules_by_lhs.iter().all(Vec::is_empty) {
            return Err(GrammarError::Empty);
        }
        let start = self.start.ok_or(GrammarError::MissingStart)?;
        if self.rules_by_lhs[start.usize()].is_empty() {
            return Err(GrammarError::StartHasNoRules);
        }
        for rules in &self.rules_by_lhs {
            for rule in rules {
                for &sym in rule.rhs.iter() {
                    if sym.is_nonterminal() && self.rules_by_lhs[sym.usize()].is_empty() {
                        return Err(GrammarError::UndefinedNonterminal(sym));
                    }
                }
            }
        }

        // END_OF_INPUT (id 0) always occupies a slot in the terminal
        // alphabet, since FOLLOW(start) always contains it.
        let num_terminals = self.max_terminal_id.map_or(1, |max| max as usize + 1).max(1);

        let nullable = compute_nullable(&self.rules_by_lhs);
        let first = compute_first(&self.rules_by_lhs, &nullable, num_terminals);
        let follow = compute_follow(&self.rules_by_lhs, &first, &nullable, start, num_terminals);

        debug!(
            "built grammar: {} nonterminals, {} rules, {} terminals",
            self.rules_by_lhs.len(),
            self.rules_by_lhs.iter().map(Vec::len).sum::<usize>(),
            num_terminals
        );

        Ok(Grammar {
            rules_by_lhs: self.rules_by_lhs,
            start,
            num_terminals,
            nullable,
            first,
            follow,
        })
    }
}

pub struct RuleBuilder<'a> {
    lhs: Symbol,
    grammar: &'a mut GrammarBuilder,
}

impl<'a> RuleBuilder<'a> {
    /// Adds one alternative to the nonterminal this builder was opened for.
    pub fn rhs(self, syms: impl AsRef<[Symbol]>) -> Self {
        self.grammar.add_rule(self.lhs, syms.as_ref().to_vec());
        self
    }
}
