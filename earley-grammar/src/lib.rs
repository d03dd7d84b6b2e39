//! Canonical grammar model for the Earley recognition engine: rules over
//! dense symbol ids, nullability, and precomputed FIRST/FOLLOW sets.

mod builder;
mod error;
mod first;
mod follow;
mod grammar;
mod nullable;
mod rule;
mod symbol_set;

pub use builder::{GrammarBuilder, RuleBuilder};
pub use error::GrammarError;
pub use first::first_of_sequence;
pub use grammar::Grammar;
pub use nullable::sequence_nullable;
pub use rule::Rule;
pub use symbol_set::SymbolSet;

pub use earley_symbol::{Symbol, SymbolKind, SymbolSource, END_OF_INPUT};

#[cfg(test)]
mod tests {
    use super::*;

    fn paren_grammar() -> GrammarBuilder {
        // S -> ε | '(' S ')' S
        let mut b = GrammarBuilder::new();
        let [s] = b.sym();
        let open = b.terminal(b'(' as u32);
        let close = b.terminal(b')' as u32);
        b.rule(s).rhs([]).rhs([open, s, close, s]);
        b.set_start(s);
        b
    }

    #[test]
    fn nullable_start_is_nullable() {
        let g = paren_grammar().build().unwrap();
        assert!(g.nullable(g.start()));
    }

    #[test]
    fn undefined_nonterminal_is_rejected() {
        let mut b = GrammarBuilder::new();
        let [s, a] = b.sym();
        b.rule(s).rhs([a]);
        b.set_start(s);
        assert_eq!(b.build(), Err(GrammarError::UndefinedNonterminal(a)));
    }

    #[test]
    fn missing_start_is_rejected() {
        let mut b = GrammarBuilder::new();
        let [s] = b.sym();
        b.rule(s).rhs([]);
        assert_eq!(b.build(), Err(GrammarError::MissingStart));
    }

    #[test]
    fn empty_grammar_is_rejected() {
        let b = GrammarBuilder::new();
        assert_eq!(b.build(), Err(GrammarError::Empty));
    }

    #[test]
    fn first_and_follow_satisfy_their_equations() {
        // E -> E '+' T | T
        // T -> T '*' F | F
        // F -> '(' E ')' | 'n'
        let mut b = GrammarBuilder::new();
        let [e, t, f] = b.sym();
        let plus = b.terminal(b'+' as u32);
        let star = b.terminal(b'*' as u32);
        let open = b.terminal(b'(' as u32);
        let close = b.terminal(b')' as u32);
        let n = b.terminal(b'n' as u32);
        b.rule(e).rhs([e, plus, t]).rhs([t]);
        b.rule(t).rhs([t, star, f]).rhs([f]);
        b.rule(f).rhs([open, e, close]).rhs([n]);
        b.set_start(e);
        let g = b.build().unwrap();

        // FIRST(E) = FIRST(T) = FIRST(F) = { '(', 'n' }
        for nt in [e, t, f] {
            assert!(g.first(nt).contains(open));
            assert!(g.first(nt).contains(n));
            assert!(!g.first(nt).contains(plus));
        }

        // FOLLOW(E) contains END_OF_INPUT (start symbol), '+' (from E -> E + T)
        // and ')' (from F -> ( E )).
        assert!(g.follow(e).contains(Symbol::terminal(END_OF_INPUT)));
        assert!(g.follow(e).contains(plus));
        assert!(g.follow(e).contains(close));

        // FOLLOW(T) contains '+' (inherited from FOLLOW(E)) and '*'.
        assert!(g.follow(t).contains(plus));
        assert!(g.follow(t).contains(star));

        assert!(!g.nullable(e));
        assert!(!g.nullable(t));
        assert!(!g.nullable(f));
    }

    #[test]
    fn nullable_chain_propagates_through_several_nonterminals() {
        // S -> A B C 'x', A -> ε, B -> ε, C -> ε
        let mut b = GrammarBuilder::new();
        let [s, a, bb, c] = b.sym();
        let x = b.terminal(b'x' as u32);
        b.rule(s).rhs([a, bb, c, x]);
        b.rule(a).rhs([]);
        b.rule(bb).rhs([]);
        b.rule(c).rhs([]);
        b.set_start(s);
        let g = b.build().unwrap();

        assert!(g.nullable(a));
        assert!(g.nullable(bb));
        assert!(g.nullable(c));
        assert!(!g.nullable(s));
        assert!(g.first(s).contains(x));
    }
}
