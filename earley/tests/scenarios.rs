//! Black-box end-to-end scenarios over the public `earley` API, covering
//! the universal properties and boundary behaviours that the unit tests
//! inside `earley-engine` don't already exercise directly.

use earley::{GrammarBuilder, ItemStore, Parser, Symbol};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn empty_language_accepts_only_empty_input() {
    init_logging();
    let mut b = GrammarBuilder::new();
    let [s] = b.sym();
    b.rule(s).rhs([]);
    b.set_start(s);
    let grammar = b.build().unwrap();
    let items = ItemStore::build(&grammar);

    assert!(Parser::new(&grammar, &items).parse(&[]).unwrap());
    assert!(!Parser::new(&grammar, &items).parse(&[b'a' as u32]).unwrap());
}

#[test]
fn left_recursion_without_base_builds_without_diverging() {
    init_logging();
    // S -> S, no base case: nullable(S) is false and there is no
    // terminal anywhere in the grammar, so every input is rejected and
    // the start item itself predicts a copy of itself exactly once.
    let mut b = GrammarBuilder::new();
    let [s] = b.sym();
    b.rule(s).rhs([s]);
    b.set_start(s);
    let grammar = b.build().unwrap();
    let items = ItemStore::build(&grammar);

    assert!(!Parser::new(&grammar, &items).parse(&[]).unwrap());
    for input in ["a", "aa", "aaa"] {
        let tokens: Vec<u32> = input.bytes().map(u32::from).collect();
        assert!(Parser::new(&grammar, &items).parse(&tokens).is_err());
    }
}

#[test]
fn ambiguous_repetition_has_multiple_derivations_for_three_symbols() {
    init_logging();
    // S -> S S | 'a'
    let mut b = GrammarBuilder::new();
    let [s] = b.sym();
    let a = b.terminal(b'a' as u32);
    b.rule(s).rhs([s, s]).rhs([a]);
    b.set_start(s);
    let grammar = b.build().unwrap();
    let items = ItemStore::build(&grammar);

    let tokens: Vec<u32> = "aaa".bytes().map(u32::from).collect();
    let mut parser = Parser::new(&grammar, &items);
    assert!(parser.parse(&tokens).unwrap());

    let reductions = parser.build_reductions();
    let final_column = parser.chart().len() - 1;
    let start_rule = &grammar.rules(s)[0];
    let completed = items.get_item(start_rule.id, start_rule.len());
    let derivations: Vec<_> = reductions.derivations_of(final_column, completed.index()).collect();
    assert_eq!(derivations.len(), 2);
}

#[test]
fn goto_cache_reuse_never_changes_the_accept_reject_outcome() {
    init_logging();
    // E -> E '+' T | T; T -> T '*' F | F; F -> '(' E ')' | D; D -> '0'..'9'
    let mut b = GrammarBuilder::new();
    let [e, t, f, d] = b.sym();
    let plus = b.terminal(b'+' as u32);
    let star = b.terminal(b'*' as u32);
    let open = b.terminal(b'(' as u32);
    let close = b.terminal(b')' as u32);
    let digits: Vec<Symbol> = (b'0'..=b'9').map(|c| b.terminal(c as u32)).collect();
    b.rule(e).rhs([e, plus, t]).rhs([t]);
    b.rule(t).rhs([t, star, f]).rhs([f]);
    b.rule(f).rhs([open, e, close]).rhs([d]);
    let mut digit_rule = b.rule(d);
    for digit in digits {
        digit_rule = digit_rule.rhs([digit]);
    }
    let _ = digit_rule;
    b.set_start(e);
    let grammar = b.build().unwrap();
    let items = ItemStore::build(&grammar);

    for input in ["1", "1+2*3", "(1+2)*3", "1+(2*3)+4", "1+*2", "()"] {
        let tokens: Vec<u32> = input.bytes().map(u32::from).collect();
        let cached = Parser::new(&grammar, &items).parse(&tokens);
        let uncached = Parser::with_max_lookahead_sets(&grammar, &items, 0).parse(&tokens);
        match (cached, uncached) {
            (Ok(a), Ok(b)) => assert_eq!(a, b, "diverging accept/reject for {input:?}"),
            (Err(a), Err(b)) => assert_eq!(a.position, b.position, "diverging failure position for {input:?}"),
            _ => panic!("goto cache changed the outcome class for {input:?}"),
        }
    }
}
