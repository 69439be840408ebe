// Attached as `crate::parser::tests_for_parser`.

use std::collections::HashSet;

use expect_test::expect;

use crate::chart::Item;
use crate::tests::{ambiguous_sums, arithmetic, chars, left_recursive, nt, parens};
use crate::{exactly, tag, Grammar, ParseError, Parser, Symbol, Tree};

#[test]
fn epsilon_start_accepts_the_empty_input() {
    let parser = Parser::new(parens(), "parens");
    assert!(parser.finished());
    assert!(!parser.failed());
    let results = parser.results();
    assert_eq!(results.len(), 1);
    expect![["parens()"]].assert_eq(&results[0].to_string());
}

#[test]
fn balanced_parens_are_accepted() {
    let mut parser = Parser::new(parens(), "parens");
    parser.feed_many(chars("((()))"));
    assert!(!parser.failed());
    assert!(parser.finished());
}

#[test]
fn a_single_pair_parses_to_the_expected_tree() {
    let mut parser = Parser::new(parens(), "parens");
    parser.feed_many(chars("()"));
    assert!(parser.finished());
    let results = parser.results();
    assert_eq!(results.len(), 1);
    expect![["parens('(' parens() ')')"]].assert_eq(&results[0].to_string());

    let leaves: Vec<char> = results[0].leaves().into_iter().copied().collect();
    assert_eq!(leaves, ['(', ')']);
}

#[test]
fn a_dangling_prefix_is_neither_finished_nor_failed() {
    let mut parser = Parser::new(parens(), "parens");
    parser.feed_many(chars("(()"));
    assert!(!parser.failed());
    assert!(parser.failure().is_none());
    assert!(!parser.finished());
    parser.feed(')');
    assert!(parser.finished());
}

#[test]
fn finished_only_reports_at_sentence_boundaries() {
    let mut parser = Parser::new(parens(), "parens");
    for (i, token) in chars("((()))").into_iter().enumerate() {
        parser.feed(token);
        assert_eq!(parser.finished(), i == 5, "after token {i}");
    }
}

#[test]
fn an_alien_token_fails_immediately() {
    let mut parser = Parser::new(parens(), "parens");
    parser.feed_many(chars("asdf"));
    assert!(parser.failed());
    assert!(!parser.finished());
    assert_eq!(parser.position(), 1);
    expect![["Expected one of: exactly '('"]].assert_eq(&parser.failure().unwrap().to_string());
}

#[test]
fn an_unmatched_close_fails_on_arrival() {
    let mut parser = Parser::new(parens(), "parens");
    parser.feed('(');
    parser.feed(')');
    assert!(parser.finished());
    assert!(!parser.failed());
    parser.feed(')');
    assert!(parser.failed());
    assert!(!parser.finished());
    assert_eq!(parser.position(), 3);
}

#[test]
fn failure_is_sticky() {
    let mut parser = Parser::new(parens(), "parens");
    parser.feed('x');
    assert!(parser.failed());
    let recorded = parser.failure().cloned();
    parser.feed_many(chars("()"));
    assert!(parser.failed());
    assert!(!parser.finished());
    assert_eq!(parser.position(), 1);
    assert_eq!(parser.failure().cloned(), recorded);
}

#[test]
fn arithmetic_input_parses_with_precedence() {
    let mut parser = Parser::new(arithmetic(), "P");
    parser.feed_many(chars("2+3*4"));
    assert!(!parser.failed());
    assert!(parser.finished());
    let results = parser.results();
    assert_eq!(results.len(), 1);
    expect![["P(S(S(M(T('2'))) '+' M(M(T('3')) '*' T('4'))))"]]
        .assert_eq(&results[0].to_string());
}

#[test]
fn a_dangling_operator_keeps_the_parse_alive() {
    let mut parser = Parser::new(arithmetic(), "P");
    parser.feed_many(chars("2+"));
    assert!(!parser.failed());
    assert!(!parser.finished());
}

#[test]
fn a_leading_operator_fails_on_the_first_token() {
    let mut parser = Parser::new(arithmetic(), "P");
    parser.feed_many(chars("+2"));
    assert!(parser.failed());
    assert_eq!(parser.position(), 1);
    match parser.failure() {
        Some(ParseError::UnexpectedToken { expected }) => {
            let mut labels = expected.clone();
            labels.sort();
            assert_eq!(labels, ["exactly '1'", "exactly '2'", "exactly '3'", "exactly '4'"]);
        }
        other => panic!("wrong failure: {other:?}"),
    }
}

#[test]
fn ambiguous_input_enumerates_every_parse() {
    let mut parser = Parser::new(ambiguous_sums(), "E");
    parser.feed_many(chars("1+1+1"));
    assert!(parser.finished());
    let results = parser.results();
    assert!(results.len() >= 2, "want at least two parses, got {}", results.len());

    let distinct: HashSet<Tree<char>> = results.iter().cloned().collect();
    assert_eq!(distinct.len(), results.len());
    for tree in &results {
        assert_eq!(tree.head().as_str(), "E");
        let leaves: Vec<char> = tree.leaves().into_iter().copied().collect();
        assert_eq!(leaves, ['1', '+', '1', '+', '1']);
    }
}

#[test]
fn left_recursion_terminates_and_accepts() {
    let mut parser = Parser::new(left_recursive(), "A");
    parser.feed_many(chars("xxxx"));
    assert!(!parser.failed());
    assert!(parser.finished());
    assert_eq!(parser.results().len(), 1);
}

#[test]
fn equal_feeds_yield_equal_observations() {
    let mut a = Parser::new(arithmetic(), "P");
    let mut b = Parser::new(arithmetic(), "P");
    for token in chars("2+3*4") {
        a.feed(token);
        b.feed(token);
        assert_eq!(a.failed(), b.failed());
        assert_eq!(a.finished(), b.finished());
        assert_eq!(a.results(), b.results());
    }
}

#[test]
fn the_chart_only_grows() {
    let mut parser = Parser::new(parens(), "parens");
    for token in chars("((()))") {
        let before: Vec<Vec<Item<char>>> =
            (0..parser.chart().len()).map(|k| parser.chart().set(k).to_vec()).collect();
        parser.feed(token);
        for (k, set) in before.iter().enumerate() {
            for item in set {
                assert!(parser.chart().contains(k, item), "item lost from set {k}");
            }
        }
    }
}

#[test]
fn tagged_pairs_parse_by_category() {
    let mut grammar: Grammar<(&str, i64)> = Grammar::new();
    grammar.rule("list", [Symbol::terminal(tag("num"))]);
    grammar.rule(
        "list",
        [Symbol::terminal(tag("num")), Symbol::terminal(tag("comma")), Symbol::nonterm("list")],
    );

    let mut parser = Parser::new(grammar, "list");
    parser.feed_many([("num", 1), ("comma", 0), ("num", 2)]);
    assert!(parser.finished());
    let results = parser.results();
    assert_eq!(results.len(), 1);
    let leaves: Vec<(&str, i64)> = results[0].leaves().into_iter().copied().collect();
    assert_eq!(leaves, [("num", 1), ("comma", 0), ("num", 2)]);
}

#[test]
fn exact_and_tag_matchers_mix_in_one_grammar() {
    let mut grammar: Grammar<String> = Grammar::new();
    grammar.rule(
        "stmt",
        [Symbol::terminal(tag("return")), Symbol::terminal(exactly(";".to_string()))],
    );

    let mut parser = Parser::new(grammar, "stmt");
    parser.feed_many(["return".to_string(), ";".to_string()]);
    assert!(parser.finished());
}

#[test]
#[should_panic(expected = "start rule")]
fn a_missing_start_rule_is_a_programming_error() {
    let _ = Parser::new(parens(), "nope");
}

#[test]
#[should_panic(expected = "no rule named")]
fn an_undefined_nonterminal_is_fatal() {
    let mut grammar: Grammar<char> = Grammar::new();
    grammar.rule("S", [nt("missing")]);
    let _ = Parser::new(grammar, "S");
}
