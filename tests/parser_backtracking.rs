//! Backtracking and combinator semantics, exercised on a minimal token set
//! independent of any real language.

use shade::lexing::{LexicalRule, RuleTable, StreamPosition};
use shade::parsing::{action, call, splice, terminal, Grammar, NodeId, Parser, Production};
use shade::token::{Token, TokenKind};
use shade::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Abc {
    Ignore,
    Reject,
    Eof,
    A,
    B,
    C,
}

impl TokenKind for Abc {
    const IGNORE: Self = Abc::Ignore;
    const REJECT: Self = Abc::Reject;
    const EOF: Self = Abc::Eof;
}

fn table() -> RuleTable<Abc, ()> {
    RuleTable::new(vec![
        LexicalRule::new(r"[ \t\n]+", Abc::Ignore),
        LexicalRule::new(r"a", Abc::A),
        LexicalRule::new(r"b", Abc::B),
        LexicalRule::new(r"c", Abc::C),
    ])
    .unwrap()
}

#[test]
fn test_second_alternative_wins_after_first_fails() {
    // P = A | B against input "b": A's attempt fails, the position is fully
    // restored, then B matches.
    let start: Production<Abc, ()> = Production::named("start")
        .alternative(vec![terminal(Abc::A)])
        .alternative(vec![terminal(Abc::B)]);
    let grammar = Grammar::new("start", vec![start]).unwrap();

    let rules = table();
    let context = ();
    let mut parser = Parser::new(&rules, "b", &context).unwrap();
    let root = parser.parse(&grammar).unwrap();

    let node = parser.arena().get(root).unwrap();
    assert_eq!(node.token().unwrap().kind(), Abc::B);
}

#[test]
fn test_alternatives_are_tried_in_declaration_order() {
    // Both alternatives match "a"; the first one declared must win.
    fn first(parser: &mut Parser<'_, Abc, ()>, _: &[Token<Abc>]) -> Option<NodeId> {
        Some(parser.arena_mut().branch("first", None, None))
    }
    fn second(parser: &mut Parser<'_, Abc, ()>, _: &[Token<Abc>]) -> Option<NodeId> {
        Some(parser.arena_mut().branch("second", None, None))
    }

    let start: Production<Abc, ()> = Production::named("start")
        .alternative(vec![terminal(Abc::A), action(first)])
        .alternative(vec![terminal(Abc::A), action(second)]);
    let grammar = Grammar::new("start", vec![start]).unwrap();

    let rules = table();
    let context = ();
    let mut parser = Parser::new(&rules, "a", &context).unwrap();
    let root = parser.parse(&grammar).unwrap();
    assert_eq!(parser.arena().get(root).unwrap().name(), Some("first"));
}

#[test]
fn test_failed_attempt_restores_position_exactly() {
    let start: Production<Abc, ()> = Production::named("start")
        .alternative(vec![terminal(Abc::A), terminal(Abc::B), terminal(Abc::C)])
        .alternative(vec![terminal(Abc::A), terminal(Abc::B), terminal(Abc::B)]);
    let grammar = Grammar::new("start", vec![start]).unwrap();

    let rules = table();
    let context = ();
    let mut parser = Parser::new(&rules, "a b a", &context).unwrap();

    let lookahead_before = parser.peek().clone();
    let error = parser.parse(&grammar).unwrap_err();

    // Both alternatives consumed "a b" before failing on the third token;
    // afterwards the parser is bit-for-bit back at its entry state.
    assert!(matches!(error, ParseError::NoMatch { .. }));
    assert_eq!(parser.peek(), &lookahead_before);
    assert_eq!(parser.checkpoint_depth(), 0);
    assert_eq!(parser.arena().len(), 0);
}

#[test]
fn test_sequence_requires_every_element() {
    // An alternative is accepted only when every element succeeds. A
    // first-element match alone must not accept the sequence; with input
    // "a" the two-element alternative fails and the single-element one wins.
    fn two_matched(parser: &mut Parser<'_, Abc, ()>, matched: &[Token<Abc>]) -> Option<NodeId> {
        assert_eq!(matched.len(), 2);
        Some(parser.arena_mut().branch("pair", None, None))
    }

    let start: Production<Abc, ()> = Production::named("start")
        .alternative(vec![terminal(Abc::A), terminal(Abc::B), action(two_matched)])
        .alternative(vec![terminal(Abc::A)]);
    let grammar = Grammar::new("start", vec![start]).unwrap();

    let rules = table();
    let context = ();

    let mut parser = Parser::new(&rules, "a", &context).unwrap();
    let root = parser.parse(&grammar).unwrap();
    let node = parser.arena().get(root).unwrap();
    assert!(node.token().is_some(), "single-element alternative must win");

    let mut parser = Parser::new(&rules, "a b", &context).unwrap();
    let root = parser.parse(&grammar).unwrap();
    assert_eq!(parser.arena().get(root).unwrap().name(), Some("pair"));
}

#[test]
fn test_result_is_final_element_node() {
    let start: Production<Abc, ()> = Production::named("start")
        .alternative(vec![terminal(Abc::A), terminal(Abc::B)]);
    let grammar = Grammar::new("start", vec![start]).unwrap();

    let rules = table();
    let context = ();
    let mut parser = Parser::new(&rules, "a b", &context).unwrap();
    let root = parser.parse(&grammar).unwrap();

    let node = parser.arena().get(root).unwrap();
    assert_eq!(node.token().unwrap().kind(), Abc::B);
}

#[test]
fn test_nonterminals_nest_and_backtrack() {
    // inner = A B | A; start = inner C | inner B.
    let inner: Production<Abc, ()> = Production::named("inner")
        .alternative(vec![terminal(Abc::A), terminal(Abc::B)])
        .alternative(vec![terminal(Abc::A)]);
    let start: Production<Abc, ()> = Production::named("start")
        .alternative(vec![call("inner"), terminal(Abc::C)])
        .alternative(vec![call("inner"), terminal(Abc::B)]);
    let grammar = Grammar::new("start", vec![inner, start]).unwrap();

    let rules = table();
    let context = ();

    // "a b c": inner takes "a b", then C matches.
    let mut parser = Parser::new(&rules, "a b c", &context).unwrap();
    assert!(parser.parse(&grammar).is_ok());

    // "a b": the first start alternative consumes "a b" via inner and then
    // fails on C; the second retries from scratch, inner's greedy
    // alternative takes "a b" and fails on B, and inner's fallback takes
    // only "a" so the trailing B matches.
    let mut parser = Parser::new(&rules, "a b", &context).unwrap();
    assert!(parser.parse(&grammar).is_ok());
}

#[test]
fn test_recursive_production() {
    // chain = A chain | B: a right-recursive list "a a a b".
    let chain: Production<Abc, ()> = Production::named("chain")
        .alternative(vec![terminal(Abc::A), call("chain")])
        .alternative(vec![terminal(Abc::B)]);
    let grammar = Grammar::new("chain", vec![chain]).unwrap();

    let rules = table();
    let context = ();
    let mut parser = Parser::new(&rules, "a a a b", &context).unwrap();
    assert!(parser.parse(&grammar).is_ok());
    assert!(parser.peek().is_eof());
}

#[test]
fn test_spliced_group_behaves_like_inline_elements() {
    let group: Production<Abc, ()> = Production::named("group")
        .alternative(vec![terminal(Abc::A), terminal(Abc::B)]);

    let mut elements = splice(&group).unwrap();
    elements.push(terminal(Abc::C));
    let start: Production<Abc, ()> = Production::named("start").alternative(elements);
    let grammar = Grammar::new("start", vec![start]).unwrap();

    let rules = table();
    let context = ();
    let mut parser = Parser::new(&rules, "a b c", &context).unwrap();
    assert!(parser.parse(&grammar).is_ok());
}

#[test]
fn test_no_match_diagnostics_point_at_furthest_failure() {
    let start: Production<Abc, ()> = Production::named("start")
        .alternative(vec![terminal(Abc::A), terminal(Abc::B)])
        .alternative(vec![terminal(Abc::A), terminal(Abc::C)])
        .alternative(vec![terminal(Abc::B)]);
    let grammar = Grammar::new("start", vec![start]).unwrap();

    let rules = table();
    let context = ();
    let mut parser = Parser::new(&rules, "a a", &context).unwrap();

    match parser.parse(&grammar).unwrap_err() {
        ParseError::NoMatch { furthest, expected } => {
            // The deepest failures happen on the second token.
            assert_eq!(furthest, StreamPosition::new(1, 3));
            assert_eq!(expected, vec![Abc::B, Abc::C]);
        }
        ParseError::Lexical(error) => panic!("unexpected lexical error: {}", error),
    }
}

#[test]
fn test_matching_explicit_eof_terminal() {
    let start: Production<Abc, ()> = Production::named("start")
        .alternative(vec![terminal(Abc::A), terminal(Abc::Eof)]);
    let grammar = Grammar::new("start", vec![start]).unwrap();

    let rules = table();
    let context = ();

    let mut parser = Parser::new(&rules, "a", &context).unwrap();
    assert!(parser.parse(&grammar).is_ok());

    let mut parser = Parser::new(&rules, "a b", &context).unwrap();
    assert!(parser.parse(&grammar).is_err());
}
