//! Unit tests for the AST node model.

use super::node::{Child, Node};
use crate::{
    lexer::tokens::{Token, TokenKind},
    parser::rules::RuleKind,
};

fn number(value: &str) -> Token {
    Token::new(TokenKind::Number, value)
}

#[test]
fn test_new_node_is_empty() {
    let node = Node::new(RuleKind::Primary);

    assert!(node.is_empty());
    assert_eq!(node.len(), 0);
    assert_eq!(node.tag(), RuleKind::Primary);
}

#[test]
fn test_add_token_and_node_keep_order() {
    let mut inner = Node::new(RuleKind::Expression);
    inner.add_token(number("5"));

    let mut node = Node::new(RuleKind::Assignment);
    node.add_token(Token::new(TokenKind::Identifier, "x"));
    node.add_node(inner.clone());

    assert_eq!(node.len(), 2);
    assert!(matches!(&node.children()[0], Child::Token(token) if token.value == "x"));
    assert_eq!(node.children()[1], Child::Node(inner));
}

#[test]
fn test_add_children_splices() {
    let mut continuation = Node::new(RuleKind::SubsequentSum);
    continuation.add_token(number("2"));
    continuation.add_token(number("3"));

    let mut sum = Node::new(RuleKind::Sum);
    sum.add_token(number("1"));
    sum.add_children(continuation);

    assert_eq!(sum.len(), 3);
    assert_eq!(sum.nodes().count(), 0);
    assert_eq!(
        sum.tokens().map(|token| token.value.as_str()).collect::<Vec<_>>(),
        vec!["1", "2", "3"]
    );
}

#[test]
fn test_find_first_and_count() {
    let mut primary = Node::new(RuleKind::Primary);
    primary.add_token(number("1"));

    let mut unary = Node::new(RuleKind::Unary);
    unary.add_node(primary.clone());

    let mut root = Node::new(RuleKind::Root);
    root.add_node(unary.clone());
    root.add_node(primary);

    assert_eq!(root.find_first(RuleKind::Unary), Some(&unary));
    assert_eq!(root.find_first(RuleKind::Root), Some(&root));
    assert!(root.find_first(RuleKind::Floor).is_none());
    assert_eq!(root.count(RuleKind::Primary), 2);
}

#[test]
fn test_sexp_rendering() {
    let mut expression = Node::new(RuleKind::Expression);
    expression.add_token(number("5"));

    let mut assignment = Node::new(RuleKind::Assignment);
    assignment.add_token(Token::new(TokenKind::Identifier, "x"));
    assignment.add_node(expression);

    assert_eq!(
        assignment.sexp(),
        "(Assignment Identifier(x) (Expression Number(5)))"
    );
}

#[test]
fn test_display_indents_children() {
    let mut expression = Node::new(RuleKind::Expression);
    expression.add_token(Token::new(TokenKind::String, "hi"));

    let mut print = Node::new(RuleKind::Print);
    print.add_node(expression);

    assert_eq!(print.to_string(), "Print\n  Expression\n    String(hi)\n");
}
