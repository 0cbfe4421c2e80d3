use std::fmt::{Display, Write};

use crate::{lexer::tokens::Token, parser::rules::RuleKind};

/// One entry of a node's child list: a leaf token or a nested subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Token(Token),
    Node(Node),
}

/// Node
///
/// The uniform tree unit produced by rule evaluation. A node is tagged with the
/// rule that produced it; its children are kept in match order. A node without
/// children stands for a failed match and is never attached to a parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    tag: RuleKind,
    children: Vec<Child>,
}

impl Node {
    pub fn new(tag: RuleKind) -> Self {
        Node {
            tag,
            children: vec![],
        }
    }

    pub fn tag(&self) -> RuleKind {
        self.tag
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn add_token(&mut self, token: Token) {
        self.children.push(Child::Token(token));
    }

    pub fn add_node(&mut self, node: Node) {
        self.children.push(Child::Node(node));
    }

    /// Splices the children of `node` into this node, dropping `node` itself.
    pub fn add_children(&mut self, node: Node) {
        self.children.extend(node.children);
    }

    /// Direct child subtrees, in order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(|child| match child {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        })
    }

    /// Direct child tokens, in order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(|child| match child {
            Child::Token(token) => Some(token),
            Child::Node(_) => None,
        })
    }

    /// Depth-first, pre-order search for the first node tagged `tag`,
    /// including this node.
    pub fn find_first(&self, tag: RuleKind) -> Option<&Node> {
        if self.tag == tag {
            return Some(self);
        }

        self.nodes().find_map(|node| node.find_first(tag))
    }

    /// Counts the nodes tagged `tag` in this subtree.
    pub fn count(&self, tag: RuleKind) -> usize {
        let own = usize::from(self.tag == tag);
        own + self.nodes().map(|node| node.count(tag)).sum::<usize>()
    }

    /// Compact single-line rendering, e.g. `(Assignment Identifier(x) (Expression ...))`.
    /// Spans are left out, so equal shapes render equally.
    pub fn sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        let _ = write!(out, "({}", self.tag);
        for child in &self.children {
            out.push(' ');
            match child {
                Child::Token(token) => {
                    let _ = write!(out, "{}", token);
                }
                Child::Node(node) => node.write_sexp(out),
            }
        }
        out.push(')');
    }

    fn write_tree(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        writeln!(f, "{:indent$}{}", "", self.tag, indent = depth * 2)?;
        for child in &self.children {
            match child {
                Child::Token(token) => {
                    writeln!(f, "{:indent$}{}", "", token, indent = (depth + 1) * 2)?
                }
                Child::Node(node) => node.write_tree(f, depth + 1)?,
            }
        }
        Ok(())
    }
}

/// Indented, one entry per line.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_tree(f, 0)
    }
}
