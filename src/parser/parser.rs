//! Parser driver: runs the `Root` productions of a grammar over a token stream
//! and collects the resulting syntax tree.

use log::debug;

use crate::{
    ast::node::Node,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    engine::{Context, ParseOptions},
    registry::RuleRegistry,
    rules::RuleKind,
};

/// The parser state for one token stream.
pub struct Parser<'r> {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Index of the first token not yet consumed by a root production
    pos: usize,
    registry: &'r RuleRegistry,
    options: ParseOptions,
    ast: Node,
}

impl<'r> Parser<'r> {
    pub fn new(tokens: Vec<Token>, registry: &'r RuleRegistry) -> Self {
        Parser {
            tokens,
            pos: 0,
            registry,
            options: ParseOptions::default(),
            ast: Node::new(RuleKind::Root),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Evaluates every `Root` alternative in registration order, each starting
    /// where the previous one stopped. The first non-empty result becomes the
    /// tree; later ones are added to it as children.
    ///
    /// Any token other than `EOF` left over afterwards is an `UnexpectedToken`
    /// error.
    pub fn parse(&mut self) -> Result<(), Error> {
        let context = Context::new(self.registry, &self.tokens, self.options);

        for production in self.registry.lookup(RuleKind::Root) {
            let evaluation = context.evaluate(production, self.pos)?;

            if !evaluation.is_match() {
                continue;
            }

            if self.ast.is_empty() {
                self.ast = evaluation.node;
            } else {
                self.ast.add_node(evaluation.node);
            }

            self.pos += evaluation.consumed;
        }

        if let Some(token) = self.tokens.get(self.pos) {
            if token.kind != TokenKind::EOF {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.to_string(),
                        index: self.pos,
                    },
                    token.span.start.clone(),
                ));
            }
        }

        debug!("parsed {} of {} tokens", self.pos, self.tokens.len());
        Ok(())
    }

    /// The tree built so far; an empty `Root` node before a successful parse.
    pub fn get_tree(&self) -> &Node {
        &self.ast
    }

    pub fn into_tree(self) -> Node {
        self.ast
    }

    pub fn get_position(&self) -> usize {
        self.pos
    }
}

/// Parses a stream of tokens with `registry` and returns the syntax tree.
pub fn parse(tokens: Vec<Token>, registry: &RuleRegistry) -> Result<Node, Error> {
    let mut parser = Parser::new(tokens, registry);
    parser.parse()?;

    Ok(parser.into_tree())
}
