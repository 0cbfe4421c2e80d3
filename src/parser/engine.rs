//! The rule engine: evaluates immutable productions against a token slice.
//!
//! All mutable matching state lives in a [`Frame`], created fresh for every
//! production evaluation. The registry and the tokens are shared read-only
//! through a [`Context`], which is what makes recursive and self-referential
//! grammars safe without cloning rule definitions.
//!
//! Matching rules:
//!
//! - The opening element decides whether a production applies. When it matches
//!   nothing the continuations are skipped and the production yields an empty
//!   node.
//! - Once the opening element matched, the production is committed and every
//!   continuation must reach its quantifier's minimum (`UnderMatch`); an
//!   `at_most_once` continuation that could match a second time is an
//!   `OverMatch`.
//! - A rule element tries the alternatives of its tags in order at the same
//!   start position; the first non-empty node wins. A committed alternative that
//!   fails does not prevent later alternatives from being tried, but if none of
//!   them matches, the failure that got furthest is raised.
//! - A parse that fails reports the furthest failure seen during the whole
//!   evaluation, even one discarded by a choice that later succeeded with a
//!   shorter match.

use std::cell::{Cell, RefCell};

use log::trace;

use crate::{
    ast::node::Node,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    production::{Element, Link, Production, Quantifier, Target},
    registry::RuleRegistry,
    rules::RuleKind,
};

/// One level of parentheses in the expression grammar nests about 23
/// evaluations, and each evaluation keeps several frames on the native stack.
/// 200 stays inside a 2 MiB thread stack in unoptimised builds.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Settings for one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested production evaluations.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of evaluating one production: the tree built (empty when the
/// production did not match) and the number of tokens it consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub node: Node,
    pub consumed: usize,
}

impl Evaluation {
    pub fn is_match(&self) -> bool {
        !self.node.is_empty()
    }
}

impl Production {
    /// Evaluates this production from the first token of `tokens`.
    pub fn evaluate(&self, registry: &RuleRegistry, tokens: &[Token]) -> Result<Evaluation, Error> {
        Context::new(registry, tokens, ParseOptions::default()).evaluate(self, 0)
    }
}

/// State shared by every evaluation of one parse.
pub struct Context<'a> {
    registry: &'a RuleRegistry,
    tokens: &'a [Token],
    options: ParseOptions,
    furthest: RefCell<Option<Error>>,
    /// Set while looking ahead for a second `at_most_once` match.
    speculative: Cell<bool>,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a RuleRegistry, tokens: &'a [Token], options: ParseOptions) -> Self {
        Context {
            registry,
            tokens,
            options,
            furthest: RefCell::new(None),
            speculative: Cell::new(false),
        }
    }

    /// Evaluates `production` starting at token index `start`.
    pub fn evaluate(&self, production: &Production, start: usize) -> Result<Evaluation, Error> {
        self.evaluate_at(production, start, 0)
            .map_err(|error| self.furthest_failure(error))
    }

    /// Ordered choice over every alternative of `tags` at token index `start`.
    pub fn choose(&self, tags: &[RuleKind], start: usize) -> Result<Option<Evaluation>, Error> {
        self.choose_at(tags, start, 0)
            .map_err(|error| self.furthest_failure(error))
    }

    /// Swaps a match failure for the furthest one recorded, if that got
    /// strictly further.
    fn furthest_failure(&self, error: Error) -> Error {
        if !error.is_match_failure() {
            return error;
        }

        match self.furthest.borrow().as_ref() {
            Some(recorded) if recorded.get_token_index() > error.get_token_index() => {
                recorded.clone()
            }
            _ => error,
        }
    }

    fn record_failure(&self, error: &Error) {
        if self.speculative.get() {
            return;
        }

        let mut furthest = self.furthest.borrow_mut();
        let further = furthest
            .as_ref()
            .map_or(true, |recorded| error.get_token_index() > recorded.get_token_index());

        if further {
            *furthest = Some(error.clone());
        }
    }

    fn evaluate_at(
        &self,
        production: &Production,
        start: usize,
        depth: usize,
    ) -> Result<Evaluation, Error> {
        if depth > self.options.max_depth {
            return Err(Error::new(
                ErrorImpl::RecursionLimit {
                    rule: production.tag(),
                    depth: self.options.max_depth,
                },
                self.position_of(start),
            ));
        }

        trace!("{:indent$}{} at {}", "", production.tag(), start, indent = depth);

        let mut frame = Frame {
            context: self,
            tag: production.tag(),
            cursor: start,
            tree: Node::new(production.tag()),
            committed: false,
            depth,
        };

        for element in production.elements() {
            if element.link == Link::Then && !frame.committed {
                continue;
            }

            frame.apply(element)?;
        }

        if !frame.committed || frame.tree.is_empty() {
            return Ok(Evaluation {
                node: Node::new(production.tag()),
                consumed: 0,
            });
        }

        trace!(
            "{:indent$}{} matched {} tokens",
            "",
            production.tag(),
            frame.cursor - start,
            indent = depth
        );

        Ok(Evaluation {
            node: frame.tree,
            consumed: frame.cursor - start,
        })
    }

    fn choose_at(
        &self,
        tags: &[RuleKind],
        start: usize,
        depth: usize,
    ) -> Result<Option<Evaluation>, Error> {
        let mut failure: Option<Error> = None;

        for production in self.registry.alternatives_of(tags)? {
            match self.evaluate_at(production, start, depth) {
                Ok(evaluation) if evaluation.is_match() => return Ok(Some(evaluation)),
                Ok(_) => {}
                Err(error) if error.is_match_failure() => {
                    self.record_failure(&error);
                    let further = failure
                        .as_ref()
                        .map_or(true, |kept| error.get_token_index() > kept.get_token_index());
                    if further {
                        failure = Some(error);
                    }
                }
                Err(error) => return Err(error),
            }
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(None),
        }
    }

    /// Source position of the token at `index`; past the end, the end of the
    /// last token.
    pub fn position_of(&self, index: usize) -> Position {
        match self.tokens.get(index) {
            Some(token) => token.span.start.clone(),
            None => self
                .tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(Position::null),
        }
    }

    pub fn describe(&self, index: usize) -> String {
        match self.tokens.get(index) {
            Some(token) if token.kind != TokenKind::EOF => format!("`{}`", token),
            _ => String::from("end of input"),
        }
    }
}

/// Matching state of one production evaluation.
struct Frame<'c, 'a> {
    context: &'c Context<'a>,
    tag: RuleKind,
    cursor: usize,
    tree: Node,
    /// The opening element matched; continuations are now mandatory.
    committed: bool,
    depth: usize,
}

impl Frame<'_, '_> {
    fn apply(&mut self, element: &Element) -> Result<(), Error> {
        let mut count = 0;

        if element.quantifier.is_repeated() {
            while self.match_one(element)? {
                count += 1;
            }
        } else if self.match_one(element)? {
            count = 1;
        }

        if element.is_mandatory() {
            if count < element.quantifier.minimum() {
                return Err(self.failure(element, false));
            }

            if element.quantifier == Quantifier::AtMostOnce && count == 1 && self.can_match_again(element) {
                return Err(self.failure(element, true));
            }
        }

        if element.link == Link::With && count > 0 {
            self.committed = true;
        }

        Ok(())
    }

    fn match_one(&mut self, element: &Element) -> Result<bool, Error> {
        match &element.target {
            Target::Tokens(kinds) => match self.context.tokens.get(self.cursor) {
                Some(token) if kinds.contains(&token.kind) => {
                    if !element.excluded {
                        self.tree.add_token(token.clone());
                    }
                    self.cursor += 1;
                    Ok(true)
                }
                _ => Ok(false),
            },
            Target::Rules(tags) => {
                match self.context.choose_at(tags, self.cursor, self.depth + 1)? {
                    Some(evaluation) => {
                        self.cursor += evaluation.consumed;
                        self.attach(evaluation.node, element.hoisted);
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
        }
    }

    /// Look-ahead used by `at_most_once`: nothing is consumed or attached, and
    /// a failure while looking ahead simply means there is no second
    /// occurrence. Such failures are not recorded for error reporting.
    fn can_match_again(&self, element: &Element) -> bool {
        match &element.target {
            Target::Tokens(kinds) => self
                .context
                .tokens
                .get(self.cursor)
                .is_some_and(|token| kinds.contains(&token.kind)),
            Target::Rules(tags) => {
                let outer = self.context.speculative.replace(true);
                let found = matches!(
                    self.context.choose_at(tags, self.cursor, self.depth + 1),
                    Ok(Some(_))
                );
                self.context.speculative.set(outer);
                found
            }
        }
    }

    /// Hoisted results and results of this very rule are spliced; everything
    /// else is nested as a single child.
    fn attach(&mut self, node: Node, hoisted: bool) {
        if hoisted || node.tag() == self.tag {
            self.tree.add_children(node);
        } else {
            self.tree.add_node(node);
        }
    }

    fn failure(&self, element: &Element, over: bool) -> Error {
        let rule = self.tag;
        let element_name = element.to_string();
        let index = self.cursor;
        let found = self.context.describe(index);

        let error = if over {
            ErrorImpl::OverMatch {
                rule,
                element: element_name,
                index,
                found,
            }
        } else {
            ErrorImpl::UnderMatch {
                rule,
                element: element_name,
                index,
                found,
            }
        };

        Error::new(error, self.context.position_of(index))
    }
}
