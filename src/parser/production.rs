//! Production descriptions and the fluent builder used to declare them.
//!
//! A production is an immutable, ordered list of sequence elements. The builder
//! narrows the legal calls at each step through marker types, so a grammar that
//! opens an element without closing it with a quantifier, or that hoists a
//! token element, does not compile:
//!
//! ```ignore
//! Production::define(RuleKind::Assignment)
//!     .with_token([TokenKind::Identifier]).once()
//!     .then_token([TokenKind::Assign]).exclude().once()
//!     .then_rule([RuleKind::Expression]).once()
//!     .build();
//! ```

use std::{fmt::Display, marker::PhantomData};

use crate::lexer::tokens::TokenKind;

use super::rules::RuleKind;

/// How many times an element may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Once,
    AtMostOnce,
    AtLeastOnce,
    ZeroOrMore,
}

impl Quantifier {
    pub fn minimum(&self) -> usize {
        match self {
            Quantifier::Once | Quantifier::AtLeastOnce => 1,
            Quantifier::AtMostOnce | Quantifier::ZeroOrMore => 0,
        }
    }

    pub fn is_repeated(&self) -> bool {
        matches!(self, Quantifier::AtLeastOnce | Quantifier::ZeroOrMore)
    }
}

/// Position of an element inside its production: the opening element decides
/// whether the production applies at all, continuations run only after it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    With,
    Then,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Tokens(Vec<TokenKind>),
    Rules(Vec<RuleKind>),
}

/// One step of a production's right-hand side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub link: Link,
    pub target: Target,
    pub quantifier: Quantifier,
    /// Matched tokens are consumed but left out of the tree.
    pub excluded: bool,
    /// A matched subtree's children are spliced into the caller's tree.
    pub hoisted: bool,
}

impl Element {
    fn new(link: Link, target: Target) -> Self {
        Element {
            link,
            target,
            quantifier: Quantifier::Once,
            excluded: false,
            hoisted: false,
        }
    }

    /// Continuations are mandatory once the opening element matched.
    pub fn is_mandatory(&self) -> bool {
        self.link == Link::Then
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = match &self.target {
            Target::Tokens(kinds) => kinds.iter().map(|kind| format!("`{}`", kind)).collect(),
            Target::Rules(rules) => rules.iter().map(|rule| format!("`{}`", rule)).collect(),
        };

        if names.len() == 1 {
            write!(f, "{}", names[0])
        } else {
            write!(f, "one of {}", names.join(", "))
        }
    }
}

/// Production
///
/// An immutable rule definition: the tag it produces and its element sequence.
/// Several productions registered under one tag form ordered alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    tag: RuleKind,
    elements: Vec<Element>,
}

impl Production {
    pub fn define(tag: RuleKind) -> RuleBuilder {
        RuleBuilder { tag }
    }

    pub fn tag(&self) -> RuleKind {
        self.tag
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Every rule tag this production refers to, in element order.
    pub fn referenced_rules(&self) -> impl Iterator<Item = RuleKind> + '_ {
        self.elements
            .iter()
            .filter_map(|element| match &element.target {
                Target::Rules(rules) => Some(rules.iter().copied()),
                Target::Tokens(_) => None,
            })
            .flatten()
    }
}

/// Marker for an element that matches token kinds.
pub struct TokenStep;
/// Marker for an element that matches other rules.
pub struct RuleStep;

/// Entry point of a definition: only an opening element is allowed.
pub struct RuleBuilder {
    tag: RuleKind,
}

impl RuleBuilder {
    pub fn with_token(self, kinds: impl IntoIterator<Item = TokenKind>) -> ElementBuilder<TokenStep> {
        ElementBuilder::open(self.tag, vec![], Link::With, token_target(kinds))
    }

    pub fn with_rule(self, rules: impl IntoIterator<Item = RuleKind>) -> ElementBuilder<RuleStep> {
        ElementBuilder::open(self.tag, vec![], Link::With, rule_target(rules))
    }
}

/// An element waiting for its quantifier.
pub struct ElementBuilder<S> {
    tag: RuleKind,
    elements: Vec<Element>,
    pending: Element,
    _step: PhantomData<S>,
}

impl<S> ElementBuilder<S> {
    fn open(tag: RuleKind, elements: Vec<Element>, link: Link, target: Target) -> Self {
        ElementBuilder {
            tag,
            elements,
            pending: Element::new(link, target),
            _step: PhantomData,
        }
    }

    fn close(mut self, quantifier: Quantifier) -> Continuation {
        self.pending.quantifier = quantifier;
        self.elements.push(self.pending);

        Continuation {
            tag: self.tag,
            elements: self.elements,
        }
    }

    pub fn once(self) -> Continuation {
        self.close(Quantifier::Once)
    }

    pub fn at_most_once(self) -> Continuation {
        self.close(Quantifier::AtMostOnce)
    }

    pub fn at_least_once(self) -> Continuation {
        self.close(Quantifier::AtLeastOnce)
    }

    pub fn zero_or_more(self) -> Continuation {
        self.close(Quantifier::ZeroOrMore)
    }
}

impl ElementBuilder<TokenStep> {
    pub fn exclude(mut self) -> Self {
        self.pending.excluded = true;
        self
    }
}

impl ElementBuilder<RuleStep> {
    pub fn hoist(mut self) -> Self {
        self.pending.hoisted = true;
        self
    }
}

/// A definition with at least one closed element.
pub struct Continuation {
    tag: RuleKind,
    elements: Vec<Element>,
}

impl Continuation {
    pub fn then_token(self, kinds: impl IntoIterator<Item = TokenKind>) -> ElementBuilder<TokenStep> {
        ElementBuilder::open(self.tag, self.elements, Link::Then, token_target(kinds))
    }

    pub fn then_rule(self, rules: impl IntoIterator<Item = RuleKind>) -> ElementBuilder<RuleStep> {
        ElementBuilder::open(self.tag, self.elements, Link::Then, rule_target(rules))
    }

    pub fn build(self) -> Production {
        Production {
            tag: self.tag,
            elements: self.elements,
        }
    }
}

impl From<Continuation> for Production {
    fn from(continuation: Continuation) -> Self {
        continuation.build()
    }
}

fn token_target(kinds: impl IntoIterator<Item = TokenKind>) -> Target {
    let kinds: Vec<TokenKind> = kinds.into_iter().collect();
    debug_assert!(!kinds.is_empty(), "token element without token kinds");
    Target::Tokens(kinds)
}

fn rule_target(rules: impl IntoIterator<Item = RuleKind>) -> Target {
    let rules: Vec<RuleKind> = rules.into_iter().collect();
    debug_assert!(!rules.is_empty(), "rule element without rules");
    Target::Rules(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_records_elements_in_order() {
        let production = Production::define(RuleKind::IfStatement)
            .with_token([TokenKind::If])
            .exclude()
            .once()
            .then_rule([RuleKind::Expression])
            .once()
            .then_rule([RuleKind::Statement])
            .at_least_once()
            .build();

        assert_eq!(production.tag(), RuleKind::IfStatement);
        assert_eq!(production.elements().len(), 3);

        let first = &production.elements()[0];
        assert_eq!(first.link, Link::With);
        assert_eq!(first.target, Target::Tokens(vec![TokenKind::If]));
        assert!(first.excluded);
        assert!(!first.is_mandatory());

        let last = &production.elements()[2];
        assert_eq!(last.link, Link::Then);
        assert_eq!(last.quantifier, Quantifier::AtLeastOnce);
        assert!(last.is_mandatory());
    }

    #[test]
    fn test_hoist_only_marks_its_element() {
        let production: Production = Production::define(RuleKind::Print)
            .with_token([TokenKind::Print])
            .exclude()
            .once()
            .then_rule([RuleKind::Expression])
            .once()
            .then_rule([RuleKind::SubsequentPrint])
            .hoist()
            .zero_or_more()
            .into();

        let hoisted: Vec<bool> = production.elements().iter().map(|e| e.hoisted).collect();
        assert_eq!(hoisted, vec![false, false, true]);
    }

    #[test]
    fn test_referenced_rules() {
        let production = Production::define(RuleKind::Statement)
            .with_rule([RuleKind::IfStatement, RuleKind::Assignment])
            .once()
            .then_token([TokenKind::EndOfLine])
            .exclude()
            .once()
            .then_rule([RuleKind::Print])
            .zero_or_more()
            .build();

        assert_eq!(
            production.referenced_rules().collect::<Vec<_>>(),
            vec![RuleKind::IfStatement, RuleKind::Assignment, RuleKind::Print]
        );
    }

    #[test]
    fn test_element_display() {
        let single = Element::new(Link::Then, Target::Tokens(vec![TokenKind::Dedent]));
        let many = Element::new(
            Link::With,
            Target::Rules(vec![RuleKind::UnaryMinus, RuleKind::UnaryPlus]),
        );

        assert_eq!(single.to_string(), "`Dedent`");
        assert_eq!(many.to_string(), "one of `UnaryMinus`, `UnaryPlus`");
    }

    #[test]
    fn test_quantifier_bounds() {
        assert_eq!(Quantifier::Once.minimum(), 1);
        assert_eq!(Quantifier::AtLeastOnce.minimum(), 1);
        assert_eq!(Quantifier::AtMostOnce.minimum(), 0);
        assert!(Quantifier::ZeroOrMore.is_repeated());
        assert!(!Quantifier::AtMostOnce.is_repeated());
    }
}
