use crate::lexer::tokens::TokenKind;

use super::{registry::RuleRegistry, rules::RuleKind};

/// Registers one left-to-right binary operator level:
///
/// ```text
/// level        := next continuation*     (continuations hoisted)
/// continuation := operator next          (operator excluded)
/// ```
///
/// Hoisting the continuation keeps a chain such as `1 + 2 + 3` flat: the level
/// node holds every operand in order instead of nesting one node per operator.
pub fn add_ltr_binary_operator(
    registry: &mut RuleRegistry,
    level: RuleKind,
    continuation: RuleKind,
    next: RuleKind,
    operator: TokenKind,
) {
    registry.add_rule(level, |rule| {
        rule.with_rule([next])
            .once()
            .then_rule([continuation])
            .hoist()
            .zero_or_more()
    });

    registry.add_rule(continuation, |rule| {
        rule.with_token([operator])
            .exclude()
            .once()
            .then_rule([next])
            .once()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lexer::tokens::Token,
        parser::production::{Link, Quantifier, Target},
    };

    fn level_registry() -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        add_ltr_binary_operator(
            &mut registry,
            RuleKind::Multiply,
            RuleKind::SubsequentMultiply,
            RuleKind::Primary,
            TokenKind::Multiply,
        );
        registry.add_rule(RuleKind::Primary, |rule| rule.with_token([TokenKind::Number]).once());
        registry
    }

    #[test]
    fn test_generates_level_and_continuation() {
        let registry = level_registry();

        let level = &registry.lookup(RuleKind::Multiply)[0];
        assert_eq!(level.elements().len(), 2);
        assert_eq!(level.elements()[0].target, Target::Rules(vec![RuleKind::Primary]));
        assert_eq!(level.elements()[1].link, Link::Then);
        assert_eq!(level.elements()[1].quantifier, Quantifier::ZeroOrMore);
        assert!(level.elements()[1].hoisted);

        let continuation = &registry.lookup(RuleKind::SubsequentMultiply)[0];
        assert_eq!(
            continuation.elements()[0].target,
            Target::Tokens(vec![TokenKind::Multiply])
        );
        assert!(continuation.elements()[0].excluded);
        assert_eq!(continuation.elements()[1].quantifier, Quantifier::Once);

        assert!(registry.validate().is_ok());
    }

    #[test]
    fn test_chain_is_flat_without_operators() {
        let registry = level_registry();
        let tokens = vec![
            Token::new(TokenKind::Number, "2"),
            Token::new(TokenKind::Multiply, ""),
            Token::new(TokenKind::Number, "3"),
            Token::new(TokenKind::Multiply, ""),
            Token::new(TokenKind::Number, "4"),
        ];

        let evaluation = registry.lookup(RuleKind::Multiply)[0]
            .evaluate(&registry, &tokens)
            .unwrap();

        assert_eq!(evaluation.consumed, 5);
        assert_eq!(evaluation.node.len(), 3);
        assert_eq!(evaluation.node.count(RuleKind::Multiply), 1);
        assert!(evaluation
            .node
            .tokens()
            .all(|token| token.kind != TokenKind::Multiply));
    }
}
