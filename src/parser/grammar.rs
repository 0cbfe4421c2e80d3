use log::debug;

use crate::lexer::tokens::TokenKind;

use super::{precedence::add_ltr_binary_operator, registry::RuleRegistry, rules::RuleKind};

/// Builds the grammar of the language: statements, the binary operator chain
/// (loosest level first), unary operators and primaries.
pub fn create_grammar() -> RuleRegistry {
    let mut registry = RuleRegistry::new();

    // Program
    registry.add_rule(RuleKind::Root, |rule| {
        rule.with_rule([RuleKind::Statement]).hoist().at_least_once()
    });

    // Statements
    registry.add_rule(RuleKind::Statement, |rule| {
        rule.with_rule([
            RuleKind::IfStatement,
            RuleKind::Assignment,
            RuleKind::Print,
            RuleKind::Expression,
        ])
        .once()
        .then_token([TokenKind::EndOfLine])
        .exclude()
        .once()
    });

    registry.add_rule(RuleKind::IfStatement, |rule| {
        rule.with_token([TokenKind::If])
            .exclude()
            .once()
            .then_rule([RuleKind::Expression])
            .once()
            .then_token([TokenKind::Then])
            .exclude()
            .once()
            .then_token([TokenKind::EndOfLine])
            .exclude()
            .once()
            .then_token([TokenKind::Indent])
            .exclude()
            .once()
            .then_rule([RuleKind::Statement])
            .at_least_once()
            .then_token([TokenKind::Dedent])
            .exclude()
            .once()
    });

    registry.add_rule(RuleKind::Assignment, |rule| {
        rule.with_token([TokenKind::Identifier])
            .once()
            .then_token([TokenKind::Assign])
            .exclude()
            .once()
            .then_rule([RuleKind::Expression])
            .once()
    });

    registry.add_rule(RuleKind::Print, |rule| {
        rule.with_token([TokenKind::Print])
            .exclude()
            .once()
            .then_rule([RuleKind::Expression])
            .once()
            .then_rule([RuleKind::SubsequentPrint])
            .hoist()
            .zero_or_more()
    });

    registry.add_rule(RuleKind::SubsequentPrint, |rule| {
        rule.with_token([TokenKind::Comma])
            .exclude()
            .once()
            .then_rule([RuleKind::Expression])
            .once()
    });

    // Expressions
    registry.add_rule(RuleKind::Expression, |rule| {
        rule.with_rule([RuleKind::LogicalOr]).once()
    });

    let levels = [
        (RuleKind::LogicalOr, RuleKind::SubsequentLogicalOr, TokenKind::Or),
        (RuleKind::LogicalAnd, RuleKind::SubsequentLogicalAnd, TokenKind::And),
        (RuleKind::BitwiseOr, RuleKind::SubsequentBitwiseOr, TokenKind::BitwiseOr),
        (RuleKind::BitwiseXor, RuleKind::SubsequentBitwiseXor, TokenKind::BitwiseXor),
        (RuleKind::BitwiseAnd, RuleKind::SubsequentBitwiseAnd, TokenKind::BitwiseAnd),
        (RuleKind::NotEqual, RuleKind::SubsequentNotEqual, TokenKind::NotEqual),
        (RuleKind::Equal, RuleKind::SubsequentEqual, TokenKind::Equal),
        (RuleKind::LessThan, RuleKind::SubsequentLessThan, TokenKind::LessThan),
        (RuleKind::LessThanEqual, RuleKind::SubsequentLessThanEqual, TokenKind::LessThanEqual),
        (RuleKind::GreaterThan, RuleKind::SubsequentGreaterThan, TokenKind::GreaterThan),
        (RuleKind::GreaterThanEqual, RuleKind::SubsequentGreaterThanEqual, TokenKind::GreaterThanEqual),
        (RuleKind::BitwiseLeftShift, RuleKind::SubsequentBitwiseLeftShift, TokenKind::BitwiseLeftShift),
        (RuleKind::BitwiseRightShift, RuleKind::SubsequentBitwiseRightShift, TokenKind::BitwiseRightShift),
        (RuleKind::Sum, RuleKind::SubsequentSum, TokenKind::Plus),
        (RuleKind::Subtract, RuleKind::SubsequentSubtract, TokenKind::Minus),
        (RuleKind::Multiply, RuleKind::SubsequentMultiply, TokenKind::Multiply),
        (RuleKind::Divide, RuleKind::SubsequentDivide, TokenKind::Divide),
        (RuleKind::Modulus, RuleKind::SubsequentModulus, TokenKind::Modulus),
        (RuleKind::Power, RuleKind::SubsequentPower, TokenKind::Power),
    ];

    for (index, (level, continuation, operator)) in levels.iter().enumerate() {
        let next = levels
            .get(index + 1)
            .map(|(next, _, _)| *next)
            .unwrap_or(RuleKind::Unary);

        add_ltr_binary_operator(&mut registry, *level, *continuation, next, *operator);
    }

    // Unary
    let prefixes = [
        (RuleKind::UnaryMinus, TokenKind::Minus),
        (RuleKind::UnaryPlus, TokenKind::Plus),
        (RuleKind::UnaryNot, TokenKind::Not),
        (RuleKind::UnaryBitwiseNot, TokenKind::BitwiseNot),
    ];

    for (tag, operator) in prefixes {
        registry.add_rule(tag, |rule| {
            rule.with_token([operator])
                .exclude()
                .once()
                .then_rule([RuleKind::Unary])
                .once()
        });
    }

    registry.add_rule(RuleKind::Unary, |rule| {
        rule.with_rule([
            RuleKind::UnaryMinus,
            RuleKind::UnaryPlus,
            RuleKind::UnaryBitwiseNot,
            RuleKind::UnaryNot,
        ])
        .once()
    });
    registry.add_rule(RuleKind::Unary, |rule| rule.with_rule([RuleKind::Primary]).once());

    // Primaries
    registry.add_rule(RuleKind::Floor, |rule| {
        rule.with_token([TokenKind::OpenBracket])
            .exclude()
            .once()
            .then_rule([RuleKind::Expression])
            .once()
            .then_token([TokenKind::CloseBracket])
            .exclude()
            .once()
    });

    registry.add_rule(RuleKind::Group, |rule| {
        rule.with_token([TokenKind::OpenParen])
            .exclude()
            .once()
            .then_rule([RuleKind::Expression])
            .once()
            .then_token([TokenKind::CloseParen])
            .exclude()
            .once()
    });

    registry.add_rule(RuleKind::Primary, |rule| rule.with_token([TokenKind::Number]).once());
    registry.add_rule(RuleKind::Primary, |rule| rule.with_token([TokenKind::String]).once());
    registry.add_rule(RuleKind::Primary, |rule| rule.with_token([TokenKind::Identifier]).once());
    registry.add_rule(RuleKind::Primary, |rule| rule.with_rule([RuleKind::Group]).hoist().once());
    registry.add_rule(RuleKind::Primary, |rule| rule.with_rule([RuleKind::Floor]).once());

    debug!("created grammar with {} rules", registry.len());
    registry
}
