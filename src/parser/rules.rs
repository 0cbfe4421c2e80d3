use std::fmt::Display;

/// Nonterminal tags of the grammar. Every production and every node carries one.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    Root,

    // Statements
    Statement,
    IfStatement,
    Assignment,
    Print,
    SubsequentPrint,

    // Binary operator levels, loosest first
    Expression,
    LogicalOr,
    SubsequentLogicalOr,
    LogicalAnd,
    SubsequentLogicalAnd,
    BitwiseOr,
    SubsequentBitwiseOr,
    BitwiseXor,
    SubsequentBitwiseXor,
    BitwiseAnd,
    SubsequentBitwiseAnd,
    NotEqual,
    SubsequentNotEqual,
    Equal,
    SubsequentEqual,
    LessThan,
    SubsequentLessThan,
    LessThanEqual,
    SubsequentLessThanEqual,
    GreaterThan,
    SubsequentGreaterThan,
    GreaterThanEqual,
    SubsequentGreaterThanEqual,
    BitwiseLeftShift,
    SubsequentBitwiseLeftShift,
    BitwiseRightShift,
    SubsequentBitwiseRightShift,
    Sum,
    SubsequentSum,
    Subtract,
    SubsequentSubtract,
    Multiply,
    SubsequentMultiply,
    Divide,
    SubsequentDivide,
    Modulus,
    SubsequentModulus,
    Power,
    SubsequentPower,

    // Unary operators
    Unary,
    UnaryMinus,
    UnaryPlus,
    UnaryNot,
    UnaryBitwiseNot,

    // Primaries
    Floor,
    Group,
    Primary,
}

impl Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
