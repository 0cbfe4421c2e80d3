use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("print", TokenKind::Print);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("not", TokenKind::Not);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    // Block structure
    EndOfLine,
    Indent,
    Dedent,

    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    Comma,

    Assign, // =

    Or,  // || or
    And, // && and
    Not, // ! not

    BitwiseOr,         // |
    BitwiseXor,        // ^
    BitwiseAnd,        // &
    BitwiseNot,        // ~
    BitwiseLeftShift,  // <<
    BitwiseRightShift, // >>

    Equal,    // ==
    NotEqual, // !=
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,

    Plus,
    Minus,
    Multiply,
    Divide,
    Modulus,
    Power, // **

    // Reserved
    If,
    Then,
    Print,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_lexeme() {
            write!(f, "{}({})", self.kind, self.value)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl Token {
    /// Builds a token without source information, for hand-written token streams.
    pub fn new(kind: TokenKind, value: &str) -> Self {
        Token {
            kind,
            value: String::from(value),
            span: Span::null(),
        }
    }

    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// Literals and identifiers carry a meaningful lexeme; every other kind is
    /// fully described by its kind.
    pub fn has_lexeme(&self) -> bool {
        self.is_one_of_many(&[TokenKind::String, TokenKind::Identifier, TokenKind::Number])
    }
}
