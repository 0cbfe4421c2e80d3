//! Lexical analysis module.
//!
//! This module contains the tokenizer that converts source code into the
//! token stream the rule engine consumes. It handles:
//!
//! - Tokenization of source code using an ordered table of regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Block structure through end-of-line, indent and dedent markers
//! - Token position tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
