use std::rc::Rc;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_FIXED_HANDLER,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Tried in order, first match wins: longer operators come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\\n").unwrap(), handler: newline_handler },
        RegexPattern { regex: Regex::new("^[ \\t\\r]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\"(\\\\.|[^\"\\\\])*\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^//[^\\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Equal, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::NotEqual, "!=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Assign, "=") },
        RegexPattern { regex: Regex::new("^<<").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::BitwiseLeftShift, "<<") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::LessThanEqual, "<=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::LessThan, "<") },
        RegexPattern { regex: Regex::new("^>>").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::BitwiseRightShift, ">>") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::GreaterThanEqual, ">=") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::GreaterThan, ">") },
        RegexPattern { regex: Regex::new("^\\|\\|").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new("^&&").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new("^\\|").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::BitwiseOr, "|") },
        RegexPattern { regex: Regex::new("^\\^").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::BitwiseXor, "^") },
        RegexPattern { regex: Regex::new("^&").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::BitwiseAnd, "&") },
        RegexPattern { regex: Regex::new("^~").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::BitwiseNot, "~") },
        RegexPattern { regex: Regex::new("^\\*\\*").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Power, "**") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Minus, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Multiply, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Divide, "/") },
        RegexPattern { regex: Regex::new("^%").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Modulus, "%") },
    ];
}

/// Tokenizer state. Besides the token list it tracks the indentation widths of
/// the currently open blocks, bottom entry always 0.
pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
    indent_stack: Vec<usize>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
            indent_stack: vec![0],
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    fn span_at(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    /// Pushes a token covering the next `len` bytes and moves past them.
    fn emit(&mut self, kind: TokenKind, value: String, len: usize) {
        let span = self.span_at(len);
        self.push(Token { kind, value, span });
        self.advance_n(len);
    }

    fn push_marker(&mut self, kind: TokenKind) {
        self.emit(kind, String::new(), 0);
    }

    /// Terminates the current logical line. Blank lines never produce a
    /// second marker.
    fn end_line(&mut self) {
        match self.tokens.last() {
            Some(token) if token.kind != TokenKind::EndOfLine => {
                self.push_marker(TokenKind::EndOfLine)
            }
            _ => {}
        }
    }

    /// Consumes the leading whitespace of the line at `pos` and emits the block
    /// markers for its indentation. Blank and comment-only lines are ignored.
    fn measure_indentation(&mut self) -> Result<(), Error> {
        let width = self
            .remainder()
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .count();
        self.advance_n(width);

        let rest = self.remainder();
        if rest.is_empty() || rest.starts_with('\n') || rest.starts_with('\r') || rest.starts_with("//") {
            return Ok(());
        }

        let current = self.indent_stack.last().copied().unwrap_or(0);

        if width > current {
            if self.tokens.is_empty() {
                return Err(Error::new(
                    ErrorImpl::InconsistentIndentation { width },
                    self.position(),
                ));
            }

            self.indent_stack.push(width);
            self.push_marker(TokenKind::Indent);
            return Ok(());
        }

        while let Some(&top) = self.indent_stack.last() {
            if width >= top {
                break;
            }

            self.indent_stack.pop();
            self.close_block();
        }

        if self.indent_stack.last() != Some(&width) {
            return Err(Error::new(
                ErrorImpl::InconsistentIndentation { width },
                self.position(),
            ));
        }

        Ok(())
    }

    /// A closed block is followed by an end of line, so the statement that
    /// opened it is terminated like any other statement.
    fn close_block(&mut self) {
        self.push_marker(TokenKind::Dedent);
        self.push_marker(TokenKind::EndOfLine);
    }

    fn finish(&mut self) {
        self.end_line();

        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.close_block();
        }

        self.emit(TokenKind::EOF, String::from("EOF"), 0);
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);

    let len = matched.len();
    lexer.emit(TokenKind::Number, matched, len);
    Ok(())
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
    Ok(())
}

fn newline_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    lexer.end_line();
    lexer.advance_n(1);
    lexer.measure_indentation()
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    let string_literal = &matched[1..matched.len() - 1];

    let mut result = String::new();
    let mut chars = string_literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some('n') => {
                result.push('\n');
                chars.next();
            }
            Some('t') => {
                result.push('\t');
                chars.next();
            }
            Some('r') => {
                result.push('\r');
                chars.next();
            }
            Some('\\') => {
                result.push('\\');
                chars.next();
            }
            Some('"') => {
                result.push('"');
                chars.next();
            }
            Some('0') => {
                result.push('\0');
                chars.next();
            }
            Some('x') => {
                let mut hex = String::new();
                chars.next();

                for _ in 0..2 {
                    match chars.peek() {
                        Some(ch) if ch.is_ascii_hexdigit() => {
                            hex.push(*ch);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte as char),
                    Err(_) => {
                        result.push_str("\\x");
                        result.push_str(&hex);
                    }
                }
            }
            _ => result.push(ch), // Keep the backslash
        }
    }

    lexer.emit(TokenKind::String, result, matched.len());
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let value = lexer.matched(regex);
    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let len = value.len();
    lexer.emit(kind, value, len);
    Ok(())
}

/// Turns source text into the token stream the parser consumes.
///
/// Block structure is made explicit: every logical line ends with
/// `EndOfLine`, a deeper line opens a block with `Indent`, and each closed
/// block yields `Dedent` followed by `EndOfLine`. The stream always ends with
/// `EOF`.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    lex.measure_indentation()?;

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex)?,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken {
                        token: lex.at().map(String::from).unwrap_or_default(),
                    },
                    lex.position(),
                ))
            }
        }
    }

    lex.finish();
    debug!("tokenized {} into {} tokens", lex.file, lex.tokens.len());

    Ok(lex.tokens)
}
