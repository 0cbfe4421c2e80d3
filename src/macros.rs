//! Helper macros for the tokenizer's pattern table.

/// Handler for a pattern whose lexeme is always the same text: pushes one
/// `$kind` token spanning `$value` and moves the lexer past it. Expands to a
/// non-capturing closure, so it coerces to `RegexHandler`.
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^<<").unwrap(),
///     handler: MK_FIXED_HANDLER!(TokenKind::BitwiseLeftShift, "<<"),
/// }
/// ```
#[macro_export]
macro_rules! MK_FIXED_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            lexer.emit($kind, String::from($value), $value.len());
            Ok(())
        }
    };
}
