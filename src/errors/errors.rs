use std::fmt::Display;

use thiserror::Error;

use crate::{parser::rules::RuleKind, Position};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Index into the token sequence for errors raised while matching tokens.
    pub fn get_token_index(&self) -> Option<usize> {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { index, .. }
            | ErrorImpl::UnderMatch { index, .. }
            | ErrorImpl::OverMatch { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Whether this error came from a committed alternative failing to match.
    /// Such failures only abort the parse once no other alternative matches.
    pub fn is_match_failure(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnderMatch { .. } | ErrorImpl::OverMatch { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::InconsistentIndentation { .. } => "InconsistentIndentation",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnderMatch { .. } => "UnderMatch",
            ErrorImpl::OverMatch { .. } => "OverMatch",
            ErrorImpl::UnknownRule { .. } => "UnknownRule",
            ErrorImpl::RecursionLimit { .. } => "RecursionLimit",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::InconsistentIndentation { width } => ErrorTip::Suggestion(format!(
                "Indentation of {} does not match any enclosing block",
                width
            )),
            ErrorImpl::UnexpectedToken { token, .. } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, is a statement left unfinished?",
                token
            )),
            ErrorImpl::UnderMatch {
                rule,
                element,
                found,
                ..
            } => ErrorTip::Suggestion(format!(
                "{} expected {}, found {}",
                rule, element, found
            )),
            ErrorImpl::OverMatch {
                rule,
                element,
                found,
                ..
            } => ErrorTip::Suggestion(format!(
                "{} allows {} at most once, found another {}",
                rule, element, found
            )),
            ErrorImpl::UnknownRule { rule } => {
                ErrorTip::Suggestion(format!("Rule `{}` has no registered production", rule))
            }
            ErrorImpl::RecursionLimit { rule, depth } => ErrorTip::Suggestion(format!(
                "Evaluating `{}` exceeded the nesting limit of {}",
                rule, depth
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("inconsistent indentation of width {width}")]
    InconsistentIndentation { width: usize },
    #[error("unexpected token {token:?} at index {index}")]
    UnexpectedToken { token: String, index: usize },
    #[error("rule {rule} matched less than once: {element} at index {index}, found {found}")]
    UnderMatch {
        rule: RuleKind,
        element: String,
        index: usize,
        found: String,
    },
    #[error("rule {rule} matched more than once: {element} at index {index}, found {found}")]
    OverMatch {
        rule: RuleKind,
        element: String,
        index: usize,
        found: String,
    },
    #[error("rule {rule} is not registered")]
    UnknownRule { rule: RuleKind },
    #[error("recursion limit of {depth} reached while evaluating {rule}")]
    RecursionLimit { rule: RuleKind, depth: usize },
}
