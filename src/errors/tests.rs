//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::parser::rules::RuleKind;
use crate::Position;
use std::rc::Rc;

fn under_match() -> Error {
    Error::new(
        ErrorImpl::UnderMatch {
            rule: RuleKind::IfStatement,
            element: String::from("`Dedent`"),
            index: 7,
            found: String::from("end of input"),
        },
        Position(42, Rc::new("test.lang".to_string())),
    )
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.lang".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let error = under_match();

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.lang");
}

#[test]
fn test_under_match_error() {
    let error = under_match();

    assert_eq!(error.get_error_name(), "UnderMatch");
    assert_eq!(error.get_token_index(), Some(7));
    assert!(error.is_match_failure());
}

#[test]
fn test_over_match_error() {
    let error = Error::new(
        ErrorImpl::OverMatch {
            rule: RuleKind::Print,
            element: String::from("`Comma`"),
            index: 3,
            found: String::from("`,`"),
        },
        Position(0, Rc::new("test.lang".to_string())),
    );

    assert_eq!(error.get_error_name(), "OverMatch");
    assert_eq!(error.get_token_index(), Some(3));
    assert!(error.is_match_failure());
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: ")".to_string(),
            index: 4,
        },
        Position(0, Rc::new("test.lang".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_token_index(), Some(4));
    assert!(!error.is_match_failure());
}

#[test]
fn test_configuration_errors_are_not_match_failures() {
    let unknown = Error::new(
        ErrorImpl::UnknownRule {
            rule: RuleKind::Floor,
        },
        Position::null(),
    );
    let limit = Error::new(
        ErrorImpl::RecursionLimit {
            rule: RuleKind::Group,
            depth: 64,
        },
        Position::null(),
    );

    assert_eq!(unknown.get_error_name(), "UnknownRule");
    assert_eq!(limit.get_error_name(), "RecursionLimit");
    assert!(!unknown.is_match_failure());
    assert!(!limit.is_match_failure());
    assert_eq!(unknown.get_token_index(), None);
}

#[test]
fn test_inconsistent_indentation_error() {
    let error = Error::new(
        ErrorImpl::InconsistentIndentation { width: 3 },
        Position(0, Rc::new("test.lang".to_string())),
    );

    assert_eq!(error.get_error_name(), "InconsistentIndentation");
    assert_eq!(
        error.get_tip().to_string(),
        "Indentation of 3 does not match any enclosing block"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(0, Rc::new("test.lang".to_string())),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_names_rule_and_element() {
    match under_match().get_tip() {
        ErrorTip::Suggestion(tip) => {
            assert_eq!(tip, "IfStatement expected `Dedent`, found end of input")
        }
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_display_uses_internal_message() {
    assert_eq!(
        under_match().to_string(),
        "rule IfStatement matched less than once: `Dedent` at index 7, found end of input"
    );
}
