//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip, Phase};
use crate::Position;
use rstest::rstest;
use std::rc::Rc;

fn at_line(line: u32) -> Position {
    Position(line, Rc::new("test.vip".to_string()))
}

#[rstest]
#[case(ErrorImpl::UnrecognisedToken { token: "@".to_string() }, "UnrecognisedToken", Phase::Lexical)]
#[case(ErrorImpl::NumberParseError { token: "99999999999999999999".to_string() }, "NumberParseError", Phase::Lexical)]
#[case(ErrorImpl::UnexpectedToken { token: "}".to_string() }, "UnexpectedToken", Phase::Syntax)]
#[case(ErrorImpl::UnexpectedTokenDetailed { token: "<".to_string(), message: "comparisons cannot be chained".to_string() }, "UnexpectedTokenDetailed", Phase::Syntax)]
#[case(ErrorImpl::DuplicateDeclaration { name: "x".to_string() }, "DuplicateDeclaration", Phase::Semantic)]
#[case(ErrorImpl::UndeclaredName { name: "foo".to_string() }, "UndeclaredName", Phase::Semantic)]
#[case(ErrorImpl::TypeError { expected: "int".to_string(), received: "float".to_string() }, "TypeError", Phase::Semantic)]
#[case(ErrorImpl::ArityMismatch { function: "add".to_string(), expected: 2, received: 3 }, "ArityMismatch", Phase::Semantic)]
#[case(ErrorImpl::ParamTypeMismatch { function: "add".to_string(), position: 2, expected: "float".to_string(), received: "int".to_string() }, "ParamTypeMismatch", Phase::Semantic)]
#[case(ErrorImpl::InvalidAssignmentTarget { target: "a function call".to_string() }, "InvalidAssignmentTarget", Phase::Semantic)]
#[case(ErrorImpl::UnknownRecordType { name: "Persona".to_string() }, "UnknownRecordType", Phase::Semantic)]
#[case(ErrorImpl::ReturnOutsideFunction, "ReturnOutsideFunction", Phase::Semantic)]
fn test_error_name_and_phase(#[case] error: ErrorImpl, #[case] name: &str, #[case] phase: Phase) {
    let error = Error::new(error, at_line(1));

    assert_eq!(error.get_error_name(), name);
    assert_eq!(error.phase(), phase);
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        at_line(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_line(), 42);
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at_line(1),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::ParamTypeMismatch {
            function: "scale".to_string(),
            position: 2,
            expected: "float".to_string(),
            received: "int".to_string(),
        },
        at_line(3),
    );

    assert_eq!(
        error.get_tip().to_string(),
        "Argument 2 of `scale` expects type `float`, received `int`"
    );
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_display_carries_phase_and_line() {
    let error = Error::new(
        ErrorImpl::UndeclaredName {
            name: "total".to_string(),
        },
        at_line(7),
    );

    assert_eq!(
        error.to_string(),
        "[semantic error] test.vip:7: \"total\" not declared"
    );
}
