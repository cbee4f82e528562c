use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The pipeline stage that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexical,
    Syntax,
    Semantic,
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Lexical => write!(f, "lexical"),
            Phase::Syntax => write!(f, "syntax"),
            Phase::Semantic => write!(f, "semantic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
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

    pub fn get_line(&self) -> u32 {
        self.position.line()
    }

    pub fn get_internal(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn phase(&self) -> Phase {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } | ErrorImpl::NumberParseError { .. } => {
                Phase::Lexical
            }
            ErrorImpl::UnexpectedToken { .. } | ErrorImpl::UnexpectedTokenDetailed { .. } => {
                Phase::Syntax
            }
            _ => Phase::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UndeclaredName { .. } => "UndeclaredName",
            ErrorImpl::TypeError { .. } => "TypeError",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::ParamTypeMismatch { .. } => "ParamTypeMismatch",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::UnknownRecordType { .. } => "UnknownRecordType",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::DuplicateDeclaration { name } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", name))
            }
            ErrorImpl::UndeclaredName { name } => {
                ErrorTip::Suggestion(format!("`{}` has not been declared", name))
            }
            ErrorImpl::TypeError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ArityMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::ParamTypeMismatch {
                function,
                position,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Argument {} of `{}` expects type `{}`, received `{}`",
                position, function, expected, received
            )),
            ErrorImpl::InvalidAssignmentTarget { target } => {
                ErrorTip::Suggestion(format!("Cannot assign to {}", target))
            }
            ErrorImpl::UnknownRecordType { name } => {
                ErrorTip::Suggestion(format!("Unknown record type `{}`", name))
            }
            ErrorImpl::ReturnOutsideFunction => ErrorTip::Suggestion(String::from(
                "`return` is only allowed inside a function body",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} error] {}:{}: {}",
            self.phase(),
            self.position.1,
            self.position.0,
            self.internal_error
        )
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
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("{name:?} already declared")]
    DuplicateDeclaration { name: String },
    #[error("{name:?} not declared")]
    UndeclaredName { name: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeError { expected: String, received: String },
    #[error("{function:?} expects {expected} arguments, received {received}")]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("argument {position} of {function:?} has the wrong type: expected {expected}, received {received}")]
    ParamTypeMismatch {
        function: String,
        position: usize,
        expected: String,
        received: String,
    },
    #[error("cannot assign to {target}")]
    InvalidAssignmentTarget { target: String },
    #[error("unknown record type {name:?}")]
    UnknownRecordType { name: String },
    #[error("return outside of a function body")]
    ReturnOutsideFunction,
}
