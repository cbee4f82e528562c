//! Utility macros for the front end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for simple tokens
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// The four-argument form attaches a decoded literal payload.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Plus, "+".to_string(), span);
/// let token = MK_TOKEN!(TokenKind::IntegerLiteral, "42".to_string(), Some(Literal::Int(42)), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            literal: None,
            span: $span,
        }
    };
    ($kind:expr, $value:expr, $literal:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            literal: $literal,
            span: $span,
        }
    };
}

/// Creates a default lexer handler for simple single-token patterns.
///
/// Generates a handler function that creates a token with the given kind
/// on the current line and advances the lexer position by the token's length.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _matched: &str| -> Result<(), Error> {
            let span = lexer.span();
            lexer.push(MK_TOKEN!($kind, String::from($value), span));
            lexer.advance_n($value.len());
            Ok(())
        }
    };
}
