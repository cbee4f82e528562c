//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, rc::Rc};

use log::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and the lookup tables for parsing
/// statements and expressions. The token vector always ends with `EOF`,
/// and the parser never moves past it.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// A missing trailing `EOF` token is supplied, so every lookup of the
    /// current token stays in bounds.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let position = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(1, Rc::clone(&file)));
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                literal: None,
                span: Span {
                    start: position.clone(),
                    end: position,
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the kind of the token after the current one.
    pub fn peek_kind(&self) -> TokenKind {
        let index = (self.pos + 1).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        if self.tokens[index].kind != TokenKind::EOF {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.unexpected()),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Consumes the current token when it has the given kind.
    pub fn skip(&mut self, kind: TokenKind) -> bool {
        if self.current_token_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// An `UnexpectedToken` error for the current token.
    pub fn unexpected(&self) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )
    }

    /// An `UnexpectedTokenDetailed` error for the current token.
    pub fn unexpected_detailed(&self, message: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from(message),
            },
            token.span.start.clone(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix tokens get no binding power of their own: a token that only
    /// starts an expression must end the previous one.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the current position in the source file.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses all statements until EOF.
/// Parsing stops at the first syntax error; no partial tree is returned.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with state after parsing)
/// - Result containing either the Program or the syntax Error
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> (Parser, Result<Program, Error>) {
    let mut parser = Parser::new(tokens, Rc::clone(&file));
    create_token_lookups(&mut parser);

    let mut body = vec![];

    while parser.has_tokens() {
        match parse_stmt(&mut parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => {
                debug!("syntax error after {} statements: {}", body.len(), error);
                return (parser, Err(error));
            }
        }
    }

    debug!("parsed {} top-level statements from {}", body.len(), file);

    let program = Ok(Program {
        body,
        span: Span {
            start: Position(1, Rc::clone(&parser.file)),
            end: parser.get_position(),
        },
    });

    (parser, program)
}
