//! Type annotation parsing.
//!
//! Annotations are a base type keyword, optionally followed by a vector
//! length in brackets (`float[3]`), or the name of a record type.

use crate::{
    ast::types::{BaseType, TypeExpr},
    errors::errors::Error,
    lexer::tokens::{Literal, TokenKind},
};

use super::parser::Parser;

fn base_type(kind: TokenKind) -> Option<BaseType> {
    match kind {
        TokenKind::Int => Some(BaseType::Int),
        TokenKind::Float => Some(BaseType::Float),
        TokenKind::Char => Some(BaseType::Char),
        TokenKind::Bool => Some(BaseType::Bool),
        _ => None,
    }
}

pub fn parse_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    if parser.current_token_kind() == TokenKind::Identifier {
        return Ok(TypeExpr::Named(parser.advance().value.clone()));
    }

    let base = match base_type(parser.current_token_kind()) {
        Some(base) => base,
        None => return Err(parser.unexpected_detailed("expected a type")),
    };
    parser.advance();

    if parser.current_token_kind() != TokenKind::OpenBracket {
        return Ok(TypeExpr::Base(base));
    }

    parser.advance();
    let length = match parser.current_token().literal {
        Some(Literal::Int(length)) if parser.current_token_kind() == TokenKind::IntegerLiteral && length > 0 => length,
        _ => return Err(parser.unexpected_detailed("vector length must be a positive integer")),
    };
    parser.advance();
    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeExpr::Vector(base, length as usize))
}
