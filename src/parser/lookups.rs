use std::collections::HashMap;

use crate::{ast::{expressions::Expr, statements::Stmt}, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, lowest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Or,
    And,
    Not,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Postfix,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.led(TokenKind::Or, BindingPower::Or, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::And, parse_binary_expr);

    // Relational, non-associative
    parser.led(TokenKind::Equals, BindingPower::Relational, parse_comparison_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_comparison_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_comparison_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_comparison_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_comparison_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    // Postfix
    parser.led(TokenKind::OpenParen, BindingPower::Postfix, parse_call_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Postfix, parse_index_expr);
    parser.led(TokenKind::Dot, BindingPower::Postfix, parse_field_expr);

    // Literals and symbols
    parser.nud(TokenKind::IntegerLiteral, parse_literal_expr);
    parser.nud(TokenKind::FloatLiteral, parse_literal_expr);
    parser.nud(TokenKind::CharLiteral, parse_literal_expr);
    parser.nud(TokenKind::True, parse_literal_expr);
    parser.nud(TokenKind::False, parse_literal_expr);
    parser.nud(TokenKind::Identifier, parse_symbol_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::Dash, parse_negation_expr);
    parser.nud(TokenKind::Not, parse_not_expr);

    // Statements
    parser.stmt(TokenKind::Int, parse_decl_stmt);
    parser.stmt(TokenKind::Float, parse_decl_stmt);
    parser.stmt(TokenKind::Char, parse_decl_stmt);
    parser.stmt(TokenKind::Bool, parse_decl_stmt);
    parser.stmt(TokenKind::Def, parse_func_def_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Type, parse_type_def_stmt);
    parser.stmt(TokenKind::Identifier, parse_identifier_stmt);
}

// Owned by the parser, filled once by `create_token_lookups`
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
