use crate::{ast::expressions::{BinaryOperator, Expr, ExprKind, UnaryOperator}, errors::errors::Error, lexer::tokens::TokenKind, Span};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    // While the current token binds tighter than the caller, keep extending lhs
    loop {
        let current_bp = match parser.get_bp_lookup().get(&parser.current_token_kind()) {
            Some(current_bp) if *current_bp > bp => *current_bp,
            _ => break,
        };

        let led = match parser.get_led_lookup().get(&parser.current_token_kind()) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };

        left = led(parser, left, current_bp)?;
    }

    Ok(left)
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Dash => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Equals => Some(BinaryOperator::Equals),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEquals => Some(BinaryOperator::LessEquals),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEquals => Some(BinaryOperator::GreaterEquals),
        TokenKind::And => Some(BinaryOperator::And),
        TokenKind::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let literal = match parser.current_token().literal {
        Some(literal) => literal,
        None => return Err(parser.unexpected()),
    };

    let span = parser.advance().span.clone();
    Ok(Expr::new(ExprKind::Const(literal), span))
}

pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(Expr::new(ExprKind::Var(token.value), token.span))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator = match binary_operator(parser.current_token_kind()) {
        Some(operator) => operator,
        None => return Err(parser.unexpected()),
    };
    parser.advance();

    let right = parse_expr(parser, bp)?;

    let span = Span {
        start: left.span.start.clone(),
        end: right.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::BinOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

/// Comparisons do not associate: `a < b < c` is rejected here rather than
/// being read as `(a < b) < c`.
pub fn parse_comparison_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let comparison = parse_binary_expr(parser, left, bp)?;

    if parser.current_token_kind().is_comparison() {
        return Err(parser.unexpected_detailed("comparison operators cannot be chained, add parentheses"));
    }

    Ok(comparison)
}

fn parse_unary_expr(parser: &mut Parser, operator: UnaryOperator, bp: BindingPower) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let operand = parse_expr(parser, bp)?;

    let span = Span {
        start,
        end: operand.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::UnOp {
            operator,
            operand: Box::new(operand),
        },
        span,
    ))
}

/// `-x` binds tighter than `*`, so `-a * b` is `(-a) * b`.
pub fn parse_negation_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_unary_expr(parser, UnaryOperator::Neg, BindingPower::Unary)
}

/// `not` takes a whole comparison as its operand but stops at `and`/`or`.
pub fn parse_not_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_unary_expr(parser, UnaryOperator::Not, BindingPower::Not)
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let name = match left.kind {
        ExprKind::Var(name) => name,
        _ => return Err(parser.unexpected_detailed("only named functions can be called")),
    };
    parser.advance();

    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if !parser.skip(TokenKind::Comma) {
                break;
            }
        }
    }

    let end = parser.expect(TokenKind::CloseParen)?.span.end;

    Ok(Expr::new(
        ExprKind::FuncCall { name, arguments },
        Span {
            start: left.span.start,
            end,
        },
    ))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let index = parse_expr(parser, BindingPower::Default)?;
    let end = parser.expect(TokenKind::CloseBracket)?.span.end;

    let start = left.span.start.clone();
    Ok(Expr::new(
        ExprKind::ArrayAccess {
            base: Box::new(left),
            index: Box::new(index),
        },
        Span { start, end },
    ))
}

pub fn parse_field_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let field = parser.expect(TokenKind::Identifier)?;

    let start = left.span.start.clone();
    Ok(Expr::new(
        ExprKind::FieldAccess {
            base: Box::new(left),
            field: field.value,
        },
        Span {
            start,
            end: field.span.end,
        },
    ))
}
