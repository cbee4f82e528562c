use log::trace;

use crate::{ast::statements::{Field, Param, Stmt}, errors::errors::Error, lexer::tokens::TokenKind, parser::{expr::parse_expr, lookups::BindingPower}, Position, Span};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    trace!("parsing statement at {:?} on line {}", parser.current_token_kind(), parser.get_position().0);

    let handler = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied();
    let stmt = match handler {
        Some(handler) => handler(parser)?,
        None => parse_assignment_stmt(parser)?,
    };

    // Statement terminators are optional
    parser.skip(TokenKind::Semicolon);

    Ok(stmt)
}

/// Parses `{ stmt* }`, returning the statements and where the closing
/// brace ends.
pub fn parse_block(parser: &mut Parser) -> Result<(Vec<Stmt>, Position), Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected_detailed("unterminated block, expected `}`"));
        }
        statements.push(parse_stmt(parser)?);
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok((statements, end))
}

pub fn parse_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let var_type = parse_type(parser)?;

    let error = parser.unexpected_detailed("expected identifier during variable declaration");
    let first = parser.expect_error(TokenKind::Identifier, Some(error))?;
    let mut end = first.span.end;
    let mut names = vec![first.value];

    while parser.skip(TokenKind::Comma) {
        let name = parser.expect(TokenKind::Identifier)?;
        end = name.span.end;
        names.push(name.value);
    }

    if parser.skip(TokenKind::Assignment) {
        let value = parse_expr(parser, BindingPower::Default)?;
        let span = Span {
            start,
            end: value.span.end.clone(),
        };

        return Ok(Stmt::DeclAssign { var_type, names, value, span });
    }

    Ok(Stmt::Decl {
        var_type,
        names,
        span: Span { start, end },
    })
}

/// An identifier at statement start is either an instance declaration
/// (`Persona juan`) or the beginning of an assignment target.
pub fn parse_identifier_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.peek_kind() != TokenKind::Identifier {
        return parse_assignment_stmt(parser);
    }

    let type_token = parser.advance().clone();
    let name_token = parser.advance().clone();

    Ok(Stmt::Instance {
        type_name: type_token.value,
        name: name_token.value,
        span: Span {
            start: type_token.span.start,
            end: name_token.span.end,
        },
    })
}

pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let target = parse_expr(parser, BindingPower::Default)?;

    let error = parser.unexpected_detailed("expected `=` after assignment target");
    parser.expect_error(TokenKind::Assignment, Some(error))?;

    let value = parse_expr(parser, BindingPower::Default)?;

    let span = Span {
        start: target.span.start.clone(),
        end: value.span.end.clone(),
    };

    Ok(Stmt::Assign { target, value, span })
}

pub fn parse_func_def_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let return_type = parse_type(parser)?;
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut params = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let param_start = parser.get_position();
            let param_type = parse_type(parser)?;
            // `( int ; a ; int ; b )` spells each pair with a separator inside it
            parser.skip(TokenKind::Semicolon);
            let param_name = parser.expect(TokenKind::Identifier)?;

            params.push(Param {
                param_type,
                name: param_name.value,
                span: Span {
                    start: param_start,
                    end: param_name.span.end,
                },
            });

            if !parser.skip(TokenKind::Semicolon) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Colon)?;

    let (body, end) = parse_block(parser)?;

    Ok(Stmt::FuncDef {
        return_type,
        name,
        params,
        body,
        span: Span { start, end },
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = parse_expr(parser, BindingPower::Default)?;
    let span = Span {
        start,
        end: value.span.end.clone(),
    };

    Ok(Stmt::Return { value, span })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.skip(TokenKind::Colon);
    let (then_body, mut end) = parse_block(parser)?;

    let else_body = if parser.skip(TokenKind::Else) {
        parser.skip(TokenKind::Colon);
        let (else_body, else_end) = parse_block(parser)?;
        end = else_end;
        Some(else_body)
    } else {
        None
    };

    Ok(Stmt::If {
        condition,
        then_body,
        else_body,
        span: Span { start, end },
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Colon)?;
    let (body, end) = parse_block(parser)?;

    Ok(Stmt::While {
        condition,
        body,
        span: Span { start, end },
    })
}

pub fn parse_type_def_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::Colon)?;
    parser.expect(TokenKind::OpenCurly)?;

    // At least one field; fields need no separator
    let mut fields = Vec::new();
    loop {
        let field_start = parser.get_position();
        let field_type = parse_type(parser)?;
        let field_name = parser.expect(TokenKind::Identifier)?;

        fields.push(Field {
            field_type,
            name: field_name.value,
            span: Span {
                start: field_start,
                end: field_name.span.end,
            },
        });

        if parser.current_token_kind() == TokenKind::CloseCurly {
            break;
        }
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok(Stmt::TypeDef {
        name,
        fields,
        span: Span { start, end },
    })
}
