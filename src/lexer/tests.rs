//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals in every accepted base, and floats with exponents
//! - Character literals
//! - Operators and punctuation
//! - Comments and line tracking
//! - Error cases

use std::rc::Rc;

use rstest::rstest;

use super::{lexer::tokenize, tokens::{Literal, TokenKind}};

fn lex(source: &str) -> Vec<super::tokens::Token> {
    tokenize(source, Rc::new("test.vip".to_string())).unwrap()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = lex("int float char bool true false def return type if else while and or not");

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[2].kind, TokenKind::Char);
    assert_eq!(tokens[3].kind, TokenKind::Bool);
    assert_eq!(tokens[4].kind, TokenKind::True);
    assert_eq!(tokens[5].kind, TokenKind::False);
    assert_eq!(tokens[6].kind, TokenKind::Def);
    assert_eq!(tokens[7].kind, TokenKind::Return);
    assert_eq!(tokens[8].kind, TokenKind::Type);
    assert_eq!(tokens[9].kind, TokenKind::If);
    assert_eq!(tokens[10].kind, TokenKind::Else);
    assert_eq!(tokens[11].kind, TokenKind::While);
    assert_eq!(tokens[12].kind, TokenKind::And);
    assert_eq!(tokens[13].kind, TokenKind::Or);
    assert_eq!(tokens[14].kind, TokenKind::Not);
    assert_eq!(tokens[15].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = lex("foo bar baz_123 _underscore Persona integer");

    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "bar", "baz_123", "_underscore", "Persona", "integer", "EOF"]);
    assert!(tokens[..6].iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn test_boolean_keywords_carry_literals() {
    let tokens = lex("true false");

    assert_eq!(tokens[0].literal, Some(Literal::Bool(true)));
    assert_eq!(tokens[1].literal, Some(Literal::Bool(false)));
}

#[rstest]
#[case("42", 42)]
#[case("0", 0)]
#[case("0b1011", 11)]
#[case("0o17", 15)]
#[case("0x1F", 31)]
#[case("0xff", 255)]
fn test_tokenize_integers(#[case] source: &str, #[case] expected: i64) {
    let tokens = lex(source);

    assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[0].literal, Some(Literal::Int(expected)));
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[rstest]
#[case("3.14", 3.14)]
#[case("2.", 2.0)]
#[case("1.5e3", 1500.0)]
#[case("2E-2", 0.02)]
fn test_tokenize_floats(#[case] source: &str, #[case] expected: f64) {
    let tokens = lex(source);

    assert_eq!(tokens[0].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[0].literal, Some(Literal::Float(expected)));
}

#[test]
fn test_tokenize_characters() {
    let tokens = lex("'a' ' ' '~'");

    assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[0].literal, Some(Literal::Char('a')));
    assert_eq!(tokens[1].literal, Some(Literal::Char(' ')));
    assert_eq!(tokens[2].literal, Some(Literal::Char('~')));
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    let tokens = lex("+ - * / == < > <= >= =");

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Equals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = lex("( ) { } [ ] . , ; :");

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = lex("int x # trailing comment\n'''block\ncomment'''\nint y");

    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[1].value, "x");
    assert_eq!(tokens[2].kind, TokenKind::Int);
    assert_eq!(tokens[3].value, "y");
    assert_eq!(tokens[3].line(), 4);
}

#[test]
fn test_tokenize_tracks_lines() {
    let tokens = lex("int a\n\nfloat b\n");

    assert_eq!(tokens[0].line(), 1);
    assert_eq!(tokens[1].line(), 1);
    assert_eq!(tokens[2].line(), 3);
    assert_eq!(tokens[3].line(), 3);
    assert_eq!(tokens[4].kind, TokenKind::EOF);
    assert_eq!(tokens[4].line(), 4);
}

#[test]
fn test_tokenize_field_access_is_not_a_float() {
    let tokens = lex("juan.edad v[0]");

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[5].kind, TokenKind::IntegerLiteral);
}

#[test]
fn test_tokenize_function_definition() {
    let tokens = lex("def int add(int a; int b): { return a + b }");

    assert_eq!(tokens[0].kind, TokenKind::Def);
    assert_eq!(tokens[1].kind, TokenKind::Int);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "add");
    assert_eq!(tokens[3].kind, TokenKind::OpenParen);
    assert_eq!(tokens[6].kind, TokenKind::Semicolon);
    assert_eq!(tokens[10].kind, TokenKind::Colon);
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = lex("");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unrecognized_token() {
    let result = tokenize("int x = @", Rc::new("test.vip".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_line(), 1);
}

#[test]
fn test_tokenize_integer_overflow() {
    let result = tokenize("\n99999999999999999999", Rc::new("test.vip".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");
    assert_eq!(error.get_line(), 2);
}
