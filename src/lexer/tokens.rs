use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map.insert("char", TokenKind::Char);
        map.insert("bool", TokenKind::Bool);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("def", TokenKind::Def);
        map.insert("return", TokenKind::Return);
        map.insert("type", TokenKind::Type);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("not", TokenKind::Not);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    CharLiteral,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    Semicolon,
    Colon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Int,
    Float,
    Char,
    Bool,
    True,
    False,
    Def,
    Return,
    Type,
    If,
    Else,
    While,
    And,
    Or,
    Not,
}

impl TokenKind {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Decoded payload of a literal token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Char(char),
    Bool(bool),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{:?}", value),
            Literal::Char(value) => write!(f, "'{}'", value),
            Literal::Bool(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub literal: Option<Literal>,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn line(&self) -> u32 {
        self.span.start.0
    }
}
