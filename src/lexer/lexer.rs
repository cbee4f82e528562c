use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Literal, Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

lazy_static! {
    // Tried in order; the first pattern matching at the current offset wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^(\\d+\\.\\d*([eE][-+]?\\d+)?|\\d+[eE][-+]?\\d+)").unwrap(), handler: float_handler },
        RegexPattern { regex: Regex::new("^(0b[01]+|0o[0-7]+|0x[0-9A-Fa-f]+|[0-9]+)").unwrap(), handler: integer_handler },
        RegexPattern { regex: Regex::new("^[ \\t\\r]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\\n").unwrap(), handler: newline_handler },
        RegexPattern { regex: Regex::new("^#[^\\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("(?s)^'''.*?'''").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^'[ -~]'").unwrap(), handler: char_handler },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    pos: usize,
    line: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(file: Rc<String>) -> Lexer {
        Lexer {
            tokens: vec![],
            pos: 0,
            line: 1,
            file,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        trace!("lexed {:?} `{}` on line {}", token.kind, token.value, self.line);
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position(self.line, Rc::clone(&self.file))
    }

    /// A span covering a token that starts and ends on the current line.
    pub fn span(&self) -> Span {
        Span {
            start: self.position(),
            end: self.position(),
        }
    }
}

fn integer_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let parsed = if let Some(digits) = matched.strip_prefix("0b") {
        i64::from_str_radix(digits, 2)
    } else if let Some(digits) = matched.strip_prefix("0o") {
        i64::from_str_radix(digits, 8)
    } else if let Some(digits) = matched.strip_prefix("0x") {
        i64::from_str_radix(digits, 16)
    } else {
        matched.parse::<i64>()
    };

    let value = parsed.map_err(|_| {
        Error::new(ErrorImpl::NumberParseError { token: matched.to_string() }, lexer.position())
    })?;

    let span = lexer.span();
    lexer.push(MK_TOKEN!(TokenKind::IntegerLiteral, matched.to_string(), Some(Literal::Int(value)), span));
    lexer.advance_n(matched.len());
    Ok(())
}

fn float_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let value = matched.parse::<f64>().map_err(|_| {
        Error::new(ErrorImpl::NumberParseError { token: matched.to_string() }, lexer.position())
    })?;

    let span = lexer.span();
    lexer.push(MK_TOKEN!(TokenKind::FloatLiteral, matched.to_string(), Some(Literal::Float(value)), span));
    lexer.advance_n(matched.len());
    Ok(())
}

fn char_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    // The pattern only admits printable ASCII between the quotes.
    let value = matched.chars().nth(1).unwrap_or(' ');

    let span = lexer.span();
    lexer.push(MK_TOKEN!(TokenKind::CharLiteral, matched.to_string(), Some(Literal::Char(value)), span));
    lexer.advance_n(matched.len());
    Ok(())
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.line += matched.matches('\n').count() as u32;
    lexer.advance_n(matched.len());
    Ok(())
}

fn newline_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.line += 1;
    lexer.advance_n(matched.len());
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let span = lexer.span();

    match RESERVED_LOOKUP.get(matched) {
        Some(TokenKind::True) => lexer.push(MK_TOKEN!(TokenKind::True, matched.to_string(), Some(Literal::Bool(true)), span)),
        Some(TokenKind::False) => lexer.push(MK_TOKEN!(TokenKind::False, matched.to_string(), Some(Literal::Bool(false)), span)),
        Some(kind) => lexer.push(MK_TOKEN!(*kind, matched.to_string(), span)),
        None => lexer.push(MK_TOKEN!(TokenKind::Identifier, matched.to_string(), span)),
    }

    lexer.advance_n(matched.len());
    Ok(())
}

/// Splits a source text into tokens, ending with a single `EOF` token.
pub fn tokenize(source: &str, file: Rc<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(file);

    while lex.pos < source.len() {
        let remainder = &source[lex.pos..];

        let pattern = PATTERNS
            .iter()
            .find_map(|pattern| pattern.regex.find(remainder).map(|m| (pattern.handler, m.as_str())));

        match pattern {
            Some((handler, matched)) => handler(&mut lex, matched)?,
            None => {
                let token = remainder.chars().next().map(String::from).unwrap_or_default();
                return Err(Error::new(ErrorImpl::UnrecognisedToken { token }, lex.position()));
            }
        }
    }

    let span = lex.span();
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    Ok(lex.tokens)
}
