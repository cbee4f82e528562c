#![allow(clippy::module_inception)]

use std::{path::Path, rc::Rc};

use crate::{ast::ast::Program, errors::errors::Error};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A source location: the 1-based line number and the file it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn line(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn line(&self) -> u32 {
        self.start.0
    }
}

/// Runs the whole front end over one source text.
///
/// Lexical and syntax errors stop the pipeline with a single diagnostic.
/// Semantic errors are collected, so the returned list may hold several.
pub fn check_source(source: &str, file: &str) -> Result<Program, Vec<Error>> {
    let file = Rc::new(String::from(file));

    let tokens = lexer::lexer::tokenize(source, Rc::clone(&file)).map_err(|error| vec![error])?;
    let (_, ast) = parser::parser::parse(tokens, file);
    let ast = ast.map_err(|error| vec![error])?;

    let (_, errors) = type_checker::type_checker::type_check(&ast);
    if errors.is_empty() {
        Ok(ast)
    } else {
        Err(errors)
    }
}

/// The name diagnostics use for a source path: its final component.
pub fn file_display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from(path))
}

/// Returns the text of the given 1-based line, if the source has one.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source.lines().nth((line - 1) as usize)
}

/// Renders an error the way the command line driver prints it.
///
/// Positions only carry a line, so the offending line is quoted whole
/// with no column marker.
///
/// ```text
/// Error: TypeError (Expected type `int`, received `float`)
/// -> main.vip
///   |
/// 2 | a = a + 1.5
///   |
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let line_string = position.0.to_string();
    let padding = line_string.len() + 2;

    let mut out = format!("Error: {}", error.get_error_name());
    let tip = error.get_tip().to_string();
    if !tip.is_empty() {
        out.push_str(&format!(" ({})", tip));
    }
    out.push('\n');
    out.push_str(&format!("-> {}\n", position.1));

    if let Some(line_text) = get_line(source, position.0) {
        out.push_str(&format!("{:>padding$}\n", "|"));
        out.push_str(&format!("{} | {}\n", line_string, line_text.trim()));
        out.push_str(&format!("{:>padding$}\n", "|"));
    }

    out
}

#[cfg(test)]
mod tests {
    use crate::errors::errors::{Error, ErrorImpl};

    #[test]
    fn test_file_display_name() {
        assert_eq!(super::file_display_name("programs/geometry/main.vip"), "main.vip");
        assert_eq!(super::file_display_name("./main.vip"), "main.vip");
        assert_eq!(super::file_display_name("main.vip"), "main.vip");
    }

    #[test]
    fn test_get_line() {
        let source = "int a\nint b = 2\n\nfloat c";
        assert_eq!(super::get_line(source, 1), Some("int a"));
        assert_eq!(super::get_line(source, 2), Some("int b = 2"));
        assert_eq!(super::get_line(source, 4), Some("float c"));
        assert_eq!(super::get_line(source, 0), None);
        assert_eq!(super::get_line(source, 9), None);
    }

    #[test]
    fn test_render_error() {
        let source = "int a = 5\na = a + 1.5\n";
        let error = Error::new(
            ErrorImpl::TypeError {
                expected: "int".to_string(),
                received: "float".to_string(),
            },
            super::Position(2, std::rc::Rc::new("main.vip".to_string())),
        );

        let rendered = super::render_error(&error, source);
        assert!(rendered.starts_with("Error: TypeError (Expected type `int`, received `float`)"));
        assert!(rendered.contains("-> main.vip"));
        assert!(rendered.contains("2 | a = a + 1.5"));
        assert!(!rendered.contains('^'));
    }

    #[test]
    fn test_render_error_gutter_width_follows_line_number() {
        let source = format!("{}int b = true\n", "int a\n".repeat(11));
        let error = Error::new(
            ErrorImpl::TypeError {
                expected: "int".to_string(),
                received: "bool".to_string(),
            },
            super::Position(12, std::rc::Rc::new("main.vip".to_string())),
        );

        let rendered = super::render_error(&error, &source);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[2], "   |");
        assert_eq!(lines[3], "12 | int b = true");
        assert_eq!(lines[4], "   |");
    }

    #[test]
    fn test_check_source_reports_every_semantic_error() {
        let errors = super::check_source("int a = 1.5\nb = 2\n", "test.vip").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].get_error_name(), "TypeError");
        assert_eq!(errors[1].get_error_name(), "UndeclaredName");
    }
}
