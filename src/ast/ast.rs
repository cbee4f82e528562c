use std::slice::Iter;

use crate::Span;

use super::statements::Stmt;

/// The root of a parsed program: its top-level statements in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
