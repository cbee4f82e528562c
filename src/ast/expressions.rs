use std::fmt::Display;

use crate::{lexer::tokens::Literal, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Equals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    And,
    Or,
}

/// Operator families, each with its own typing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    Arithmetic,
    Comparison,
    Logical,
}

impl BinaryOperator {
    pub fn class(&self) -> OperatorClass {
        match self {
            BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div => {
                OperatorClass::Arithmetic
            }
            BinaryOperator::Equals
            | BinaryOperator::Less
            | BinaryOperator::LessEquals
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEquals => OperatorClass::Comparison,
            BinaryOperator::And | BinaryOperator::Or => OperatorClass::Logical,
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Equals => "==",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Neg,
    Not,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Neg => write!(f, "-"),
            UnaryOperator::Not => write!(f, "not"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    BinOp {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnOp {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    Const(Literal),
    Var(String),
    ArrayAccess {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    FieldAccess {
        base: Box<Expr>,
        field: String,
    },
    FuncCall {
        name: String,
        arguments: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn line(&self) -> u32 {
        self.span.line()
    }

    /// Short description of the expression's shape, used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match &self.kind {
            ExprKind::BinOp { .. } => "a binary expression",
            ExprKind::UnOp { .. } => "a unary expression",
            ExprKind::Const(_) => "a constant",
            ExprKind::Var(_) => "a variable",
            ExprKind::ArrayAccess { .. } => "an array element",
            ExprKind::FieldAccess { .. } => "a record field",
            ExprKind::FuncCall { .. } => "a function call",
        }
    }
}
