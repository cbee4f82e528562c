//! Type annotations as written in the source.
//!
//! The parser records annotations verbatim; record names stay unresolved
//! until the type checker turns them into concrete types.

use std::fmt::Display;

/// The four scalar types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Int,
    Float,
    Char,
    Bool,
}

impl BaseType {
    /// Rank in the promotion order `char < int < float`.
    ///
    /// `bool` does not take part in promotion.
    pub fn promotion_rank(&self) -> Option<u8> {
        match self {
            BaseType::Char => Some(0),
            BaseType::Int => Some(1),
            BaseType::Float => Some(2),
            BaseType::Bool => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.promotion_rank().is_some()
    }
}

impl Display for BaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaseType::Int => write!(f, "int"),
            BaseType::Float => write!(f, "float"),
            BaseType::Char => write!(f, "char"),
            BaseType::Bool => write!(f, "bool"),
        }
    }
}

/// A type annotation: `int`, `float[3]` or a record name.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Base(BaseType),
    Vector(BaseType, usize),
    Named(String),
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeExpr::Base(base) => write!(f, "{}", base),
            TypeExpr::Vector(base, length) => write!(f, "{}[{}]", base, length),
            TypeExpr::Named(name) => write!(f, "{}", name),
        }
    }
}
