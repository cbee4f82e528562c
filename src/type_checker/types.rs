//! Resolved types as seen by the semantic analyzer.

use std::fmt::Display;

use crate::ast::types::BaseType;

/// A user defined record: its name and its fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    pub name: String,
    pub fields: Vec<(Type, String)>,
}

impl RecordType {
    pub fn field_type(&self, field: &str) -> Option<&Type> {
        self.fields
            .iter()
            .find(|(_, name)| name == field)
            .map(|(field_type, _)| field_type)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Base(BaseType),
    Vector { element: BaseType, length: usize },
    Record(RecordType),
    /// Stands in for the type of an expression that already produced a
    /// diagnostic, so the failure is not reported again further up.
    Error,
}

impl Type {
    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn as_base(&self) -> Option<BaseType> {
        match self {
            Type::Base(base) => Some(*base),
            _ => None,
        }
    }

    /// The numeric base type, if this is one of `char`, `int` or `float`.
    pub fn as_numeric(&self) -> Option<BaseType> {
        self.as_base().filter(BaseType::is_numeric)
    }

    /// Whether a value of this type may initialise or be stored into `target`.
    ///
    /// Base types widen along `char -> int -> float`; everything else must
    /// match exactly.
    pub fn is_assignable_to(&self, target: &Type) -> bool {
        if self.is_error() || target.is_error() {
            return true;
        }

        match (self, target) {
            (Type::Base(source), Type::Base(target)) => {
                match (source.promotion_rank(), target.promotion_rank()) {
                    (Some(source), Some(target)) => source <= target,
                    _ => source == target,
                }
            }
            _ => self == target,
        }
    }
}

/// The wider of two numeric base types, if both are numeric.
pub fn promote(left: BaseType, right: BaseType) -> Option<BaseType> {
    let left_rank = left.promotion_rank()?;
    let right_rank = right.promotion_rank()?;

    if left_rank >= right_rank {
        Some(left)
    } else {
        Some(right)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Base(base) => write!(f, "{}", base),
            Type::Vector { element, length } => write!(f, "{}[{}]", element, length),
            Type::Record(record) => write!(f, "{}", record.name),
            Type::Error => write!(f, "<error>"),
        }
    }
}
