use crate::Span;

use super::{expressions::Expr, types::TypeExpr};

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub param_type: TypeExpr,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub field_type: TypeExpr,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Decl {
        var_type: TypeExpr,
        names: Vec<String>,
        span: Span,
    },
    DeclAssign {
        var_type: TypeExpr,
        names: Vec<String>,
        value: Expr,
        span: Span,
    },
    Assign {
        target: Expr,
        value: Expr,
        span: Span,
    },
    FuncDef {
        return_type: TypeExpr,
        name: String,
        params: Vec<Param>,
        body: Vec<Stmt>,
        span: Span,
    },
    Return {
        value: Expr,
        span: Span,
    },
    If {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
        span: Span,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        span: Span,
    },
    TypeDef {
        name: String,
        fields: Vec<Field>,
        span: Span,
    },
    Instance {
        type_name: String,
        name: String,
        span: Span,
    },
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Decl { span, .. }
            | Stmt::DeclAssign { span, .. }
            | Stmt::Assign { span, .. }
            | Stmt::FuncDef { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::If { span, .. }
            | Stmt::While { span, .. }
            | Stmt::TypeDef { span, .. }
            | Stmt::Instance { span, .. } => span,
        }
    }

    pub fn line(&self) -> u32 {
        self.get_span().line()
    }
}
