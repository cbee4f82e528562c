use std::collections::HashSet;

use log::debug;

use crate::{
    ast::{
        ast::Program,
        expressions::{BinaryOperator, Expr, ExprKind, OperatorClass, UnaryOperator},
        statements::{Field, Param, Stmt},
        types::{BaseType, TypeExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Literal,
    Position,
};

use super::{
    symbol_table::SymbolTable,
    types::{promote, RecordType, Type},
};

fn type_error(expected: impl ToString, received: &Type, position: Position) -> Error {
    Error::new(
        ErrorImpl::TypeError {
            expected: expected.to_string(),
            received: received.to_string(),
        },
        position,
    )
}

#[derive(Debug, Default)]
pub struct TypeChecker {
    symbols: SymbolTable,
    errors: Vec<Error>,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            symbols: SymbolTable::new(),
            errors: vec![],
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    fn report(&mut self, error: Error) {
        debug!("{}", error);
        self.errors.push(error);
    }

    /// Runs `f` inside a fresh scope; the scope is closed however `f` ends.
    fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.symbols.push_scope();
        let result = f(self);
        self.symbols.pop_scope();
        result
    }

    /// Turns a written annotation into a type, looking up record names.
    pub fn resolve_type(&self, type_expr: &TypeExpr, position: Position) -> Result<Type, Error> {
        match type_expr {
            TypeExpr::Base(base) => Ok(Type::Base(*base)),
            TypeExpr::Vector(element, length) => Ok(Type::Vector {
                element: *element,
                length: *length,
            }),
            TypeExpr::Named(name) => Ok(Type::Record(self.symbols.lookup_record(name, position)?.clone())),
        }
    }

    /// Like `resolve_type`, but reports the failure and yields `Type::Error`.
    fn resolve_or_report(&mut self, type_expr: &TypeExpr, position: Position) -> Type {
        match self.resolve_type(type_expr, position) {
            Ok(resolved) => resolved,
            Err(error) => {
                self.report(error);
                Type::Error
            }
        }
    }

    fn declare_or_report(&mut self, name: &str, declared_type: Type, position: Position) {
        debug!("declaring {} as {}", name, declared_type);
        if let Err(error) = self.symbols.declare_variable(name, declared_type, position) {
            self.report(error);
        }
    }

    /// Infers the type of an expression, reporting every problem found in it.
    ///
    /// A sub-expression that failed yields `Type::Error`, which suppresses
    /// further diagnostics on the enclosing expression.
    pub fn type_of_expr(&mut self, expr: &Expr) -> Type {
        let position = expr.span.start.clone();

        match &expr.kind {
            ExprKind::Const(literal) => Type::Base(match literal {
                Literal::Int(_) => BaseType::Int,
                Literal::Float(_) => BaseType::Float,
                Literal::Char(_) => BaseType::Char,
                Literal::Bool(_) => BaseType::Bool,
            }),
            ExprKind::Var(name) => match self.symbols.lookup_variable(name, position) {
                Ok(symbol) => symbol.declared_type.clone(),
                Err(error) => {
                    self.report(error);
                    Type::Error
                }
            },
            ExprKind::UnOp { operator, operand } => {
                let operand_type = self.type_of_expr(operand);
                self.type_of_unary(*operator, operand_type, position)
            }
            ExprKind::BinOp { operator, left, right } => {
                let left_type = self.type_of_expr(left);
                let right_type = self.type_of_expr(right);
                self.type_of_binary(*operator, left_type, right_type, position)
            }
            ExprKind::ArrayAccess { base, index } => {
                let base_type = self.type_of_expr(base);
                let index_type = self.type_of_expr(index);

                let element = match base_type {
                    Type::Vector { element, .. } => Some(element),
                    Type::Error => None,
                    ref other => {
                        self.report(type_error("vector", other, position.clone()));
                        None
                    }
                };

                if !index_type.is_error() && index_type != Type::Base(BaseType::Int) {
                    self.report(type_error(BaseType::Int, &index_type, index.span.start.clone()));
                    return Type::Error;
                }

                match element {
                    Some(element) if !index_type.is_error() => Type::Base(element),
                    _ => Type::Error,
                }
            }
            ExprKind::FieldAccess { base, field } => match self.type_of_expr(base) {
                Type::Error => Type::Error,
                Type::Record(record) => match record.field_type(field) {
                    Some(field_type) => field_type.clone(),
                    None => {
                        let expected = format!("record with field `{}`", field);
                        self.report(type_error(expected, &Type::Record(record.clone()), position));
                        Type::Error
                    }
                },
                other => {
                    self.report(type_error(format!("record with field `{}`", field), &other, position));
                    Type::Error
                }
            },
            ExprKind::FuncCall { name, arguments } => {
                let argument_types: Vec<Type> = arguments.iter().map(|argument| self.type_of_expr(argument)).collect();
                self.type_of_call(name, &argument_types, position)
            }
        }
    }

    fn type_of_unary(&mut self, operator: UnaryOperator, operand: Type, position: Position) -> Type {
        if operand.is_error() {
            return Type::Error;
        }

        match (operator, operand.as_base()) {
            (UnaryOperator::Not, Some(BaseType::Bool)) => operand,
            (UnaryOperator::Neg, Some(BaseType::Int | BaseType::Float)) => operand,
            (UnaryOperator::Not, _) => {
                self.report(type_error(BaseType::Bool, &operand, position));
                Type::Error
            }
            (UnaryOperator::Neg, _) => {
                self.report(type_error("int or float", &operand, position));
                Type::Error
            }
        }
    }

    fn type_of_binary(&mut self, operator: BinaryOperator, left: Type, right: Type, position: Position) -> Type {
        if left.is_error() || right.is_error() {
            return Type::Error;
        }

        match operator.class() {
            OperatorClass::Arithmetic | OperatorClass::Comparison => {
                let promoted = match (left.as_numeric(), right.as_numeric()) {
                    (Some(left), Some(right)) => promote(left, right),
                    _ => None,
                };

                match promoted {
                    Some(promoted) if operator.class() == OperatorClass::Arithmetic => Type::Base(promoted),
                    Some(_) => Type::Base(BaseType::Bool),
                    None => {
                        let offending = if left.as_numeric().is_none() { &left } else { &right };
                        self.report(type_error("char, int or float", offending, position));
                        Type::Error
                    }
                }
            }
            OperatorClass::Logical => {
                let boolean = Type::Base(BaseType::Bool);
                if left != boolean || right != boolean {
                    let offending = if left != boolean { &left } else { &right };
                    self.report(type_error(BaseType::Bool, offending, position));
                    return Type::Error;
                }
                boolean
            }
        }
    }

    fn type_of_call(&mut self, name: &str, argument_types: &[Type], position: Position) -> Type {
        let function = match self.symbols.lookup_function(name, position.clone()) {
            Ok(function) => function.clone(),
            Err(error) => {
                self.report(error);
                return Type::Error;
            }
        };

        if argument_types.iter().any(Type::is_error) {
            return Type::Error;
        }

        if function.param_types.len() != argument_types.len() {
            self.report(Error::new(
                ErrorImpl::ArityMismatch {
                    function: name.to_string(),
                    expected: function.param_types.len(),
                    received: argument_types.len(),
                },
                position,
            ));
            return Type::Error;
        }

        let mut matched = true;
        for (index, (expected, received)) in function.param_types.iter().zip(argument_types).enumerate() {
            if expected.is_error() || expected == received {
                continue;
            }

            matched = false;
            self.report(Error::new(
                ErrorImpl::ParamTypeMismatch {
                    function: name.to_string(),
                    position: index + 1,
                    expected: expected.to_string(),
                    received: received.to_string(),
                },
                position.clone(),
            ));
        }

        if matched {
            function.return_type
        } else {
            Type::Error
        }
    }

    fn check_body(&mut self, body: &[Stmt], return_type: Option<&Type>) {
        for stmt in body {
            self.check_stmt(stmt, return_type);
        }
    }

    fn check_condition(&mut self, condition: &Expr) {
        let condition_type = self.type_of_expr(condition);
        if !condition_type.is_error() && condition_type != Type::Base(BaseType::Bool) {
            self.report(type_error(BaseType::Bool, &condition_type, condition.span.start.clone()));
        }
    }

    /// Checks one statement. `return_type` is the declared return type of
    /// the enclosing function, or `None` at the top level.
    pub fn check_stmt(&mut self, stmt: &Stmt, return_type: Option<&Type>) {
        let position = stmt.get_span().start.clone();

        match stmt {
            Stmt::Decl { var_type, names, .. } => {
                let declared = self.resolve_or_report(var_type, position.clone());
                for name in names {
                    self.declare_or_report(name, declared.clone(), position.clone());
                }
            }
            Stmt::DeclAssign { var_type, names, value, .. } => {
                let value_type = self.type_of_expr(value);
                let declared = self.resolve_or_report(var_type, position.clone());
                for name in names {
                    self.declare_or_report(name, declared.clone(), position.clone());
                }

                if !value_type.is_assignable_to(&declared) {
                    self.report(type_error(&declared, &value_type, position));
                }
            }
            Stmt::Assign { target, value, .. } => {
                if !matches!(
                    target.kind,
                    ExprKind::Var(_) | ExprKind::ArrayAccess { .. } | ExprKind::FieldAccess { .. }
                ) {
                    self.report(Error::new(
                        ErrorImpl::InvalidAssignmentTarget {
                            target: target.describe().to_string(),
                        },
                        position,
                    ));
                    self.type_of_expr(value);
                    return;
                }

                let target_type = self.type_of_expr(target);
                let value_type = self.type_of_expr(value);
                if !value_type.is_assignable_to(&target_type) {
                    self.report(type_error(&target_type, &value_type, position));
                }
            }
            Stmt::FuncDef { return_type: declared_return, name, params, body, .. } => {
                self.check_function(declared_return, name, params, body, position);
            }
            Stmt::Return { value, .. } => {
                let value_type = self.type_of_expr(value);

                match return_type {
                    None => self.report(Error::new(ErrorImpl::ReturnOutsideFunction, position)),
                    Some(expected) => {
                        if !value_type.is_error() && !expected.is_error() && value_type != *expected {
                            self.report(type_error(expected, &value_type, position));
                        }
                    }
                }
            }
            Stmt::If { condition, then_body, else_body, .. } => {
                self.check_condition(condition);
                self.check_body(then_body, return_type);
                if let Some(else_body) = else_body {
                    self.check_body(else_body, return_type);
                }
            }
            Stmt::While { condition, body, .. } => {
                self.check_condition(condition);
                self.check_body(body, return_type);
            }
            Stmt::TypeDef { name, fields, .. } => self.check_record(name, fields, position),
            Stmt::Instance { type_name, name, .. } => {
                let declared = match self.symbols.lookup_record(type_name, position.clone()) {
                    Ok(record) => Type::Record(record.clone()),
                    Err(error) => {
                        self.report(error);
                        Type::Error
                    }
                };
                self.declare_or_report(name, declared, position);
            }
        }
    }

    fn check_function(&mut self, return_type: &TypeExpr, name: &str, params: &[Param], body: &[Stmt], position: Position) {
        let return_type = self.resolve_or_report(return_type, position.clone());
        let param_types: Vec<Type> = params
            .iter()
            .map(|param| self.resolve_or_report(&param.param_type, param.span.start.clone()))
            .collect();

        // Registered before the body so the function may call itself
        debug!("declaring function {}({} params) -> {}", name, params.len(), return_type);
        if let Err(error) = self
            .symbols
            .declare_function(name, return_type.clone(), param_types.clone(), position)
        {
            self.report(error);
        }

        self.with_scope(|checker| {
            for (param, param_type) in params.iter().zip(param_types) {
                checker.declare_or_report(&param.name, param_type, param.span.start.clone());
            }
            checker.check_body(body, Some(&return_type));
        });
    }

    fn check_record(&mut self, name: &str, fields: &[Field], position: Position) {
        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(fields.len());

        for field in fields {
            let field_position = field.span.start.clone();
            if !seen.insert(field.name.as_str()) {
                self.report(Error::new(
                    ErrorImpl::DuplicateDeclaration {
                        name: field.name.clone(),
                    },
                    field_position.clone(),
                ));
            }
            resolved.push((self.resolve_or_report(&field.field_type, field_position), field.name.clone()));
        }

        debug!("declaring record {} with {} fields", name, resolved.len());
        let record = RecordType {
            name: name.to_string(),
            fields: resolved,
        };
        if let Err(error) = self.symbols.declare_record(record, position) {
            self.report(error);
        }
    }
}

/// Runs semantic analysis over a parsed program.
///
/// Analysis never stops early: every diagnostic is collected, in the order
/// it was found. The returned checker keeps the global symbols.
pub fn type_check(program: &Program) -> (TypeChecker, Vec<Error>) {
    let mut checker = TypeChecker::new();

    for stmt in program.iter() {
        checker.check_stmt(stmt, None);
    }

    debug!("semantic analysis finished with {} errors", checker.errors.len());

    let errors = std::mem::take(&mut checker.errors);
    (checker, errors)
}
