use std::collections::HashMap;

use log::trace;

use crate::{errors::errors::{Error, ErrorImpl}, Position};

use super::types::{RecordType, Type};

#[derive(Debug, Clone, PartialEq)]
pub struct VariableSymbol {
    pub declared_type: Type,
}

impl VariableSymbol {
    pub fn is_vector(&self) -> bool {
        matches!(self.declared_type, Type::Vector { .. })
    }

    pub fn vector_length(&self) -> Option<usize> {
        match self.declared_type {
            Type::Vector { length, .. } => Some(length),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSymbol {
    pub return_type: Type,
    pub param_types: Vec<Type>,
}

/// Names visible to the analyzer.
///
/// Variables live in a stack of scopes, innermost last. Functions and
/// record types each share one program wide namespace.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<HashMap<String, VariableSymbol>>,
    functions: HashMap<String, FunctionSymbol>,
    records: HashMap<String, RecordType>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![HashMap::new()],
            functions: HashMap::new(),
            records: HashMap::new(),
        }
    }

    /// Number of open scopes, the global one included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
        trace!("entered scope {}", self.depth());
    }

    /// Closes the innermost scope. The global scope is never closed.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            trace!("left scope {}", self.depth());
            self.scopes.pop();
        }
    }

    pub fn declare_variable(&mut self, name: &str, declared_type: Type, position: Position) -> Result<(), Error> {
        // The global scope is always present
        let innermost = self.scopes.len() - 1;
        let scope = &mut self.scopes[innermost];

        if scope.contains_key(name) {
            return Err(Error::new(ErrorImpl::DuplicateDeclaration { name: name.to_string() }, position));
        }

        scope.insert(name.to_string(), VariableSymbol { declared_type });
        Ok(())
    }

    pub fn lookup_variable(&self, name: &str, position: Position) -> Result<&VariableSymbol, Error> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .ok_or_else(|| Error::new(ErrorImpl::UndeclaredName { name: name.to_string() }, position))
    }

    pub fn declare_function(
        &mut self,
        name: &str,
        return_type: Type,
        param_types: Vec<Type>,
        position: Position,
    ) -> Result<(), Error> {
        if self.functions.contains_key(name) {
            return Err(Error::new(ErrorImpl::DuplicateDeclaration { name: name.to_string() }, position));
        }

        self.functions.insert(name.to_string(), FunctionSymbol { return_type, param_types });
        Ok(())
    }

    pub fn lookup_function(&self, name: &str, position: Position) -> Result<&FunctionSymbol, Error> {
        self.functions
            .get(name)
            .ok_or_else(|| Error::new(ErrorImpl::UndeclaredName { name: name.to_string() }, position))
    }

    pub fn declare_record(&mut self, record: RecordType, position: Position) -> Result<(), Error> {
        if self.records.contains_key(&record.name) {
            return Err(Error::new(ErrorImpl::DuplicateDeclaration { name: record.name }, position));
        }

        self.records.insert(record.name.clone(), record);
        Ok(())
    }

    pub fn lookup_record(&self, name: &str, position: Position) -> Result<&RecordType, Error> {
        self.records
            .get(name)
            .ok_or_else(|| Error::new(ErrorImpl::UnknownRecordType { name: name.to_string() }, position))
    }
}
