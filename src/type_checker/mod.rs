//! Semantic analysis.
//!
//! Walks a parsed program once, depth first, resolving names through a
//! scoped symbol table and inferring the type of every expression.
//! Diagnostics are collected rather than returned early, so one run
//! reports every semantic problem in the program.

pub mod symbol_table;
pub mod type_checker;
pub mod types;
