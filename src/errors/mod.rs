//! Error types and error handling for the front end.
//!
//! This module defines the diagnostics produced while checking a program.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for the lexical, syntax and semantic phases
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
