/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The program root
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes, parameters and record fields
/// - types: Type annotations as written in the source
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
