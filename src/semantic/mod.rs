//! Semantic analysis
//!
//! Scopes, symbols, types and the checks the parser runs as it goes.

pub mod analyzer;
pub mod errors;
pub mod scope;
pub mod symbols;
pub mod types;

pub use analyzer::{MethodSignature, SemanticAnalyzer};
pub use errors::{Construct, SemanticError};
pub use scope::{Scope, ScopeId, ScopeKind, Scopes};
pub use symbols::{SymbolEntry, SymbolKind, SymbolTable};
pub use types::{Operator, Type, TypeMatrix};
