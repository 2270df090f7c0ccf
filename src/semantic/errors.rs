//! Semantic diagnostics
//!
//! None of these stop analysis; the analyzer records them and carries on.

use super::types::Type;
use thiserror::Error;

/// Control construct whose condition must be `boolean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    If,
    While,
    DoWhile,
    For,
}

impl std::fmt::Display for Construct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Construct::If => "if",
            Construct::While => "while",
            Construct::DoWhile => "do-while",
            Construct::For => "for",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("variable '{name}' already exists in scope '{scope}'")]
    Redeclared { name: String, scope: String },

    #[error("variable '{name}' already exists in parent scope '{ancestor}'; cannot redeclare in nested scope '{scope}'")]
    Shadowed {
        name: String,
        ancestor: String,
        scope: String,
    },

    #[error("use of undeclared variable '{name}'")]
    UndeclaredVariable { name: String },

    #[error("call to undeclared method '{name}'")]
    UndeclaredMethod { name: String },

    #[error("{construct} condition must be boolean, found {found}")]
    ConditionNotBoolean { construct: Construct, found: Type },

    #[error("switch expression must be int, found {found}")]
    SwitchNotInt { found: Type },

    #[error("method declares void but return has a value of type {found}")]
    ValueInVoidReturn { found: Type },

    #[error("return type mismatch: expected {expected}, found {found}")]
    ReturnTypeMismatch { expected: Type, found: Type },

    #[error("return has no value but method declares {expected}")]
    MissingReturnValue { expected: Type },

    #[error("return outside of any method")]
    ReturnOutsideMethod,

    #[error("method '{name}' expects {expected} arguments but was called with {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("argument {position} of '{name}' expects {expected} but found {found}")]
    ArgumentTypeMismatch {
        name: String,
        position: usize,
        expected: Type,
        found: Type,
    },

    #[error("cannot assign {found} to '{name}' of type {expected}")]
    IncompatibleAssignment {
        name: String,
        expected: Type,
        found: Type,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SemanticError::ConditionNotBoolean {
            construct: Construct::If,
            found: Type::Int,
        };
        assert_eq!(err.to_string(), "if condition must be boolean, found int");

        let err = SemanticError::MissingReturnValue {
            expected: Type::Int,
        };
        assert_eq!(err.to_string(), "return has no value but method declares int");

        let err = SemanticError::ArgumentTypeMismatch {
            name: "f".to_string(),
            position: 2,
            expected: Type::Int,
            found: Type::String,
        };
        assert_eq!(err.to_string(), "argument 2 of 'f' expects int but found string");
    }
}
