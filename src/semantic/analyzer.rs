//! Inline semantic analyzer
//!
//! The parser calls into [`SemanticAnalyzer`] as it recognises declarations,
//! blocks and expressions. The analyzer owns the scope stack, the symbol
//! table, the type/operator matrix, the expression type stack and the list
//! of semantic diagnostics.
//!
//! # Visibility
//!
//! A symbol is visible exactly while the scope it was declared in is on the
//! scope stack. Since scopes are pushed and popped in step with the parse,
//! this yields lexical visibility in a single left-to-right pass.
//!
//! # Expression types
//!
//! Atoms push their type; operator productions replace their operands with
//! the matrix result. Consumers take a stack mark before parsing an
//! expression and read its type relative to that mark, so an expression that
//! pushed nothing reads as `int` and never disturbs entries below the mark.

use super::errors::{Construct, SemanticError};
use super::scope::{ScopeId, ScopeKind, Scopes};
use super::symbols::{SymbolEntry, SymbolKind, SymbolTable};
use super::types::{Operator, Type, TypeMatrix};

/// Declared signature of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub return_type: Type,
    pub params: Vec<Type>,
}

#[derive(Debug, Clone, Default)]
pub struct SemanticAnalyzer {
    scopes: Scopes,
    symbols: SymbolTable,
    matrix: TypeMatrix,
    expression_types: Vec<Type>,
    errors: Vec<SemanticError>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Scopes =====

    pub fn enter_scope(&mut self, kind: ScopeKind) -> ScopeId {
        self.scopes.enter(kind)
    }

    pub fn exit_scope(&mut self) {
        self.scopes.exit();
    }

    pub fn current_scope(&self) -> ScopeId {
        self.scopes.current()
    }

    // ===== Declarations =====

    /// Declare `id` of type `ty` in the current scope. A clash with the same
    /// `(id, ty)` in the current scope or in any open ancestor is reported,
    /// but the entry is inserted either way.
    pub fn declare_variable(&mut self, id: &str, ty: Type, value: Option<&str>) {
        let current = self.scopes.current();

        if self.declares(id, ty, current) {
            self.report(SemanticError::Redeclared {
                name: id.to_string(),
                scope: self.scopes.name(current),
            });
        } else if let Some(ancestor) = self
            .scopes
            .open()
            .iter()
            .rev()
            .skip(1)
            .copied()
            .find(|&scope| self.declares(id, ty, scope))
        {
            self.report(SemanticError::Shadowed {
                name: id.to_string(),
                ancestor: self.scopes.name(ancestor),
                scope: self.scopes.name(current),
            });
        }

        let value = match value {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => ty.default_value().to_string(),
        };
        log::debug!(
            "declared {} {} in {} = {}",
            ty,
            id,
            self.scopes.name(current),
            value
        );
        self.symbols.insert(SymbolEntry {
            name: id.to_string(),
            scope: current,
            kind: SymbolKind::Variable { ty, value },
        });
    }

    fn declares(&self, id: &str, ty: Type, scope: ScopeId) -> bool {
        self.symbols.in_scope(id, scope).any(|e| e.is_variable_of(ty))
    }

    /// Record a method in the current scope.
    pub fn register_method(&mut self, name: &str, return_type: Type, params: Vec<Type>) {
        log::debug!(
            "registered method {} in {}",
            name,
            self.scopes.name(self.scopes.current())
        );
        self.symbols.insert(SymbolEntry {
            name: name.to_string(),
            scope: self.scopes.current(),
            kind: SymbolKind::Method {
                return_type,
                params,
            },
        });
    }

    // ===== Lookups =====

    /// Does `id` have any entry declared in a currently open scope?
    pub fn lookup_variable(&self, id: &str) -> bool {
        self.symbols.get(id).any(|e| self.scopes.is_open(e.scope))
    }

    /// Type of the variable `id` in the nearest open scope declaring it.
    pub fn declared_type(&self, id: &str) -> Option<Type> {
        self.scopes.open().iter().rev().find_map(|&scope| {
            self.symbols
                .in_scope(id, scope)
                .filter(|e| !e.is_method())
                .last()
                .map(SymbolEntry::ty)
        })
    }

    /// First method entry for `id`, whether or not its scope is open.
    pub fn find_method(&self, id: &str) -> Option<MethodSignature> {
        self.symbols.get(id).find_map(|e| match &e.kind {
            SymbolKind::Method {
                return_type,
                params,
            } => Some(MethodSignature {
                return_type: *return_type,
                params: params.clone(),
            }),
            SymbolKind::Variable { .. } => None,
        })
    }

    // ===== Expression type stack =====

    pub fn push_expression_type(&mut self, ty: Type) {
        self.expression_types.push(ty);
    }

    /// Pop the last expression type; `int` when the stack is empty.
    pub fn pop_expression_type(&mut self) -> Type {
        self.expression_types.pop().unwrap_or(Type::Int)
    }

    pub fn expression_depth(&self) -> usize {
        self.expression_types.len()
    }

    /// Type of the expression parsed since `mark`, dropping everything above
    /// the mark. `int` when nothing was pushed.
    pub fn take_expression_type(&mut self, mark: usize) -> Type {
        if self.expression_types.len() > mark {
            let ty = self.pop_expression_type();
            self.expression_types.truncate(mark);
            ty
        } else {
            Type::Int
        }
    }

    /// Types pushed since `mark`, oldest first, removed from the stack.
    pub fn take_expression_types(&mut self, mark: usize) -> Vec<Type> {
        let mark = mark.min(self.expression_types.len());
        self.expression_types.split_off(mark)
    }

    /// Replace the two operands above `mark` with `left op right`.
    pub fn fold_binary(&mut self, op: Operator, mark: usize) {
        let result = match self.take_expression_types(mark).as_slice() {
            [left, right] => self.matrix.binary(op, *left, *right),
            _ => Type::Error,
        };
        self.push_expression_type(result);
    }

    /// Replace the operand above `mark` with `!operand`.
    pub fn fold_not(&mut self, mark: usize) {
        let result = match self.take_expression_types(mark).as_slice() {
            [operand] => self.matrix.not(*operand),
            _ => Type::Error,
        };
        self.push_expression_type(result);
    }

    /// Replace the operand above `mark` with `-operand`.
    pub fn fold_negate(&mut self, mark: usize) {
        let result = match self.take_expression_types(mark).as_slice() {
            [operand] => self.matrix.negate(*operand),
            _ => Type::Error,
        };
        self.push_expression_type(result);
    }

    // ===== Checks =====

    pub fn check_condition(&mut self, construct: Construct, found: Type) {
        if found != Type::Boolean {
            self.report(SemanticError::ConditionNotBoolean { construct, found });
        }
    }

    pub fn check_switch(&mut self, found: Type) {
        if found != Type::Int {
            self.report(SemanticError::SwitchNotInt { found });
        }
    }

    /// `method` is the enclosing method's return type; `value` the type of
    /// the returned expression, if any. The parser always passes `Some`,
    /// since statements only occur in method bodies.
    pub fn check_return(&mut self, method: Option<Type>, value: Option<Type>) {
        match (method, value) {
            (None, _) => self.report(SemanticError::ReturnOutsideMethod),
            (Some(Type::Void), Some(found)) => {
                self.report(SemanticError::ValueInVoidReturn { found })
            }
            (Some(expected), Some(found)) if expected != found => {
                self.report(SemanticError::ReturnTypeMismatch { expected, found })
            }
            (Some(expected), None) if expected != Type::Void => {
                self.report(SemanticError::MissingReturnValue { expected })
            }
            _ => {}
        }
    }

    pub fn check_variable_use(&mut self, name: &str) -> bool {
        let visible = self.lookup_variable(name);
        if !visible {
            self.report(SemanticError::UndeclaredVariable {
                name: name.to_string(),
            });
        }
        visible
    }

    /// Visibility check for the callee of a call.
    pub fn check_callee(&mut self, name: &str) {
        if !self.lookup_variable(name) {
            self.report(SemanticError::UndeclaredMethod {
                name: name.to_string(),
            });
        }
    }

    /// Compare `args` with the callee's signature and push the call's type.
    /// A callee with no method entry gets no further checks.
    pub fn check_call(&mut self, name: &str, args: &[Type]) {
        let Some(signature) = self.find_method(name) else {
            self.push_expression_type(Type::Error);
            return;
        };

        if signature.params.len() != args.len() {
            self.report(SemanticError::ArityMismatch {
                name: name.to_string(),
                expected: signature.params.len(),
                found: args.len(),
            });
        }
        for (position, (&expected, &found)) in signature.params.iter().zip(args).enumerate() {
            if expected != found {
                self.report(SemanticError::ArgumentTypeMismatch {
                    name: name.to_string(),
                    position: position + 1,
                    expected,
                    found,
                });
            }
        }

        self.push_expression_type(signature.return_type);
    }

    /// Assignment compatibility through the matrix's `=` row.
    pub fn check_assignment(&mut self, name: &str, found: Type) {
        if let Some(expected) = self.declared_type(name) {
            self.check_assignable(name, expected, found);
        }
    }

    /// Same check for an initialiser, before `name` is declared.
    pub fn check_assignable(&mut self, name: &str, expected: Type, found: Type) {
        if !self.matrix.assignable(expected, found) {
            self.report(SemanticError::IncompatibleAssignment {
                name: name.to_string(),
                expected,
                found,
            });
        }
    }

    pub fn report(&mut self, error: SemanticError) {
        log::debug!("semantic error: {}", error);
        self.errors.push(error);
    }

    // ===== Results =====

    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    pub fn matrix(&self) -> &TypeMatrix {
        &self.matrix
    }

    pub fn into_parts(self) -> (SymbolTable, Scopes, Vec<SemanticError>) {
        (self.symbols, self.scopes, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_lookup() {
        let mut sa = SemanticAnalyzer::new();
        sa.declare_variable("x", Type::Int, None);

        assert!(sa.lookup_variable("x"));
        assert!(!sa.lookup_variable("y"));
        assert_eq!(sa.declared_type("x"), Some(Type::Int));
        assert_eq!(sa.error_count(), 0);

        let entry = sa.symbols().get("x").next().cloned();
        assert_eq!(
            entry.map(|e| e.kind),
            Some(SymbolKind::Variable {
                ty: Type::Int,
                value: "0".to_string()
            })
        );
    }

    #[test]
    fn test_redeclaration_still_inserts() {
        let mut sa = SemanticAnalyzer::new();
        sa.declare_variable("x", Type::Int, None);
        sa.declare_variable("x", Type::Int, None);

        assert_eq!(sa.error_count(), 1);
        assert!(matches!(sa.errors()[0], SemanticError::Redeclared { .. }));
        assert_eq!(sa.symbols().get("x").count(), 2);
    }

    #[test]
    fn test_same_name_different_type_is_allowed() {
        let mut sa = SemanticAnalyzer::new();
        sa.declare_variable("x", Type::Int, None);
        sa.declare_variable("x", Type::Float, None);
        assert_eq!(sa.error_count(), 0);
    }

    #[test]
    fn test_shadowing_reports_once_per_occurrence() {
        let mut sa = SemanticAnalyzer::new();
        sa.declare_variable("x", Type::Int, None);
        sa.enter_scope(ScopeKind::If);
        sa.declare_variable("x", Type::Int, None);
        sa.enter_scope(ScopeKind::While);
        sa.declare_variable("x", Type::Int, None);

        assert_eq!(sa.error_count(), 2);
        assert!(sa
            .errors()
            .iter()
            .all(|e| matches!(e, SemanticError::Shadowed { .. })));
    }

    #[test]
    fn test_visibility_follows_open_scopes() {
        let mut sa = SemanticAnalyzer::new();
        sa.enter_scope(ScopeKind::For);
        sa.declare_variable("i", Type::Int, None);
        assert!(sa.lookup_variable("i"));
        sa.exit_scope();
        assert!(!sa.lookup_variable("i"));
        assert_eq!(sa.declared_type("i"), None);
    }

    #[test]
    fn test_nearest_declared_type_wins() {
        let mut sa = SemanticAnalyzer::new();
        sa.declare_variable("v", Type::Int, None);
        sa.enter_scope(ScopeKind::If);
        sa.declare_variable("v", Type::String, None);
        assert_eq!(sa.declared_type("v"), Some(Type::String));
        sa.exit_scope();
        assert_eq!(sa.declared_type("v"), Some(Type::Int));
    }

    #[test]
    fn test_find_method_ignores_scope() {
        let mut sa = SemanticAnalyzer::new();
        sa.enter_scope(ScopeKind::Function);
        sa.register_method("f", Type::Boolean, vec![Type::Int]);
        sa.exit_scope();

        assert!(!sa.lookup_variable("f"));
        assert_eq!(
            sa.find_method("f"),
            Some(MethodSignature {
                return_type: Type::Boolean,
                params: vec![Type::Int]
            })
        );
    }

    #[test]
    fn test_pop_defaults_to_int() {
        let mut sa = SemanticAnalyzer::new();
        assert_eq!(sa.pop_expression_type(), Type::Int);
        sa.push_expression_type(Type::Boolean);
        assert_eq!(sa.take_expression_type(1), Type::Int);
        assert_eq!(sa.take_expression_type(0), Type::Boolean);
        assert_eq!(sa.expression_depth(), 0);
    }

    #[test]
    fn test_fold_through_matrix() {
        let mut sa = SemanticAnalyzer::new();
        sa.push_expression_type(Type::Int);
        sa.push_expression_type(Type::Float);
        sa.fold_binary(Operator::Add, 0);
        assert_eq!(sa.expression_depth(), 1);

        sa.push_expression_type(Type::Int);
        sa.fold_binary(Operator::Lt, 0);
        sa.fold_not(0);
        assert_eq!(sa.take_expression_type(0), Type::Boolean);

        sa.push_expression_type(Type::Boolean);
        sa.fold_binary(Operator::Add, 0);
        assert_eq!(sa.take_expression_type(0), Type::Error);
    }

    #[test]
    fn test_call_arity_and_types_are_independent() {
        let mut sa = SemanticAnalyzer::new();
        sa.register_method("f", Type::Int, vec![Type::Int, Type::Boolean]);

        sa.check_call("f", &[Type::String]);
        assert_eq!(sa.error_count(), 2);
        assert!(matches!(sa.errors()[0], SemanticError::ArityMismatch { expected: 2, found: 1, .. }));
        assert!(matches!(
            sa.errors()[1],
            SemanticError::ArgumentTypeMismatch { position: 1, .. }
        ));
        assert_eq!(sa.pop_expression_type(), Type::Int);
    }

    #[test]
    fn test_call_on_variable() {
        let mut sa = SemanticAnalyzer::new();
        sa.declare_variable("n", Type::Int, None);
        sa.check_callee("n");
        sa.check_call("n", &[]);
        assert_eq!(sa.error_count(), 0);
        assert_eq!(sa.pop_expression_type(), Type::Error);
    }

    #[test]
    fn test_return_checks() {
        let mut sa = SemanticAnalyzer::new();
        sa.check_return(Some(Type::Int), Some(Type::Int));
        sa.check_return(Some(Type::Void), None);
        assert_eq!(sa.error_count(), 0);

        sa.check_return(Some(Type::Int), None);
        sa.check_return(Some(Type::Void), Some(Type::Int));
        sa.check_return(Some(Type::Int), Some(Type::Float));
        sa.check_return(None, None);
        assert_eq!(sa.error_count(), 4);
    }

    #[test]
    fn test_condition_and_switch_checks() {
        let mut sa = SemanticAnalyzer::new();
        sa.check_condition(Construct::While, Type::Boolean);
        sa.check_switch(Type::Int);
        assert_eq!(sa.error_count(), 0);
        sa.check_condition(Construct::If, Type::Int);
        sa.check_switch(Type::Char);
        assert_eq!(sa.error_count(), 2);
    }

    #[test]
    fn test_assignment_check() {
        let mut sa = SemanticAnalyzer::new();
        sa.declare_variable("f", Type::Float, None);
        sa.check_assignment("f", Type::Int);
        assert_eq!(sa.error_count(), 0);
        sa.check_assignment("f", Type::String);
        assert_eq!(sa.error_count(), 1);
    }
}
