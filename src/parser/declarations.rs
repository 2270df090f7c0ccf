//! Declaration parsing implementation
//!
//! This module handles the class and its members:
//!
//! - The class wrapper: `class Name { ... }`
//! - Method definitions: `type name(params) { ... }`
//! - Field and local variable declarations: `type name = expr`
//! - Parameter lists
//!
//! # Grammar
//!
//! ```text
//! program  ::= "class" identifier "{" (method | variable ";")* "}"
//! method   ::= type identifier "(" params? ")" "{" body* "}"
//! variable ::= type identifier ("=" expression)?
//! params   ::= type identifier ("," type identifier)*
//! type     ::= "int" | "float" | "boolean" | "char" | "string" | "void"
//! ```
//!
//! Methods and fields share the `type identifier` prefix, so a member is
//! classified by looking past that prefix for a `(` and rewinding.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::grammar::NonTerminal;
use crate::parser::parse::Parser;
use crate::semantic::{ScopeKind, Type};

impl Parser<'_> {
    /// Parse the class wrapper and its members
    pub(crate) fn parse_program(&mut self) {
        self.expect_value("class");
        if let Some(name) = self.expect_identifier() {
            log::debug!("class {}", name);
        }
        self.expect_value("{");

        while !self.cursor.is_at_end() && !self.check("}") {
            if self.is_type_keyword() {
                if self.is_method_ahead() {
                    self.attempt(NonTerminal::Method, Self::parse_method);
                } else {
                    self.attempt(NonTerminal::Variable, Self::parse_variable);
                    self.expect_value(";");
                }
            } else {
                // A sync token would survive `error`; members must always advance.
                let before = self.cursor.position();
                self.error(NonTerminal::Program, "a method or field declaration");
                if self.cursor.position() == before {
                    self.cursor.advance();
                }
            }
        }

        self.expect_value("}");
    }

    /// Is the member at the cursor a method? Looks past `type identifier`
    /// for `(` and restores the cursor.
    fn is_method_ahead(&mut self) -> bool {
        let saved = self.cursor.checkpoint();
        self.cursor.advance();
        if self.is_identifier() {
            self.cursor.advance();
        }
        let is_method = self.check("(");
        self.cursor.rewind(saved);
        is_method
    }

    /// Parse a method: signature, scopes, parameters and body
    pub(crate) fn parse_method(&mut self) {
        let return_type = self.expect_type().unwrap_or(Type::Void);
        let name = self.expect_identifier();

        self.expect_value("(");
        self.pending_params.clear();
        if !self.check(")") {
            self.attempt(NonTerminal::Params, Self::parse_params);
        }
        let params = std::mem::take(&mut self.pending_params);
        self.expect_value(")");

        let param_types: Vec<Type> = params.iter().map(|(ty, _)| *ty).collect();
        let scope = ScopeKind::Method {
            name: name.clone().unwrap_or_default(),
            return_type,
            params: param_types.clone(),
        };

        self.with_scope(ScopeKind::Function, |p| {
            if let Some(name) = &name {
                p.analyzer.register_method(name, return_type, param_types);
            }
            p.with_scope(scope, |p| {
                for (ty, id) in &params {
                    p.analyzer.declare_variable(id, *ty, None);
                }
                let enclosing = p.return_type.replace(return_type);
                p.parse_block();
                p.return_type = enclosing;
            });
        });
    }

    /// Parse a parameter list into `pending_params`
    pub(crate) fn parse_params(&mut self) {
        loop {
            let ty = self.expect_type();
            let id = self.expect_identifier();
            if let (Some(ty), Some(id)) = (ty, id) {
                self.pending_params.push((ty, id));
            }
            if !self.match_token(",") {
                break;
            }
        }
    }

    /// Parse a variable declaration with an optional initialiser
    pub(crate) fn parse_variable(&mut self) {
        let ty = self.expect_type();
        let name = self.expect_identifier();

        let mut value = None;
        if self.match_token("=") {
            let start = self.cursor.position();
            let found = self.expression_type();
            let text: Vec<&str> = self.cursor.tokens()[start..self.cursor.position()]
                .iter()
                .map(|t| t.lexeme.as_str())
                .collect();
            value = Some(text.join(" "));

            if self.config.check_assignments {
                if let (Some(ty), Some(name)) = (ty, &name) {
                    self.analyzer.check_assignable(name, ty, found);
                }
            }
        }

        if let (Some(ty), Some(name)) = (ty, name) {
            self.analyzer.declare_variable(&name, ty, value.as_deref());
        }
    }
}
