//! Statement parsing implementation
//!
//! This module handles every statement form inside a method body:
//!
//! - Local variable declarations: `int x = 42;`
//! - Assignments and call statements: `x = y;`, `f(x);`
//! - `return`, `print`, `break`, `continue` and the empty statement
//! - Control flow: `if`, `while`, `do-while`, `for`, `switch`
//!
//! # Grammar
//!
//! ```text
//! body        ::= ";" | simpleStmt | controlStmt
//! simpleStmt  ::= variable ";" | assignment ";" | callMethod ";" | return ";" | print
//! controlStmt ::= if | while | doWhile | for | switch | ("break" | "continue") ";"
//! block       ::= "{" body* "}"
//! branch      ::= block | body
//! if          ::= "if" "(" expression ")" branch ("else" (if | branch))?
//! while       ::= "while" "(" expression ")" branch
//! doWhile     ::= "do" block "while" "(" expression ")" ";"
//! for         ::= "for" "(" (variable | assignment)? ";" expression? ";" assignment? ")" branch
//! switch      ::= "switch" "(" expression ")" "{" case* default? "}"
//! case        ::= "case" label ":" body*
//! default     ::= "default" ":" body*
//! return      ::= "return" expression?
//! print       ::= "print" "(" expression ")" ";"
//! assignment  ::= identifier "=" expression
//! ```
//!
//! Every branch opens its own scope, braced or not. The `for` scope spans
//! the header as well as the body.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::grammar::NonTerminal;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;
use crate::semantic::{Construct, ScopeKind, Type};

impl Parser<'_> {
    /// Parse `{ body* }` in the current scope
    pub(crate) fn parse_block(&mut self) {
        self.expect_value("{");
        self.parse_statements(&["}"]);
        self.expect_value("}");
    }

    /// Parse a braced block, or a single statement when no `{` follows
    fn parse_block_or_statement(&mut self) {
        if self.check("{") {
            self.parse_block();
        } else {
            self.attempt(NonTerminal::Body, Self::parse_body);
        }
    }

    /// Parse statements until one of `stop` or end of input
    fn parse_statements(&mut self, stop: &[&str]) {
        while !self.cursor.is_at_end() && !stop.iter().any(|s| self.check(s)) {
            if self.policy.starts(NonTerminal::Body, self.cursor.peek()) {
                self.run(NonTerminal::Body, Self::parse_body);
            } else {
                self.error(NonTerminal::Body, "a statement");
                self.skip_statement();
            }
        }
    }

    /// Parse one statement
    pub(crate) fn parse_body(&mut self) {
        if self.match_token(";") {
            return;
        }
        if self.policy.starts(NonTerminal::ControlStmt, self.cursor.peek()) {
            self.attempt(NonTerminal::ControlStmt, Self::parse_control_stmt);
        } else {
            self.attempt(NonTerminal::SimpleStmt, Self::parse_simple_stmt);
        }
    }

    pub(crate) fn parse_simple_stmt(&mut self) {
        if self.check("return") {
            self.attempt(NonTerminal::Return, Self::parse_return);
            self.expect_value(";");
        } else if self.check("print") && self.is_identifier() {
            self.attempt(NonTerminal::Print, Self::parse_print);
        } else if self.is_type_keyword() {
            self.attempt(NonTerminal::Variable, Self::parse_variable);
            self.expect_value(";");
        } else if self.is_identifier() {
            let next = self.cursor.peek_ahead(1);
            let is_call = next.is_some_and(|t| t.is("("));
            let is_assignment = next.is_some_and(|t| t.is("="));
            if is_call {
                let mark = self.analyzer.expression_depth();
                self.attempt(NonTerminal::CallMethod, Self::parse_call_method);
                self.analyzer.take_expression_type(mark);
                self.expect_value(";");
            } else if is_assignment {
                self.attempt(NonTerminal::Assignment, Self::parse_assignment);
                self.expect_value(";");
            } else {
                self.cursor.advance();
                self.error(NonTerminal::SimpleStmt, "'(' or '=' after identifier");
                self.skip_statement();
            }
        } else {
            self.error(NonTerminal::SimpleStmt, "a statement");
        }
    }

    pub(crate) fn parse_control_stmt(&mut self) {
        match self.cursor.lexeme() {
            "if" => {
                self.attempt(NonTerminal::If, Self::parse_if);
            }
            "while" => {
                self.attempt(NonTerminal::While, Self::parse_while);
            }
            "do" => {
                self.attempt(NonTerminal::DoWhile, Self::parse_do_while);
            }
            "for" => {
                self.attempt(NonTerminal::For, Self::parse_for);
            }
            "switch" => {
                self.attempt(NonTerminal::Switch, Self::parse_switch);
            }
            "break" | "continue" => {
                let keyword = self.cursor.lexeme().to_string();
                self.cursor.advance();
                self.found(&format!("Keyword: {keyword}"));
                self.expect_value(";");
            }
            _ => self.error(NonTerminal::ControlStmt, "a control statement"),
        }
    }

    /// Parse `( expression )` and check the condition is boolean
    fn parse_condition(&mut self, construct: Construct) {
        self.expect_value("(");
        let ty = self.expression_type();
        self.analyzer.check_condition(construct, ty);
        self.expect_value(")");
    }

    pub(crate) fn parse_if(&mut self) {
        self.expect_value("if");
        self.parse_condition(Construct::If);
        self.with_scope(ScopeKind::If, Self::parse_block_or_statement);

        if self.match_token("else") {
            if self.check("if") {
                self.attempt(NonTerminal::If, Self::parse_if);
            } else {
                self.with_scope(ScopeKind::Else, Self::parse_block_or_statement);
            }
        }
    }

    pub(crate) fn parse_while(&mut self) {
        self.expect_value("while");
        self.parse_condition(Construct::While);
        self.with_scope(ScopeKind::While, Self::parse_block_or_statement);
    }

    pub(crate) fn parse_do_while(&mut self) {
        self.expect_value("do");
        self.with_scope(ScopeKind::DoWhile, Self::parse_block);
        self.expect_value("while");
        self.parse_condition(Construct::DoWhile);
        self.expect_value(";");
    }

    pub(crate) fn parse_for(&mut self) {
        self.expect_value("for");
        self.with_scope(ScopeKind::For, |p| {
            p.expect_value("(");

            if p.is_type_keyword() {
                p.attempt(NonTerminal::Variable, Self::parse_variable);
            } else if p.is_identifier() {
                p.attempt(NonTerminal::Assignment, Self::parse_assignment);
            }
            p.expect_value(";");

            if !p.check(";") {
                let ty = p.expression_type();
                p.analyzer.check_condition(Construct::For, ty);
            }
            p.expect_value(";");

            if p.is_identifier() {
                p.attempt(NonTerminal::Assignment, Self::parse_assignment);
            }
            p.expect_value(")");

            p.parse_block_or_statement();
        });
    }

    pub(crate) fn parse_switch(&mut self) {
        self.expect_value("switch");
        self.expect_value("(");
        let ty = self.expression_type();
        self.analyzer.check_switch(ty);
        self.expect_value(")");
        self.expect_value("{");

        const CLAUSE_END: [&str; 3] = ["}", "case", "default"];
        loop {
            if self.match_token("case") {
                self.parse_case_label();
                self.expect_value(":");
                self.with_scope(ScopeKind::Case, |p| p.parse_statements(&CLAUSE_END));
            } else if self.match_token("default") {
                self.expect_value(":");
                self.with_scope(ScopeKind::Default, |p| p.parse_statements(&CLAUSE_END));
            } else {
                break;
            }
        }

        self.expect_value("}");
    }

    /// A literal, `true`/`false` or an identifier; anything else is skipped
    /// up to the `:`.
    fn parse_case_label(&mut self) {
        let valid = self.cursor.peek().is_some_and(|t| {
            t.kind.is_literal() || t.kind == TokenKind::Id || t.is("true") || t.is("false")
        });
        if valid {
            let label = self.cursor.lexeme().to_string();
            self.cursor.advance();
            self.found(&format!("Case: {label}"));
            return;
        }

        self.error(NonTerminal::Switch, "a case label");
        while !self.cursor.is_at_end() && !self.check(":") && !self.check("}") {
            self.cursor.advance();
        }
    }

    pub(crate) fn parse_return(&mut self) {
        self.expect_value("return");
        let value = if self.cursor.is_at_end() || self.check(";") || self.check("}") {
            None
        } else {
            Some(self.expression_type())
        };
        self.analyzer.check_return(self.return_type, value);
    }

    pub(crate) fn parse_print(&mut self) {
        self.cursor.advance();
        self.found("Print");
        self.expect_value("(");
        self.expression_type();
        self.expect_value(")");
        self.expect_value(";");
    }

    pub(crate) fn parse_assignment(&mut self) {
        let name = self.expect_identifier();
        if let Some(name) = &name {
            self.analyzer.check_variable_use(name);
        }
        self.expect_value("=");
        let found = self.expression_type();

        if self.config.check_assignments {
            if let Some(name) = &name {
                self.analyzer.check_assignment(name, found);
            }
        }
    }

    /// Parse a call; leaves the call's type on the expression stack
    pub(crate) fn parse_call_method(&mut self) {
        match self.expect_identifier() {
            Some(name) => self.parse_call(&name),
            None => self.analyzer.push_expression_type(Type::Error),
        }
    }
}
