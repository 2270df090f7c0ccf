//! Expression parsing implementation
//!
//! This module handles expressions with one routine per precedence level,
//! lowest binding first. Each level parses its operands through
//! [`Parser::attempt`], so a malformed operand is recovered in place.
//!
//! # Grammar
//!
//! ```text
//! expression  ::= x (("|" | "||") x)*
//! x           ::= y (("&" | "&&") y)*
//! y           ::= "!"* R
//! R           ::= E (("<" | ">" | "==" | "!=" | "<=" | ">=") E)*
//! E           ::= A (("+" | "-") A)*
//! A           ::= B (("*" | "/" | "%") B)*
//! B           ::= "-"? C
//! C           ::= literal | "true" | "false"
//!               | identifier ("(" paramValues? ")")?
//!               | "(" expression ")"
//! paramValues ::= expression ("," expression)*
//! ```
//!
//! # Typing
//!
//! Every atom pushes exactly one type onto the analyzer's expression stack.
//! Each binary level takes a stack mark before its first operand and folds
//! the two entries above the mark through the type/operator matrix after
//! every further operand, so a completed level leaves one entry behind.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::grammar::NonTerminal;
use crate::parser::parse::Parser;
use crate::semantic::{Operator, Type};

impl Parser<'_> {
    /// Parse an expression and return its type. An expression that could
    /// not be parsed reads as `int`.
    pub(crate) fn expression_type(&mut self) -> Type {
        let mark = self.analyzer.expression_depth();
        self.attempt(NonTerminal::Expression, Self::parse_expression);
        self.analyzer.take_expression_type(mark)
    }

    /// Parse one binary precedence level: `operand (op operand)*`
    fn parse_binary_level(
        &mut self,
        operand: NonTerminal,
        rule: fn(&mut Self),
        operators: &[&str],
    ) {
        let mark = self.analyzer.expression_depth();
        self.attempt(operand, rule);

        while let Some(op) = operators
            .iter()
            .find(|op| self.check(op))
            .and_then(|op| Operator::from_lexeme(op))
        {
            self.cursor.advance();
            self.found(&format!("Operator: {op}"));
            self.attempt(operand, rule);
            self.analyzer.fold_binary(op, mark);
        }
    }

    pub(crate) fn parse_expression(&mut self) {
        self.parse_binary_level(NonTerminal::X, Self::parse_x, &["|", "||"]);
    }

    pub(crate) fn parse_x(&mut self) {
        self.parse_binary_level(NonTerminal::Y, Self::parse_y, &["&", "&&"]);
    }

    pub(crate) fn parse_y(&mut self) {
        let mut negations = 0;
        while self.match_token("!") {
            negations += 1;
        }

        let mark = self.analyzer.expression_depth();
        self.attempt(NonTerminal::R, Self::parse_r);
        for _ in 0..negations {
            self.analyzer.fold_not(mark);
        }
    }

    pub(crate) fn parse_r(&mut self) {
        self.parse_binary_level(
            NonTerminal::E,
            Self::parse_e,
            &["<", ">", "==", "!=", "<=", ">="],
        );
    }

    pub(crate) fn parse_e(&mut self) {
        self.parse_binary_level(NonTerminal::A, Self::parse_a, &["+", "-"]);
    }

    pub(crate) fn parse_a(&mut self) {
        self.parse_binary_level(NonTerminal::B, Self::parse_b, &["*", "/", "%"]);
    }

    pub(crate) fn parse_b(&mut self) {
        if self.match_token("-") {
            let mark = self.analyzer.expression_depth();
            self.attempt(NonTerminal::C, Self::parse_c);
            self.analyzer.fold_negate(mark);
        } else {
            self.attempt(NonTerminal::C, Self::parse_c);
        }
    }

    /// Parse an atom and push its type
    pub(crate) fn parse_c(&mut self) {
        let Some(token) = self.cursor.peek().cloned() else {
            self.error(NonTerminal::C, "an operand");
            self.analyzer.push_expression_type(Type::Error);
            return;
        };

        if let Some(ty) = Type::of_literal(&token) {
            self.cursor.advance();
            self.found(&format!("Literal: {}", token.lexeme));
            self.analyzer.push_expression_type(ty);
        } else if self.is_identifier() {
            self.cursor.advance();
            self.found(&format!("ID: {}", token.lexeme));
            if self.check("(") {
                self.parse_call(&token.lexeme);
            } else {
                let ty = if self.analyzer.check_variable_use(&token.lexeme) {
                    self.analyzer.declared_type(&token.lexeme).unwrap_or(Type::Error)
                } else {
                    Type::Error
                };
                self.analyzer.push_expression_type(ty);
            }
        } else if self.match_token("(") {
            let ty = self.expression_type();
            self.expect_value(")");
            self.analyzer.push_expression_type(ty);
        } else {
            self.error(NonTerminal::C, "an operand");
            self.analyzer.push_expression_type(Type::Error);
        }
    }

    /// Parse `( paramValues? )` after the callee `name` and push the call's
    /// type
    pub(crate) fn parse_call(&mut self, name: &str) {
        self.analyzer.check_callee(name);
        self.expect_value("(");

        let mark = self.analyzer.expression_depth();
        if !self.check(")") {
            self.attempt(NonTerminal::ParamValues, Self::parse_param_values);
        }
        let args = self.analyzer.take_expression_types(mark);
        self.expect_value(")");

        self.analyzer.check_call(name, &args);
    }

    pub(crate) fn parse_param_values(&mut self) {
        loop {
            let ty = self.expression_type();
            self.analyzer.push_expression_type(ty);
            if !self.match_token(",") {
                break;
            }
        }
    }
}
