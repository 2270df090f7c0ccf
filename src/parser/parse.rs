//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the syntax error type, token helpers, the panic-mode dispatch
//! wrapper and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: the class, methods, fields, parameters and types
//! - `statements`: statement dispatch and control flow
//! - `expressions`: the precedence chain and call arguments
//!
//! Parsing and semantic analysis share one pass: the rules call into the
//! [`SemanticAnalyzer`] as they recognise declarations, blocks and
//! expressions. No syntax tree is built.
//!
//! # Recovery
//!
//! [`Parser::attempt`] enters a rule only when the current token is in its
//! FIRST set. Otherwise it records one syntax error and discards tokens until
//! one can start the rule, one can follow it, or input runs out. Every pass of
//! that loop consumes a token, so parsing always terminates.

use crate::config::FrontendConfig;
use crate::parser::cursor::{RecoveryPolicy, TokenCursor};
use crate::parser::grammar::NonTerminal;
use crate::parser::token::{Token, TokenKind};
use crate::parser::trace::{NoopTracer, Tracer};
use crate::semantic::{ScopeKind, Scopes, SemanticAnalyzer, SemanticError, SymbolTable, Type};
use thiserror::Error;

/// Token that did not fit the rule being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: in {rule}: expected {expected}, found {found}")]
pub struct SyntaxError {
    pub rule: NonTerminal,
    pub expected: String,
    /// Quoted lexeme, or `end of input`.
    pub found: String,
    /// Index of the offending token.
    pub position: usize,
    pub line: usize,
}

/// Everything a front end run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub syntax_errors: Vec<SyntaxError>,
    pub semantic_errors: Vec<SemanticError>,
    pub symbols: SymbolTable,
    pub scopes: Scopes,
}

impl Analysis {
    pub fn syntax_error_count(&self) -> usize {
        self.syntax_errors.len()
    }

    pub fn semantic_error_count(&self) -> usize {
        self.semantic_errors.len()
    }

    pub fn is_success(&self) -> bool {
        self.syntax_errors.is_empty() && self.semantic_errors.is_empty()
    }

    /// Tokens the lexer could not classify.
    pub fn lexical_errors(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.kind == TokenKind::Error)
    }
}

/// Recursive descent parser with inline semantic analysis
pub struct Parser<'t> {
    pub(crate) cursor: TokenCursor,
    pub(crate) policy: RecoveryPolicy,
    pub(crate) analyzer: SemanticAnalyzer,
    pub(crate) config: FrontendConfig,
    tracer: Box<dyn Tracer + 't>,
    /// Rules currently being parsed, outermost first.
    rules: Vec<NonTerminal>,
    errors: Vec<SyntaxError>,
    /// Return type of the method whose body is being parsed.
    pub(crate) return_type: Option<Type>,
    /// Parameters collected by `params`, declared once the method scope opens.
    pub(crate) pending_params: Vec<(Type, String)>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, FrontendConfig::default())
    }

    pub fn with_config(tokens: Vec<Token>, config: FrontendConfig) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            policy: RecoveryPolicy::standard(),
            analyzer: SemanticAnalyzer::new(),
            config,
            tracer: Box::new(NoopTracer),
            rules: Vec::new(),
            errors: Vec::new(),
            return_type: None,
            pending_params: Vec::new(),
        }
    }

    /// Report rule entry and exit to `tracer`.
    pub fn with_tracer(mut self, tracer: impl Tracer + 't) -> Self {
        self.tracer = Box::new(tracer);
        self
    }

    pub fn with_policy(mut self, policy: RecoveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parse the whole token list.
    pub fn parse(mut self) -> Analysis {
        log::info!("parsing {} tokens", self.cursor.tokens().len());

        self.attempt(NonTerminal::Program, Self::parse_program);
        if !self.cursor.is_at_end() {
            self.error(NonTerminal::Program, "end of input");
        }

        log::info!(
            "parse finished: {} syntax errors, {} semantic errors",
            self.errors.len(),
            self.analyzer.error_count()
        );

        let (symbols, scopes, semantic_errors) = self.analyzer.into_parts();
        Analysis {
            tokens: self.cursor.into_tokens(),
            syntax_errors: self.errors,
            semantic_errors,
            symbols,
            scopes,
        }
    }

    // ===== Rule dispatch =====

    /// Run `rule` for `nt` if the current token can start it, otherwise
    /// recover in panic mode. Returns `None` when the rule was skipped.
    pub(crate) fn attempt<R>(&mut self, nt: NonTerminal, rule: fn(&mut Self) -> R) -> Option<R> {
        let mut reported = false;
        loop {
            if self.policy.starts(nt, self.cursor.peek()) {
                return Some(self.run(nt, rule));
            }
            if !reported {
                self.record(nt, format!("start of {nt}"));
                reported = true;
            }
            if self.cursor.advance().is_none() {
                return None;
            }
            if self.policy.follows(nt, self.cursor.peek()) {
                return None;
            }
        }
    }

    /// Run `rule` for `nt` unconditionally, with tracing.
    pub(crate) fn run<R>(&mut self, nt: NonTerminal, rule: fn(&mut Self) -> R) -> R {
        self.tracer.enter(nt, self.rules.len());
        self.rules.push(nt);
        let result = rule(self);
        self.rules.pop();
        self.tracer.exit(nt, self.rules.len());
        result
    }

    /// Parse `body` inside a fresh scope of `kind`; the scope is closed on
    /// every path out of `body`.
    pub(crate) fn with_scope(&mut self, kind: ScopeKind, body: impl FnOnce(&mut Self)) {
        self.analyzer.enter_scope(kind);
        body(self);
        self.analyzer.exit_scope();
    }

    pub(crate) fn found(&mut self, message: &str) {
        self.tracer.found(message, self.rules.len());
    }

    fn current_rule(&self) -> NonTerminal {
        self.rules.last().copied().unwrap_or(NonTerminal::Program)
    }

    // ===== Errors =====

    /// Record a syntax error at the current token. Sync tokens are left in
    /// place for an enclosing loop; anything else is consumed.
    pub(crate) fn error(&mut self, rule: NonTerminal, expected: &str) {
        self.record(rule, expected.to_string());
        let skip = self
            .cursor
            .peek()
            .is_some_and(|token| !self.policy.is_sync(token));
        if skip {
            self.cursor.advance();
        }
    }

    fn record(&mut self, rule: NonTerminal, expected: String) {
        let (found, line) = match self.cursor.peek() {
            Some(token) => (format!("'{}'", token.lexeme), token.line),
            None => (
                "end of input".to_string(),
                self.cursor.tokens().last().map_or(0, |t| t.line),
            ),
        };
        let err = SyntaxError {
            rule,
            expected,
            found,
            position: self.cursor.position(),
            line,
        };
        log::debug!("syntax error: {}", err);
        self.errors.push(err);
    }

    /// Discard tokens through the next `;`, stopping before a `}`.
    pub(crate) fn skip_statement(&mut self) {
        while !self.cursor.is_at_end() && !self.check("}") {
            let done = self.check(";");
            self.cursor.advance();
            if done {
                break;
            }
        }
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, lexeme: &str) -> bool {
        self.cursor.check(lexeme)
    }

    pub(crate) fn match_token(&mut self, lexeme: &str) -> bool {
        if self.check(lexeme) {
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_value(&mut self, lexeme: &str) -> bool {
        if self.match_token(lexeme) {
            true
        } else {
            self.error(self.current_rule(), &format!("'{lexeme}'"));
            false
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Option<String> {
        match self.cursor.peek() {
            Some(token) if token.kind == TokenKind::Id => {
                let name = token.lexeme.clone();
                self.cursor.advance();
                self.found(&format!("ID: {name}"));
                Some(name)
            }
            _ => {
                self.error(self.current_rule(), "an identifier");
                None
            }
        }
    }

    /// Parse a type keyword through the `type` rule.
    pub(crate) fn expect_type(&mut self) -> Option<Type> {
        self.attempt(NonTerminal::Type, Self::parse_type).flatten()
    }

    fn parse_type(&mut self) -> Option<Type> {
        let ty = Type::from_keyword(self.cursor.lexeme())?;
        self.cursor.advance();
        self.found(&format!("Type: {ty}"));
        Some(ty)
    }

    pub(crate) fn is_type_keyword(&self) -> bool {
        Type::from_keyword(self.cursor.lexeme()).is_some()
    }

    pub(crate) fn is_identifier(&self) -> bool {
        self.cursor.kind() == Some(TokenKind::Id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LexerConfig;
    use crate::parser::lexer::tokenize;
    use crate::parser::trace::RecordingTracer;

    fn parse(source: &str) -> Analysis {
        Parser::new(tokenize(source, LexerConfig::default())).parse()
    }

    #[test]
    fn test_parse_minimal_class() {
        let analysis = parse("class A { }");
        assert!(analysis.is_success());
        assert!(analysis.symbols.is_empty());
    }

    #[test]
    fn test_empty_input_is_one_syntax_error() {
        let analysis = parse("");
        assert_eq!(analysis.syntax_error_count(), 1);
        assert_eq!(analysis.syntax_errors[0].found, "end of input");
    }

    #[test]
    fn test_trailing_tokens_after_class() {
        let analysis = parse("class A { } int x;");
        assert_eq!(analysis.syntax_error_count(), 1);
        assert_eq!(analysis.syntax_errors[0].expected, "end of input");
    }

    #[test]
    fn test_leading_junk_is_one_error_per_episode() {
        let analysis = parse("foo bar baz class A { }");
        assert_eq!(analysis.syntax_error_count(), 1);
        assert_eq!(analysis.syntax_errors[0].found, "'foo'");
    }

    #[test]
    fn test_error_carries_line() {
        let analysis = parse("class A {\n  int x\n}");
        assert_eq!(analysis.syntax_error_count(), 1);
        let err = &analysis.syntax_errors[0];
        assert_eq!(err.line, 3);
        assert_eq!(err.expected, "';'");
        assert_eq!(err.found, "'}'");
    }

    #[test]
    fn test_tracer_sees_rules() {
        let mut tracer = RecordingTracer::default();
        let tokens = tokenize("class A { int x; }", LexerConfig::default());
        Parser::new(tokens).with_tracer(&mut tracer).parse();

        assert_eq!(tracer.lines[0], "- program");
        assert!(tracer.lines.contains(&"  - variable".to_string()));
        assert!(tracer.lines.contains(&"    - type".to_string()));
        assert!(tracer.lines.contains(&"      -- Type: int".to_string()));
        assert!(tracer.exits > 0);
    }
}
