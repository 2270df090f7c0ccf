//! # Introduction
//!
//! classfront is the front end for a small single-class, Java-like teaching
//! language. It lexes the source with a table-driven DFA, parses it by
//! recursive descent with panic-mode error recovery, and checks scopes and
//! types in the same pass. Errors never stop the run: the result is a
//! best-effort symbol table plus every diagnostic found.
//!
//! ## Pipeline
//!
//! ```text
//! Source lines → Lexer → Tokens → Parser + SemanticAnalyzer → Analysis
//! ```
//!
//! 1. [`parser::lexer`]: classifies lexemes line by line with a
//!    [`parser::dfa::Dfa`]; malformed lexemes become `ERROR` tokens.
//! 2. [`parser::parse`]: one routine per grammar nonterminal, recovering
//!    from unexpected tokens through the FIRST/FOLLOW sets in
//!    [`parser::grammar`].
//! 3. [`semantic`]: scope arena, symbol table, type/operator matrix and the
//!    checks the parser calls as it goes.
//! 4. [`report`]: plain or colored rendering of the results; not part of the
//!    stable library API.
//!
//! ## Example
//!
//! ```
//! use classfront::{analyze, FrontendConfig};
//!
//! let analysis = analyze("class A { int x; int x; }", FrontendConfig::default());
//! assert_eq!(analysis.syntax_error_count(), 0);
//! assert_eq!(analysis.semantic_error_count(), 1);
//! assert_eq!(analysis.symbols.get("x").count(), 2);
//! ```

pub mod config;
pub mod parser;
pub mod report;
pub mod semantic;

pub use config::{FrontendConfig, LexerConfig};
pub use parser::{Analysis, Parser, SyntaxError, Token, TokenKind};
pub use semantic::{SemanticError, SymbolTable, Type};

/// Lex, parse and check `source`.
pub fn analyze(source: &str, config: FrontendConfig) -> Analysis {
    let tokens = parser::lexer::tokenize(source, config.lexer);
    Parser::with_config(tokens, config).parse()
}
