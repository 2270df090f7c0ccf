//! Source code front end
//!
//! This module turns source text into diagnostics and a symbol table:
//! - [`lexer`]: Tokenization (source lines → tokens), driven by a [`dfa`]
//! - [`grammar`]: Nonterminals and their FIRST/FOLLOW sets
//! - [`cursor`]: Token cursor and panic-mode recovery policy
//! - [`parse`]: Recursive descent parsing with inline semantic analysis
//! - [`trace`]: Rule entry/exit tracing
//!
//! # Supported Language
//!
//! A single class made of fields and methods:
//! - Types: `int`, `float`, `boolean`, `char`, `string`, `void`
//! - Statements: declarations, assignments, calls, `print`, `return`,
//!   control flow (`if`, `while`, `do-while`, `for`, `switch`)
//! - Expressions: arithmetic, relational and logical operators, calls
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one routine per nonterminal.
//! No syntax tree is materialised; errors never stop the run.

pub mod cursor;
mod declarations;
pub mod dfa;
mod expressions;
pub mod grammar;
pub mod lexer;
pub mod parse;
mod statements;
pub mod token;
pub mod trace;

pub use parse::{Analysis, Parser, SyntaxError};
pub use token::{Token, TokenKind};
