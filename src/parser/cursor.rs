//! Token cursor and panic-mode recovery policy
//!
//! [`TokenCursor`] owns the token list and the read position; it only moves
//! forward except through an explicit [`Checkpoint`]. [`RecoveryPolicy`]
//! bundles the FIRST/FOLLOW tables and the synchronisation set consulted by
//! the parser when a token does not fit.

use super::grammar::{first, follow, NonTerminal, TerminalSet};
use super::token::{Token, TokenKind};
use rustc_hash::FxHashSet;

/// Lexemes that error reporting never consumes, so enclosing loops can
/// re-test them.
pub const SYNC_LEXEMES: [&str; 11] = [
    ";", "}", ",", ")", "class", "if", "for", "while", "do", "switch", "return",
];

/// Saved cursor position for bounded backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenCursor {
            tokens,
            position: 0,
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Current lexeme, or `""` at end of input.
    pub fn lexeme(&self) -> &str {
        self.peek().map_or("", |t| t.lexeme.as_str())
    }

    pub fn kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub fn check(&self, lexeme: &str) -> bool {
        self.peek().is_some_and(|t| t.is(lexeme))
    }

    /// Consume the current token.
    pub fn advance(&mut self) -> Option<&Token> {
        if self.is_at_end() {
            return None;
        }
        self.position += 1;
        self.tokens.get(self.position - 1)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0;
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

/// FIRST/FOLLOW tables plus the synchronisation set.
#[derive(Debug, Clone)]
pub struct RecoveryPolicy {
    first: Vec<TerminalSet>,
    follow: Vec<TerminalSet>,
    sync: FxHashSet<&'static str>,
}

impl RecoveryPolicy {
    pub fn standard() -> Self {
        RecoveryPolicy {
            first: NonTerminal::ALL
                .iter()
                .map(|&nt| first(nt).into_iter().collect())
                .collect(),
            follow: NonTerminal::ALL
                .iter()
                .map(|&nt| follow(nt).into_iter().collect())
                .collect(),
            sync: SYNC_LEXEMES.iter().copied().collect(),
        }
    }

    /// Can `token` begin `nt`?
    pub fn starts(&self, nt: NonTerminal, token: Option<&Token>) -> bool {
        self.first[nt.index()].contains(token)
    }

    /// Can `token` follow `nt`?
    pub fn follows(&self, nt: NonTerminal, token: Option<&Token>) -> bool {
        self.follow[nt.index()].contains(token)
    }

    pub fn is_sync(&self, token: &Token) -> bool {
        self.sync.contains(token.lexeme.as_str())
    }
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
