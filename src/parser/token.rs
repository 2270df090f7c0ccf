//! Token definitions shared by the lexer, the grammar tables and the parser.

use std::fmt;

/// Reserved words. Any `ID` token whose lexeme is listed here is reported as
/// a [`TokenKind::Keyword`] instead.
pub const RESERVED_WORDS: [&str; 26] = [
    "int", "float", "string", "char", "boolean", "if", "else", "for", "while",
    "do", "switch", "case", "break", "continue", "return", "void", "const",
    "class", "public", "private", "protected", "static", "new", "delete",
    "true", "false",
];

/// Two-character operators recognised by the one-character lookahead.
pub const COMPOUND_OPERATORS: [&str; 8] =
    ["&&", "||", "==", "!=", "<=", ">=", "++", "--"];

/// Classification attached to every emitted lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Id,
    Keyword,
    Integer,
    Float,
    Octal,
    Hexadecimal,
    Binary,
    Char,
    String,
    Operator,
    Delimiter,
    Error,
}

impl TokenKind {
    /// Upper-case label used in token tables and grammar sets.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Id => "ID",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::Octal => "OCTAL",
            TokenKind::Hexadecimal => "HEXADECIMAL",
            TokenKind::Binary => "BINARY",
            TokenKind::Char => "CHAR",
            TokenKind::String => "STRING",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Delimiter => "DELIMITER",
            TokenKind::Error => "ERROR",
        }
    }

    /// Literal kinds usable as expression atoms and `case` labels.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Float
                | TokenKind::Octal
                | TokenKind::Hexadecimal
                | TokenKind::Binary
                | TokenKind::Char
                | TokenKind::String
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexeme with its classification. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub lexeme: String,
    pub kind: TokenKind,
    /// 1-based source line the lexeme was read from.
    pub line: usize,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, kind: TokenKind, line: usize) -> Self {
        Token {
            lexeme: lexeme.into(),
            kind,
            line,
        }
    }

    pub fn is(&self, lexeme: &str) -> bool {
        self.lexeme == lexeme
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({}, line {})", self.lexeme, self.kind, self.line)
    }
}

pub fn is_reserved(lexeme: &str) -> bool {
    RESERVED_WORDS.contains(&lexeme)
}
