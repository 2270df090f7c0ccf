//! Rendering of an [`Analysis`] for the terminal
//!
//! Plain text by default; with color enabled every fragment is wrapped in
//! crossterm color commands taken from [`theme::DEFAULT_THEME`].

pub mod theme;

use crate::parser::{Analysis, TokenKind};
use crate::semantic::{SymbolEntry, SymbolKind, Type};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, Write};
use theme::{Theme, DEFAULT_THEME};

pub struct Report<'a> {
    analysis: &'a Analysis,
    color: bool,
    theme: &'a Theme,
}

impl<'a> Report<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Report {
            analysis,
            color: false,
            theme: &DEFAULT_THEME,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn paint<W: Write>(&self, out: &mut W, text: &str, color: Color) -> io::Result<()> {
        if self.color {
            queue!(out, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            out.write_all(text.as_bytes())
        }
    }

    fn kind_color(&self, kind: TokenKind) -> Color {
        match kind {
            TokenKind::Keyword => self.theme.keyword,
            TokenKind::Id => self.theme.identifier,
            TokenKind::String | TokenKind::Char => self.theme.string,
            TokenKind::Integer
            | TokenKind::Float
            | TokenKind::Octal
            | TokenKind::Hexadecimal
            | TokenKind::Binary => self.theme.number,
            TokenKind::Operator => self.theme.operator,
            TokenKind::Delimiter => self.theme.fg,
            TokenKind::Error => self.theme.error,
        }
    }

    /// One row per token: line, kind, lexeme.
    pub fn write_tokens<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.paint(out, &format!("{:>4}  {:<12} {}\n", "LINE", "KIND", "LEXEME"), self.theme.comment)?;
        for token in &self.analysis.tokens {
            write!(out, "{:>4}  {:<12} ", token.line, token.kind.as_str())?;
            self.paint(out, &token.lexeme, self.kind_color(token.kind))?;
            writeln!(out)?;
        }
        Ok(())
    }

    /// Lexical, syntax and semantic diagnostics, in that order.
    pub fn write_diagnostics<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for token in self.analysis.lexical_errors() {
            self.paint(out, "lexical error", self.theme.warning)?;
            writeln!(out, ": line {}: unrecognised lexeme '{}'", token.line, token.lexeme)?;
        }
        for err in &self.analysis.syntax_errors {
            self.paint(out, "syntax error", self.theme.error)?;
            writeln!(out, ": {}", err)?;
        }
        for err in &self.analysis.semantic_errors {
            self.paint(out, "semantic error", self.theme.error)?;
            writeln!(out, ": {}", err)?;
        }
        Ok(())
    }

    /// Symbol table grouped by identifier, in order of first declaration.
    pub fn write_symbols<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.paint(
            out,
            &format!("{:<16} {:<8} {:<12} {:<24} {}\n", "NAME", "KIND", "TYPE", "SCOPE", "VALUE"),
            self.theme.comment,
        )?;
        for (name, entries) in self.analysis.symbols.iter() {
            for entry in entries {
                self.write_symbol(out, name, entry)?;
            }
        }
        Ok(())
    }

    fn write_symbol<W: Write>(&self, out: &mut W, name: &str, entry: &SymbolEntry) -> io::Result<()> {
        let (kind, detail, name_color) = match &entry.kind {
            SymbolKind::Variable { value, .. } => ("var", value.clone(), self.theme.identifier),
            SymbolKind::Method { params, .. } => {
                let params: Vec<&str> = params.iter().map(|t| Type::name(*t)).collect();
                ("method", format!("({})", params.join(", ")), self.theme.method)
            }
        };

        self.paint(out, &format!("{:<16} ", name), name_color)?;
        write!(out, "{:<8} ", kind)?;
        self.paint(out, &format!("{:<12} ", entry.ty().name()), self.theme.type_name)?;
        self.paint(
            out,
            &format!("{:<24} ", self.analysis.scopes.name(entry.scope)),
            self.theme.scope,
        )?;
        writeln!(out, "{}", detail)
    }

    /// Error counts and the overall verdict.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "syntax errors: {}", self.analysis.syntax_error_count())?;
        writeln!(out, "semantic errors: {}", self.analysis.semantic_error_count())?;
        if self.analysis.is_success() {
            self.paint(out, "OK", self.theme.success)?;
        } else {
            self.paint(out, "FAILED", self.theme.error)?;
        }
        writeln!(out)
    }
}
