//! Front end configuration
//!
//! All knobs default to the canonical behaviour; the binary maps its command
//! line flags onto these structs.

/// Lexer options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerConfig {
    /// Treat `0` followed by `[0-7]+` as an OCTAL literal. When off, a leading
    /// zero followed by decimal digits is a plain INTEGER.
    pub octal_literals: bool,
}

/// Options for a full lex + parse + analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontendConfig {
    pub lexer: LexerConfig,
    /// Check assignments and initialised declarations against the `=` row of
    /// the type/operator matrix.
    pub check_assignments: bool,
}

impl FrontendConfig {
    pub fn with_octal_literals(mut self) -> Self {
        self.lexer.octal_literals = true;
        self
    }

    pub fn with_assignment_checks(mut self) -> Self {
        self.check_assignments = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_canonical() {
        let config = FrontendConfig::default();
        assert!(!config.lexer.octal_literals);
        assert!(!config.check_assignments);
    }

    #[test]
    fn test_builders() {
        let config = FrontendConfig::default()
            .with_octal_literals()
            .with_assignment_checks();
        assert!(config.lexer.octal_literals);
        assert!(config.check_assignments);
    }
}
