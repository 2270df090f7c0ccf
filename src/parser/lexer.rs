//! Lexer (tokenizer) for class source code
//!
//! Source is scanned one line at a time. Characters that are not boundaries
//! (whitespace, delimiters, operator characters) are fed into a [`Dfa`]; a
//! boundary flushes the pending lexeme with the label of the accept state the
//! automaton stopped in, or as an `ERROR` token when it stopped elsewhere.
//! Boundaries are suppressed inside string and char literal bodies so that
//! `"a, b"` and `';'` stay single lexemes.
//!
//! After scanning, `ID` lexemes found in [`RESERVED_WORDS`] become `KEYWORD`
//! and `CHAR` lexemes that are not exactly `'x'` or `'\x'` become `ERROR`.
//!
//! [`RESERVED_WORDS`]: super::token::RESERVED_WORDS

use super::dfa::{CharClass, Dfa};
use super::token::{is_reserved, Token, TokenKind, COMPOUND_OPERATORS};
use crate::config::LexerConfig;

const DIGITS: &str = "0123456789";
const OCTAL_DIGITS: &str = "01234567";
const BINARY_DIGITS: &str = "01";
const HEX_DIGITS: &str = "0123456789abcdefABCDEF";
const IDENT_START: &str = "$_abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const IDENT_CONTINUE: &str =
    "$_abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Automaton states of the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Start,
    /// A lone leading `0`.
    Zero,
    Integer,
    Octal,
    BinaryStart,
    Binary,
    HexStart,
    Hex,
    /// Saw `.`; needs a digit or an exponent marker.
    Dot,
    Fraction,
    ExponentStart,
    Exponent,
    Identifier,
    CharOpen,
    CharEscape,
    CharBody,
    CharClose,
    StringBody,
    StringEscape,
    StringClose,
}

impl State {
    /// States in which whitespace, delimiters and operators are literal text.
    fn is_literal_body(self) -> bool {
        matches!(
            self,
            State::CharOpen
                | State::CharEscape
                | State::CharBody
                | State::StringBody
                | State::StringEscape
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Whitespace,
    Delimiter,
    Operator,
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

fn is_delimiter(ch: char) -> bool {
    matches!(ch, ',' | ';' | '(' | ')' | '[' | ']' | '{' | '}' | ':')
}

fn is_operator(ch: char) -> bool {
    matches!(
        ch,
        '=' | '*' | '/' | '%' | '^' | '&' | '|' | '<' | '>' | '!' | '~' | '+' | '-'
    )
}

/// Build the token automaton.
pub fn build_automaton(config: LexerConfig) -> Dfa<State, TokenKind> {
    use CharClass::{Any, Set};
    use State::*;

    let mut dfa = Dfa::new();

    // Numbers with a leading zero: 0, 0b101, 0x1F, 0.5 and either 017 or 017-as-decimal
    dfa.add_transitions(Start, Set("0"), Zero);
    dfa.mark_accept(Zero, TokenKind::Integer);
    if config.octal_literals {
        dfa.add_transitions(Zero, Set(OCTAL_DIGITS), Octal);
        dfa.add_transitions(Octal, Set(OCTAL_DIGITS), Octal);
        dfa.mark_accept(Octal, TokenKind::Octal);
    } else {
        dfa.add_transitions(Zero, Set(DIGITS), Integer);
    }
    dfa.add_transitions(Zero, Set("bB"), BinaryStart);
    dfa.add_transitions(BinaryStart, Set(BINARY_DIGITS), Binary);
    dfa.add_transitions(Binary, Set(BINARY_DIGITS), Binary);
    dfa.mark_accept(Binary, TokenKind::Binary);
    dfa.add_transitions(Zero, Set("xX"), HexStart);
    dfa.add_transitions(HexStart, Set(HEX_DIGITS), Hex);
    dfa.add_transitions(Hex, Set(HEX_DIGITS), Hex);
    dfa.mark_accept(Hex, TokenKind::Hexadecimal);

    // Decimal integers
    dfa.add_transitions(Start, Set("123456789"), Integer);
    dfa.add_transitions(Integer, Set(DIGITS), Integer);
    dfa.mark_accept(Integer, TokenKind::Integer);

    // Floats: .5, 1.5, 0.25, 1e9, 0e5, 1.5E3
    dfa.add_transitions(Start, Set("."), Dot);
    dfa.add_transitions(Zero, Set("."), Dot);
    dfa.add_transitions(Integer, Set("."), Dot);
    dfa.add_transitions(Dot, Set(DIGITS), Fraction);
    dfa.add_transitions(Fraction, Set(DIGITS), Fraction);
    dfa.add_transitions(Zero, Set("eE"), ExponentStart);
    dfa.add_transitions(Integer, Set("eE"), ExponentStart);
    dfa.add_transitions(Dot, Set("eE"), ExponentStart);
    dfa.add_transitions(Fraction, Set("eE"), ExponentStart);
    dfa.add_transitions(ExponentStart, Set(DIGITS), Exponent);
    dfa.add_transitions(Exponent, Set(DIGITS), Exponent);
    dfa.mark_accept(Fraction, TokenKind::Float);
    dfa.mark_accept(Exponent, TokenKind::Float);

    // Char literals; the shape is validated after scanning
    dfa.add_transitions(Start, Set("'"), CharOpen);
    dfa.add_transitions(CharOpen, Any, CharBody);
    dfa.add_transitions(CharOpen, Set("\\"), CharEscape);
    dfa.add_transitions(CharOpen, Set("'"), CharClose);
    dfa.add_transitions(CharEscape, Any, CharBody);
    dfa.add_transitions(CharBody, Set("'"), CharClose);
    dfa.mark_accept(CharClose, TokenKind::Char);

    // String literals
    dfa.add_transitions(Start, Set("\""), StringBody);
    dfa.add_transitions(StringBody, Any, StringBody);
    dfa.add_transitions(StringBody, Set("\\"), StringEscape);
    dfa.add_transitions(StringEscape, Any, StringBody);
    dfa.add_transitions(StringBody, Set("\""), StringClose);
    dfa.mark_accept(StringClose, TokenKind::String);

    // Identifiers
    dfa.add_transitions(Start, Set(IDENT_START), Identifier);
    dfa.add_transitions(Identifier, Set(IDENT_CONTINUE), Identifier);
    dfa.mark_accept(Identifier, TokenKind::Id);

    dfa
}

/// Lexer for class source code
pub struct Lexer {
    lines: Vec<String>,
    dfa: Dfa<State, TokenKind>,
}

impl Lexer {
    /// Create a lexer with the default configuration.
    pub fn new(source: &str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    pub fn with_config(source: &str, config: LexerConfig) -> Self {
        Self::from_lines(source.lines(), config)
    }

    /// Create a lexer over lines already split by the caller.
    pub fn from_lines<I, S>(lines: I, config: LexerConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            dfa: build_automaton(config),
        }
    }

    /// Tokenize every line, then apply keyword and char literal post-processing.
    pub fn tokenize(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        for (index, line) in self.lines.iter().enumerate() {
            self.scan_line(line, index + 1, &mut tokens);
        }
        for token in &mut tokens {
            reclassify(token);
        }
        log::debug!(
            "lexed {} tokens from {} lines",
            tokens.len(),
            self.lines.len()
        );
        tokens
    }

    fn boundary(&self, ch: char, state: Option<State>) -> Option<Boundary> {
        if state.is_some_and(State::is_literal_body) {
            return None;
        }
        if is_whitespace(ch) {
            Some(Boundary::Whitespace)
        } else if is_delimiter(ch) {
            Some(Boundary::Delimiter)
        } else if is_operator(ch) {
            Some(Boundary::Operator)
        } else {
            None
        }
    }

    /// Scan one line. `None` as the state means the automaton has no edge for
    /// some character already consumed into the lexeme.
    fn scan_line(&self, line: &str, line_no: usize, tokens: &mut Vec<Token>) {
        let chars: Vec<char> = line.chars().collect();
        let mut state = Some(State::Start);
        let mut lexeme = String::new();
        let mut index = 0;

        while index < chars.len() {
            let ch = chars[index];

            let Some(boundary) = self.boundary(ch, state) else {
                state = state.and_then(|s| self.dfa.next_state(s, ch));
                lexeme.push(ch);
                index += 1;
                continue;
            };

            self.flush(state, &mut lexeme, line_no, tokens);

            match boundary {
                Boundary::Whitespace => {}
                Boundary::Delimiter => {
                    tokens.push(Token::new(ch, TokenKind::Delimiter, line_no));
                }
                Boundary::Operator => {
                    if let Some(&next) = chars.get(index + 1) {
                        let pair: String = [ch, next].iter().collect();
                        if COMPOUND_OPERATORS.contains(&pair.as_str()) {
                            tokens.push(Token::new(pair, TokenKind::Operator, line_no));
                            state = Some(State::Start);
                            index += 2;
                            continue;
                        }
                    }
                    tokens.push(Token::new(ch, TokenKind::Operator, line_no));
                }
            }

            state = Some(State::Start);
            index += 1;
        }

        self.flush(state, &mut lexeme, line_no, tokens);
    }

    fn flush(
        &self,
        state: Option<State>,
        lexeme: &mut String,
        line_no: usize,
        tokens: &mut Vec<Token>,
    ) {
        match state.and_then(|s| self.dfa.accept_label(s)) {
            Some(kind) => tokens.push(Token::new(lexeme.as_str(), kind, line_no)),
            None if !lexeme.is_empty() && state != Some(State::Start) => {
                log::debug!("line {}: malformed lexeme '{}'", line_no, lexeme);
                tokens.push(Token::new(lexeme.as_str(), TokenKind::Error, line_no));
            }
            None => {}
        }
        lexeme.clear();
    }
}

/// Keyword promotion and char literal validation.
fn reclassify(token: &mut Token) {
    match token.kind {
        TokenKind::Id if is_reserved(&token.lexeme) => token.kind = TokenKind::Keyword,
        TokenKind::Char if !is_valid_char_literal(&token.lexeme) => {
            log::debug!("line {}: invalid char literal {}", token.line, token.lexeme);
            token.kind = TokenKind::Error;
        }
        _ => {}
    }
}

/// `'x'` with a non-quote middle, or the escaped form `'\x'`.
fn is_valid_char_literal(lexeme: &str) -> bool {
    let chars: Vec<char> = lexeme.chars().collect();
    match chars.as_slice() {
        ['\'', middle, '\''] => *middle != '\'',
        ['\'', '\\', _, '\''] => true,
        _ => false,
    }
}

/// Convenience wrapper: tokenize `source` with `config`.
pub fn tokenize(source: &str, config: LexerConfig) -> Vec<Token> {
    Lexer::with_config(source, config).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(String, TokenKind)> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .map(|t| (t.lexeme, t.kind))
            .collect()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|(_, k)| k).collect()
    }

    #[test]
    fn test_simple_declaration() {
        let tokens = lex("int x = 42;");
        assert_eq!(
            tokens,
            vec![
                ("int".to_string(), TokenKind::Keyword),
                ("x".to_string(), TokenKind::Id),
                ("=".to_string(), TokenKind::Operator),
                ("42".to_string(), TokenKind::Integer),
                (";".to_string(), TokenKind::Delimiter),
            ]
        );
    }

    #[test]
    fn test_compound_operators() {
        let tokens = lex("a&&b||c==d!=e<=f>=g++ --");
        let ops: Vec<&str> = tokens
            .iter()
            .filter(|(_, k)| *k == TokenKind::Operator)
            .map(|(l, _)| l.as_str())
            .collect();
        assert_eq!(ops, vec!["&&", "||", "==", "!=", "<=", ">=", "++", "--"]);
    }

    #[test]
    fn test_single_char_operators() {
        let tokens = lex("a<b & c");
        assert_eq!(tokens[1], ("<".to_string(), TokenKind::Operator));
        assert_eq!(tokens[3], ("&".to_string(), TokenKind::Operator));
    }

    #[test]
    fn test_reserved_words_are_keywords() {
        for word in crate::parser::token::RESERVED_WORDS {
            let tokens = lex(&format!("({word})"));
            assert_eq!(tokens[1].1, TokenKind::Keyword, "{word}");
        }
        // print and default are ordinary identifiers
        assert_eq!(kinds("print default"), vec![TokenKind::Id, TokenKind::Id]);
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(kinds("0"), vec![TokenKind::Integer]);
        assert_eq!(kinds("123"), vec![TokenKind::Integer]);
        assert_eq!(kinds("0b1011"), vec![TokenKind::Binary]);
        assert_eq!(kinds("0XfF09"), vec![TokenKind::Hexadecimal]);
        assert_eq!(kinds("017"), vec![TokenKind::Integer]);
        assert_eq!(kinds("3.14"), vec![TokenKind::Float]);
        assert_eq!(kinds(".5"), vec![TokenKind::Float]);
        assert_eq!(kinds("0.25"), vec![TokenKind::Float]);
        assert_eq!(kinds("1e9"), vec![TokenKind::Float]);
        assert_eq!(kinds("1.5E3"), vec![TokenKind::Float]);
    }

    #[test]
    fn test_exponent_after_any_decimal_prefix() {
        assert_eq!(kinds("0e5"), vec![TokenKind::Float]);
        assert_eq!(kinds("0E12"), vec![TokenKind::Float]);
        assert_eq!(kinds("07e1"), vec![TokenKind::Float]);
        assert_eq!(kinds("0e"), vec![TokenKind::Error]);
    }

    #[test]
    fn test_malformed_numbers() {
        assert_eq!(kinds("0b"), vec![TokenKind::Error]);
        assert_eq!(kinds("0b12"), vec![TokenKind::Error]);
        assert_eq!(kinds("0xg"), vec![TokenKind::Error]);
        assert_eq!(kinds("1."), vec![TokenKind::Error]);
        assert_eq!(kinds("12ab"), vec![TokenKind::Error]);
        assert_eq!(kinds("1e"), vec![TokenKind::Error]);
    }

    #[test]
    fn test_octal_literals_when_enabled() {
        let config = LexerConfig {
            octal_literals: true,
        };
        let tokens = tokenize("017 08 0", config);
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Octal, TokenKind::Error, TokenKind::Integer]
        );
    }

    #[test]
    fn test_string_literal_keeps_delimiters() {
        let tokens = lex(r#"print("a, (b); c = d");"#);
        assert_eq!(tokens[2], (r#""a, (b); c = d""#.to_string(), TokenKind::String));
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_string_escape() {
        let tokens = lex(r#""say \"hi\"""#);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].1, TokenKind::String);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        assert_eq!(kinds("\"abc"), vec![TokenKind::Error]);
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(kinds("'a'"), vec![TokenKind::Char]);
        assert_eq!(kinds("';'"), vec![TokenKind::Char]);
        assert_eq!(kinds("' '"), vec![TokenKind::Char]);
        assert_eq!(kinds(r"'\n'"), vec![TokenKind::Char]);
        assert_eq!(kinds(r"'\''"), vec![TokenKind::Char]);
    }

    #[test]
    fn test_bad_char_literals() {
        assert_eq!(lex("'ab'"), vec![("'ab'".to_string(), TokenKind::Error)]);
        assert_eq!(kinds("''"), vec![TokenKind::Error]);
    }

    #[test]
    fn test_unknown_character_is_error() {
        assert_eq!(
            kinds("x # y"),
            vec![TokenKind::Id, TokenKind::Error, TokenKind::Id]
        );
    }

    #[test]
    fn test_lines_are_tracked() {
        let tokens = Lexer::new("class A\n{\n}").tokenize();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 2, 3]);
    }

    #[test]
    fn test_no_implicit_terminator_at_line_end() {
        assert_eq!(
            kinds("x = 1\ny = 2"),
            vec![
                TokenKind::Id,
                TokenKind::Operator,
                TokenKind::Integer,
                TokenKind::Id,
                TokenKind::Operator,
                TokenKind::Integer,
            ]
        );
    }
}
