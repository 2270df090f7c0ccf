//! FIRST and FOLLOW sets
//!
//! One entry per grammar nonterminal. Sets mix literal lexemes (`"class"`,
//! `";"`) with token kinds (`ID`, `INTEGER`) and the end-of-input marker;
//! a token belongs to a set when either its lexeme or its kind is listed.
//!
//! ```text
//! program     ::= 'class' ID '{' (method | variable ';')* '}'
//! method      ::= type ID '(' params? ')' '{' body* '}'
//! body        ::= ';' | simpleStmt | controlStmt
//! simpleStmt  ::= variable ';' | assignment ';' | callMethod ';' | return ';' | print
//! controlStmt ::= if | while | doWhile | for | switch | ('break' | 'continue') ';'
//! expression  ::= x (('|' | '||') x)*
//! x           ::= y (('&' | '&&') y)*
//! y           ::= '!'* R
//! R           ::= E (relop E)*
//! E           ::= A (('+' | '-') A)*
//! A           ::= B (('*' | '/' | '%') B)*
//! B           ::= '-'? C
//! C           ::= literal | ID ('(' paramValues? ')')? | '(' expression ')'
//! ```

use super::token::{Token, TokenKind};
use rustc_hash::FxHashSet;
use std::fmt;

/// Grammar nonterminals. Each one has a parse routine, a FIRST set and a
/// FOLLOW set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
    Program,
    Method,
    Body,
    SimpleStmt,
    ControlStmt,
    Variable,
    Assignment,
    CallMethod,
    Return,
    Print,
    If,
    While,
    DoWhile,
    For,
    Switch,
    Params,
    ParamValues,
    Expression,
    X,
    Y,
    R,
    E,
    A,
    B,
    C,
    Type,
}

impl NonTerminal {
    pub const ALL: [NonTerminal; 26] = [
        NonTerminal::Program,
        NonTerminal::Method,
        NonTerminal::Body,
        NonTerminal::SimpleStmt,
        NonTerminal::ControlStmt,
        NonTerminal::Variable,
        NonTerminal::Assignment,
        NonTerminal::CallMethod,
        NonTerminal::Return,
        NonTerminal::Print,
        NonTerminal::If,
        NonTerminal::While,
        NonTerminal::DoWhile,
        NonTerminal::For,
        NonTerminal::Switch,
        NonTerminal::Params,
        NonTerminal::ParamValues,
        NonTerminal::Expression,
        NonTerminal::X,
        NonTerminal::Y,
        NonTerminal::R,
        NonTerminal::E,
        NonTerminal::A,
        NonTerminal::B,
        NonTerminal::C,
        NonTerminal::Type,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NonTerminal::Program => "program",
            NonTerminal::Method => "method",
            NonTerminal::Body => "body",
            NonTerminal::SimpleStmt => "simpleStmt",
            NonTerminal::ControlStmt => "controlStmt",
            NonTerminal::Variable => "variable",
            NonTerminal::Assignment => "assignment",
            NonTerminal::CallMethod => "callMethod",
            NonTerminal::Return => "return",
            NonTerminal::Print => "print",
            NonTerminal::If => "if",
            NonTerminal::While => "while",
            NonTerminal::DoWhile => "doWhile",
            NonTerminal::For => "for",
            NonTerminal::Switch => "switch",
            NonTerminal::Params => "params",
            NonTerminal::ParamValues => "paramValues",
            NonTerminal::Expression => "expression",
            NonTerminal::X => "x",
            NonTerminal::Y => "y",
            NonTerminal::R => "R",
            NonTerminal::E => "E",
            NonTerminal::A => "A",
            NonTerminal::B => "B",
            NonTerminal::C => "C",
            NonTerminal::Type => "type",
        }
    }

    /// Position in [`NonTerminal::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Member of a FIRST or FOLLOW set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Lexeme(&'static str),
    Kind(TokenKind),
    EndOfInput,
}

use Terminal::{Kind, Lexeme};

const TYPES: [Terminal; 6] = [
    Lexeme("int"),
    Lexeme("float"),
    Lexeme("boolean"),
    Lexeme("char"),
    Lexeme("string"),
    Lexeme("void"),
];

const ATOMS: [Terminal; 11] = [
    Kind(TokenKind::Integer),
    Kind(TokenKind::Float),
    Kind(TokenKind::Octal),
    Kind(TokenKind::Hexadecimal),
    Kind(TokenKind::Binary),
    Kind(TokenKind::Char),
    Kind(TokenKind::String),
    Lexeme("true"),
    Lexeme("false"),
    Kind(TokenKind::Id),
    Lexeme("("),
];

const EXPRESSION_END: [Terminal; 5] = [
    Lexeme(")"),
    Lexeme(";"),
    Lexeme(","),
    Lexeme(":"),
    Lexeme("}"),
];

fn union(parts: &[&[Terminal]]) -> Vec<Terminal> {
    let mut set = Vec::new();
    for part in parts {
        for terminal in part.iter() {
            if !set.contains(terminal) {
                set.push(*terminal);
            }
        }
    }
    set
}

/// FIRST set of `nt`.
pub fn first(nt: NonTerminal) -> Vec<Terminal> {
    match nt {
        NonTerminal::Program => vec![Lexeme("class")],
        NonTerminal::Method
        | NonTerminal::Variable
        | NonTerminal::Params
        | NonTerminal::Type => TYPES.to_vec(),
        NonTerminal::Body => union(&[
            &first(NonTerminal::SimpleStmt),
            &first(NonTerminal::ControlStmt),
            &[Lexeme(";")],
        ]),
        NonTerminal::SimpleStmt => union(&[
            &TYPES,
            &[Kind(TokenKind::Id), Lexeme("return"), Lexeme("print")],
        ]),
        NonTerminal::ControlStmt => vec![
            Lexeme("if"),
            Lexeme("while"),
            Lexeme("do"),
            Lexeme("for"),
            Lexeme("switch"),
            Lexeme("break"),
            Lexeme("continue"),
        ],
        NonTerminal::Assignment | NonTerminal::CallMethod => vec![Kind(TokenKind::Id)],
        NonTerminal::Return => vec![Lexeme("return")],
        NonTerminal::Print => vec![Lexeme("print")],
        NonTerminal::If => vec![Lexeme("if")],
        NonTerminal::While => vec![Lexeme("while")],
        NonTerminal::DoWhile => vec![Lexeme("do")],
        NonTerminal::For => vec![Lexeme("for")],
        NonTerminal::Switch => vec![Lexeme("switch")],
        NonTerminal::ParamValues
        | NonTerminal::Expression
        | NonTerminal::X
        | NonTerminal::Y => union(&[&first(NonTerminal::R), &[Lexeme("!")]]),
        NonTerminal::R | NonTerminal::E | NonTerminal::A | NonTerminal::B => {
            union(&[&[Lexeme("-")], &ATOMS])
        }
        NonTerminal::C => ATOMS.to_vec(),
    }
}

/// FOLLOW set of `nt`.
pub fn follow(nt: NonTerminal) -> Vec<Terminal> {
    match nt {
        NonTerminal::Program => vec![Terminal::EndOfInput],
        NonTerminal::Method => union(&[&TYPES, &[Lexeme("}")]]),
        NonTerminal::Body
        | NonTerminal::SimpleStmt
        | NonTerminal::ControlStmt
        | NonTerminal::Return
        | NonTerminal::Print
        | NonTerminal::If
        | NonTerminal::While
        | NonTerminal::DoWhile
        | NonTerminal::For
        | NonTerminal::Switch => union(&[
            &first(NonTerminal::Body),
            &[Lexeme("}"), Lexeme("case"), Lexeme("else")],
        ]),
        NonTerminal::Variable | NonTerminal::Assignment => vec![Lexeme(";"), Lexeme(")")],
        NonTerminal::CallMethod => union(&[&follow(NonTerminal::C), &[Lexeme(";")]]),
        NonTerminal::Params | NonTerminal::ParamValues => vec![Lexeme(")")],
        NonTerminal::Expression => EXPRESSION_END.to_vec(),
        NonTerminal::X => union(&[&[Lexeme("|"), Lexeme("||")], &EXPRESSION_END]),
        NonTerminal::Y => union(&[&[Lexeme("&"), Lexeme("&&")], &follow(NonTerminal::X)]),
        NonTerminal::R => union(&[
            &[
                Lexeme("<"),
                Lexeme(">"),
                Lexeme("=="),
                Lexeme("!="),
                Lexeme("<="),
                Lexeme(">="),
            ],
            &follow(NonTerminal::Y),
        ]),
        NonTerminal::E => union(&[&[Lexeme("+"), Lexeme("-")], &follow(NonTerminal::R)]),
        NonTerminal::A | NonTerminal::B | NonTerminal::C => {
            union(&[&[Lexeme("*"), Lexeme("/"), Lexeme("%")], &follow(NonTerminal::E)])
        }
        // `,` and `)` end recovery inside a parameter list
        NonTerminal::Type => vec![Kind(TokenKind::Id), Lexeme(","), Lexeme(")")],
    }
}

/// A FIRST or FOLLOW set indexed for membership tests.
#[derive(Debug, Clone, Default)]
pub struct TerminalSet {
    lexemes: FxHashSet<&'static str>,
    kinds: FxHashSet<TokenKind>,
    end: bool,
}

impl TerminalSet {
    /// `None` stands for end of input.
    pub fn contains(&self, token: Option<&Token>) -> bool {
        match token {
            Some(token) => {
                self.lexemes.contains(token.lexeme.as_str()) || self.kinds.contains(&token.kind)
            }
            None => self.end,
        }
    }

    pub fn len(&self) -> usize {
        self.lexemes.len() + self.kinds.len() + usize::from(self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Terminal> for TerminalSet {
    fn from_iter<I: IntoIterator<Item = Terminal>>(iter: I) -> Self {
        let mut set = TerminalSet::default();
        for terminal in iter {
            match terminal {
                Terminal::Lexeme(lexeme) => {
                    set.lexemes.insert(lexeme);
                }
                Terminal::Kind(kind) => {
                    set.kinds.insert(kind);
                }
                Terminal::EndOfInput => set.end = true,
            }
        }
        set
    }
}
