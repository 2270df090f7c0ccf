//! Primitive types and the type/operator compatibility matrix
//!
//! The matrix is a dense `[operator][left][right]` table over the nine
//! primitive types. Every cell starts as [`Cell::Error`]; the constructor
//! overrides the cells that encode numeric promotion, string concatenation,
//! comparisons, logic and assignment compatibility.
//!
//! # Cell rules
//!
//! | operators           | operands                     | result            |
//! |---------------------|------------------------------|-------------------|
//! | `+ - * /`           | numeric × numeric            | `float` if either side is `float`, else `int` |
//! | `%`                 | integral × integral          | `int`             |
//! | `+`                 | `string` × non-void (either order) | `string`    |
//! | `< > <= >=`         | numeric × numeric            | `boolean`         |
//! | `== !=`             | numeric × numeric, or same `boolean`/`string` | `boolean` |
//! | `&& \|\|`           | `boolean` × `boolean`        | `boolean`         |
//! | `!`                 | `boolean` (diagonal cell)    | `boolean`         |
//! | `=`                 | same type, `float` ← integral, integral ← integral | `OK` |
//!
//! Integral types are `int`, `char`, `binary`, `octal` and `hexadecimal`;
//! numeric adds `float`.

use crate::parser::token::{Token, TokenKind};
use std::fmt;

/// Primitive types. [`Type::Error`] is not declarable: it is the type of an
/// expression whose operands did not combine or whose name did not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Boolean,
    Char,
    String,
    Binary,
    Octal,
    Hexadecimal,
    Void,
    Error,
}

impl Type {
    /// The nine matrix types, in matrix index order.
    pub const PRIMITIVES: [Type; 9] = [
        Type::Int,
        Type::Float,
        Type::Boolean,
        Type::Char,
        Type::String,
        Type::Binary,
        Type::Octal,
        Type::Hexadecimal,
        Type::Void,
    ];

    pub fn index(self) -> Option<usize> {
        Type::PRIMITIVES.iter().position(|&t| t == self)
    }

    /// Declarable type keywords.
    pub fn from_keyword(lexeme: &str) -> Option<Type> {
        match lexeme {
            "int" => Some(Type::Int),
            "float" => Some(Type::Float),
            "boolean" => Some(Type::Boolean),
            "char" => Some(Type::Char),
            "string" => Some(Type::String),
            "void" => Some(Type::Void),
            _ => None,
        }
    }

    /// Type of a literal token, if it is one.
    pub fn of_literal(token: &Token) -> Option<Type> {
        match token.kind {
            TokenKind::Integer => Some(Type::Int),
            TokenKind::Float => Some(Type::Float),
            TokenKind::Octal => Some(Type::Octal),
            TokenKind::Hexadecimal => Some(Type::Hexadecimal),
            TokenKind::Binary => Some(Type::Binary),
            TokenKind::Char => Some(Type::Char),
            TokenKind::String => Some(Type::String),
            TokenKind::Keyword if token.is("true") || token.is("false") => Some(Type::Boolean),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Boolean => "boolean",
            Type::Char => "char",
            Type::String => "string",
            Type::Binary => "binary",
            Type::Octal => "octal",
            Type::Hexadecimal => "hexadecimal",
            Type::Void => "void",
            Type::Error => "error",
        }
    }

    /// Initial value recorded for a declaration without one.
    pub fn default_value(self) -> &'static str {
        match self {
            Type::Int => "0",
            Type::Float => "0.0f",
            Type::Boolean => "false",
            Type::Char => "''",
            Type::String => "\"\"",
            _ => "",
        }
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            Type::Int | Type::Char | Type::Binary | Type::Octal | Type::Hexadecimal
        )
    }

    pub fn is_numeric(self) -> bool {
        self.is_integral() || self == Type::Float
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The fifteen matrix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Assign,
    And,
    Or,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    Not,
}

impl Operator {
    pub const ALL: [Operator; 15] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Mod,
        Operator::Assign,
        Operator::And,
        Operator::Or,
        Operator::Lt,
        Operator::Gt,
        Operator::Le,
        Operator::Ge,
        Operator::Eq,
        Operator::Ne,
        Operator::Not,
    ];

    /// Single `&` and `|` fold like their doubled forms.
    pub fn from_lexeme(lexeme: &str) -> Option<Operator> {
        let op = match lexeme {
            "+" => Operator::Add,
            "-" => Operator::Sub,
            "*" => Operator::Mul,
            "/" => Operator::Div,
            "%" => Operator::Mod,
            "=" => Operator::Assign,
            "&&" | "&" => Operator::And,
            "||" | "|" => Operator::Or,
            "<" => Operator::Lt,
            ">" => Operator::Gt,
            "<=" => Operator::Le,
            ">=" => Operator::Ge,
            "==" => Operator::Eq,
            "!=" => Operator::Ne,
            "!" => Operator::Not,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Assign => "=",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Not => "!",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Type(Type),
    Ok,
    Error,
}

const N_TYPES: usize = Type::PRIMITIVES.len();
const N_OPS: usize = Operator::ALL.len();

#[derive(Debug, Clone)]
pub struct TypeMatrix {
    cells: [[[Cell; N_TYPES]; N_TYPES]; N_OPS],
}

impl TypeMatrix {
    pub fn new() -> Self {
        let mut matrix = TypeMatrix {
            cells: [[[Cell::Error; N_TYPES]; N_TYPES]; N_OPS],
        };

        for left in Type::PRIMITIVES {
            for right in Type::PRIMITIVES {
                if left.is_numeric() && right.is_numeric() {
                    let promoted = if left == Type::Float || right == Type::Float {
                        Type::Float
                    } else {
                        Type::Int
                    };
                    for op in [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div] {
                        matrix.set(op, left, right, Cell::Type(promoted));
                    }
                    for op in [
                        Operator::Lt,
                        Operator::Gt,
                        Operator::Le,
                        Operator::Ge,
                        Operator::Eq,
                        Operator::Ne,
                    ] {
                        matrix.set(op, left, right, Cell::Type(Type::Boolean));
                    }
                }

                if left.is_integral() && right.is_integral() {
                    matrix.set(Operator::Mod, left, right, Cell::Type(Type::Int));
                    matrix.set(Operator::Assign, left, right, Cell::Ok);
                }

                let concatenates = (left == Type::String && right != Type::Void)
                    || (right == Type::String && left != Type::Void);
                if concatenates {
                    matrix.set(Operator::Add, left, right, Cell::Type(Type::String));
                }
            }

            if left.is_integral() {
                matrix.set(Operator::Assign, Type::Float, left, Cell::Ok);
            }
            if left != Type::Void {
                matrix.set(Operator::Assign, left, left, Cell::Ok);
            }
        }

        for op in [Operator::Eq, Operator::Ne] {
            matrix.set(op, Type::Boolean, Type::Boolean, Cell::Type(Type::Boolean));
            matrix.set(op, Type::String, Type::String, Cell::Type(Type::Boolean));
        }
        for op in [Operator::And, Operator::Or, Operator::Not] {
            matrix.set(op, Type::Boolean, Type::Boolean, Cell::Type(Type::Boolean));
        }

        matrix
    }

    fn set(&mut self, op: Operator, left: Type, right: Type, cell: Cell) {
        if let (Some(l), Some(r)) = (left.index(), right.index()) {
            self.cells[op.index()][l][r] = cell;
        }
    }

    /// Raw cell; anything involving [`Type::Error`] is an error cell.
    pub fn lookup(&self, op: Operator, left: Type, right: Type) -> Cell {
        match (left.index(), right.index()) {
            (Some(l), Some(r)) => self.cells[op.index()][l][r],
            _ => Cell::Error,
        }
    }

    /// Result type of `left op right`. `OK` cells keep the left type.
    pub fn binary(&self, op: Operator, left: Type, right: Type) -> Type {
        match self.lookup(op, left, right) {
            Cell::Type(t) => t,
            Cell::Ok => left,
            Cell::Error => Type::Error,
        }
    }

    /// `!operand` via the diagonal of the `!` row.
    pub fn not(&self, operand: Type) -> Type {
        self.binary(Operator::Not, operand, operand)
    }

    /// Unary minus keeps numeric types.
    pub fn negate(&self, operand: Type) -> Type {
        if operand.is_numeric() {
            operand
        } else {
            Type::Error
        }
    }

    pub fn assignable(&self, target: Type, value: Type) -> bool {
        self.lookup(Operator::Assign, target, value) == Cell::Ok
    }
}

impl Default for TypeMatrix {
    fn default() -> Self {
        Self::new()
    }
}
