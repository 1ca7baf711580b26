use std::fmt;

use crate::ast::{Function, Operator};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// String literal enclosed in single quotes, already unescaped
    ///
    /// # Examples
    /// ```text
    /// 'john'
    /// 'O''Neil'     // O'Neil
    /// ''            // empty string
    /// ```
    String(String),

    /// Integer
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -10
    /// ```
    Integer(i64),

    /// Number with a fraction or exponent
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -0.5
    /// 1e6
    /// ```
    Float(f64),

    /// Boolean values
    ///
    /// # Examples
    /// ```text
    /// true
    /// false
    /// ```
    Boolean(bool),

    // Identifiers
    /// Field name
    ///
    /// Must start with a letter or underscore, followed by letters, digits,
    /// underscores, dots or slashes.
    ///
    /// # Examples
    /// ```text
    /// Name
    /// _id
    /// Address.City
    /// ```
    Identifier(String),

    // Operators
    /// Comparison (`eq`, `ne`, `gt`, `ge`, `lt`, `le`) or logical (`and`, `or`)
    /// keyword
    Operator(Operator),

    /// String function keyword (`startswith`, `endswith`, `contains`)
    Function(Function),

    // Delimiters
    /// Left parenthesis for grouping or function calls
    LParen,

    /// Right parenthesis
    RParen,

    /// Comma separating function arguments
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Token::Integer(n) => write!(f, "{n}"),
            Token::Float(n) => write!(f, "{n:?}"),
            Token::Boolean(b) => write!(f, "{b}"),
            Token::Identifier(name) => f.write_str(name),
            Token::Operator(op) => write!(f, "{op}"),
            Token::Function(func) => write!(f, "{func}"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

/// A token together with the character offset it started at.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

impl Spanned {
    pub fn new(token: Token, position: usize) -> Self {
        Spanned { token, position }
    }
}
