use std::fmt;

use crate::ast::{CompareOp, Function, LogicalOp};

/// Literal value, typed at lex time.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// String literal, unescaped
    String(String),
    /// Integer literal
    Integer(i64),
    /// Floating point literal
    Float(f64),
    /// Boolean literal
    Boolean(bool),
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::String(_) => "string",
            Literal::Integer(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Literal::Integer(n) => write!(f, "{n}"),
            Literal::Float(n) => write!(f, "{n:?}"),
            Literal::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// Operator tree node for a parsed `$filter` expression.
///
/// Trees built by the parser always have an identifier on the left of a
/// comparison and a literal on the right, and string functions always take
/// an identifier and a string literal. Trees assembled by hand may break
/// those rules; the translator rejects them instead of guessing.
///
/// Nodes are never modified once built, so a parsed tree can be cached and
/// translated repeatedly.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Field reference
    ///
    /// # Example
    /// ```text
    /// Name
    /// ```
    Identifier(String),

    /// Literal operand
    ///
    /// # Example
    /// ```text
    /// 'john'
    /// 42
    /// ```
    Literal(Literal),

    /// Comparison
    ///
    /// # Example
    /// ```text
    /// Age ge 18
    /// ```
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Logical combination of two filters
    ///
    /// # Example
    /// ```text
    /// Age ge 18 and City eq 'NY'
    /// ```
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// String function call
    ///
    /// # Examples
    /// ```text
    /// startswith(Name, 'Jo')
    /// Name startswith 'Jo'
    /// ```
    Call { function: Function, args: Vec<Expr> },
}

impl Expr {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn compare(op: CompareOp, left: Expr, right: Expr) -> Self {
        Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(function: Function, field: Expr, argument: Expr) -> Self {
        Expr::Call {
            function,
            args: vec![field, argument],
        }
    }

    /// Name of the node's operator: a keyword such as `eq` or `startswith`,
    /// or `identifier`/`literal` for leaves.
    pub fn operator(&self) -> &'static str {
        match self {
            Expr::Identifier(_) => "identifier",
            Expr::Literal(_) => "literal",
            Expr::Compare { op, .. } => op.keyword(),
            Expr::Logical { op, .. } => op.keyword(),
            Expr::Call { function, .. } => function.keyword(),
        }
    }

    /// Ordered children of the node. Leaves have none.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Identifier(_) | Expr::Literal(_) => Vec::new(),
            Expr::Compare { left, right, .. } | Expr::Logical { left, right, .. } => {
                vec![left.as_ref(), right.as_ref()]
            }
            Expr::Call { args, .. } => args.iter().collect(),
        }
    }
}

/// Renders the tree back to OData syntax, parenthesizing every logical node.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(name) => f.write_str(name),
            Expr::Literal(lit) => write!(f, "{lit}"),
            Expr::Compare { op, left, right } => write!(f, "{left} {op} {right}"),
            Expr::Logical { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::Call { function, args } => {
                write!(f, "{function}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
