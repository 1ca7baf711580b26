use std::fmt;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// Equal (`eq`)
    Equal,
    /// Not equal (`ne`)
    NotEqual,
    /// Greater than (`gt`)
    GreaterThan,
    /// Greater than or equal (`ge`)
    GreaterEqual,
    /// Less than (`lt`)
    LessThan,
    /// Less than or equal (`le`)
    LessEqual,
}

impl CompareOp {
    /// The OData keyword for this operator.
    pub fn keyword(self) -> &'static str {
        match self {
            CompareOp::Equal => "eq",
            CompareOp::NotEqual => "ne",
            CompareOp::GreaterThan => "gt",
            CompareOp::GreaterEqual => "ge",
            CompareOp::LessThan => "lt",
            CompareOp::LessEqual => "le",
        }
    }

    /// The MongoDB query operator this comparison translates to.
    pub fn mongo_operator(self) -> &'static str {
        match self {
            CompareOp::Equal => "$eq",
            CompareOp::NotEqual => "$ne",
            CompareOp::GreaterThan => "$gt",
            CompareOp::GreaterEqual => "$gte",
            CompareOp::LessThan => "$lt",
            CompareOp::LessEqual => "$lte",
        }
    }
}

/// Logical combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

impl LogicalOp {
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }

    pub fn mongo_operator(self) -> &'static str {
        match self {
            LogicalOp::And => "$and",
            LogicalOp::Or => "$or",
        }
    }
}

/// String-matching functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// `startswith(field, 'prefix')`
    StartsWith,
    /// `endswith(field, 'suffix')`
    EndsWith,
    /// `contains(field, 'text')`
    Contains,
}

impl Function {
    pub fn keyword(self) -> &'static str {
        match self {
            Function::StartsWith => "startswith",
            Function::EndsWith => "endswith",
            Function::Contains => "contains",
        }
    }

    /// Builds the anchored pattern for a literal.
    ///
    /// `contains` is only anchored at the start (`^.*text`), unlike
    /// `endswith` which pins both ends.
    pub fn pattern(self, literal: &str) -> String {
        match self {
            Function::StartsWith => format!("^{literal}"),
            Function::EndsWith => format!("^.*{literal}$"),
            Function::Contains => format!("^.*{literal}"),
        }
    }
}

/// Binary operators carried by [`Token::Operator`](crate::ast::Token::Operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Compare(CompareOp),
    Logical(LogicalOp),
}

impl Operator {
    pub fn keyword(self) -> &'static str {
        match self {
            Operator::Compare(op) => op.keyword(),
            Operator::Logical(op) => op.keyword(),
        }
    }

    /// Looks up an operator keyword. Matching is case-sensitive.
    pub fn from_keyword(word: &str) -> Option<Self> {
        let op = match word {
            "eq" => Operator::Compare(CompareOp::Equal),
            "ne" => Operator::Compare(CompareOp::NotEqual),
            "gt" => Operator::Compare(CompareOp::GreaterThan),
            "ge" => Operator::Compare(CompareOp::GreaterEqual),
            "lt" => Operator::Compare(CompareOp::LessThan),
            "le" => Operator::Compare(CompareOp::LessEqual),
            "and" => Operator::Logical(LogicalOp::And),
            "or" => Operator::Logical(LogicalOp::Or),
            _ => return None,
        };
        Some(op)
    }
}

impl Function {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "startswith" => Some(Function::StartsWith),
            "endswith" => Some(Function::EndsWith),
            "contains" => Some(Function::Contains),
            _ => None,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
