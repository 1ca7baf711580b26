//! Translation of a filter tree into a MongoDB predicate document.
//!
//! | OData                     | Predicate                                  |
//! |---------------------------|--------------------------------------------|
//! | `Name eq 'john'`          | `{"Name": {"$eq": "john"}}`                |
//! | `Age ge 18`               | `{"Age": {"$gte": 18}}`                    |
//! | `a and b`                 | `{"$and": [a, b]}`                         |
//! | `startswith(Name, 'Jo')`  | `{"Name": {"$regex": "^Jo", ...}}`         |
//! | `endswith(Name, 'hn')`    | `{"Name": {"$regex": "^.*hn$", ...}}`      |
//! | `contains(Name, 'oh')`    | `{"Name": {"$regex": "^.*oh", ...}}`       |
//!
//! The tree is only borrowed. Translating the same tree twice yields equal
//! documents.

use log::trace;
use thiserror::Error;

use crate::{
    ast::{CompareOp, Expr, Function, Literal, LogicalOp},
    value::{DEFAULT_REGEX_OPTIONS, Document, ObjectId, ObjectIdError, Regex, Value},
};

/// Field whose `gt` comparisons take an object id literal.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslateError {
    #[error("'{operator}' expects a field name as its first operand, found {found}")]
    ExpectedIdentifier {
        operator: &'static str,
        found: &'static str,
    },

    #[error("'{operator}' expects a literal as its second operand, found {found}")]
    ExpectedLiteral {
        operator: &'static str,
        found: &'static str,
    },

    #[error("{function} expects a string literal, found {found}")]
    ExpectedString {
        function: Function,
        found: &'static str,
    },

    #[error("{function} takes {expected} arguments, got {found}")]
    WrongArity {
        function: Function,
        expected: usize,
        found: usize,
    },

    #[error("invalid object id for _id: {0}")]
    InvalidObjectId(String),

    #[error("a bare {0} is not a filter")]
    NotAFilter(&'static str),
}

/// Kind name of a node used where a specific kind was required.
fn found(expr: &Expr) -> &'static str {
    match expr {
        Expr::Literal(lit) => lit.kind(),
        other => other.operator(),
    }
}

fn field_name(operator: &'static str, expr: &Expr) -> Result<String, TranslateError> {
    match expr {
        Expr::Identifier(name) => Ok(name.clone()),
        other => Err(TranslateError::ExpectedIdentifier {
            operator,
            found: found(other),
        }),
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::String(s) => Value::String(s.clone()),
        Literal::Integer(n) => Value::Integer(*n),
        Literal::Float(n) => Value::Float(*n),
        Literal::Boolean(b) => Value::Boolean(*b),
    }
}

fn object_id(literal: &Literal) -> Result<ObjectId, TranslateError> {
    let Literal::String(text) = literal else {
        return Err(TranslateError::InvalidObjectId(format!(
            "expected a hex string, found {}",
            literal.kind()
        )));
    };
    text.parse()
        .map_err(|e: ObjectIdError| TranslateError::InvalidObjectId(e.to_string()))
}

fn single(key: String, value: Value) -> Document {
    let mut doc = Document::with_capacity(1);
    doc.insert(key, value);
    doc
}

fn translate_compare(
    op: CompareOp,
    left: &Expr,
    right: &Expr,
) -> Result<Document, TranslateError> {
    let field = field_name(op.keyword(), left)?;
    let Expr::Literal(literal) = right else {
        return Err(TranslateError::ExpectedLiteral {
            operator: op.keyword(),
            found: found(right),
        });
    };

    let value = if op == CompareOp::GreaterThan && field == ID_FIELD {
        Value::ObjectId(object_id(literal)?)
    } else {
        literal_value(literal)
    };

    let condition = single(op.mongo_operator().to_string(), value);
    Ok(single(field, Value::Document(condition)))
}

fn translate_logical(
    op: LogicalOp,
    left: &Expr,
    right: &Expr,
) -> Result<Document, TranslateError> {
    // Left first: when both branches are invalid the left error wins.
    let left = translate(left)?;
    let right = translate(right)?;
    Ok(single(
        op.mongo_operator().to_string(),
        Value::Array(vec![Value::Document(left), Value::Document(right)]),
    ))
}

fn translate_call(function: Function, args: &[Expr]) -> Result<Document, TranslateError> {
    let [field, argument] = args else {
        return Err(TranslateError::WrongArity {
            function,
            expected: 2,
            found: args.len(),
        });
    };

    let field = field_name(function.keyword(), field)?;
    let text = match argument {
        Expr::Literal(Literal::String(s)) => s,
        other => {
            return Err(TranslateError::ExpectedString {
                function,
                found: found(other),
            });
        }
    };

    let regex = Regex::new(function.pattern(text), DEFAULT_REGEX_OPTIONS);
    Ok(single(field, Value::Regex(regex)))
}

/// Translates a filter tree into a predicate document.
///
/// Children are translated before their parent is assembled; the first error
/// encountered is returned and nothing partial is produced.
pub fn translate(expr: &Expr) -> Result<Document, TranslateError> {
    let doc = match expr {
        Expr::Compare { op, left, right } => translate_compare(*op, left, right)?,
        Expr::Logical { op, left, right } => translate_logical(*op, left, right)?,
        Expr::Call { function, args } => translate_call(*function, args)?,
        Expr::Identifier(_) | Expr::Literal(_) => {
            return Err(TranslateError::NotAFilter(expr.operator()));
        }
    };
    trace!("translated '{}' ({} keys)", expr.operator(), doc.len());
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_does_not_touch_tree() {
        let expr = Expr::compare(
            CompareOp::Equal,
            Expr::identifier("Name"),
            Expr::string("O'Neil"),
        );
        let before = expr.clone();
        let first = translate(&expr).unwrap();
        let second = translate(&expr).unwrap();
        assert_eq!(expr, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_literal_on_the_left_is_rejected() {
        let expr = Expr::compare(
            CompareOp::Equal,
            Expr::string("Name"),
            Expr::string("john"),
        );
        assert_eq!(
            translate(&expr),
            Err(TranslateError::ExpectedIdentifier {
                operator: "eq",
                found: "string",
            })
        );
    }
}
