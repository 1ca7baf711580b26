//! Parse OData query options and compile `$filter` expressions into
//! MongoDB-style predicate documents.
//!
//! ```
//! use odata_mongo::{parse_filter, translate_filter_to_predicate, output::to_json};
//!
//! let expr = parse_filter("Age gt 5 and City eq 'NY'").unwrap();
//! let doc = translate_filter_to_predicate(&expr).unwrap();
//! assert_eq!(
//!     to_json(&doc).unwrap(),
//!     r#"{"$and":[{"Age":{"$gt":5}},{"City":{"$eq":"NY"}}]}"#
//! );
//! ```
pub mod ast;
pub mod cli;
pub mod error;
pub mod lexer;
pub mod output;
pub mod params;
pub mod parser;
pub mod translate;
pub mod value;

pub use ast::{Expr, Literal, OrderItem, QueryDescriptor, SortDirection, Token};
pub use error::{Error, Result};
pub use lexer::{LexError, Lexer, Position, tokenize};
pub use params::{parse_order_items, parse_orderby, parse_query, parse_query_string, parse_select};
pub use parser::{ParseError, Parser};
pub use translate::{TranslateError, translate};
pub use value::{Document, ObjectId, Regex, Value};

/// Parses a `$filter` expression into its operator tree.
pub fn parse_filter(filter: &str) -> Result<Expr> {
    Ok(parser::parse_str(filter)?)
}

/// Translates a parsed filter into a predicate document.
pub fn translate_filter_to_predicate(expr: &Expr) -> Result<Document> {
    Ok(translate(expr)?)
}

/// Parses and translates a `$filter` expression in one step.
pub fn filter_to_predicate(filter: &str) -> Result<Document> {
    let expr = parse_filter(filter)?;
    translate_filter_to_predicate(&expr)
}
