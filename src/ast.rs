//! # OData Filter - Abstract Syntax Tree
//!
//! This module defines the token stream and the operator tree produced when an
//! OData `$filter` expression is parsed, together with the query-level types
//! that carry `$select`, `$orderby`, `$top` and `$skip`.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Operator tree nodes (identifiers, literals, comparisons, calls)
//! - **[operators]** - Comparison, logical and string-function operators
//! - **[query]** - The assembled query descriptor and order items
//!
//! ## Quick Start
//!
//! ```text
//! Price gt 100 and startswith(Name, 'Jo')
//! ```
//!
//! parses to
//!
//! ```text
//! and
//! ├── gt
//! │   ├── Price
//! │   └── 100
//! └── startswith
//!     ├── Name
//!     └── 'Jo'
//! ```
//!
//! ## Precedence
//!
//! From lowest to highest: `or`, `and`, comparisons, function calls, and
//! parenthesized groups. Chains of `and`/`or` fold to the left, so
//! `a and b and c` is `and(and(a, b), c)`.
//!
//! ## Literals
//!
//! Literal kinds are fixed by the lexer: single-quoted strings (with `''` as
//! an escaped quote), integers, floats and the booleans `true`/`false`. The
//! tree never holds an untyped value.
pub mod expressions;
pub mod operators;
pub mod query;
pub mod tokens;

pub use expressions::{Expr, Literal};
pub use operators::{CompareOp, Function, LogicalOp, Operator};
pub use query::{OrderItem, QueryDescriptor, SortDirection};
pub use tokens::{Spanned, Token};
