//! CLI support for odata-mongo
//!
//! Provides programmatic access to the `odata` commands so they can be
//! embedded in other tools.

mod check;
mod query;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use query::{QueryOptions, execute_query};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed filter or query option
    #[error(transparent)]
    Query(#[from] crate::Error),

    /// JSON rendering failed
    #[error("cannot render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No query string provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Query(e.into())
    }
}

impl From<crate::TranslateError> for CliError {
    fn from(e: crate::TranslateError) -> Self {
        CliError::Query(e.into())
    }
}
