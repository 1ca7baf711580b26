//! Parse a full query string into a query descriptor

use super::CliError;
use crate::{output::query_to_value, params::parse_query_string};

/// Options for the query command
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Raw query string, e.g. `$filter=Age gt 5&$top=10`
    pub query: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
}

/// Execute a query command, returning the rendered descriptor
pub fn execute_query(options: &QueryOptions) -> Result<String, CliError> {
    let raw = options.query.as_deref().ok_or(CliError::NoInput)?;
    let query = parse_query_string(raw.trim())?;
    let value = query_to_value(&query)?;

    let json = if options.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(json)
}
