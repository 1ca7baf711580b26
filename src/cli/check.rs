//! Parse and translate a single `$filter` expression

use super::CliError;
use crate::{output, parser::parse_str, translate};

/// Options for the filter command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The `$filter` expression
    pub filter: String,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't translate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Filter translated; holds the rendered predicate
    Success(String),
}

/// Execute a filter check
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expr = parse_str(&options.filter)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let doc = translate(&expr)?;
    let json = if options.pretty {
        output::to_json_pretty(&doc)?
    } else {
        output::to_json(&doc)?
    };
    Ok(CheckResult::Success(json))
}
