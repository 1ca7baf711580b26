use thiserror::Error;

use crate::{lexer::LexError, parser::ParseError, translate::TranslateError};

type Source = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned at the crate boundary.
///
/// Every malformed query surfaces as [`Error::InvalidInput`] so callers can
/// treat them uniformly; the wrapped cause (and, when one exists, the typed
/// source error) stays available for diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    #[error("odata syntax error: {cause}")]
    InvalidInput {
        cause: String,
        #[source]
        source: Option<Source>,
    },
}

impl Error {
    /// An `InvalidInput` error with only a message.
    pub fn invalid_input(cause: impl Into<String>) -> Self {
        Error::InvalidInput {
            cause: cause.into(),
            source: None,
        }
    }

    fn wrap<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::InvalidInput {
            cause: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// The human-readable cause.
    pub fn cause(&self) -> &str {
        match self {
            Error::InvalidInput { cause, .. } => cause,
        }
    }

    /// The typed error this one wraps, if it is of type `E`.
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Error::InvalidInput { source, .. } => {
                source.as_deref().and_then(|s| s.downcast_ref::<E>())
            }
        }
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Error::wrap(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::wrap(e)
    }
}

impl From<TranslateError> for Error {
    fn from(e: TranslateError) -> Self {
        Error::wrap(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
