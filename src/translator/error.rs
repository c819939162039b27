//! Translation errors.

use thiserror::Error;

/// Errors returned by command translators.
///
/// None of these are fatal; they are returned straight to the caller, which
/// decides whether to show them to a user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The caller broke an input contract (empty key, empty channel, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The verb is not in the translator's command table
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// The verb exists but was given the wrong number of arguments
    #[error("wrong number of arguments for '{command}' command: got {got}, expected {expected}")]
    WrongArgumentCount {
        command: &'static str,
        got: usize,
        expected: String,
    },
}

impl TranslateError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TranslateError::InvalidArgument(msg.into())
    }
}

/// Result type for translation operations.
pub type TranslateResult<T> = Result<T, TranslateError>;
