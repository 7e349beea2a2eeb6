//! Domain error types

use thiserror::Error;

/// Errors raised while expanding property placeholders.
///
/// Every variant is terminal for the expansion call that raised it; no
/// partially expanded string is ever returned alongside an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaceholderError {
    /// A prefix token exists in the text but no unescaped suffix token
    /// closes it.
    #[error("missing {token} from the text: {text}")]
    MissingSuffix {
        /// The suffix token that was expected.
        token: String,
        /// The text being scanned when the error was raised.
        text: String,
    },

    /// An unescaped suffix token was found with no preceding unescaped
    /// prefix token.
    #[error("missing {token} from the text: {text}")]
    MissingPrefix {
        /// The prefix token that was expected.
        token: String,
        /// The text being scanned when the error was raised.
        text: String,
    },

    /// No value could be resolved for a placeholder key.
    #[error(
        "property with key [{key}]{} not found in properties from text: {text}",
        fallback_clause(.fallback_key)
    )]
    PropertyNotFound {
        /// The augmented key that was looked up.
        key: String,
        /// The raw key, when fallback to the unaugmented key was attempted.
        fallback_key: Option<String>,
        /// The text being scanned when the error was raised.
        text: String,
    },

    /// A key was about to be substituted while already being substituted
    /// higher up the same resolution path.
    #[error("circular reference detected with key [{key}] from text: {text}")]
    CircularReference {
        /// The raw key that closed the cycle.
        key: String,
        /// The original top-level input.
        text: String,
    },
}

fn fallback_clause(fallback_key: &Option<String>) -> String {
    fallback_key
        .as_ref()
        .map(|key| format!(" (and original key [{key}])"))
        .unwrap_or_default()
}

/// Result type alias for placeholder expansion.
pub type PlaceholderResult<T> = Result<T, PlaceholderError>;

/// Validation errors raised while constructing placeholder configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The delimiter token pair is unusable.
    #[error("invalid delimiters: {0}")]
    InvalidDelimiters(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
