//! Error types for validator construction and field operations.

use thiserror::Error;

/// Errors raised by the validator's public operations.
///
/// A field failing its rules is not an error: that outcome is reported as
/// data through [`FieldValidationResult`](crate::FieldValidationResult).
#[derive(Debug, Error)]
pub enum VerdictError {
    /// The node handed to the constructor is not a form.
    #[error("validator root must be a form element, got <{tag}>")]
    NotAForm {
        /// Tag of the rejected node (`#text` for text nodes).
        tag: String,
    },

    /// `add_field` named a field that does not exist in the form.
    #[error("no field named \"{0}\" exists in the form")]
    UnknownField(String),

    /// A field operation named a field that was never registered.
    #[error("field \"{0}\" is not registered for validation")]
    UnregisteredField(String),

    /// A `pattern` rule was declared with an invalid regular expression.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The rejected pattern source.
        pattern: String,
        /// The regex compiler's complaint.
        source: regex::Error,
    },

    /// Options could not be read from JSON.
    #[error("invalid validator options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VerdictError>;
