//! Authentication error types.
//!
//! Failures deliberately collapse detail. Each strategy surfaces a single
//! generic message for anything that is "well-formed but wrong" — unknown
//! token, wrong username, inactive account — so that error text cannot be
//! used to enumerate accounts. Structural problems with the request envelope
//! are the one place specific messages are allowed, because they describe
//! the client's request shape rather than credential validity. Diagnostic
//! detail belongs in [`tracing`] output, never in a returned message.

use serde::Serialize;
use thiserror::Error;

/// Convenience alias for authentication results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur while verifying credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential envelope is structurally invalid: wrong scheme word,
    /// embedded spaces in a credential blob, or a missing URL parameter.
    #[error("{0}")]
    MalformedCredentials(String),

    /// Well-formed credentials that do not identify an active principal.
    ///
    /// Carries the strategy's fixed literal; sub-causes are never
    /// distinguished.
    #[error("{0}")]
    InvalidCredentials(&'static str),

    /// The request payload violated its schema.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The verification code did not reconstruct a valid action.
    #[error("Invalid code.")]
    InvalidCode,
}

/// Per-field schema violations, propagated verbatim to the caller.
#[derive(Debug, Clone, Error, Serialize)]
#[error("validation failed for {} field(s)", .fields.len())]
pub struct ValidationErrors {
    /// The individual field violations.
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    /// A single-field violation.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            fields: vec![FieldError {
                field: field.into(),
                message: message.into(),
            }],
        }
    }
}

/// One schema violation on one field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}
