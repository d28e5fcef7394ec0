use thiserror::Error;

/// Error type for token issuance and validation.
///
/// The decode variants map one-to-one onto the validation stages, so a
/// caller can tell an expired token apart from a forged or garbled one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token engine misconfigured: {0}")]
    Configuration(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,
}
