use thiserror::Error;

/// Error type for access-token operations.
///
/// `Expired` and `Invalid` are deliberately distinct: an expired token
/// may legitimately trigger a refresh attempt, a bad signature must not.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
