use thiserror::Error;

use crate::domain::account::errors::AccountError;
use crate::domain::session::errors::SessionError;

/// Top-level error for authentication operations.
///
/// Every variant is a recoverable-by-caller condition: the transport
/// maps them to protocol signaling and the user re-prompts or
/// re-authenticates. Messages never carry passwords, hashes, raw token
/// values or key material.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is locked")]
    AccountLocked,

    #[error("Account is inactive")]
    AccountInactive,

    #[error("Token error: {0}")]
    Token(#[from] credentials::TokenError),

    #[error("Password error: {0}")]
    Password(#[from] credentials::PasswordError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(err.to_string())
    }
}
