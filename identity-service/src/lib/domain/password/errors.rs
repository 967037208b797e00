use thiserror::Error;

use crate::domain::account::errors::AccountError;
use crate::domain::reset::errors::ResetTokenError;
use crate::domain::session::errors::SessionError;

/// Error for mail delivery operations
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    #[error("Failed to deliver mail: {0}")]
    Delivery(String),
}

/// Top-level error for password reset and change operations.
#[derive(Debug, Error)]
pub enum PasswordFlowError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Reset token error: {0}")]
    Reset(#[from] ResetTokenError),

    #[error("Password error: {0}")]
    Password(#[from] credentials::PasswordError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),
}
