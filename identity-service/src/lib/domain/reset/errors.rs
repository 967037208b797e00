use thiserror::Error;

/// Error for password-reset ledger operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResetTokenError {
    #[error("Reset token not found")]
    TokenNotFound,

    #[error("Reset token is expired")]
    TokenExpired,

    #[error("Reset token was already used")]
    TokenAlreadyUsed,

    #[error("Storage error: {0}")]
    Storage(String),
}
