use thiserror::Error;

/// Error for refresh-token ledger operations.
///
/// Callers surface `TokenNotFound` and `TokenRevoked` identically, so
/// presenting a guessed value is indistinguishable from presenting a
/// revoked one; the kinds stay distinct internally for logging and for
/// reuse-detection handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Refresh token not found")]
    TokenNotFound,

    #[error("Refresh token is revoked")]
    TokenRevoked,

    #[error("Refresh token is expired")]
    TokenExpired,

    #[error("Storage error: {0}")]
    Storage(String),
}
