use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::reset::errors::ResetTokenError;
use crate::domain::reset::models::PasswordResetToken;

/// Outcome of an atomic consume attempt.
#[derive(Debug, Clone)]
pub enum ConsumeClaim {
    /// This call marked the token consumed; the caller owns the reset.
    Consumed(PasswordResetToken),
    AlreadyUsed,
    Expired,
    Missing,
}

/// Persistence operations for password reset tokens.
///
/// `consume` mirrors the refresh ledger's rotation claim: the
/// check-unused-then-mark must be one atomic conditional update, so
/// two racing confirmations of the same link produce exactly one
/// password change.
#[async_trait]
pub trait ResetTokenRepository: Send + Sync + 'static {
    /// Persist a new token record.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn insert(&self, token: PasswordResetToken)
        -> Result<PasswordResetToken, ResetTokenError>;

    /// Retrieve a token by its opaque value.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_value(
        &self,
        value: &str,
    ) -> Result<Option<PasswordResetToken>, ResetTokenError>;

    /// Atomically consume a token.
    ///
    /// In one storage step: absent values yield `Missing`; consumed
    /// records yield `AlreadyUsed`; expired-but-unconsumed records
    /// yield `Expired` untouched; otherwise the record is marked
    /// consumed and returned as `Consumed`.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn consume(&self, value: &str) -> Result<ConsumeClaim, ResetTokenError>;

    /// Mark every outstanding token for an account consumed.
    ///
    /// # Returns
    /// Number of tokens invalidated by this call
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn invalidate_all_for_account(
        &self,
        account_id: &AccountId,
    ) -> Result<u64, ResetTokenError>;
}
