use std::sync::Arc;

use chrono::Duration;

use crate::domain::account::models::AccountId;
use crate::domain::reset::errors::ResetTokenError;
use crate::domain::reset::models::PasswordResetToken;
use crate::domain::reset::ports::ConsumeClaim;
use crate::domain::reset::ports::ResetTokenRepository;

/// Password reset ledger.
///
/// Issues single-use, short-lived tokens and consumes them at most
/// once. Issuing does not invalidate earlier unconsumed tokens for the
/// same account; the password service wipes all outstanding tokens
/// after a successful consume so a stale link cannot be replayed.
pub struct ResetTokenLedger<R>
where
    R: ResetTokenRepository,
{
    repository: Arc<R>,
    ttl: Duration,
}

impl<R> Clone for ResetTokenLedger<R>
where
    R: ResetTokenRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            ttl: self.ttl,
        }
    }
}

impl<R> ResetTokenLedger<R>
where
    R: ResetTokenRepository,
{
    /// Create a ledger over a reset-token repository.
    ///
    /// # Arguments
    /// * `repository` - Token persistence implementation
    /// * `ttl` - Reset token lifetime (short, 15-60 minutes)
    pub fn new(repository: Arc<R>, ttl: Duration) -> Self {
        Self { repository, ttl }
    }

    /// Issue a fresh reset token for an account.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    pub async fn issue(&self, account_id: &AccountId) -> Result<PasswordResetToken, ResetTokenError> {
        self.repository
            .insert(PasswordResetToken::issue(*account_id, self.ttl))
            .await
    }

    /// Consume a presented token, at most once.
    ///
    /// # Errors
    /// * `TokenNotFound` - Unknown value
    /// * `TokenAlreadyUsed` - Token was consumed before
    /// * `TokenExpired` - Token outlived its lifetime
    /// * `Storage` - Storage operation failed
    pub async fn consume(&self, value: &str) -> Result<PasswordResetToken, ResetTokenError> {
        match self.repository.consume(value).await? {
            ConsumeClaim::Missing => Err(ResetTokenError::TokenNotFound),
            ConsumeClaim::AlreadyUsed => Err(ResetTokenError::TokenAlreadyUsed),
            ConsumeClaim::Expired => Err(ResetTokenError::TokenExpired),
            ConsumeClaim::Consumed(token) => Ok(token),
        }
    }

    /// Invalidate every outstanding token for an account.
    ///
    /// # Returns
    /// Number of tokens invalidated
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    pub async fn invalidate_all_for_account(
        &self,
        account_id: &AccountId,
    ) -> Result<u64, ResetTokenError> {
        self.repository.invalidate_all_for_account(account_id).await
    }
}
