use std::sync::Arc;

use async_trait::async_trait;
use credentials::PasswordHasher;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountRepository;
use crate::domain::password::errors::PasswordFlowError;
use crate::domain::password::ports::PasswordServicePort;
use crate::domain::password::ports::ResetMailer;
use crate::domain::reset::ledger::ResetTokenLedger;
use crate::domain::reset::ports::ResetTokenRepository;
use crate::domain::session::ledger::RefreshTokenLedger;
use crate::domain::session::models::RevocationReason;
use crate::domain::session::ports::RefreshTokenRepository;

/// Password reset and change orchestration.
///
/// Any successful password change, whatever its entry point, wipes all
/// outstanding reset tokens and revokes every refresh token for the
/// account: no stale link and no stolen session survives a new
/// password.
pub struct PasswordService<R, S, T, M>
where
    R: AccountRepository,
    S: RefreshTokenRepository,
    T: ResetTokenRepository,
    M: ResetMailer,
{
    accounts: Arc<R>,
    sessions: RefreshTokenLedger<S>,
    resets: ResetTokenLedger<T>,
    mailer: Arc<M>,
    hasher: PasswordHasher,
}

impl<R, S, T, M> PasswordService<R, S, T, M>
where
    R: AccountRepository,
    S: RefreshTokenRepository,
    T: ResetTokenRepository,
    M: ResetMailer,
{
    /// Create a password service with injected dependencies.
    ///
    /// # Arguments
    /// * `accounts` - Account persistence implementation
    /// * `sessions` - Refresh token ledger (for forced logout)
    /// * `resets` - Reset token ledger
    /// * `mailer` - Email collaborator
    pub fn new(
        accounts: Arc<R>,
        sessions: RefreshTokenLedger<S>,
        resets: ResetTokenLedger<T>,
        mailer: Arc<M>,
    ) -> Self {
        Self {
            accounts,
            sessions,
            resets,
            mailer,
            hasher: PasswordHasher::new(),
        }
    }

    /// Apply a new password and invalidate everything that could still
    /// authenticate with the old one.
    async fn apply_new_password(
        &self,
        account: &Account,
        new_password: &str,
    ) -> Result<(), PasswordFlowError> {
        let password_hash = self.hasher.hash(new_password)?;

        self.accounts
            .update_password(&account.id, password_hash)
            .await?;
        self.resets.invalidate_all_for_account(&account.id).await?;
        self.sessions
            .revoke_all_for_account(&account.id, RevocationReason::Explicit)
            .await?;

        tracing::info!(account_id = %account.id, "Password changed, all sessions revoked");

        Ok(())
    }
}

#[async_trait]
impl<R, S, T, M> PasswordServicePort for PasswordService<R, S, T, M>
where
    R: AccountRepository,
    S: RefreshTokenRepository,
    T: ResetTokenRepository,
    M: ResetMailer,
{
    async fn request_reset(
        &self,
        email: &str,
        source_ip: Option<&str>,
    ) -> Result<(), PasswordFlowError> {
        let source_ip = source_ip.unwrap_or("unknown");

        // Every early return below is the same uniform success the
        // caller sees for a real account: enumeration defense.
        let Ok(email) = crate::domain::account::models::EmailAddress::new(email.to_string())
        else {
            return Ok(());
        };

        let Some(account) = self.accounts.find_by_email(&email).await? else {
            tracing::info!(source_ip, "Reset requested for unknown address");
            return Ok(());
        };

        if !account.is_active {
            tracing::info!(account_id = %account.id, source_ip, "Reset requested for inactive account");
            return Ok(());
        }

        let token = self.resets.issue(&account.id).await?;

        tracing::info!(account_id = %account.id, source_ip, "Reset token issued");

        if let Err(e) = self.mailer.send_reset_link(&account.email, &token).await {
            tracing::error!(
                account_id = %account.id,
                "Failed to hand reset link to mailer: {}",
                e
            );
        }

        Ok(())
    }

    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        source_ip: Option<&str>,
    ) -> Result<(), PasswordFlowError> {
        let consumed = self.resets.consume(token).await?;

        let account = self
            .accounts
            .find_by_id(&consumed.account_id)
            .await?
            .ok_or_else(|| AccountError::NotFound(consumed.account_id.to_string()))?;

        tracing::info!(
            account_id = %account.id,
            source_ip = source_ip.unwrap_or("unknown"),
            "Reset token consumed"
        );

        self.apply_new_password(&account, new_password).await
    }

    async fn change_password(
        &self,
        account_id: &AccountId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), PasswordFlowError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AccountError::NotFound(account_id.to_string()))?;

        if !self
            .hasher
            .verify(current_password, &account.password_hash)?
        {
            return Err(PasswordFlowError::InvalidCredentials);
        }

        self.apply_new_password(&account, new_password).await
    }
}
