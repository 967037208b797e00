use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use credentials::PasswordHasher;
use credentials::TokenCodec;
use credentials::PLACEHOLDER_HASH;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Role;
use crate::domain::account::ports::AccountRepository;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::lockout::LockoutPolicy;
use crate::domain::auth::models::AccessClaims;
use crate::domain::auth::models::AuthenticatedSession;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RefreshedSession;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::session::errors::SessionError;
use crate::domain::session::ledger::RefreshTokenLedger;
use crate::domain::session::models::RevocationReason;
use crate::domain::session::ports::RefreshTokenRepository;

/// Authentication orchestration.
///
/// Holds no mutable state of its own; all account and token state
/// lives behind the injected repositories, so every operation is safe
/// under arbitrary request concurrency.
pub struct AuthService<R, S>
where
    R: AccountRepository,
    S: RefreshTokenRepository,
{
    accounts: Arc<R>,
    sessions: RefreshTokenLedger<S>,
    lockout: LockoutPolicy<R>,
    codec: TokenCodec,
    hasher: PasswordHasher,
    access_ttl: Duration,
}

impl<R, S> AuthService<R, S>
where
    R: AccountRepository,
    S: RefreshTokenRepository,
{
    /// Create an auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `accounts` - Account persistence implementation
    /// * `sessions` - Refresh token ledger
    /// * `lockout` - Lockout policy over the same account store
    /// * `codec` - Access-token codec carrying the signing key
    /// * `access_ttl` - Access token lifetime (short, minutes)
    pub fn new(
        accounts: Arc<R>,
        sessions: RefreshTokenLedger<S>,
        lockout: LockoutPolicy<R>,
        codec: TokenCodec,
        access_ttl: Duration,
    ) -> Self {
        Self {
            accounts,
            sessions,
            lockout,
            codec,
            hasher: PasswordHasher::new(),
            access_ttl,
        }
    }

    fn issue_access_token(&self, account: &Account) -> Result<String, AuthError> {
        let claims = AccessClaims::for_account(account, self.access_ttl);
        Ok(self.codec.encode(&claims)?)
    }

    /// Burn a comparison against the placeholder hash so rejected
    /// lookups take as long as real ones.
    fn burn_dummy_comparison(&self, password: &str) {
        let _ = self.hasher.verify(password, PLACEHOLDER_HASH);
    }
}

#[async_trait]
impl<R, S> AuthServicePort for AuthService<R, S>
where
    R: AccountRepository,
    S: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, AuthError> {
        let source_ip = command.source_ip.as_deref().unwrap_or("unknown");

        // A malformed email can match no account; same uniform rejection.
        let Ok(email) = EmailAddress::new(command.email) else {
            self.burn_dummy_comparison(&command.password);
            return Err(AuthError::InvalidCredentials);
        };

        let Some(account) = self.accounts.find_by_email(&email).await? else {
            self.burn_dummy_comparison(&command.password);
            return Err(AuthError::InvalidCredentials);
        };

        if !account.is_active {
            return Err(AuthError::AccountInactive);
        }

        // Lockout is checked before the password so a blocked attempt
        // neither leaks correctness nor extends the window.
        if !self.lockout.check_allowed(&account) {
            tracing::warn!(
                account_id = %account.id,
                source_ip,
                "Login attempt on locked account"
            );
            return Err(AuthError::AccountLocked);
        }

        if !self.hasher.verify(&command.password, &account.password_hash)? {
            let failures = self.lockout.record_failure(&account.id).await?;
            if failures >= self.lockout.max_failures() {
                tracing::warn!(
                    account_id = %account.id,
                    failures,
                    source_ip,
                    "Account locked after consecutive failed logins"
                );
            }
            return Err(AuthError::InvalidCredentials);
        }

        self.lockout.record_success(&account.id).await?;

        let access_token = self.issue_access_token(&account)?;
        let refresh_token = self.sessions.issue(&account.id).await?;

        tracing::info!(
            account_id = %account.id,
            source_ip,
            user_agent = command.user_agent.as_deref().unwrap_or("unknown"),
            "Login succeeded"
        );

        Ok(AuthenticatedSession {
            access_token,
            refresh_token: refresh_token.value,
            account: AccountProfile::from(&account),
        })
    }

    async fn refresh(&self, presented: &str) -> Result<RefreshedSession, AuthError> {
        let rotated = self.sessions.rotate(presented).await?;

        let account = self
            .accounts
            .find_by_id(&rotated.account_id)
            .await?
            .ok_or_else(|| AccountError::NotFound(rotated.account_id.to_string()))?;

        if !account.is_active {
            // A deactivated account keeps no live chain.
            self.sessions
                .revoke_all_for_account(&account.id, RevocationReason::Explicit)
                .await?;
            return Err(AuthError::AccountInactive);
        }

        let access_token = self.issue_access_token(&account)?;

        Ok(RefreshedSession {
            access_token,
            refresh_token: rotated.token.value,
        })
    }

    async fn logout(&self, presented: &str) -> Result<(), AuthError> {
        match self.sessions.revoke(presented, RevocationReason::Logout).await {
            Ok(()) | Err(SessionError::TokenNotFound) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn logout_all(&self, account_id: &AccountId) -> Result<(), AuthError> {
        self.sessions
            .revoke_all_for_account(account_id, RevocationReason::Logout)
            .await?;
        Ok(())
    }

    async fn verify_access_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        Ok(self.codec.decode(token)?)
    }

    async fn verify_role_access(
        &self,
        account_id: &AccountId,
        required: Role,
    ) -> Result<bool, AuthError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AccountError::NotFound(account_id.to_string()))?;

        if !account.is_active {
            return Ok(false);
        }

        Ok(account.role.grants(required))
    }
}
