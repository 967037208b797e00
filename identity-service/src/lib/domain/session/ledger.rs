use std::sync::Arc;

use chrono::Duration;

use crate::domain::account::models::AccountId;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::RevocationReason;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::session::ports::RotationClaim;

/// Result of a successful rotation: the successor token and the
/// account that owns the chain.
#[derive(Debug, Clone)]
pub struct RotatedSession {
    pub token: RefreshToken,
    pub account_id: AccountId,
}

/// Refresh token ledger with rotation-on-use semantics.
///
/// Every rotation revokes the presented token and links a successor,
/// so an unrevoked token is always the newest generation of its chain.
/// A revoked token being presented again is treated as reuse detection
/// and takes down the whole remaining chain.
pub struct RefreshTokenLedger<R>
where
    R: RefreshTokenRepository,
{
    repository: Arc<R>,
    ttl: Duration,
}

impl<R> Clone for RefreshTokenLedger<R>
where
    R: RefreshTokenRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            ttl: self.ttl,
        }
    }
}

impl<R> RefreshTokenLedger<R>
where
    R: RefreshTokenRepository,
{
    /// Create a ledger over a token repository.
    ///
    /// # Arguments
    /// * `repository` - Token persistence implementation
    /// * `ttl` - Refresh token lifetime (long, on the order of days)
    pub fn new(repository: Arc<R>, ttl: Duration) -> Self {
        Self { repository, ttl }
    }

    /// Issue a fresh token for an account (login or rotation).
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    pub async fn issue(&self, account_id: &AccountId) -> Result<RefreshToken, SessionError> {
        self.repository
            .insert(RefreshToken::issue(*account_id, self.ttl))
            .await
    }

    /// Rotate a presented token.
    ///
    /// The atomic claim in the repository guarantees that of two
    /// concurrent rotations of the same value exactly one reaches the
    /// `Claimed` arm; the loser observes `TokenRevoked`.
    ///
    /// # Errors
    /// * `TokenNotFound` - Unknown value (callers surface this exactly
    ///   like `TokenRevoked`, so guesses are indistinguishable)
    /// * `TokenRevoked` - Reuse detected; the remaining chain has been
    ///   revoked and the session requires full re-authentication
    /// * `TokenExpired` - Token outlived its lifetime
    /// * `Storage` - Storage operation failed
    pub async fn rotate(&self, presented: &str) -> Result<RotatedSession, SessionError> {
        match self.repository.claim_for_rotation(presented).await? {
            RotationClaim::Missing => Err(SessionError::TokenNotFound),
            RotationClaim::AlreadyRevoked(token) => {
                tracing::warn!(
                    account_id = %token.account_id,
                    "Revoked refresh token presented again; revoking remaining chain"
                );
                self.revoke_chain_from(&token).await?;
                Err(SessionError::TokenRevoked)
            }
            RotationClaim::Expired(_) => Err(SessionError::TokenExpired),
            RotationClaim::Claimed(claimed) => {
                let successor = self
                    .repository
                    .insert(RefreshToken::issue(claimed.account_id, self.ttl))
                    .await?;
                self.repository
                    .link_successor(&claimed.value, &successor.value)
                    .await?;

                Ok(RotatedSession {
                    account_id: claimed.account_id,
                    token: successor,
                })
            }
        }
    }

    /// Revoke a single token.
    ///
    /// # Errors
    /// * `TokenNotFound` - Unknown value
    /// * `Storage` - Storage operation failed
    pub async fn revoke(
        &self,
        value: &str,
        reason: RevocationReason,
    ) -> Result<(), SessionError> {
        self.repository.mark_revoked(value, reason).await
    }

    /// Revoke every live token for an account (logout-everywhere,
    /// password change, deactivation).
    ///
    /// # Returns
    /// Number of tokens revoked
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    pub async fn revoke_all_for_account(
        &self,
        account_id: &AccountId,
        reason: RevocationReason,
    ) -> Result<u64, SessionError> {
        let revoked = self
            .repository
            .revoke_all_for_account(account_id, reason)
            .await?;

        if revoked > 0 {
            tracing::info!(account_id = %account_id, revoked, %reason, "Revoked account sessions");
        }

        Ok(revoked)
    }

    /// Remove expired and revoked records. Optional housekeeping.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    pub async fn sweep_expired(&self) -> Result<u64, SessionError> {
        self.repository.sweep_expired().await
    }

    /// Follow successor links from a reused token and revoke every
    /// descendant still on record.
    async fn revoke_chain_from(&self, token: &RefreshToken) -> Result<(), SessionError> {
        let mut next = token.successor.clone();

        while let Some(value) = next {
            let Some(descendant) = self.repository.find_by_value(&value).await? else {
                break;
            };

            if !descendant.revoked {
                self.repository
                    .mark_revoked(&descendant.value, RevocationReason::Explicit)
                    .await?;
            }

            next = descendant.successor;
        }

        Ok(())
    }
}
