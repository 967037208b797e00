use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::RevocationReason;

/// Outcome of an atomic rotation claim.
///
/// `Claimed` means this call marked the token revoked (reason
/// `Rotated`) and the caller now owns the rotation; every other
/// outcome means the token must not be rotated. The revoked and
/// expired outcomes carry the record so the ledger can follow the
/// successor chain and attribute the event to an account.
#[derive(Debug, Clone)]
pub enum RotationClaim {
    Claimed(RefreshToken),
    AlreadyRevoked(RefreshToken),
    Expired(RefreshToken),
    Missing,
}

/// Persistence operations for refresh tokens.
///
/// `claim_for_rotation` is the concurrency-critical operation: the
/// check-not-revoked-then-mark-revoked must be one atomic conditional
/// update in the store, so that of two racing rotations of the same
/// value exactly one observes `Claimed`.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a new token record.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, SessionError>;

    /// Retrieve a token by its opaque value.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_value(&self, value: &str) -> Result<Option<RefreshToken>, SessionError>;

    /// Atomically claim a token for rotation.
    ///
    /// In one storage step: absent values yield `Missing`; revoked
    /// records yield `AlreadyRevoked` untouched; expired-but-unrevoked
    /// records yield `Expired` untouched; otherwise the record is
    /// marked revoked with reason `Rotated` and returned as `Claimed`.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn claim_for_rotation(&self, value: &str) -> Result<RotationClaim, SessionError>;

    /// Mark a token revoked if it is not already.
    ///
    /// Idempotent: revoking an already-revoked token keeps its original
    /// reason.
    ///
    /// # Errors
    /// * `TokenNotFound` - No record with this value
    /// * `Storage` - Storage operation failed
    async fn mark_revoked(
        &self,
        value: &str,
        reason: RevocationReason,
    ) -> Result<(), SessionError>;

    /// Record the successor link on a rotated token.
    ///
    /// # Errors
    /// * `TokenNotFound` - No record with this value
    /// * `Storage` - Storage operation failed
    async fn link_successor(&self, value: &str, successor: &str) -> Result<(), SessionError>;

    /// Revoke every live token owned by an account.
    ///
    /// # Returns
    /// Number of tokens revoked by this call
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn revoke_all_for_account(
        &self,
        account_id: &AccountId,
        reason: RevocationReason,
    ) -> Result<u64, SessionError>;

    /// Remove expired and revoked records.
    ///
    /// Housekeeping only; correctness never depends on it because
    /// expired tokens are rejected lazily at rotation time.
    ///
    /// # Returns
    /// Number of records removed
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn sweep_expired(&self) -> Result<u64, SessionError>;
}
