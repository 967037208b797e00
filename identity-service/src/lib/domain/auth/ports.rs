use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::account::models::Role;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AccessClaims;
use crate::domain::auth::models::AuthenticatedSession;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RefreshedSession;

/// Port for authentication operations.
///
/// This is the surface the (out-of-scope) transport layer consumes:
/// login, refresh, logout and the token/role checks for authenticated
/// requests.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and open a session.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    ///   (deliberately indistinguishable)
    /// * `AccountLocked` - Brute-force lockout in effect
    /// * `AccountInactive` - Account is deactivated
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, AuthError>;

    /// Rotate a refresh token and issue a new access token.
    ///
    /// # Errors
    /// * `Session(TokenNotFound | TokenRevoked | TokenExpired)` -
    ///   Ledger rejection; reuse detection has already revoked the
    ///   remaining chain when `TokenRevoked` is reported
    /// * `AccountInactive` - Owning account was deactivated
    async fn refresh(&self, presented: &str) -> Result<RefreshedSession, AuthError>;

    /// Revoke a single refresh token. Idempotent: unknown or
    /// already-revoked values are a no-op success.
    async fn logout(&self, presented: &str) -> Result<(), AuthError>;

    /// Revoke every session for an account (logout everywhere).
    async fn logout_all(&self, account_id: &AccountId) -> Result<(), AuthError>;

    /// Verify a signed access token and return its claims.
    ///
    /// # Errors
    /// * `Token(Expired)` - Signature valid, lifetime over (the caller
    ///   may attempt a refresh)
    /// * `Token(Invalid)` - Signature or structure invalid (the caller
    ///   must not)
    async fn verify_access_token(&self, token: &str) -> Result<AccessClaims, AuthError>;

    /// Whether the account currently holds the required role.
    ///
    /// Re-reads the account rather than trusting an access token's
    /// embedded role, so a downgrade takes effect immediately.
    /// Deactivated accounts are denied.
    ///
    /// # Errors
    /// * `Account(NotFound)` - Account does not exist
    async fn verify_role_access(
        &self,
        account_id: &AccountId,
        required: Role,
    ) -> Result<bool, AuthError>;
}
