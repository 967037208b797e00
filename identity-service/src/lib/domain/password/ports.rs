use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::password::errors::MailerError;
use crate::domain::password::errors::PasswordFlowError;
use crate::domain::reset::models::PasswordResetToken;

/// Port for password reset and change operations.
#[async_trait]
pub trait PasswordServicePort: Send + Sync + 'static {
    /// Request a reset link for an email address.
    ///
    /// The outcome is uniform whether or not the address belongs to an
    /// account, so callers cannot enumerate accounts. Delivery
    /// failures are logged and swallowed for the same reason.
    ///
    /// # Errors
    /// * `Account(Storage)` / `Reset(Storage)` - Storage failed
    async fn request_reset(
        &self,
        email: &str,
        source_ip: Option<&str>,
    ) -> Result<(), PasswordFlowError>;

    /// Consume a reset token and set a new password.
    ///
    /// Invalidates every outstanding reset token and revokes every
    /// refresh token for the account, forcing re-login everywhere.
    ///
    /// # Errors
    /// * `Reset(TokenNotFound | TokenExpired | TokenAlreadyUsed)` -
    ///   Ledger rejection
    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        source_ip: Option<&str>,
    ) -> Result<(), PasswordFlowError>;

    /// Change a password after re-verifying the current one.
    ///
    /// Same invalidation side effects as `reset_password`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Current password does not match
    /// * `Account(NotFound)` - Account does not exist
    async fn change_password(
        &self,
        account_id: &AccountId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), PasswordFlowError>;
}

/// Outbound port for the email collaborator.
///
/// The core never sends mail itself; it hands a freshly issued reset
/// token to this port and moves on.
#[async_trait]
pub trait ResetMailer: Send + Sync + 'static {
    /// Deliver a reset link for the given token.
    ///
    /// # Errors
    /// * `Delivery` - The mail could not be handed off
    async fn send_reset_link(
        &self,
        email: &EmailAddress,
        token: &PasswordResetToken,
    ) -> Result<(), MailerError>;
}
