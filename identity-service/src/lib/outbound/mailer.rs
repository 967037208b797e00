use async_trait::async_trait;

use crate::domain::account::models::EmailAddress;
use crate::domain::password::errors::MailerError;
use crate::domain::password::ports::ResetMailer;
use crate::domain::reset::models::PasswordResetToken;

/// Mailer adapter that only logs.
///
/// Outbound email is an external collaborator; this stand-in records
/// that a link would have been sent. The token value itself is a
/// credential and never appears in the log.
#[derive(Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResetMailer for LogMailer {
    async fn send_reset_link(
        &self,
        email: &EmailAddress,
        token: &PasswordResetToken,
    ) -> Result<(), MailerError> {
        tracing::info!(
            email = %email,
            expires_at = %token.expires_at,
            "Password reset link handed off for delivery"
        );
        Ok(())
    }
}
