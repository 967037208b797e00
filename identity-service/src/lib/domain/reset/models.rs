use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use credentials::OpaqueToken;

use crate::domain::account::models::AccountId;

/// Single-use, short-lived password reset token.
///
/// Authorizes exactly one password change; consuming an expired or
/// already-consumed token fails. The opaque random `value` is the
/// natural key.
#[derive(Debug, Clone)]
pub struct PasswordResetToken {
    pub value: String,
    pub account_id: AccountId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
}

impl PasswordResetToken {
    /// Mint a fresh, unconsumed token for an account.
    ///
    /// # Arguments
    /// * `account_id` - Owning account
    /// * `ttl` - Lifetime from now (short, 15-60 minutes)
    pub fn issue(account_id: AccountId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            value: OpaqueToken::generate(),
            account_id,
            issued_at: now,
            expires_at: now + ttl,
            consumed: false,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_is_consumable() {
        let token = PasswordResetToken::issue(AccountId::new(), Duration::minutes(30));

        assert!(!token.consumed);
        assert!(!token.is_expired(Utc::now()));
        assert_eq!(token.expires_at - token.issued_at, Duration::minutes(30));
    }
}
