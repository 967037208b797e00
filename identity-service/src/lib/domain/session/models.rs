use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use credentials::OpaqueToken;

use crate::domain::account::models::AccountId;

/// Why a refresh token was revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationReason {
    Expired,
    Rotated,
    Logout,
    Explicit,
}

impl fmt::Display for RevocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RevocationReason::Expired => "expired",
            RevocationReason::Rotated => "rotated",
            RevocationReason::Logout => "logout",
            RevocationReason::Explicit => "explicit",
        };
        f.write_str(s)
    }
}

/// Refresh token record.
///
/// The opaque random `value` is the natural key; there is no
/// sequential id. Rotation revokes the presented token and links the
/// replacement through `successor`, forming an append-only chain per
/// login session.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub value: String,
    pub account_id: AccountId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub revoked_reason: Option<RevocationReason>,
    pub successor: Option<String>,
}

impl RefreshToken {
    /// Mint a fresh, unrevoked token for an account.
    ///
    /// # Arguments
    /// * `account_id` - Owning account
    /// * `ttl` - Lifetime from now (long, on the order of days)
    pub fn issue(account_id: AccountId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            value: OpaqueToken::generate(),
            account_id,
            issued_at: now,
            expires_at: now + ttl,
            revoked: false,
            revoked_reason: None,
            successor: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
