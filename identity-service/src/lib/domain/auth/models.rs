use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::Role;

/// Claims carried by a signed access token.
///
/// Self-contained bearer credential: account id, email and role plus
/// issue and expiry instants. Never persisted server-side; its short
/// lifetime is the only revocation mechanism, which the refresh ledger
/// compensates for by allowing forced session termination between
/// renewals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Account identifier
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Build claims for an account with the configured lifetime.
    ///
    /// # Arguments
    /// * `account` - Authenticated account
    /// * `ttl` - Access token lifetime (short, minutes)
    pub fn for_account(account: &Account, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: account.id.to_string(),
            email: account.email.as_str().to_string(),
            role: account.role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }
}

/// Login request carrying raw credentials and request metadata.
///
/// The source address and user agent are used for audit logging only.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Result of a successful login: both tokens plus the public account
/// projection (never the password hash).
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub access_token: String,
    pub refresh_token: String,
    pub account: AccountProfile,
}

/// Result of a successful refresh: a new access token and the rotated
/// refresh token.
#[derive(Debug, Clone)]
pub struct RefreshedSession {
    pub access_token: String,
    pub refresh_token: String,
}
