use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::account::errors::AccountIdError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::RoleError;

/// Account aggregate entity.
///
/// Created by an out-of-scope registration flow; this core mutates it
/// through login outcomes and password changes. Accounts are never
/// physically deleted, only deactivated via `is_active`.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    /// Externally visible identifier, safe to embed in URLs and payloads.
    pub public_id: Uuid,
    pub display_name: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    /// Consecutive failed logins; reset to zero on any successful login.
    pub failed_logins: u32,
    /// Anchor of the rolling lockout window.
    pub last_failed_login: Option<DateTime<Utc>>,
    pub last_successful_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Construct a fresh, active account with zeroed login counters.
    ///
    /// # Arguments
    /// * `display_name` - Human-readable name
    /// * `email` - Validated, normalized email address
    /// * `password_hash` - Already-hashed password (PHC string)
    /// * `role` - Assigned role
    pub fn new(display_name: String, email: EmailAddress, password_hash: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            public_id: Uuid::now_v7(),
            display_name,
            email,
            password_hash,
            role,
            is_active: true,
            failed_logins: 0,
            last_failed_login: None,
            last_successful_login: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates format using an RFC 5322 compliant parser and normalizes
/// to lowercase, so lookups and uniqueness are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, normalized email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email.to_lowercase()))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed role enumeration.
///
/// Variant order defines the privilege ordering used by access checks:
/// `User < Head < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Head,
    Admin,
}

impl Role {
    /// Whether this role satisfies the required role.
    pub fn grants(&self, required: Role) -> bool {
        *self >= required
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Head => "head",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "head" => Ok(Role::Head),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public projection of an account, safe to return to callers.
///
/// Never carries the password hash or login counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub id: AccountId,
    pub public_id: Uuid,
    pub display_name: String,
    pub email: EmailAddress,
    pub role: Role,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            public_id: account.public_id,
            display_name: account.display_name.clone(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized_to_lowercase() {
        let email = EmailAddress::new("A@X.Com".to_string()).unwrap();
        assert_eq!(email.as_str(), "a@x.com");
    }

    #[test]
    fn test_email_rejects_garbage() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_role_ordering() {
        assert!(Role::Admin.grants(Role::Head));
        assert!(Role::Admin.grants(Role::User));
        assert!(Role::Head.grants(Role::User));
        assert!(!Role::User.grants(Role::Head));
        assert!(!Role::Head.grants(Role::Admin));
        assert!(Role::User.grants(Role::User));
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::User, Role::Head, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_new_account_starts_clean() {
        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let account = Account::new("Ada".to_string(), email, "$argon2id$hash".to_string(), Role::User);

        assert!(account.is_active);
        assert_eq!(account.failed_logins, 0);
        assert!(account.last_failed_login.is_none());
        assert!(account.last_successful_login.is_none());
    }

    #[test]
    fn test_profile_excludes_secret_material() {
        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let account = Account::new("Ada".to_string(), email, "$argon2id$hash".to_string(), Role::Head);

        let profile = AccountProfile::from(&account);
        assert_eq!(profile.id, account.id);
        assert_eq!(profile.role, Role::Head);
        // AccountProfile has no password_hash field; this test documents
        // that the projection is the only shape handed to callers.
    }
}
