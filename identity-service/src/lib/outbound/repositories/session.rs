use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::account::models::AccountId;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::RevocationReason;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::session::ports::RotationClaim;

/// In-memory refresh token store keyed by the opaque token value.
#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Mutex<HashMap<String, RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, RefreshToken>>, SessionError> {
        self.tokens
            .lock()
            .map_err(|e| SessionError::Storage(e.to_string()))
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, SessionError> {
        let mut tokens = self.lock()?;
        tokens.insert(token.value.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<RefreshToken>, SessionError> {
        let tokens = self.lock()?;
        Ok(tokens.get(value).cloned())
    }

    async fn claim_for_rotation(&self, value: &str) -> Result<RotationClaim, SessionError> {
        // The whole conditional runs under one lock: concurrent claims
        // of the same value serialize here and only the first one finds
        // the token unrevoked.
        let mut tokens = self.lock()?;

        let Some(token) = tokens.get_mut(value) else {
            return Ok(RotationClaim::Missing);
        };

        if token.revoked {
            return Ok(RotationClaim::AlreadyRevoked(token.clone()));
        }

        if token.is_expired(Utc::now()) {
            return Ok(RotationClaim::Expired(token.clone()));
        }

        token.revoked = true;
        token.revoked_reason = Some(RevocationReason::Rotated);
        Ok(RotationClaim::Claimed(token.clone()))
    }

    async fn mark_revoked(
        &self,
        value: &str,
        reason: RevocationReason,
    ) -> Result<(), SessionError> {
        let mut tokens = self.lock()?;

        let token = tokens
            .get_mut(value)
            .ok_or(SessionError::TokenNotFound)?;

        if !token.revoked {
            token.revoked = true;
            token.revoked_reason = Some(reason);
        }

        Ok(())
    }

    async fn link_successor(&self, value: &str, successor: &str) -> Result<(), SessionError> {
        let mut tokens = self.lock()?;

        let token = tokens
            .get_mut(value)
            .ok_or(SessionError::TokenNotFound)?;

        token.successor = Some(successor.to_string());
        Ok(())
    }

    async fn revoke_all_for_account(
        &self,
        account_id: &AccountId,
        reason: RevocationReason,
    ) -> Result<u64, SessionError> {
        let mut tokens = self.lock()?;

        let mut revoked = 0;
        for token in tokens.values_mut() {
            if token.account_id == *account_id && !token.revoked {
                token.revoked = true;
                token.revoked_reason = Some(reason);
                revoked += 1;
            }
        }

        Ok(revoked)
    }

    async fn sweep_expired(&self) -> Result<u64, SessionError> {
        let mut tokens = self.lock()?;

        let now = Utc::now();
        let before = tokens.len();
        tokens.retain(|_, token| !token.revoked && !token.is_expired(now));

        Ok((before - tokens.len()) as u64)
    }
}
