use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::TokenError;

/// Signed access-token codec.
///
/// Generic over the claims type so the service defines its own token
/// payload. Uses HS256 (HMAC with SHA-256); the signing key is built
/// once from the injected secret and never mutated afterwards.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec from symmetric key material.
    ///
    /// # Arguments
    /// * `secret` - Signing secret (at least 256 bits for HS256)
    ///
    /// # Returns
    /// TokenCodec configured with HS256
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode (must carry an `exp` field)
    ///
    /// # Returns
    /// Compact signed token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify and decode a signed token.
    ///
    /// Signature and expiry are checked in the same call, with zero
    /// leeway so expiry boundaries are exact. A token that fails only
    /// the expiry check yields `Expired`; anything else (bad signature,
    /// malformed payload, wrong algorithm) yields `Invalid`.
    ///
    /// # Arguments
    /// * `token` - Compact signed token string
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Expired` - Signature valid, `exp` in the past
    /// * `Invalid` - Signature or structure invalid
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
