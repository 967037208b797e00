//! Credential primitives library
//!
//! Provides the stateless building blocks the identity service is
//! assembled from:
//! - Signed access-token encoding and verification (HS256)
//! - Password hashing (Argon2id) with constant-time verification
//! - Opaque random token values for refresh and reset tokens
//!
//! Nothing in this crate touches persistence or holds mutable state;
//! signing keys are injected once at construction and never mutated.
//!
//! # Examples
//!
//! ## Access tokens
//! ```
//! use credentials::TokenCodec;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Claims { sub: String, exp: i64 }
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.encode(&Claims { sub: "a1".into(), exp: i64::MAX }).unwrap();
//! let decoded: Claims = codec.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "a1");
//! ```
//!
//! ## Passwords
//! ```
//! use credentials::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PLACEHOLDER_HASH;
pub use token::OpaqueToken;
pub use token::TokenCodec;
pub use token::TokenError;
