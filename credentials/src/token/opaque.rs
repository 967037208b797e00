use rand::distributions::Alphanumeric;
use rand::Rng;

/// Opaque random credential values.
///
/// Refresh and password-reset tokens are identified by these values:
/// never sequential, never derived from account data. 48 alphanumeric
/// characters sampled from the OS CSPRNG give ~286 bits of entropy.
pub struct OpaqueToken;

impl OpaqueToken {
    const LENGTH: usize = 48;

    /// Generate a fresh opaque token value.
    ///
    /// # Returns
    /// URL-safe random string of 48 alphanumeric characters
    pub fn generate() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::LENGTH)
            .map(char::from)
            .collect()
    }
}
