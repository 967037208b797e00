//! In-memory repository adapters.
//!
//! The storage engine is an external collaborator; these adapters
//! realize the repository ports over `Mutex<HashMap>` so the core can
//! run self-contained and tests can substitute real storage. Every
//! conditional update runs inside a single lock acquisition, which is
//! this store's form of the atomic check-then-mark the ports demand.

pub mod account;
pub mod reset;
pub mod session;

pub use account::InMemoryAccountRepository;
pub use reset::InMemoryResetTokenRepository;
pub use session::InMemoryRefreshTokenRepository;
