pub mod codec;
pub mod errors;
pub mod opaque;

pub use codec::TokenCodec;
pub use errors::TokenError;
pub use opaque::OpaqueToken;
