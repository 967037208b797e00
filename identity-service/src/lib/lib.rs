pub mod config;
pub mod domain;
pub mod outbound;

pub use domain::account;
pub use domain::auth;
pub use domain::password;
pub use domain::reset;
pub use domain::session;
pub use outbound::repositories;
