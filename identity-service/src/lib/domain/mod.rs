pub mod account;
pub mod auth;
pub mod password;
pub mod reset;
pub mod session;
