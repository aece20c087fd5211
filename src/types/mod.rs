pub mod error;
pub mod mail;
pub mod response;
pub mod session;
pub mod token;
pub mod user;
