pub mod keep_signed;
pub mod postgres_service;
pub mod request_token;
pub mod user;
