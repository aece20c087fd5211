pub mod confirm;
pub mod request;
