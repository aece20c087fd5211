pub mod resume;
pub mod signin;
pub mod signout;
