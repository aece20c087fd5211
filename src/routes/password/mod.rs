pub mod forgot;
pub mod reset;
