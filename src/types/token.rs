use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a request token is allowed to authorize. Stored as its string form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenPurpose {
    PasswordReset,
    EmailVerify,
    PhoneVerify,
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenPurpose::PasswordReset => write!(f, "password_reset"),
            TokenPurpose::EmailVerify => write!(f, "email_verify"),
            TokenPurpose::PhoneVerify => write!(f, "phone_verify"),
        }
    }
}

impl FromStr for TokenPurpose {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password_reset" => Ok(TokenPurpose::PasswordReset),
            "email_verify" => Ok(TokenPurpose::EmailVerify),
            "phone_verify" => Ok(TokenPurpose::PhoneVerify),
            _ => Err(()),
        }
    }
}
