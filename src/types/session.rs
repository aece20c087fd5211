use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A live signed-in identity. Just the owner and when it was minted; anything
/// session-scoped the rest of the app wants hangs off the user id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub issued_at: DateTime<Utc>,
}

/// Result of a successful sign-in or resume.
pub struct SignedIn {
    pub session: Session,
    pub display_name: String,
    /// Present when the client asked to stay signed in (or just rotated).
    /// Single opaque string, safe to park in a cookie or keychain.
    pub keep_signed_token: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SignInReq {
    pub identifier: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Serialize, Deserialize)]
pub struct ResumeReq {
    pub token: String,
}

#[derive(Serialize, Deserialize)]
pub struct SignOutReq {
    pub token: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SessionRes {
    pub user_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub display_name: String,
    pub keep_signed_token: Option<String>,
}

impl From<SignedIn> for SessionRes {
    fn from(signed: SignedIn) -> Self {
        SessionRes {
            user_id: signed.session.user_id,
            issued_at: signed.session.issued_at,
            display_name: signed.display_name,
            keep_signed_token: signed.keep_signed_token,
        }
    }
}
