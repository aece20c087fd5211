use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::session::{Session, SignedIn};
use crate::types::user::Profile;
use crate::utils::token::{self, construct_client_token, extract_client_token};
use chrono::{Duration, Utc};
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct SessionPolicy {
    /// Whether sign-out also burns the keep-signed token that resumed the
    /// session, or leaves it parked for next time. Deployment decides.
    pub destroy_on_sign_out: bool,
    pub keep_signed_ttl: Duration,
}

/// Orchestrates sign-in, resumption and sign-out over the credential store
/// and the keep-signed manager. Everything that goes wrong in here collapses
/// to AuthFailed before it leaves.
pub struct SessionCoordinator {
    db: Arc<PostgresService>,
    policy: SessionPolicy,
}

// verified against when the identifier resolves to nobody, so an unknown name
// costs the same argon2 work as a wrong password
fn decoy_hash() -> &'static str {
    static DECOY: OnceLock<String> = OnceLock::new();
    DECOY.get_or_init(|| token::encrypt("lantern-decoy").unwrap_or_default())
}

impl SessionCoordinator {
    pub fn new(db: Arc<PostgresService>, policy: SessionPolicy) -> Self {
        SessionCoordinator { db, policy }
    }

    pub async fn sign_in(
        &self,
        identifier: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<SignedIn, AppError> {
        let now = Utc::now();

        let user = match self.db.find_by_identifier(identifier).await {
            Ok(user) => user,
            Err(AppError::NotFound) => {
                let _ = token::verify(password, decoy_hash());
                return Err(AppError::AuthFailed);
            }
            Err(other) => return Err(other),
        };

        if !self.db.verify_password(&user, password) {
            return Err(AppError::AuthFailed);
        }

        let keep_signed_token = if remember_me {
            let (token_id, secret) = self
                .db
                .issue_keep_signed(user.id, self.policy.keep_signed_ttl, now)
                .await?;
            Some(construct_client_token(&token_id.to_string(), &secret))
        } else {
            None
        };

        let mut profile = Profile::from_model(&user);
        Ok(SignedIn {
            session: Session {
                user_id: user.id,
                issued_at: now,
            },
            display_name: profile.display_name(),
            keep_signed_token,
        })
    }

    /// Resume from a parked keep-signed token. On success the token is
    /// rotated and the caller must re-persist the returned replacement.
    pub async fn resume(&self, client_token: &str) -> Result<SignedIn, AppError> {
        let now = Utc::now();

        let (token_id, secret) = Self::parse_pair(client_token)?;

        let user = self
            .db
            .validate_keep_signed(token_id, &secret, now)
            .await
            .map_err(|_| AppError::AuthFailed)?;

        let (new_id, new_secret) = self
            .db
            .reissue_keep_signed(token_id, self.policy.keep_signed_ttl, now)
            .await
            .map_err(|_| AppError::AuthFailed)?;

        let mut profile = Profile::from_model(&user);
        Ok(SignedIn {
            session: Session {
                user_id: user.id,
                issued_at: now,
            },
            display_name: profile.display_name(),
            keep_signed_token: Some(construct_client_token(&new_id.to_string(), &new_secret)),
        })
    }

    /// Never fails on bad input; a sign-out with a garbage token is still a
    /// sign-out. Only storage trouble surfaces.
    pub async fn sign_out(&self, client_token: Option<&str>) -> Result<(), AppError> {
        if !self.policy.destroy_on_sign_out {
            return Ok(());
        }
        let Some(client_token) = client_token else {
            return Ok(());
        };
        let Ok((token_id, _)) = Self::parse_pair(client_token) else {
            return Ok(());
        };
        self.db.revoke_keep_signed(token_id).await
    }

    fn parse_pair(client_token: &str) -> Result<(Uuid, String), AppError> {
        let (id, secret) = extract_client_token(client_token).ok_or(AppError::AuthFailed)?;
        let token_id = Uuid::parse_str(&id).map_err(|_| AppError::AuthFailed)?;
        Ok((token_id, secret))
    }
}
