use crate::db::postgres_service::PostgresService;
use crate::types::{error::AppError, token::TokenPurpose};
use crate::utils::token::{encrypt, new_nanoid, new_secret, verify};
use chrono::{DateTime, Duration, Utc};
use entity::request_token::{
    ActiveModel as TokenActive, Column, Entity as RequestToken, Model as RequestTokenModel,
};
use entity::user::Model as UserModel;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use uuid::Uuid;

impl PostgresService {
    /// Mint a purpose-scoped one-time token. Issuing sweeps every earlier
    /// unconsumed token of the same (user, purpose) so stale mailed links die
    /// the moment a fresh one goes out. `ttl: None` means no expiry.
    pub async fn issue_request_token(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<(String, String), AppError> {
        let token_id = new_nanoid(16);
        let secret = new_secret();
        let secret_hash =
            encrypt(&secret).map_err(|_| AppError::Internal("secret hash failed".into()))?;

        let txn = self.database_connection.begin().await?;

        RequestToken::delete_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Purpose.eq(purpose.to_string()))
            .exec(&txn)
            .await?;

        RequestToken::insert(TokenActive {
            id: Set(token_id.clone()),
            user_id: Set(user_id),
            purpose: Set(purpose.to_string()),
            secret_hash: Set(secret_hash),
            created_at: Set(now),
            valid_until: Set(ttl.map(|ttl| now + ttl)),
        })
        .exec(&txn)
        .await?;

        txn.commit().await?;
        Ok((token_id, secret))
    }

    /// Pure read. Wrong purpose, past expiry and secret mismatch are one
    /// undistinguished Invalid.
    pub async fn validate_request_token(
        &self,
        token_id: &str,
        presented_secret: &str,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<UserModel, AppError> {
        let row = RequestToken::find_by_id(token_id.to_string())
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::Invalid)?;

        Self::check_token(&row, presented_secret, purpose, now)?;

        Self::owner_or_invalid(self.get_user_by_id(&row.user_id).await)
    }

    /// Validate-and-delete in one transaction. Two concurrent consumers race
    /// on the delete; whoever affects zero rows lost and fails closed, so a
    /// token authorizes at most one action ever.
    pub async fn consume_request_token(
        &self,
        token_id: &str,
        presented_secret: &str,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<UserModel, AppError> {
        let txn = self.database_connection.begin().await?;

        let row = RequestToken::find_by_id(token_id.to_string())
            .one(&txn)
            .await?
            .ok_or(AppError::Invalid)?;

        Self::check_token(&row, presented_secret, purpose, now)?;

        let deleted = RequestToken::delete_by_id(token_id.to_string())
            .exec(&txn)
            .await?;
        if deleted.rows_affected == 0 {
            return Err(AppError::Invalid);
        }

        txn.commit().await?;

        Self::owner_or_invalid(self.get_user_by_id(&row.user_id).await)
    }

    pub async fn purge_request_tokens_expired(
        &self,
        before: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        // NULL valid_until never compares true, so non-expiring tokens survive
        let res = RequestToken::delete_many()
            .filter(Column::ValidUntil.lt(before))
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected)
    }

    // a dangling owner is an invalid token; storage trouble stays storage trouble
    fn owner_or_invalid(looked_up: Result<UserModel, AppError>) -> Result<UserModel, AppError> {
        match looked_up {
            Ok(user) => Ok(user),
            Err(AppError::NotFound) => Err(AppError::Invalid),
            Err(other) => Err(other),
        }
    }

    fn check_token(
        row: &RequestTokenModel,
        presented_secret: &str,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if row.purpose != purpose.to_string() {
            return Err(AppError::Invalid);
        }
        if let Some(valid_until) = row.valid_until {
            if valid_until <= now {
                return Err(AppError::Invalid);
            }
        }
        if !verify(presented_secret, &row.secret_hash).unwrap_or(false) {
            return Err(AppError::Invalid);
        }
        Ok(())
    }
}
