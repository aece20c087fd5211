use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::utils::token::{encrypt, new_id, new_secret, verify};
use chrono::{DateTime, Duration, Utc};
use entity::keep_signed_token::{
    ActiveModel as TokenActive, Column, Entity as KeepSigned,
};
use entity::user::Model as UserModel;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use uuid::Uuid;

/*
 Keep-signed tokens are bearer credentials: whoever holds the (id, secret)
 pair is the user. The id is the lookup key, the secret only ever exists
 server-side as an argon2 hash. "Valid" is not a stored state, it is
 now < valid_until AND the presented secret matches.
 */

impl PostgresService {
    /// Mint a keep-signed pair for a user. Returns (token_id, secret); the
    /// secret shown here is the only time it exists in cleartext server-side.
    pub async fn issue_keep_signed(
        &self,
        user_id: Uuid,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<(Uuid, String), AppError> {
        let token_id = new_id();
        let secret = new_secret();
        let secret_hash =
            encrypt(&secret).map_err(|_| AppError::Internal("secret hash failed".into()))?;

        KeepSigned::insert(TokenActive {
            id: Set(token_id),
            user_id: Set(user_id),
            secret_hash: Set(secret_hash),
            created_at: Set(now),
            valid_until: Set(now + ttl),
        })
        .exec(&self.database_connection)
        .await?;

        Ok((token_id, secret))
    }

    /// Missing row, expired row and secret mismatch all come back as the same
    /// Invalid; callers get no oracle for which it was.
    pub async fn validate_keep_signed(
        &self,
        token_id: Uuid,
        presented_secret: &str,
        now: DateTime<Utc>,
    ) -> Result<UserModel, AppError> {
        let row = KeepSigned::find_by_id(token_id)
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::Invalid)?;

        if row.valid_until <= now {
            return Err(AppError::Invalid);
        }
        if !verify(presented_secret, &row.secret_hash).unwrap_or(false) {
            return Err(AppError::Invalid);
        }

        // a dangling owner is an invalid token; storage trouble stays storage trouble
        match self.get_user_by_id(&row.user_id).await {
            Ok(user) => Ok(user),
            Err(AppError::NotFound) => Err(AppError::Invalid),
            Err(other) => Err(other),
        }
    }

    /// Rotation primitive: fresh id + secret for the same owner, old row gone
    /// in the same transaction. Callers decide when to rotate.
    pub async fn reissue_keep_signed(
        &self,
        token_id: Uuid,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<(Uuid, String), AppError> {
        let txn = self.database_connection.begin().await?;

        let old = KeepSigned::find_by_id(token_id)
            .one(&txn)
            .await?
            .ok_or(AppError::Invalid)?;

        let fresh_id = new_id();
        let secret = new_secret();
        let secret_hash =
            encrypt(&secret).map_err(|_| AppError::Internal("secret hash failed".into()))?;

        KeepSigned::insert(TokenActive {
            id: Set(fresh_id),
            user_id: Set(old.user_id),
            secret_hash: Set(secret_hash),
            created_at: Set(now),
            valid_until: Set(now + ttl),
        })
        .exec(&txn)
        .await?;

        let deleted = KeepSigned::delete_by_id(token_id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            // someone else rotated or revoked it under us; fail closed
            return Err(AppError::Invalid);
        }

        txn.commit().await?;
        Ok((fresh_id, secret))
    }

    /// Delete the row. Validation afterwards fails exactly like it does for a
    /// token that never existed. Revoking an unknown id is a quiet no-op.
    pub async fn revoke_keep_signed(&self, token_id: Uuid) -> Result<(), AppError> {
        KeepSigned::delete_by_id(token_id)
            .exec(&self.database_connection)
            .await?;
        Ok(())
    }

    /// Bulk-delete everything stale. Safe next to concurrent validation since
    /// validate re-checks time anyway.
    pub async fn purge_keep_signed_expired(&self, before: DateTime<Utc>) -> Result<u64, AppError> {
        let res = KeepSigned::delete_many()
            .filter(Column::ValidUntil.lt(before))
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected)
    }
}
