use crate::db::postgres_service::PostgresService;
use crate::types::{error::AppError, user::DBUserCreate};
use crate::utils::token::{self, encrypt, verify};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

impl PostgresService {
    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    /// Resolve a sign-in identifier. Case-sensitive, name beats email beats
    /// phone when the same string matches more than one column.
    pub async fn find_by_identifier(&self, identifier: &str) -> Result<UserModel, AppError> {
        for column in [Column::Name, Column::Email, Column::Phone] {
            if let Some(user) = User::find()
                .filter(column.eq(identifier))
                .one(&self.database_connection)
                .await?
            {
                return Ok(user);
            }
        }
        Err(AppError::NotFound)
    }

    pub fn verify_password(&self, user: &UserModel, plaintext: &str) -> bool {
        verify(plaintext, &user.password_hash).unwrap_or(false)
    }

    /// Signup: create user. Uniqueness of name/email/phone is enforced by the
    /// storage layer, not by a racy pre-check.
    pub async fn create_user(&self, payload: DBUserCreate) -> Result<Uuid, AppError> {
        let uid = token::new_id();
        let now = Utc::now();
        let txn = self.database_connection.begin().await?;

        let insert = User::insert(UserActive {
            id: Set(uid),
            name: Set(payload.name),
            email: Set(payload.email),
            phone: Set(payload.phone),
            first_name: Set(payload.first_name),
            last_name: Set(payload.last_name),
            birthday: Set(payload.birthday),
            email_verified: Set(false),
            password_hash: Set(payload.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&txn)
        .await;

        if let Err(err) = insert {
            if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                return Err(AppError::Conflict(
                    "name, email or phone already taken".to_string(),
                ));
            }
            return Err(err.into());
        }

        txn.commit().await?;
        Ok(uid)
    }

    /// Sole writer of password hashes. Takes the plaintext, stores the hash.
    pub async fn update_user_password(&self, user_id: Uuid, plaintext: &str) -> Result<(), AppError> {
        let hash =
            encrypt(plaintext).map_err(|_| AppError::Internal("password hash failed".into()))?;
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.password_hash = Set(hash);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }

    pub async fn update_user_name(&self, user_id: Uuid, name: String) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.name = Set(name);
        am.updated_at = Set(Utc::now());
        self.apply_unique_update(am).await
    }

    pub async fn update_user_email(&self, user_id: Uuid, email: String) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.email = Set(email);
        am.email_verified = Set(false);
        am.updated_at = Set(Utc::now());
        self.apply_unique_update(am).await
    }

    pub async fn update_user_phone(
        &self,
        user_id: Uuid,
        phone: Option<String>,
    ) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.phone = Set(phone);
        am.updated_at = Set(Utc::now());
        self.apply_unique_update(am).await
    }

    pub async fn mark_email_verified(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.email_verified = Set(true);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }

    async fn apply_unique_update(&self, am: UserActive) -> Result<(), AppError> {
        match am.update(&self.database_connection).await {
            Ok(_) => Ok(()),
            Err(err) => {
                if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                    return Err(AppError::Conflict("value already taken".to_string()));
                }
                Err(err.into())
            }
        }
    }
}
