use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::TokenPurpose;
use crate::utils::token::extract_client_token;
use actix_web::{post, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
pub struct ResetReq {
    pub token: String,
    pub new_password: String,
}

#[derive(Serialize, Deserialize)]
pub struct Response {}

/// Consumes the mailed reset token and rehashes the password. The token is
/// burned even from the caller's point of view: a second POST with the same
/// token is a 401.
#[post("")]
async fn reset(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<ResetReq>,
) -> ApiResult<Response> {
    let (token_id, secret) = extract_client_token(&body.token).ok_or(AppError::Invalid)?;

    let user = db
        .consume_request_token(&token_id, &secret, TokenPurpose::PasswordReset, Utc::now())
        .await?;

    db.update_user_password(user.id, &body.new_password).await?;

    Ok(ApiResponse::EmptyOk)
}
