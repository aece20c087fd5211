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
pub struct ConfirmReq {
    pub token: String,
}

#[derive(Serialize, Deserialize)]
pub struct Response {}

#[post("")]
async fn confirm(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<ConfirmReq>,
) -> ApiResult<Response> {
    let (token_id, secret) = extract_client_token(&body.token).ok_or(AppError::Invalid)?;

    let user = db
        .consume_request_token(&token_id, &secret, TokenPurpose::EmailVerify, Utc::now())
        .await?;

    db.mark_email_verified(user.id).await?;

    Ok(ApiResponse::EmptyOk)
}
