use crate::config::config;
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::mail::SendEmail;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::TokenPurpose;
use crate::utils::mail::send_email;
use crate::utils::token::construct_client_token;
use actix_web::{post, web};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
pub struct ForgotReq {
    pub identifier: String,
}

#[derive(Serialize, Deserialize)]
pub struct Response {}

/// Always 202, whether or not the identifier resolves; the response must not
/// say which accounts exist. When it does resolve, a reset token goes out by
/// mail and every earlier reset link for that user dies.
#[post("")]
async fn forgot(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<ForgotReq>,
) -> ApiResult<Response> {
    match db.find_by_identifier(&body.identifier).await {
        Ok(user) => {
            let ttl = Duration::minutes(config().session.reset_ttl_mins);
            let (token_id, secret) = db
                .issue_request_token(user.id, TokenPurpose::PasswordReset, Some(ttl), Utc::now())
                .await?;
            let reset_token = construct_client_token(&token_id, &secret);

            let _ = send_email(SendEmail {
                from: config().mail.from.clone(),
                to: vec![user.email],
                subject: "Reset your password".to_string(),
                text: Some(format!(
                    "A password reset was requested for your account. If this wasn't you, ignore this mail.\n\nYour reset token: {}",
                    reset_token
                )),
                ..Default::default()
            })
            .await;
        }
        Err(AppError::NotFound) => {}
        Err(other) => return Err(other),
    }

    Ok(ApiResponse::Accepted)
}
