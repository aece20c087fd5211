use crate::config::config;
use crate::db::postgres_service::PostgresService;
use crate::types::mail::SendEmail;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::TokenPurpose;
use crate::utils::mail::send_email;
use crate::utils::token::construct_client_token;
use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
pub struct VerifyReq {
    pub identifier: String,
}

#[derive(Serialize, Deserialize)]
pub struct Response {}

/// Operator-triggered: mail a verification token to a user's address.
/// No ttl on these; the link stays good until used or superseded.
#[post("")]
async fn request(
    _req: actix_web::HttpRequest,
    _auth: BearerAuth,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<VerifyReq>,
) -> ApiResult<Response> {
    let user = db.find_by_identifier(&body.identifier).await?;

    let (token_id, secret) = db
        .issue_request_token(user.id, TokenPurpose::EmailVerify, None, Utc::now())
        .await?;
    let verify_token = construct_client_token(&token_id, &secret);

    let _ = send_email(SendEmail {
        from: config().mail.from.clone(),
        to: vec![user.email],
        subject: "Verify your email address".to_string(),
        text: Some(format!(
            "Confirm this address belongs to you.\n\nYour verification token: {}",
            verify_token
        )),
        ..Default::default()
    })
    .await;

    Ok(ApiResponse::Accepted)
}
