use crate::session::SessionCoordinator;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::session::SignOutReq;
use actix_web::{post, web};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct Response {}

/// Always answers 200. Whether the keep-signed token survives the sign-out is
/// the coordinator's policy, not the client's choice.
#[post("")]
async fn signout(
    _req: actix_web::HttpRequest,
    coordinator: web::Data<SessionCoordinator>,
    body: web::Json<SignOutReq>,
) -> ApiResult<Response> {
    coordinator.sign_out(body.token.as_deref()).await?;

    Ok(ApiResponse::EmptyOk)
}
