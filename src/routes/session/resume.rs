use crate::session::SessionCoordinator;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::session::{ResumeReq, SessionRes};
use actix_web::{post, web};

/// Trade a parked keep-signed token for a session. The token rotates on every
/// successful resume; the client must store the replacement from the body.
#[post("")]
async fn resume(
    _req: actix_web::HttpRequest,
    coordinator: web::Data<SessionCoordinator>,
    body: web::Json<ResumeReq>,
) -> ApiResult<SessionRes> {
    let signed = coordinator.resume(&body.token).await?;

    Ok(ApiResponse::Ok(SessionRes::from(signed)))
}
