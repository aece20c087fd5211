use crate::session::SessionCoordinator;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::session::{SessionRes, SignInReq};
use actix_web::{post, web};

#[post("")]
async fn signin(
    _req: actix_web::HttpRequest,
    coordinator: web::Data<SessionCoordinator>,
    body: web::Json<SignInReq>,
) -> ApiResult<SessionRes> {
    let signed = coordinator
        .sign_in(&body.identifier, &body.password, body.remember_me)
        .await?;

    Ok(ApiResponse::Ok(SessionRes::from(signed)))
}
