use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{DBUserCreate, RUserCreate, UserCreateRes};
use crate::utils::token::encrypt;
use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

#[post("")]
async fn create(
    _req: actix_web::HttpRequest,
    _auth: BearerAuth,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RUserCreate>,
) -> ApiResult<UserCreateRes> {
    let body = body.into_inner();

    let password_hash =
        encrypt(&body.password).map_err(|_| AppError::Internal("password hash failed".into()))?;

    let user_id = db
        .create_user(DBUserCreate {
            name: body.name,
            email: body.email,
            phone: body.phone,
            first_name: body.first_name,
            last_name: body.last_name,
            birthday: body.birthday,
            password_hash,
        })
        .await?;

    Ok(ApiResponse::Created(UserCreateRes { user_id }))
}
