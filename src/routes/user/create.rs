use crate::accounts::{self, validate_password, NewUser};
use crate::config::AppConfig;
use crate::db::service::DbService;
use crate::services::AuthServices;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RUserCreate, UserRes};
use actix_web::{post, web};
use std::sync::Arc;

#[post("")]
async fn create(
    db: web::Data<Arc<DbService>>,
    config: web::Data<AppConfig>,
    auth: web::Data<AuthServices>,
    body: web::Json<RUserCreate>,
) -> ApiResult<UserRes> {
    let RUserCreate { email, password, name } = body.into_inner();
    validate_password(&password, config.auth.min_password_length)?;

    let user = accounts::create_user(
        db.get_ref().as_ref(),
        &auth.hasher,
        NewUser::new(email, password).with_name(name),
    )
    .await?;

    Ok(ApiResponse::Created(user.into()))
}
