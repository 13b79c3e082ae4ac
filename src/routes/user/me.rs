//! `/users/me`: the caller's own profile. Only GET and PATCH are routed, so
//! any other method gets a 405 from the resource.

use crate::accounts::{validate_password, validate_user_name};
use crate::config::AppConfig;
use crate::db::service::DbService;
use crate::services::AuthServices;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RUserUpdate, UserRes};
use crate::utils::password::hash_blocking;
use crate::utils::webutils::AuthenticatedUser;
use actix_web::web;
use std::sync::Arc;

pub async fn retrieve(caller: web::ReqData<AuthenticatedUser>) -> ApiResult<UserRes> {
    Ok(ApiResponse::Ok(caller.into_inner().user.into()))
}

pub async fn update(
    db: web::Data<Arc<DbService>>,
    config: web::Data<AppConfig>,
    auth: web::Data<AuthServices>,
    caller: web::ReqData<AuthenticatedUser>,
    body: web::Json<RUserUpdate>,
) -> ApiResult<UserRes> {
    let RUserUpdate { name, password } = body.into_inner();
    if let Some(name) = &name {
        validate_user_name(name)?;
    }

    let password_hash = match password {
        Some(password) => {
            validate_password(&password, config.auth.min_password_length)?;
            Some(hash_blocking(&auth.hasher, &password).await?)
        }
        None => None,
    };

    let user = db
        .update_user_profile(caller.user.id, name, password_hash)
        .await?;

    Ok(ApiResponse::Ok(user.into()))
}
