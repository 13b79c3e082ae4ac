use crate::accounts;
use crate::config::AppConfig;
use crate::db::service::DbService;
use crate::services::AuthServices;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::{RTokenCreate, TokenCreateRes};
use actix_web::{post, web};
use std::sync::Arc;

#[post("")]
async fn token(
    db: web::Data<Arc<DbService>>,
    config: web::Data<AppConfig>,
    auth: web::Data<AuthServices>,
    body: web::Json<RTokenCreate>,
) -> ApiResult<TokenCreateRes> {
    let user = accounts::authenticate(
        db.get_ref().as_ref(),
        &auth.hasher,
        &body.email,
        &body.password,
    )
    .await?;

    let token = db
        .get_or_create_token(user.id, auth.tokens.as_ref(), config.auth.token_ttl)
        .await?;

    Ok(ApiResponse::Ok(TokenCreateRes { token }))
}
