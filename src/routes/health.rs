use std::sync::Arc;

use actix_web::{get, web};

use crate::db::service::DbService;
use crate::types::response::{ApiResponse, ApiResult};

#[get("")]
async fn health(db: web::Data<Arc<DbService>>) -> ApiResult<()> {
    db.connection().ping().await?;
    Ok(ApiResponse::EmptyOk)
}
