use crate::db::service::DbService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{post, web};
use std::sync::Arc;

#[post("")]
async fn logout(
    db: web::Data<Arc<DbService>>,
    caller: web::ReqData<AuthenticatedUser>,
) -> ApiResult<()> {
    db.revoke_token(&caller.token).await?;
    tracing::info!(user_id = %caller.user.id, "token revoked");
    Ok(ApiResponse::NoContent)
}
