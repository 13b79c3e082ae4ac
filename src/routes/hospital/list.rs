use std::sync::Arc;

use actix_web::{get, web};

use crate::db::service::DbService;
use crate::types::hospital::{HospitalQuery, HospitalRes};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::AuthenticatedUser;

#[get("")]
async fn list(
    db: web::Data<Arc<DbService>>,
    caller: web::ReqData<AuthenticatedUser>,
    query: web::Query<HospitalQuery>,
) -> ApiResult<Vec<HospitalRes>> {
    let hospitals = db
        .list_hospitals_for_owner(caller.user.id, query.name.as_deref())
        .await?;
    Ok(ApiResponse::Ok(hospitals.into_iter().map(HospitalRes::from).collect()))
}
