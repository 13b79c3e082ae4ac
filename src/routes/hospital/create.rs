use std::sync::Arc;

use actix_web::{post, web};
use entity::hospital::UPLOAD_NAMESPACE;

use super::validate_name;
use crate::config::AppConfig;
use crate::db::service::DbService;
use crate::types::hospital::{HospitalRes, RHospitalCreate};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::media::{decode_upload, discard_upload, store_upload};
use crate::utils::webutils::AuthenticatedUser;

#[post("")]
async fn create(
    db: web::Data<Arc<DbService>>,
    config: web::Data<AppConfig>,
    caller: web::ReqData<AuthenticatedUser>,
    body: web::Json<RHospitalCreate>,
) -> ApiResult<HospitalRes> {
    let RHospitalCreate { name, image } = body.into_inner();
    let name = validate_name(&name)?;

    let image_path = match image {
        Some(upload) => {
            let bytes = decode_upload(&upload.content_base64)?;
            Some(store_upload(&config.media_root, UPLOAD_NAMESPACE, &upload.filename, bytes).await?)
        }
        None => None,
    };

    let stored = image_path
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned());

    match db.create_hospital(caller.user.id, name, stored).await {
        Ok(hospital) => Ok(ApiResponse::Created(hospital.into())),
        Err(e) => {
            if let Some(path) = &image_path {
                discard_upload(&config.media_root, path).await;
            }
            Err(e)
        }
    }
}
