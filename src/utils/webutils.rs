use std::sync::Arc;

use actix_web::{dev::ServiceRequest, web, HttpMessage};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::user::Model as UserModel;

use crate::config::AppConfig;
use crate::db::service::DbService;
use crate::types::error::AppError;

/// The caller resolved from a bearer token, stored in request extensions.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: UserModel,
    pub token: String,
}

pub async fn validate_token(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let resolved = match (
        req.app_data::<web::Data<Arc<DbService>>>(),
        req.app_data::<web::Data<AppConfig>>(),
    ) {
        (Some(db), Some(config)) => {
            db.resolve_token(credentials.token(), config.auth.token_ttl).await
        }
        _ => Err(AppError::Internal("authentication state not configured".to_string())),
    };

    match resolved {
        Ok(user) => {
            req.extensions_mut().insert(AuthenticatedUser {
                user,
                token: credentials.token().to_string(),
            });
            Ok(req)
        }
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            Err((e.into(), req))
        }
    }
}
