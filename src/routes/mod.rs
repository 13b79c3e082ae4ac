use crate::config::AppConfig;
use crate::types::error::AppError;
use crate::utils::webutils::validate_token;
use actix_web::middleware::Condition;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub mod health;
pub mod hospital;
pub mod user;

/// Large enough for a base64 encoded hospital image.
pub const JSON_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn configure_routes(cfg: &mut web::ServiceConfig, config: &AppConfig) {
    let user_auth = HttpAuthentication::bearer(validate_token);

    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );

    cfg.service(
        web::scope("/health").service(health::health)
    );
    cfg.service(
        web::scope("/users")
            .service(
                web::scope("/create")
                    .service(user::create::create)
            )
            .service(
                web::scope("/token")
                    .service(user::token::token)
            )
            .service(
                web::scope("/logout")
                    .service(user::logout::logout)
                    .wrap(user_auth.clone())
            )
            .service(
                web::resource("/me")
                    .route(web::get().to(user::me::retrieve))
                    .route(web::patch().to(user::me::update))
                    .wrap(user_auth.clone())
            )
            .service(
                web::resource("/all")
                    .route(web::get().to(user::all::list))
                    .wrap(Condition::new(config.auth.users_list_requires_auth, user_auth.clone()))
            )
    );
    cfg.service(
        web::scope("/hospitals")
            .service(hospital::create::create)
            .service(hospital::list::list)
            .wrap(user_auth)
    );
}
