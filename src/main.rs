use actix_web::{middleware::Logger, web, App, HttpServer};
use hospital_backend::config::AppConfig;
use hospital_backend::db::service::DbService;
use hospital_backend::routes::configure_routes;
use hospital_backend::services::AuthServices;
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    hospital_backend::init_tracing();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let addr = format!("0.0.0.0:{}", config.port);

    let db_service = Arc::new(
        DbService::new(&config.db)
            .await
            .map_err(std::io::Error::other)?
    );
    let auth_services = AuthServices::default();

    info!(%addr, media_root = %config.media_root.display(), "Starting server");

    HttpServer::new(move || {
        let routes_config = config.clone();

        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&db_service)))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(auth_services.clone()))
            .configure(move |cfg| configure_routes(cfg, &routes_config))
    })
    .bind(addr)?
    .run()
    .await
}
